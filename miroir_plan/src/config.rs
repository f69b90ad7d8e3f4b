use super::*;

/// The bounded, axis-aligned area scene elements live in,
/// spanning `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: Float,
    pub height: Float,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Canvas {
    #[inline]
    #[must_use]
    pub const fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// The point of the canvas closest to `p`
    ///
    /// A negative (or NaN) size is treated as zero.
    #[inline]
    #[must_use]
    pub fn clamp(&self, p: &Point) -> Point {
        let max = self.max();
        Point::new(p.x.clamp(0.0, max.x), p.y.clamp(0.0, max.y))
    }

    /// The corner opposite to the origin.
    #[inline]
    fn max(&self) -> Point {
        Point::new(self.width.max(0.0), self.height.max(0.0))
    }

    /// Shrinks `delta` so that translating every point of `points` by it
    /// keeps them all inside the canvas. Points already outside the canvas
    /// are not pulled back in.
    #[must_use]
    pub fn clamp_translation<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Point>,
        delta: &Point,
    ) -> Point {
        let (mut lo, mut hi) = (Point::repeat(Float::NEG_INFINITY), Point::repeat(Float::INFINITY));
        let max = self.max();

        for p in points {
            // bounds on the admissible translation along each axis
            lo = lo.sup(&(-p).inf(&Point::zeros()));
            hi = hi.inf(&(max - p).sup(&Point::zeros()));
        }

        Point::new(delta.x.clamp(lo.x, hi.x), delta.y.clamp(lo.y, hi.y))
    }
}

/// Sizes used when a scene element doesn't specify its own.
///
/// They only matter to whoever draws the scene: the geometry treats
/// viewers and objects as points and mirrors as zero-width segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementDefaults {
    pub viewer_radius: Float,
    pub object_radius: Float,
    pub mirror_thickness: Float,
}

impl Default for ElementDefaults {
    fn default() -> Self {
        Self {
            viewer_radius: 10.0,
            object_radius: 8.0,
            mirror_thickness: 4.0,
        }
    }
}

/// Scene-wide settings, resolved once when a scene is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Tolerance for every geometric comparison, see [`GeometryCtx`]
    pub eps: Float,
    pub canvas: Canvas,
    /// Whether traced ray paths are meant to be displayed.
    /// Paths are computed regardless.
    pub show_rays: bool,
    /// When `false`, only the first mirror of the scene participates.
    pub multiple_mirrors: bool,
    pub defaults: ElementDefaults,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            canvas: Canvas::default(),
            show_rays: true,
            multiple_mirrors: false,
            defaults: ElementDefaults::default(),
        }
    }
}

impl SceneConfig {
    #[inline]
    #[must_use]
    pub fn ctx(&self) -> GeometryCtx {
        GeometryCtx::new(self.eps)
    }
}
