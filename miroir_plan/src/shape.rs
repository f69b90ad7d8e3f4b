use core::slice;

use super::*;

/// Identifies an element of a [`Scene`](crate::scene::Scene).
pub type ElementId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    Polygon,
}

/// A physical object, or its image in a mirror.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Point),
    /// An ordered outline of at least 3 vertices.
    ///
    /// Built directly, nothing enforces that, see [`Shape::validate`].
    Polygon(Vec<Point>),
}

impl Shape {
    #[inline]
    #[must_use]
    pub fn point(p: impl Into<Point>) -> Self {
        Self::Point(p.into())
    }

    #[inline]
    #[must_use]
    pub fn triangle(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        Self::Polygon(vec![a.into(), b.into(), c.into()])
    }

    /// Builds a point from a single vertex, or a polygon from 3 or more.
    pub fn try_from_vertices(
        vertices: impl IntoIterator<Item = impl Into<Point>>,
    ) -> Result<Self, GeometryError> {
        let mut vertices: Vec<Point> = vertices.into_iter().map(Into::into).collect();

        match vertices.len() {
            1 => Ok(Self::Point(vertices.remove(0))),
            n if n >= 3 => Ok(Self::Polygon(vertices)),
            n => Err(GeometryError::InvalidShape { vertices: n }),
        }
    }

    /// Fails with [`GeometryError::InvalidShape`] if this is a polygon of less than 3 vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Self::Polygon(vertices) if vertices.len() < 3 => Err(GeometryError::InvalidShape {
                vertices: vertices.len(),
            }),
            _ => Ok(()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        match self {
            Self::Point(p) => slice::from_ref(p),
            Self::Polygon(vertices) => vertices,
        }
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Point] {
        match self {
            Self::Point(p) => slice::from_mut(p),
            Self::Polygon(vertices) => vertices,
        }
    }

    /// The point light rays are traced from: the shape's position for a
    /// point, the centroid of its vertices for a polygon.
    ///
    /// The shape must be valid, the centroid of an empty polygon is NaN.
    #[must_use]
    pub fn anchor(&self) -> Point {
        let vertices = self.vertices();
        vertices.iter().sum::<Point>() / vertices.len() as Float
    }

    /// Moves every vertex by `delta`
    pub fn translate(&mut self, delta: &Point) {
        self.vertices_mut().iter_mut().for_each(|v| *v += delta);
    }

    /// Maps every vertex with `f`, keeping the kind and the vertex order.
    ///
    /// Stops at the first failure, returning the index of the offending vertex.
    pub fn try_map_vertices<E>(
        &self,
        mut f: impl FnMut(&Point) -> Result<Point, E>,
    ) -> Result<Self, (usize, E)> {
        Ok(match self {
            Self::Point(p) => Self::Point(f(p).map_err(|e| (0, e))?),
            Self::Polygon(vertices) => Self::Polygon(
                vertices
                    .iter()
                    .enumerate()
                    .map(|(i, v)| f(v).map_err(|e| (i, e)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

/// The image of a physical shape in a mirror.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualShape {
    pub shape: Shape,
    /// The scene element this is the image of, if known. Purely informational.
    pub source: Option<ElementId>,
}

impl VirtualShape {
    #[inline]
    #[must_use]
    pub fn with_source(mut self, id: ElementId) -> Self {
        self.source = Some(id);
        self
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

impl GeometryCtx {
    /// Reflects every vertex of `shape` across `mirror`, in order.
    ///
    /// The image of a polygon has the opposite orientation, no attempt is made to restore it.
    ///
    /// If any vertex fails to be reflected, no image is returned.
    /// Polygons of less than 3 vertices are rejected up front.
    pub fn reflect_shape(
        &self,
        shape: &Shape,
        mirror: &Segment,
    ) -> Result<VirtualShape, GeometryError> {
        shape.validate()?;

        shape
            .try_map_vertices(|v| self.reflect_point(v, mirror))
            .map(|shape| VirtualShape {
                shape,
                source: None,
            })
            .map_err(|(vertex, e)| GeometryError::IncompleteShapeReflection {
                vertex,
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_construction() {
        assert_eq!(
            Shape::try_from_vertices([[1., 2.]]),
            Ok(Shape::point([1., 2.]))
        );
        assert_eq!(
            Shape::try_from_vertices([[0., 0.], [1., 0.], [0., 1.]]),
            Ok(Shape::triangle([0., 0.], [1., 0.], [0., 1.]))
        );
        assert_eq!(
            Shape::try_from_vertices([[0., 0.], [1., 0.]]),
            Err(GeometryError::InvalidShape { vertices: 2 })
        );
        assert_eq!(
            Shape::try_from_vertices(Vec::<Point>::new()),
            Err(GeometryError::InvalidShape { vertices: 0 })
        );
    }

    #[test]
    fn test_anchor() {
        assert_eq!(Shape::point([3., 4.]).anchor(), Point::new(3., 4.));
        assert_close(
            &Shape::triangle([0., 0.], [6., 0.], [0., 3.]).anchor(),
            &Point::new(2., 1.),
        );
    }

    #[test]
    fn test_reflect_point_shape() {
        let m = Segment::new([0., 0.], [0., 10.]);
        let image = reflect_shape(&Shape::point([5., 5.]), &m).unwrap();

        assert_eq!(image.kind(), ShapeKind::Point);
        assert_eq!(image.source, None);
        assert_close(&image.shape.vertices()[0], &Point::new(-5., 5.));
    }

    #[test]
    fn test_reflect_triangle() {
        let m = Segment::new([0., 0.], [10., 0.]);
        let triangle = Shape::triangle([1., 1.], [4., 2.], [2., 5.]);

        let image = reflect_shape(&triangle, &m).unwrap().with_source(7);

        assert_eq!(image.kind(), ShapeKind::Polygon);
        assert_eq!(image.source, Some(7));

        let expected = [[1., -1.], [4., -2.], [2., -5.]];
        assert_eq!(image.shape.vertices().len(), 3);
        for (v, e) in image.shape.vertices().iter().zip(expected) {
            assert_close(v, &Point::from(e));
        }
    }

    #[test]
    fn test_reflection_flips_orientation() {
        fn signed_area(vertices: &[Point]) -> Float {
            let n = vertices.len();
            (0..n)
                .map(|i| vertices[i].perp(&vertices[(i + 1) % n]))
                .sum::<Float>()
                / 2.
        }

        let m = Segment::new([-3., 1.], [5., 8.]);
        let triangle = Shape::triangle([1., 1.], [4., 2.], [2., 5.]);
        let image = reflect_shape(&triangle, &m).unwrap();

        let before = signed_area(triangle.vertices());
        let after = signed_area(image.shape.vertices());

        assert!((before + after).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_mirror_fails_whole_shape() {
        let m = Segment::new([1., 1.], [1., 1.]);
        let triangle = Shape::triangle([1., 1.], [4., 2.], [2., 5.]);

        // the first vertex already fails: nothing is returned
        assert_eq!(
            reflect_shape(&triangle, &m),
            Err(GeometryError::IncompleteShapeReflection {
                vertex: 0,
                source: Box::new(GeometryError::DegenerateMirror),
            })
        );

        assert!(reflect_shape(&Shape::point([0., 3.]), &m).is_err());
    }

    #[test]
    fn test_malformed_polygon() {
        let m = Segment::new([0., 0.], [0., 10.]);

        let segment_like = Shape::Polygon(vec![Point::new(1., 1.), Point::new(2., 2.)]);
        assert_eq!(segment_like.validate(), Err(GeometryError::InvalidShape { vertices: 2 }));
        assert_eq!(
            reflect_shape(&segment_like, &m),
            Err(GeometryError::InvalidShape { vertices: 2 })
        );

        let empty = Shape::Polygon(Vec::new());
        assert_eq!(
            reflect_shape(&empty, &m),
            Err(GeometryError::InvalidShape { vertices: 0 })
        );

        assert_eq!(Shape::triangle([0., 0.], [1., 0.], [0., 1.]).validate(), Ok(()));
        assert_eq!(Shape::point([0., 0.]).validate(), Ok(()));
    }
}
