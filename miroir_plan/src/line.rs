use arrayvec::ArrayVec;

use super::*;

/// An infinite line, stored as a point on it and a unit direction vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    origin: Point,
    dir: Unit<Point>,
}

impl Line {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, dir: Unit<Point>) -> Self {
        Self {
            origin: origin.into(),
            dir,
        }
    }

    /// Returns `None` if `dir`'s norm is not greater than `eps`.
    #[inline]
    #[must_use]
    pub fn try_new(origin: impl Into<Point>, dir: Point, eps: Float) -> Option<Self> {
        Unit::try_new(dir, eps).map(|dir| Self::new(origin, dir))
    }

    /// The line going through `a` and `b`, directed from `a` to `b`.
    ///
    /// Returns `None` if `a` and `b` are (approximately) the same point.
    #[inline]
    #[must_use]
    pub fn through(a: &Point, b: &Point, eps: Float) -> Option<Self> {
        Self::try_new(*a, b - a, eps)
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> &Point {
        &self.origin
    }

    #[inline]
    #[must_use]
    pub const fn direction(&self) -> &Unit<Point> {
        &self.dir
    }

    /// The direction rotated a quarter turn counterclockwise
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Unit<Point> {
        // SAFETY: rotations preserve euclidean norms
        Unit::new_unchecked(Point::new(-self.dir.y, self.dir.x))
    }

    /// The line through `p` orthogonal to `self`.
    #[inline]
    #[must_use]
    pub fn perpendicular_through(&self, p: &Point) -> Self {
        Self::new(*p, self.normal())
    }

    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.dir.as_ref() * t
    }

    /// The `t` such that [`self.at(t)`](Self::at) is the orthogonal projection of `p` on `self`
    #[inline]
    #[must_use]
    pub fn param(&self, p: &Point) -> Float {
        (p - self.origin).dot(self.dir.as_ref())
    }

    #[inline]
    #[must_use]
    pub fn distance_to(&self, p: &Point) -> Float {
        (p - self.origin).perp(self.dir.as_ref()).abs()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point, eps: Float) -> bool {
        self.distance_to(p) <= eps
    }

    #[inline]
    #[must_use]
    pub fn is_parallel_to(&self, other: &Self, eps: Float) -> bool {
        self.dir.perp(other.dir.as_ref()).abs() <= eps
    }

    /// Returns a vector `[t, s]` such that `self.at(t) == other.at(s)`.
    ///
    /// Returns `None` if the two lines are exactly parallel.
    #[inline]
    #[must_use]
    pub fn intersection_coordinates(&self, other: &Self) -> Option<Point> {
        let a = Matrix2::from_columns(&[self.dir.into_inner(), -other.dir.into_inner()]);

        a.try_inverse().map(|inv| inv * (other.origin - self.origin))
    }

    /// The point shared by both lines, `None` if they are (approximately) parallel.
    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Self, eps: Float) -> Option<Point> {
        if self.is_parallel_to(other, eps) {
            return None;
        }

        self.intersection_coordinates(other).map(|v| self.at(v[0]))
    }
}

/// A line segment, the closed set of points between `start` and `end`.
///
/// Mirrors are segments. A segment whose endpoints coincide is
/// representable, but it has no line to reflect across.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `end - start`
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Point {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        self.direction().norm()
    }

    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.start.lerp(&self.end, 0.5)
    }

    #[inline]
    #[must_use]
    pub fn endpoints(&self) -> [&Point; 2] {
        [&self.start, &self.end]
    }

    /// The infinite line containing this segment, directed from `start` to `end`.
    ///
    /// `None` if the segment is shorter than `eps`.
    #[inline]
    #[must_use]
    pub fn try_line(&self, eps: Float) -> Option<Line> {
        Line::through(&self.start, &self.end, eps)
    }

    /// Whether `p` is within `eps` of this segment.
    #[must_use]
    pub fn contains(&self, p: &Point, eps: Float) -> bool {
        let Some(line) = self.try_line(eps) else {
            return (p - self.start).norm() <= eps;
        };

        let t = line.param(p);
        line.contains(p, eps) && t >= -eps && t <= self.length() + eps
    }

    /// The points shared by `self` and `other`.
    ///
    /// Two segments share either nothing, a single point, or, if they
    /// overlap along a common line, a whole sub-segment. In the last case,
    /// both endpoints of the overlap are returned.
    #[must_use]
    pub fn intersect(&self, other: &Self, eps: Float) -> ArrayVec<Point, 2> {
        let mut points = ArrayVec::new();

        match (self.try_line(eps), other.try_line(eps)) {
            (None, _) => {
                if other.contains(&self.start, eps) {
                    points.push(self.start);
                }
            }
            (Some(_), None) => {
                if self.contains(&other.start, eps) {
                    points.push(other.start);
                }
            }
            (Some(l1), Some(l2)) => match l1.intersection(&l2, eps) {
                Some(p) => {
                    if self.contains(&p, eps) && other.contains(&p, eps) {
                        points.push(p);
                    }
                }
                // parallel, and on the same line
                None if l1.contains(&other.start, eps) => {
                    let (a, b) = (l1.param(&other.start), l1.param(&other.end));
                    let lo = a.min(b).max(0.);
                    let hi = a.max(b).min(self.length());

                    if hi - lo > eps {
                        points.push(l1.at(lo));
                        points.push(l1.at(hi));
                    } else if hi - lo >= -eps {
                        points.push(l1.at(lo));
                    }
                }
                None => {}
            },
        }

        points
    }
}

impl<P: Into<Point>> From<[P; 2]> for Segment {
    #[inline]
    fn from([start, end]: [P; 2]) -> Self {
        Self::new(start, end)
    }
}
