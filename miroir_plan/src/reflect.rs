use super::*;

impl GeometryCtx {
    /// Returns the orthogonal projection of `p` on `line`, computed as the
    /// intersection of `line` with its perpendicular through `p`.
    pub(crate) fn project(&self, p: &Point, line: &Line) -> Result<Point, GeometryError> {
        line.intersection(&line.perpendicular_through(p), self.eps)
            .ok_or_else(|| {
                log::warn!("no intersection between {line:?} and its perpendicular through {p:?}");
                GeometryError::NoIntersection
            })
    }

    /// Returns the mirror image of `point` across the infinite line going through `mirror`'s endpoints.
    ///
    /// Points on that line are their own image.
    ///
    /// Fails with [`GeometryError::DegenerateMirror`] if `mirror`'s endpoints are within `eps` of each other.
    pub fn reflect_point(&self, point: &Point, mirror: &Segment) -> Result<Point, GeometryError> {
        let line = mirror
            .try_line(self.eps)
            .ok_or(GeometryError::DegenerateMirror)?;

        if line.contains(point, self.eps) {
            return Ok(*point);
        }

        let foot = self.project(point, &line)?;

        Ok(2.0 * foot - point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror() -> Segment {
        Segment::new([1., -2.], [4., 7.])
    }

    #[test]
    fn test_reflect_across_axis() {
        let m = Segment::new([0., 0.], [0., 10.]);

        assert_close(&reflect_point(&Point::new(5., 5.), &m).unwrap(), &Point::new(-5., 5.));
        // the image doesn't depend on the point being "in front" of the segment
        assert_close(&reflect_point(&Point::new(3., 40.), &m).unwrap(), &Point::new(-3., 40.));
    }

    #[test]
    fn test_reflect_diagonal() {
        let m = Segment::new([0., 0.], [1., 1.]);
        assert_close(&reflect_point(&Point::new(3., 1.), &m).unwrap(), &Point::new(1., 3.));
    }

    #[test]
    fn test_involution() {
        let m = mirror();

        for p in [[0., 0.], [-13.5, 2.25], [100., -40.], [2., 1.]] {
            let p = Point::from(p);
            let image = reflect_point(&p, &m).unwrap();
            assert_close(&reflect_point(&image, &m).unwrap(), &p);
        }
    }

    #[test]
    fn test_fixed_points() {
        let m = mirror();
        let line = m.try_line(DEFAULT_EPS).unwrap();

        for t in [-10., 0., 3.5, 25.] {
            let p = line.at(t);
            assert_eq!(reflect_point(&p, &m).unwrap(), p);
        }
    }

    #[test]
    fn test_distance_preservation() {
        let m = mirror();
        let line = m.try_line(DEFAULT_EPS).unwrap();

        for p in [[0., 0.], [-13.5, 2.25], [100., -40.]] {
            let p = Point::from(p);
            let image = reflect_point(&p, &m).unwrap();

            assert!((line.distance_to(&p) - line.distance_to(&image)).abs() < 1e-9);
            // the image is on the other side
            assert!((p - line.origin()).perp(line.direction().as_ref()).signum()
                != (image - line.origin()).perp(line.direction().as_ref()).signum());
        }
    }

    #[test]
    fn test_degenerate_mirror() {
        let m = Segment::new([2., 2.], [2., 2.]);

        assert_eq!(
            reflect_point(&Point::new(0., 0.), &m),
            Err(GeometryError::DegenerateMirror)
        );
        // even for points "on" it
        assert_eq!(
            reflect_point(&Point::new(2., 2.), &m),
            Err(GeometryError::DegenerateMirror)
        );
    }

    #[test]
    fn test_custom_tolerance() {
        let ctx = GeometryCtx::new(0.5);
        let m = Segment::new([0., 0.], [10., 0.]);

        // within tolerance of the mirror line: treated as lying on it
        let p = Point::new(3., 0.25);
        assert_eq!(ctx.reflect_point(&p, &m).unwrap(), p);

        let short = Segment::new([0., 0.], [0.3, 0.]);
        assert_eq!(ctx.reflect_point(&p, &short), Err(GeometryError::DegenerateMirror));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "eps must be positive")]
    fn test_non_positive_tolerance() {
        let _ = GeometryCtx::new(0.);
    }
}
