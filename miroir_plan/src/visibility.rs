use super::*;

impl GeometryCtx {
    /// Whether the orthogonal projection of `point` on the line through
    /// `start` and `end` lies on the closed segment `[start, end]`,
    /// i.e. whether `point` is "in front" of that segment.
    ///
    /// If `start` and `end` coincide (within `eps`), the segment has no line
    /// to project on and this returns `point == start`, compared exactly.
    #[must_use]
    pub fn is_projected_on_segment(&self, point: &Point, start: &Point, end: &Point) -> bool {
        let segment = Segment::new(*start, *end);

        let Some(line) = segment.try_line(self.eps) else {
            return point == start;
        };

        if line.contains(point, self.eps) {
            return segment.contains(point, self.eps);
        }

        self.project(point, &line)
            .is_ok_and(|foot| segment.contains(&foot, self.eps))
    }

    /// [`Self::is_projected_on_segment`] with `mirror`'s endpoints
    #[inline]
    #[must_use]
    pub fn faces_mirror(&self, point: &Point, mirror: &Segment) -> bool {
        self.is_projected_on_segment(point, &mirror.start, &mirror.end)
    }
}
