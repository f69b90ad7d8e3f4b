use super::*;

/// The path of a light ray leaving `object`, bouncing once on a mirror at
/// `reflection`, and reaching `viewer`.
///
/// `virtual_object` is the image of `object` in the mirror: the viewer
/// sees it in the direction of `reflection`, as if light traveled straight
/// from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayPath {
    pub object: Point,
    pub reflection: Point,
    pub viewer: Point,
    pub virtual_object: Point,
}

impl RayPath {
    /// The leg of the path going from the object to the mirror
    #[inline]
    #[must_use]
    pub fn incident(&self) -> Segment {
        Segment::new(self.object, self.reflection)
    }

    /// The leg of the path going from the mirror to the viewer
    #[inline]
    #[must_use]
    pub fn reflected(&self) -> Segment {
        Segment::new(self.reflection, self.viewer)
    }

    /// The apparent straight path, from the viewer to the virtual object
    #[inline]
    #[must_use]
    pub fn sight(&self) -> Segment {
        Segment::new(self.viewer, self.virtual_object)
    }

    /// Total distance traveled by the light.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        self.incident().length() + self.reflected().length()
    }
}

impl GeometryCtx {
    /// Finds the point of `mirror` a ray from `object` bounces off of to reach `viewer`.
    ///
    /// The virtual image of `object` is computed first, then the sight
    /// segment from `viewer` to it must cross the (finite) `mirror`
    /// at exactly one point, otherwise, this fails with
    /// [`GeometryError::PathNotOnMirror`].
    ///
    /// Fails with [`GeometryError::DegenerateMirror`] if `mirror` has no line.
    pub fn trace_single_reflection(
        &self,
        object: &Point,
        viewer: &Point,
        mirror: &Segment,
    ) -> Result<RayPath, GeometryError> {
        let virtual_object = self.reflect_point(object, mirror)?;

        let sight = Segment::new(*viewer, virtual_object);

        let &[reflection] = sight.intersect(mirror, self.eps).as_slice() else {
            return Err(GeometryError::PathNotOnMirror);
        };

        Ok(RayPath {
            object: *object,
            reflection,
            viewer: *viewer,
            virtual_object,
        })
    }

    /// Traces a path off each mirror in `mirrors`, independently.
    ///
    /// Yields the index of the mirror along with the outcome, failures included.
    pub fn trace_each<'a>(
        &self,
        object: &Point,
        viewer: &Point,
        mirrors: &'a [Segment],
    ) -> impl Iterator<Item = (usize, Result<RayPath, GeometryError>)> + 'a {
        let (ctx, object, viewer) = (*self, *object, *viewer);

        mirrors
            .iter()
            .enumerate()
            .map(move |(i, mirror)| (i, ctx.trace_single_reflection(&object, &viewer, mirror)))
    }

    /// Like [`Self::trace_each`], but only keeps the successfully traced paths.
    pub fn trace_all(
        &self,
        object: &Point,
        viewer: &Point,
        mirrors: &[Segment],
    ) -> Vec<(usize, RayPath)> {
        self.trace_each(object, viewer, mirrors)
            .filter_map(|(i, res)| res.ok().map(|path| (i, path)))
            .collect()
    }
}
