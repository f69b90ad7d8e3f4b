//! Planar mirror optics in the euclidean plane.
//!
//! Mirrors are finite line segments. Everything in this crate is a pure
//! function of its inputs: reflecting points and shapes across a mirror,
//! testing whether a point "sees" a mirror, and tracing the single-bounce
//! light path from an object, off a mirror, to a viewer.

mod config;
mod error;
mod line;
mod reflect;
pub mod scene;
mod shape;
mod trace;
mod visibility;

pub use config::*;
pub use error::*;
pub use line::*;
pub use shape::*;
pub use trace::*;

pub use arrayvec;
pub use nalgebra;

use nalgebra::{Matrix2, Unit, Vector2};

pub type Float = f64;

/// A position (or a displacement) in the plane.
pub type Point = Vector2<Float>;

/// The tolerance used by [`GeometryCtx::default`].
pub const DEFAULT_EPS: Float = 1e-9;

/// Carries the tolerance used for every floating point comparison
/// (coincident points, colinearity, parallelism) of the operations
/// implemented on it.
///
/// `eps` must be positive, small enough not to merge points the caller
/// considers distinct, and large enough to absorb the roundoff errors
/// accumulated by a handful of vector operations at the caller's scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryCtx {
    eps: Float,
}

impl Default for GeometryCtx {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_EPS)
    }
}

impl GeometryCtx {
    #[inline]
    #[must_use]
    pub fn new(eps: Float) -> Self {
        debug_assert!(eps > 0.0, "eps must be positive, got {eps}");
        Self { eps }
    }

    #[inline]
    #[must_use]
    pub const fn eps(&self) -> Float {
        self.eps
    }
}

/// Reflects `point` across the infinite line through `mirror`,
/// with the default tolerance. See [`GeometryCtx::reflect_point`].
#[inline]
pub fn reflect_point(point: &Point, mirror: &Segment) -> Result<Point, GeometryError> {
    GeometryCtx::default().reflect_point(point, mirror)
}

/// See [`GeometryCtx::reflect_shape`].
#[inline]
pub fn reflect_shape(shape: &Shape, mirror: &Segment) -> Result<VirtualShape, GeometryError> {
    GeometryCtx::default().reflect_shape(shape, mirror)
}

/// See [`GeometryCtx::is_projected_on_segment`].
#[inline]
#[must_use]
pub fn is_projected_on_segment(point: &Point, start: &Point, end: &Point) -> bool {
    GeometryCtx::default().is_projected_on_segment(point, start, end)
}

/// See [`GeometryCtx::trace_single_reflection`].
#[inline]
pub fn trace_single_reflection(
    object: &Point,
    viewer: &Point,
    mirror: &Segment,
) -> Result<RayPath, GeometryError> {
    GeometryCtx::default().trace_single_reflection(object, viewer, mirror)
}

#[cfg(test)]
pub(crate) fn assert_close(a: &Point, b: &Point) {
    assert!((a - b).norm() < 1e-6, "expected {b:?}, got {a:?}");
}
