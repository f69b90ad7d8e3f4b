use thiserror::Error;

/// Reasons a geometric query has no result.
///
/// These are ordinary outcomes (a mirror the viewer cannot see, a
/// malformed scene element), never bugs in the caller, and none of them
/// is fatal: batch operations skip the offending mirror or shape and
/// keep going.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeometryError {
    #[error("mirror endpoints coincide, no reflection line exists")]
    DegenerateMirror,

    #[error("lines expected to intersect did not")]
    NoIntersection,

    #[error("the sight line does not cross the mirror segment at a single point")]
    PathNotOnMirror,

    #[error("failed to reflect vertex {vertex}: {source}")]
    IncompleteShapeReflection {
        vertex: usize,
        source: Box<GeometryError>,
    },

    #[error("a shape needs 1 vertex (point) or at least 3 (polygon), got {vertices}")]
    InvalidShape { vertices: usize },
}
