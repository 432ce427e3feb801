use thiserror::Error;

/// Top-level error type for slab top-face intersection.
#[derive(Debug, Error)]
pub enum SlabclipError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Clip(#[from] ClipError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological lookups and structure.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,
}

/// Errors related to building geometry.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised by a polygon clip engine for inputs it cannot handle.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("fill rule {0:?} is not supported by this clip engine")]
    UnsupportedFillRule(crate::lattice::FillRule),

    #[error("lattice coordinate {0} is outside the exactly representable range")]
    CoordinateOutOfRange(i64),
}

/// Convenience type alias for results using [`SlabclipError`].
pub type Result<T> = std::result::Result<T, SlabclipError>;
