//! Error types for mesh generation.

/// Errors raised when generation parameters or an input mesh are invalid.
///
/// Generation never recovers from these: the caller gets the error and no
/// partially built mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A base vertex has zero length or a non-finite coordinate.
    #[error("vertex {index} is degenerate (zero-length or non-finite)")]
    DegenerateVertex { index: usize },

    /// A triangle references the same vertex twice, or two of its corners coincide.
    #[error("triangle {triangle} has repeated or coincident corners")]
    DegenerateTriangle { triangle: usize },

    /// A triangle references a vertex outside the mesh's own pool.
    #[error("triangle {triangle} references vertex {index}, but the pool holds {len}")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        len: usize,
    },

    /// The vertex pool would no longer be addressable with `u32` indices.
    #[error("{iterations} iterations would overflow the u32 index space")]
    IndexOverflow { iterations: u32 },

    /// Noise frequency must be finite and positive.
    #[error("noise frequency must be finite and positive, got {0}")]
    InvalidFrequency(f32),

    /// Displacement bounds must satisfy `0 < min <= max`.
    #[error("displacement bounds must satisfy 0 < min <= max, got ({min}, {max})")]
    InvalidCurveBounds { min: f32, max: f32 },

    /// Displacement requires a subdivided, unit-normalized mesh.
    #[error("mesh must be subdivided and normalized before displacement")]
    NotNormalized,

    /// Displacement already ran; it must not run again or be followed by subdivision.
    #[error("mesh has already been displaced")]
    AlreadyDisplaced,
}

/// Error returned when a parameter name (e.g. from the command line) is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseParamError {
    /// Which parameter was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated accepted names.
    pub expected: &'static str,
}
