/// Failure of an operation-region handler or of a host primitive it called.
///
/// Host primitives report their own failures through [`RegionError::Platform`]
/// (or any other variant); handlers pass them on without reinterpretation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// Allocating the per-region context failed.
    #[error("out of memory")]
    OutOfMemory,
    /// The host could not establish a memory or I/O mapping.
    #[error("mapping failed")]
    MappingFailed,
    /// A required namespace object does not exist.
    #[error("not found")]
    NotFound,
    /// Unsupported access width, unknown operation or malformed region.
    #[error("invalid argument")]
    InvalidArgument,
    /// Any other failure reported by a host primitive.
    #[error("platform error: {0}")]
    Platform(&'static str),
}
