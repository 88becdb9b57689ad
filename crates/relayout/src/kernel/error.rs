//! Fatal kernel failure modes.

use thiserror::Error;

use crate::tensor::DType;

/// Failure surfaced by a kernel invocation.
///
/// Both variants indicate a misconfigured graph rather than a recoverable
/// runtime condition: the invocation aborts with no partial output, and the
/// host must not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The operator's declared dtype disagrees with the input tensor's
    /// runtime dtype or the required output dtype.
    #[error("operator dtype {op:?} does not match input dtype {input:?} / output dtype {output:?}")]
    DTypeMismatch {
        op: DType,
        input: DType,
        output: DType,
    },

    /// The host allocator refused the output request.
    #[error("failed to allocate {dtype:?} output with dims {dims:?}: {reason}")]
    AllocationFailure {
        dims: Vec<usize>,
        dtype: DType,
        reason: String,
    },
}

/// Convenience alias for results returned by kernel routines.
pub type KernelResult<T> = Result<T, KernelError>;
