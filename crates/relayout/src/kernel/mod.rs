//! Operator kernels running at the engine/dense boundary.

mod context;
mod error;
pub mod registry;
mod to_dense;

pub use context::ExecutionContext;
pub use error::{KernelError, KernelResult};
pub use to_dense::{ToDenseOp, TO_DENSE};

/// A stateless operator kernel invoked once per graph edge.
///
/// Implementations are immutable after construction and hold only their
/// configuration attributes; every invocation operates solely on the
/// execution context it is handed, so one instance may serve concurrent
/// invocations across host worker threads.
pub trait OpKernel: Send + Sync {
    /// Operation name the kernel implements.
    fn name(&self) -> &str;

    /// Runs the kernel against a single invocation's context.
    fn execute(&self, ctx: &mut dyn ExecutionContext) -> KernelResult<()>;
}
