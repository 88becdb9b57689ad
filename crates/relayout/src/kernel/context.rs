//! Host execution-context seam consumed by kernels.

use std::sync::Arc;

use crate::engine::{ConversionPrimitive, LayoutDescriptor};
use crate::tensor::{DType, Shape, Tensor};

use super::error::KernelResult;

/// Per-invocation view of the host runtime.
///
/// The host owns slot storage, the allocator, and the engine binding; a
/// kernel only reads its input slots and binds its output slots. Slots hold
/// tensors behind `Arc` so a kernel can forward an input unchanged without
/// copying the payload.
pub trait ExecutionContext {
    /// Input tensor at `slot`.
    fn input(&self, slot: usize) -> &Arc<Tensor>;

    /// Layout descriptor attached to the input at `slot`.
    fn layout(&self, slot: usize) -> &LayoutDescriptor;

    /// Runtime dtype of the input at `slot`.
    fn input_dtype(&self, slot: usize) -> DType;

    /// Dtype required by the consumer of the output at `slot`.
    fn output_dtype(&self, slot: usize) -> DType;

    /// Requests a fresh output buffer from the host allocator.
    ///
    /// Returns the owned buffer for the kernel to fill before binding it via
    /// [`set_output`]. Refusal surfaces as
    /// [`KernelError::AllocationFailure`] and must abort the invocation.
    ///
    /// [`set_output`]: ExecutionContext::set_output
    /// [`KernelError::AllocationFailure`]: super::KernelError::AllocationFailure
    fn allocate_output(&mut self, slot: usize, shape: Shape, dtype: DType) -> KernelResult<Tensor>;

    /// Binds `tensor` to the output at `slot`; ownership passes to the host.
    fn set_output(&mut self, slot: usize, tensor: Arc<Tensor>);

    /// Conversion primitive of the engine that produced the input layouts.
    fn primitive(&self) -> &dyn ConversionPrimitive;
}
