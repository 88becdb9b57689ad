pub mod tensor;

#[cfg(feature = "accel")]
pub mod engine;
#[cfg(feature = "accel")]
pub mod kernel;

pub use tensor::{DType, Shape, Tensor};

#[cfg(feature = "accel")]
pub use engine::{ConversionPrimitive, EngineLayout, LayoutDescriptor, LayoutHandle};
#[cfg(feature = "accel")]
pub use kernel::{ExecutionContext, KernelError, KernelResult, OpKernel, ToDenseOp};
