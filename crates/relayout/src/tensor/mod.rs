//! Host-side tensor types shared by kernels and engine implementations.

mod dtype;
mod host_tensor;
mod shape;

pub use dtype::DType;
pub use host_tensor::{Tensor, TensorData};
pub use shape::Shape;
