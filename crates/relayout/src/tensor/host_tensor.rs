//! Dense host tensor used as the standard interchange representation.

use anyhow::{bail, Result};

use super::{dtype::DType, shape::Shape};

/// Typed payload backing a [`Tensor`].
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    F32(Vec<f32>),
    I32(Vec<i32>),
}

/// Dense, owned tensor in standard row-major layout.
///
/// Slots in an execution context hold tensors behind `Arc` so a kernel can
/// forward an input to an output without copying the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: TensorData,
}

impl Tensor {
    /// Builds an `F32` tensor, validating the payload length against the shape.
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self> {
        if data.len() != shape.num_elements() {
            bail!(
                "tensor data length ({}) does not match shape {:?}",
                data.len(),
                shape.dims()
            );
        }
        Ok(Tensor {
            shape,
            data: TensorData::F32(data),
        })
    }

    /// Builds an `I32` tensor, validating the payload length against the shape.
    pub fn from_i32(shape: Shape, data: Vec<i32>) -> Result<Self> {
        if data.len() != shape.num_elements() {
            bail!(
                "tensor data length ({}) does not match shape {:?}",
                data.len(),
                shape.dims()
            );
        }
        Ok(Tensor {
            shape,
            data: TensorData::I32(data),
        })
    }

    /// Returns a zero-initialized tensor of the requested shape and dtype.
    ///
    /// This is what a host allocator hands back for a fresh output slot.
    pub fn zeroed(shape: Shape, dtype: DType) -> Self {
        let len = shape.num_elements();
        let data = match dtype {
            DType::F32 => TensorData::F32(vec![0.0; len]),
            DType::I32 => TensorData::I32(vec![0; len]),
        };
        Tensor { shape, data }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape.num_elements()
    }

    /// Whether the tensor holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The logical shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Scalar type of the payload.
    pub fn dtype(&self) -> DType {
        match self.data {
            TensorData::F32(_) => DType::F32,
            TensorData::I32(_) => DType::I32,
        }
    }

    /// Borrows the `f32` payload, panicking if the dtype differs.
    pub fn data(&self) -> &[f32] {
        match &self.data {
            TensorData::F32(values) => values,
            _ => panic!("tensor data is not stored as f32"),
        }
    }

    /// Borrows the `i32` payload, panicking if the dtype differs.
    pub fn data_i32(&self) -> &[i32] {
        match &self.data {
            TensorData::I32(values) => values,
            _ => panic!("tensor data is not stored as i32"),
        }
    }

    /// Raw byte view of the payload, for handing to conversion primitives.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            TensorData::F32(values) => bytemuck::cast_slice(values),
            TensorData::I32(values) => bytemuck::cast_slice(values),
        }
    }

    /// Mutable raw byte view of the payload.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.data {
            TensorData::F32(values) => bytemuck::cast_slice_mut(values),
            TensorData::I32(values) => bytemuck::cast_slice_mut(values),
        }
    }
}
