//! Scalar element types carried by dense host tensors.

/// Element type shared by operator declarations and tensor payloads.
///
/// An operator instance declares exactly one `DType`; the host runtime is
/// expected to feed it inputs and output slots of the same type. Kernels
/// treat any disagreement as a fatal configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit IEEE-754 floating point.
    F32,
    /// 32-bit signed integer, used for index and token buffers.
    I32,
}

impl DType {
    /// Bytes occupied by one scalar of this type.
    pub fn size_in_bytes(self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
        }
    }
}
