//! Boundary to the external acceleration engine.
//!
//! The engine owns the optimized internal layout format; this module only
//! models the metadata it attaches to tensors leaving an optimized subgraph
//! and the conversion primitive it exposes for turning those tensors back
//! into dense row-major storage.

mod descriptor;
mod primitive;

pub use descriptor::{dense_dims, EngineLayout, LayoutDescriptor, LayoutHandle};
pub use primitive::ConversionPrimitive;
