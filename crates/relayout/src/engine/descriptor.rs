//! Layout metadata attached to tensors crossing the engine boundary.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::tensor::Shape;

/// Opaque handle to the precomputed dense destination layout.
///
/// Created by the engine together with the surrounding [`EngineLayout`] and
/// forwarded untouched to [`ConversionPrimitive::convert`]; the core never
/// inspects it.
///
/// [`ConversionPrimitive::convert`]: super::ConversionPrimitive::convert
pub type LayoutHandle = Arc<dyn Any + Send + Sync>;

/// Describes how a tensor arriving at the conversion boundary is stored.
#[derive(Clone)]
pub enum LayoutDescriptor {
    /// Already dense row-major; the optimized subgraph decided no conversion
    /// was needed for this edge.
    Dense,
    /// Stored in the engine's internal layout.
    Engine(EngineLayout),
}

impl LayoutDescriptor {
    /// Whether the tensor is in the engine's internal layout.
    pub fn is_engine(&self) -> bool {
        matches!(self, LayoutDescriptor::Engine(_))
    }
}

impl fmt::Debug for LayoutDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutDescriptor::Dense => f.write_str("Dense"),
            LayoutDescriptor::Engine(layout) => f.debug_tuple("Engine").field(layout).finish(),
        }
    }
}

/// Engine-internal placement of a tensor: one (size, stride) pair per
/// dimension, in an engine-defined order that does NOT reliably match the
/// logical dimension order, plus the handle for the dense destination.
#[derive(Clone)]
pub struct EngineLayout {
    sizes: Vec<usize>,
    strides: Vec<usize>,
    dense_handle: LayoutHandle,
}

impl EngineLayout {
    /// Wraps the engine-reported placement.
    ///
    /// Panics if `sizes` and `strides` disagree in length (the engine emits
    /// exactly one pair per dimension) or if the placement is rank 0; every
    /// tensor has at least one axis, so a rank-0 descriptor fails here
    /// rather than mid-kernel during shape reconstruction.
    pub fn new(sizes: Vec<usize>, strides: Vec<usize>, dense_handle: LayoutHandle) -> Self {
        assert_eq!(
            sizes.len(),
            strides.len(),
            "engine layout reported {} sizes but {} strides",
            sizes.len(),
            strides.len()
        );
        assert!(
            !sizes.is_empty(),
            "engine layout must describe at least one dimension"
        );
        EngineLayout {
            sizes,
            strides,
            dense_handle,
        }
    }

    /// Number of dimensions in the placement.
    pub fn dim_count(&self) -> usize {
        self.sizes.len()
    }

    /// Dimension sizes in engine order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Element strides in engine order.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Handle for the dense destination layout precomputed by the engine.
    pub fn dense_handle(&self) -> &LayoutHandle {
        &self.dense_handle
    }

    /// Logical row-major shape reconstructed from the placement.
    pub fn dense_shape(&self) -> Shape {
        Shape::new(dense_dims(&self.sizes, &self.strides))
    }
}

impl fmt::Debug for EngineLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineLayout")
            .field("sizes", &self.sizes)
            .field("strides", &self.strides)
            .finish_non_exhaustive()
    }
}

/// Reconstructs the logical dimension order from (size, stride) pairs.
///
/// The engine does not report which physical dimension corresponds to which
/// logical dimension, and the operator's data-format attribute is not kept
/// consistent with the placement, so neither can be trusted. In a dense
/// layout the dimension with the largest stride is the outermost
/// (slowest-varying) one, so sorting by descending stride recovers the
/// logical order; equal strides (degenerate size-1 axes, coincidental
/// placements) are broken by descending size, making the result a total
/// order over the pair multiset alone.
pub fn dense_dims(sizes: &[usize], strides: &[usize]) -> Vec<usize> {
    debug_assert_eq!(sizes.len(), strides.len());
    let mut pairs: SmallVec<[(usize, usize); 8]> = sizes
        .iter()
        .copied()
        .zip(strides.iter().copied())
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    pairs.into_iter().map(|(size, _stride)| size).collect()
}
