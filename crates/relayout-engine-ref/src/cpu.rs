//! Reference CPU engine: strided source placements and a dense gather.

use std::sync::Arc;

use relayout::engine::{ConversionPrimitive, EngineLayout, LayoutHandle};
use relayout::DType;

/// The engine's own record of a source placement and its dense destination.
///
/// Created alongside the [`EngineLayout`] descriptor it belongs to; the core
/// treats it as an opaque handle and only this engine looks inside.
#[derive(Debug, Clone)]
pub struct CpuDenseLayout {
    sizes: Vec<usize>,
    strides: Vec<usize>,
    elem_bytes: usize,
}

impl CpuDenseLayout {
    pub fn new(sizes: Vec<usize>, strides: Vec<usize>, elem_bytes: usize) -> Self {
        assert_eq!(
            sizes.len(),
            strides.len(),
            "dense layout needs one stride per size"
        );
        CpuDenseLayout {
            sizes,
            strides,
            elem_bytes,
        }
    }
}

/// Reference engine whose conversion is a plain strided gather.
///
/// For a source whose strides already describe a contiguous row-major
/// placement the gather degenerates to an element-by-element identity copy.
#[derive(Debug, Default, Clone)]
pub struct CpuRefEngine;

impl CpuRefEngine {
    pub fn new() -> Self {
        CpuRefEngine
    }

    /// Builds the descriptor an optimized subgraph would attach to a tensor
    /// it stored with the given (size, stride) placement, with the dense
    /// destination handle precomputed.
    pub fn engine_layout(&self, sizes: &[usize], strides: &[usize], dtype: DType) -> EngineLayout {
        let handle: LayoutHandle = Arc::new(CpuDenseLayout::new(
            sizes.to_vec(),
            strides.to_vec(),
            dtype.size_in_bytes(),
        ));
        EngineLayout::new(sizes.to_vec(), strides.to_vec(), handle)
    }
}

impl ConversionPrimitive for CpuRefEngine {
    fn engine_name(&self) -> &str {
        "cpu-ref"
    }

    fn convert(&self, src: &[u8], dense: &LayoutHandle, dst: &mut [u8]) {
        let layout = dense
            .downcast_ref::<CpuDenseLayout>()
            .expect("layout handle was not created by the cpu reference engine");

        // Destination dimension order: largest stride outermost, ties by
        // size. The same rule the descriptor consumers use, applied here to
        // pair each destination axis with its source stride.
        let mut order: Vec<(usize, usize)> = layout
            .sizes
            .iter()
            .copied()
            .zip(layout.strides.iter().copied())
            .collect();
        order.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let elem_bytes = layout.elem_bytes;
        let total: usize = order.iter().map(|(size, _)| size).product();
        assert_eq!(
            dst.len(),
            total * elem_bytes,
            "destination buffer does not hold {total} elements"
        );

        for (dense_index, chunk) in dst.chunks_exact_mut(elem_bytes).enumerate() {
            let mut remaining = dense_index;
            let mut offset = 0;
            // Innermost destination axis varies fastest.
            for &(size, stride) in order.iter().rev() {
                offset += (remaining % size) * stride;
                remaining /= size;
            }
            let start = offset * elem_bytes;
            chunk.copy_from_slice(&src[start..start + elem_bytes]);
        }
    }
}
