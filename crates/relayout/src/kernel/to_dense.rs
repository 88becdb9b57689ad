//! Kernel converting engine-layout tensors back to dense row-major storage.

use std::sync::Arc;

use tracing::debug;

use crate::engine::LayoutDescriptor;
use crate::tensor::DType;

use super::context::ExecutionContext;
use super::error::{KernelError, KernelResult};
use super::OpKernel;

/// Operation name the kernel registers under.
pub const TO_DENSE: &str = "to_dense";

/// Converts the tensor at slot 0 from the engine's internal layout into a
/// freshly allocated dense row-major tensor, or forwards it unchanged when
/// it is already dense.
pub struct ToDenseOp {
    /// Data-format attribute carried over from the graph. Recorded for
    /// diagnostics only: the engine does not keep it consistent with the
    /// physical placement, so shape reconstruction never consults it.
    data_format: String,
    /// Declared element type of this operator instance.
    dtype: DType,
}

impl ToDenseOp {
    pub fn new(data_format: impl Into<String>, dtype: DType) -> Self {
        ToDenseOp {
            data_format: data_format.into(),
            dtype,
        }
    }

    /// The recorded data-format attribute.
    pub fn data_format(&self) -> &str {
        &self.data_format
    }

    /// The declared element type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }
}

impl OpKernel for ToDenseOp {
    fn name(&self) -> &str {
        TO_DENSE
    }

    fn execute(&self, ctx: &mut dyn ExecutionContext) -> KernelResult<()> {
        let input = Arc::clone(ctx.input(0));

        // A plain dense tensor can reach this boundary when the optimized
        // subgraph decided no conversion was needed for the edge; alias it
        // through untouched.
        let engine = match ctx.layout(0) {
            LayoutDescriptor::Dense => {
                debug!(op = TO_DENSE, "input already dense, forwarding without copy");
                ctx.set_output(0, input);
                return Ok(());
            }
            LayoutDescriptor::Engine(engine) => engine.clone(),
        };

        let input_dtype = ctx.input_dtype(0);
        let output_dtype = ctx.output_dtype(0);
        if self.dtype != input_dtype || self.dtype != output_dtype {
            return Err(KernelError::DTypeMismatch {
                op: self.dtype,
                input: input_dtype,
                output: output_dtype,
            });
        }

        // The data-format attribute is untrustworthy, so the output shape is
        // derived from the (size, stride) pairs alone.
        let shape = engine.dense_shape();
        debug!(
            op = TO_DENSE,
            data_format = %self.data_format,
            dims = ?shape.dims(),
            "reconstructed dense shape"
        );

        let mut output = ctx.allocate_output(0, shape, self.dtype)?;
        ctx.primitive()
            .convert(input.as_bytes(), engine.dense_handle(), output.bytes_mut());
        ctx.set_output(0, Arc::new(output));

        debug!(op = TO_DENSE, "engine-to-dense conversion complete");
        Ok(())
    }
}
