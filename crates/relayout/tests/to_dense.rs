#![cfg(feature = "accel")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use relayout::engine::{ConversionPrimitive, EngineLayout, LayoutDescriptor, LayoutHandle};
use relayout::kernel::{ExecutionContext, KernelError, KernelResult, OpKernel};
use relayout::{DType, Shape, Tensor, ToDenseOp};

/// Counts conversion calls without touching the destination buffer.
#[derive(Default)]
struct RecordingPrimitive {
    calls: AtomicUsize,
}

impl RecordingPrimitive {
    fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ConversionPrimitive for RecordingPrimitive {
    fn engine_name(&self) -> &str {
        "recording"
    }

    fn convert(&self, _src: &[u8], _dense: &LayoutHandle, _dst: &mut [u8]) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

/// Minimal single-slot host context.
struct HostContext {
    input: Arc<Tensor>,
    layout: LayoutDescriptor,
    output_dtype: DType,
    output: Option<Arc<Tensor>>,
    allocations: usize,
    refuse_allocation: bool,
    primitive: Arc<dyn ConversionPrimitive>,
}

impl HostContext {
    fn new(
        input: Tensor,
        layout: LayoutDescriptor,
        primitive: Arc<dyn ConversionPrimitive>,
    ) -> Self {
        let output_dtype = input.dtype();
        HostContext {
            input: Arc::new(input),
            layout,
            output_dtype,
            output: None,
            allocations: 0,
            refuse_allocation: false,
            primitive,
        }
    }
}

impl ExecutionContext for HostContext {
    fn input(&self, slot: usize) -> &Arc<Tensor> {
        assert_eq!(slot, 0);
        &self.input
    }

    fn layout(&self, slot: usize) -> &LayoutDescriptor {
        assert_eq!(slot, 0);
        &self.layout
    }

    fn input_dtype(&self, slot: usize) -> DType {
        assert_eq!(slot, 0);
        self.input.dtype()
    }

    fn output_dtype(&self, slot: usize) -> DType {
        assert_eq!(slot, 0);
        self.output_dtype
    }

    fn allocate_output(&mut self, slot: usize, shape: Shape, dtype: DType) -> KernelResult<Tensor> {
        assert_eq!(slot, 0);
        if self.refuse_allocation {
            return Err(KernelError::AllocationFailure {
                dims: shape.dims().to_vec(),
                dtype,
                reason: "host allocator refused the request".to_string(),
            });
        }
        self.allocations += 1;
        Ok(Tensor::zeroed(shape, dtype))
    }

    fn set_output(&mut self, slot: usize, tensor: Arc<Tensor>) {
        assert_eq!(slot, 0);
        self.output = Some(tensor);
    }

    fn primitive(&self) -> &dyn ConversionPrimitive {
        self.primitive.as_ref()
    }
}

fn engine_descriptor(sizes: &[usize], strides: &[usize]) -> LayoutDescriptor {
    let handle: LayoutHandle = Arc::new(());
    LayoutDescriptor::Engine(EngineLayout::new(sizes.to_vec(), strides.to_vec(), handle))
}

#[test]
fn passthrough_aliases_input_without_converting() {
    let input = Tensor::from_vec(Shape::new(vec![2, 3]), (0..6).map(|v| v as f32).collect())
        .expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    let mut ctx = HostContext::new(input, LayoutDescriptor::Dense, recorder.clone());

    let op = ToDenseOp::new("NHWC", DType::F32);
    op.execute(&mut ctx).expect("passthrough must succeed");

    let output = ctx.output.as_ref().expect("output slot bound");
    assert!(
        Arc::ptr_eq(output, &ctx.input),
        "passthrough must alias the input storage"
    );
    assert_eq!(ctx.allocations, 0);
    assert_eq!(recorder.call_count(), 0);
}

#[test]
fn passthrough_skips_dtype_validation() {
    // A dense tensor forwards untouched even when the declared operator
    // dtype disagrees with the slot dtypes.
    let input = Tensor::from_i32(Shape::new(vec![4]), vec![1, 2, 3, 4]).expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    let mut ctx = HostContext::new(input, LayoutDescriptor::Dense, recorder);

    let op = ToDenseOp::new("NHWC", DType::F32);
    op.execute(&mut ctx).expect("passthrough must succeed");
    assert!(ctx.output.is_some());
}

#[test]
fn dtype_mismatch_aborts_before_allocating() {
    let input = Tensor::from_i32(Shape::new(vec![6]), vec![0; 6]).expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    let mut ctx = HostContext::new(input, engine_descriptor(&[2, 3], &[3, 1]), recorder.clone());

    let op = ToDenseOp::new("NHWC", DType::F32);
    let err = op.execute(&mut ctx).expect_err("dtype mismatch must abort");
    assert_eq!(
        err,
        KernelError::DTypeMismatch {
            op: DType::F32,
            input: DType::I32,
            output: DType::I32,
        }
    );
    assert!(ctx.output.is_none(), "no output may be written");
    assert_eq!(ctx.allocations, 0);
    assert_eq!(recorder.call_count(), 0);
}

#[test]
fn output_dtype_mismatch_aborts() {
    let input = Tensor::from_vec(Shape::new(vec![6]), vec![0.0; 6]).expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    let mut ctx = HostContext::new(input, engine_descriptor(&[2, 3], &[3, 1]), recorder);
    ctx.output_dtype = DType::I32;

    let op = ToDenseOp::new("NHWC", DType::F32);
    let err = op.execute(&mut ctx).expect_err("dtype mismatch must abort");
    assert!(matches!(err, KernelError::DTypeMismatch { .. }));
    assert!(ctx.output.is_none());
}

#[test]
fn allocation_refusal_leaves_slot_empty() {
    let input = Tensor::from_vec(Shape::new(vec![6]), vec![0.0; 6]).expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    let mut ctx = HostContext::new(input, engine_descriptor(&[2, 3], &[3, 1]), recorder.clone());
    ctx.refuse_allocation = true;

    let op = ToDenseOp::new("NHWC", DType::F32);
    let err = op.execute(&mut ctx).expect_err("allocation refusal is fatal");
    match err {
        KernelError::AllocationFailure { dims, dtype, .. } => {
            assert_eq!(dims, vec![2, 3]);
            assert_eq!(dtype, DType::F32);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ctx.output.is_none(), "no truncated or zeroed output");
    assert_eq!(recorder.call_count(), 0);
}

#[test]
fn conversion_allocates_reconstructed_shape() {
    let input = Tensor::from_vec(Shape::new(vec![24]), vec![0.0; 24]).expect("valid tensor");
    let recorder = Arc::new(RecordingPrimitive::default());
    // Engine order deliberately scrambled: (3,1), (4,12), (2,6).
    let mut ctx = HostContext::new(
        input,
        engine_descriptor(&[3, 4, 2], &[1, 12, 6]),
        recorder.clone(),
    );

    let op = ToDenseOp::new("NCHW", DType::F32);
    op.execute(&mut ctx).expect("conversion must succeed");

    let output = ctx.output.as_ref().expect("output slot bound");
    assert_eq!(output.shape().dims(), &[4, 2, 3]);
    assert_eq!(
        output.len(),
        ctx.input.len(),
        "relayout must preserve the element count"
    );
    assert_eq!(ctx.allocations, 1);
    assert_eq!(recorder.call_count(), 1, "primitive invoked exactly once");
}

#[test]
fn format_attribute_does_not_influence_shape() {
    for format in ["NHWC", "NCHW", "garbage"] {
        let input = Tensor::from_vec(Shape::new(vec![6]), vec![0.0; 6]).expect("valid tensor");
        let recorder = Arc::new(RecordingPrimitive::default());
        let mut ctx = HostContext::new(input, engine_descriptor(&[3, 2], &[1, 3]), recorder);

        let op = ToDenseOp::new(format, DType::F32);
        op.execute(&mut ctx).expect("conversion must succeed");
        let output = ctx.output.as_ref().expect("output slot bound");
        assert_eq!(output.shape().dims(), &[2, 3], "format {format} leaked");
    }
}
