use relayout::kernel::registry::{create_kernel, has_kernel, list_kernels, Device};
use relayout::kernel::TO_DENSE;
use relayout::DType;

#[test]
fn test_kernel_registry() {
    // Ensure kernels are registered (auto-registration via .init_array)
    relayout_engine_ref::register_cpu_kernels();

    let kernels = list_kernels();
    assert!(
        has_kernel(TO_DENSE, Device::Cpu, DType::F32),
        "to_dense kernel not registered"
    );
    assert!(kernels.contains(&(TO_DENSE.to_string(), Device::Cpu, DType::F32)));

    let kernel = create_kernel(TO_DENSE, Device::Cpu, DType::F32, "NHWC")
        .expect("failed to create to_dense kernel");
    assert_eq!(kernel.name(), TO_DENSE);

    // The reference engine registers float32 only.
    assert!(!has_kernel(TO_DENSE, Device::Cpu, DType::I32));
    assert!(create_kernel("nonexistent", Device::Cpu, DType::F32, "NHWC").is_none());
}
