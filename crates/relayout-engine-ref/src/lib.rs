pub mod cpu;

pub use cpu::{CpuDenseLayout, CpuRefEngine};

use relayout::kernel::registry::{register_kernel, Device};
use relayout::{DType, ToDenseOp};

/// Register the reference engine's kernels with the global kernel registry.
///
/// This function is called automatically via a static initializer, but can
/// also be called manually to ensure the kernels are registered. The
/// reference engine carries a float32 conversion kernel only.
pub fn register_cpu_kernels() {
    register_kernel(
        relayout::kernel::TO_DENSE,
        Device::Cpu,
        DType::F32,
        |data_format| Box::new(ToDenseOp::new(data_format, DType::F32)),
    );
}

// Auto-register on library load
#[cfg(not(target_family = "wasm"))]
#[used]
#[link_section = ".init_array"]
static REGISTER_CPU_KERNELS: extern "C" fn() = {
    extern "C" fn register() {
        register_cpu_kernels();
    }
    register
};
