//! Global kernel registry for name/device/dtype dispatch.
//!
//! Hosts look kernels up by operation name, device class, and element-type
//! constraint instead of hardcoding kernel types. Engine crates (including
//! external ones) register their kernel factories here from a module
//! initializer.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::tensor::DType;

use super::OpKernel;

/// Device class a kernel is registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
}

/// Factory producing a fresh kernel instance for one operator attribute set.
///
/// The argument is the operator's data-format attribute string.
pub type KernelConstructor = Box<dyn Fn(&str) -> Box<dyn OpKernel> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct KernelKey {
    name: String,
    device: Device,
    dtype: DType,
}

struct KernelRegistry {
    kernels: RwLock<HashMap<KernelKey, KernelConstructor>>,
}

impl KernelRegistry {
    fn new() -> Self {
        Self {
            kernels: RwLock::new(HashMap::new()),
        }
    }

    fn register(&self, key: KernelKey, constructor: KernelConstructor) {
        self.kernels.write().unwrap().insert(key, constructor);
    }

    fn create(&self, key: &KernelKey, data_format: &str) -> Option<Box<dyn OpKernel>> {
        let registry = self.kernels.read().unwrap();
        let constructor = registry.get(key)?;
        Some(constructor(data_format))
    }

    fn list(&self) -> Vec<(String, Device, DType)> {
        self.kernels
            .read()
            .unwrap()
            .keys()
            .map(|key| (key.name.clone(), key.device, key.dtype))
            .collect()
    }

    fn has(&self, key: &KernelKey) -> bool {
        self.kernels.read().unwrap().contains_key(key)
    }
}

static GLOBAL_REGISTRY: OnceLock<KernelRegistry> = OnceLock::new();

fn global_registry() -> &'static KernelRegistry {
    GLOBAL_REGISTRY.get_or_init(KernelRegistry::new)
}

/// Registers a kernel factory under (name, device, dtype).
///
/// The constructor runs each time the kernel is requested via
/// [`create_kernel`]. Re-registering the same binding replaces the factory.
pub fn register_kernel<F>(name: impl Into<String>, device: Device, dtype: DType, constructor: F)
where
    F: Fn(&str) -> Box<dyn OpKernel> + Send + Sync + 'static,
{
    let key = KernelKey {
        name: name.into(),
        device,
        dtype,
    };
    global_registry().register(key, Box::new(constructor));
}

/// Instantiates a registered kernel with the given data-format attribute.
///
/// Returns `None` if no kernel matches the (name, device, dtype) binding.
pub fn create_kernel(
    name: &str,
    device: Device,
    dtype: DType,
    data_format: &str,
) -> Option<Box<dyn OpKernel>> {
    let key = KernelKey {
        name: name.to_string(),
        device,
        dtype,
    };
    global_registry().create(&key, data_format)
}

/// Lists every registered (name, device, dtype) binding.
pub fn list_kernels() -> Vec<(String, Device, DType)> {
    global_registry().list()
}

/// Checks whether a binding exists for (name, device, dtype).
pub fn has_kernel(name: &str, device: Device, dtype: DType) -> bool {
    let key = KernelKey {
        name: name.to_string(),
        device,
        dtype,
    };
    global_registry().has(&key)
}
