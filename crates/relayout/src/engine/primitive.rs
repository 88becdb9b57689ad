//! Conversion primitive exposed by the acceleration engine.

use super::descriptor::LayoutHandle;

/// Strided-to-dense data movement supplied by the engine.
///
/// This is the only place real element transformation happens during a
/// layout conversion; the kernel's responsibility ends at supplying correct
/// buffers and the destination layout handle. The primitive is assumed
/// correct and total for any source consistent with the handle it was
/// created against, so it carries no error channel.
pub trait ConversionPrimitive: Send + Sync {
    /// Human-readable engine identifier (e.g. "cpu-ref").
    fn engine_name(&self) -> &str;

    /// Copies every source element to its dense row-major destination
    /// offset, as described by `dense`.
    fn convert(&self, src: &[u8], dense: &LayoutHandle, dst: &mut [u8]);
}
