use std::sync::atomic::{AtomicU32, Ordering};

use super::ParamDescriptor;

/// Lock-free `f32` parameter cell.
///
/// The control thread writes, the audio thread reads once per block. The
/// value travels as its bit pattern in a single `AtomicU32`, so a reader can
/// never see half of a write. Writes are clamped and quantized against the
/// descriptor before they are published.
#[derive(Debug)]
pub struct AtomicParam {
    descriptor: &'static ParamDescriptor,
    value: AtomicU32,
}

impl AtomicParam {
    /// New cell holding the descriptor's default.
    pub fn new(descriptor: &'static ParamDescriptor) -> Self {
        Self {
            descriptor,
            value: AtomicU32::new(descriptor.default.to_bits()),
        }
    }

    /// Publish a new value (any thread).
    #[inline]
    pub fn set(&self, value: f32) {
        let value = self.descriptor.quantize(value);
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Read the latest published value (any thread).
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }

    /// Publish a value given as a 0 - 1 fraction of the range.
    pub fn set_normalized(&self, normalized: f32) {
        self.set(self.descriptor.denormalize(normalized));
    }

    /// Current value as a 0 - 1 fraction of the range.
    pub fn get_normalized(&self) -> f32 {
        self.descriptor.normalize(self.get())
    }

    /// Restore the default.
    pub fn reset(&self) {
        self.set(self.descriptor.default);
    }

    pub fn descriptor(&self) -> &'static ParamDescriptor {
        self.descriptor
    }
}
