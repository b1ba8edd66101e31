//! The two user controls and how they cross from the control thread to the
//! audio thread.

mod atomic;

pub use atomic::AtomicParam;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static description of one continuous control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable identifier used by hosts for automation and state.
    pub id: &'static str,
    pub name: &'static str,
    /// Unit label shown next to the value.
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Quantization interval. Zero means continuous.
    pub step: f32,
}

/// Drive: 0 - 10, default 0, 0.1 steps.
pub const DRIVE: ParamDescriptor = ParamDescriptor {
    id: "drive",
    name: "Drive",
    label: "Drive",
    min: 0.0,
    max: 10.0,
    default: 0.0,
    step: 0.1,
};

/// Mix: 0 - 100 %, default 100, whole-percent steps.
pub const MIX: ParamDescriptor = ParamDescriptor {
    id: "mix",
    name: "Mix",
    label: "%",
    min: 0.0,
    max: 100.0,
    default: 100.0,
    step: 1.0,
};

/// Both controls, in host registration order.
pub const ALL: [&ParamDescriptor; 2] = [&DRIVE, &MIX];

impl ParamDescriptor {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Clamp, then snap to the nearest step from `min`.
    pub fn quantize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        if self.step <= 0.0 {
            return value;
        }

        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Map a value into [0, 1] across the range.
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Map a [0, 1] fraction back onto the range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Plain copy of both control values.
///
/// Hosts store this in their own state blob; the processor never persists it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Drive, 0 - 10.
    pub drive: f32,
    /// Mix, 0 - 100 %.
    pub mix: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            drive: DRIVE.default,
            mix: MIX.default,
        }
    }
}

/// The shared parameter registry.
///
/// Wrap it in an `Arc` and hand one clone to the audio side and one to the
/// control side. Every method takes `&self`.
#[derive(Debug)]
pub struct GlueParams {
    pub drive: AtomicParam,
    pub mix: AtomicParam,
}

impl GlueParams {
    pub fn new() -> Self {
        Self {
            drive: AtomicParam::new(&DRIVE),
            mix: AtomicParam::new(&MIX),
        }
    }

    pub fn set_drive(&self, drive: f32) {
        self.drive.set(drive);
    }

    pub fn set_mix(&self, mix_percent: f32) {
        self.mix.set(mix_percent);
    }

    /// Read both values.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            drive: self.drive.get(),
            mix: self.mix.get(),
        }
    }

    /// Publish both values (e.g. after a host restores state).
    pub fn apply(&self, snapshot: ParamSnapshot) {
        self.drive.set(snapshot.drive);
        self.mix.set(snapshot.mix);
    }

    /// Look a parameter up by its host identifier.
    pub fn by_id(&self, id: &str) -> Option<&AtomicParam> {
        match id {
            id if id == DRIVE.id => Some(&self.drive),
            id if id == MIX.id => Some(&self.mix),
            _ => None,
        }
    }

    pub fn reset(&self) {
        self.drive.reset();
        self.mix.reset();
    }
}

impl Default for GlueParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_control_ranges() {
        assert_eq!((DRIVE.min, DRIVE.max, DRIVE.default), (0.0, 10.0, 0.0));
        assert_eq!((MIX.min, MIX.max, MIX.default), (0.0, 100.0, 100.0));
        assert_eq!(ALL[0].id, "drive");
        assert_eq!(ALL[1].id, "mix");
    }

    #[test]
    fn quantize_snaps_to_step() {
        assert_eq!(MIX.quantize(49.6), 50.0);
        assert_eq!(MIX.quantize(150.0), 100.0);
        assert!((DRIVE.quantize(2.26) - 2.3).abs() < 1e-6);
    }

    #[test]
    fn normalize_and_back() {
        assert_eq!(DRIVE.normalize(5.0), 0.5);
        assert_eq!(DRIVE.denormalize(0.5), 5.0);
        assert_eq!(MIX.normalize(-10.0), 0.0);
    }

    #[test]
    fn snapshot_and_apply() {
        let params = GlueParams::new();
        assert_eq!(params.snapshot(), ParamSnapshot::default());

        params.apply(ParamSnapshot { drive: 4.0, mix: 60.0 });

        assert_eq!(params.snapshot(), ParamSnapshot { drive: 4.0, mix: 60.0 });
    }

    #[test]
    fn lookup_by_id() {
        let params = GlueParams::new();
        params.by_id("drive").expect("drive registered").set(2.0);

        assert_eq!(params.drive.get(), 2.0);
        assert!(params.by_id("tone").is_none());
    }

    #[test]
    fn reset_restores_defaults() {
        let params = GlueParams::new();
        params.set_drive(9.0);
        params.set_mix(0.0);
        params.reset();
        assert_eq!(params.snapshot(), ParamSnapshot::default());
    }
}
