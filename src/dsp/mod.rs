//! Low-level DSP primitives used by the glue processor.
//!
//! Every stage here is allocation-free and realtime-safe. The memoryless
//! stages are plain functions of `(sample, normalized_drive)`; the stateful
//! ones ([`SmoothedValue`], [`TransientShaper`], [`PhaseAllpass`]) are small
//! structs meant to be embedded per channel or per parameter.
//!
//! Signal order inside one channel of the chain:
//!
//! ```text
//! dry ─► ×pre_drive_gain ─┬─► saturate ──┐
//!                         └─► harmonics ─┴─(+)─► TransientShaper ─► ×makeup_gain ─► wet
//! output = blend_dry_wet(dry, wet, mix)
//! ```

/// Bypassed first-order phase stage (not part of the chain).
pub mod allpass;
/// Pre-drive boost and makeup gain.
pub mod gain;
/// Sign-matched 2nd and 3rd harmonic generator.
pub mod harmonics;
/// Dry/wet crossfade.
pub mod mix;
/// Density saturation waveshaper.
pub mod saturation;
/// Linear parameter ramps.
pub mod smoothing;
/// Envelope follower and soft-knee peak reduction.
pub mod transient;

pub use allpass::PhaseAllpass;
pub use gain::{makeup_gain, pre_drive_gain};
pub use harmonics::harmonics;
pub use mix::blend_dry_wet;
pub use saturation::saturate;
pub use smoothing::SmoothedValue;
pub use transient::TransientShaper;
