//! Density saturation
//!
//! The first nonlinear stage of the glue chain. Unlike a fuzz or overdrive
//! curve it is not trying to flatten the waveform into a square; it leans on
//! the loud parts of the signal a little harder than the quiet parts, which
//! the ear hears as "density" rather than distortion.
//!
//! # Transfer Function
//!
//!   f(x) = x / (1 + k * |x|^n)
//!
//! - `k` grows linearly with normalized drive, 0 at the bottom of the knob and
//!   `SATURATION_COEFF_MAX` at the top. At k = 0 the stage is an exact identity.
//! - `n` is fixed at 2.5. An exponent above 1 keeps the curve almost linear
//!   for small signals and bends it sharply near full scale, so quiet detail
//!   survives while peaks get packed together.
//!
//! # Properties
//!
//! - Odd-symmetric: f(-x) = -f(x). The stage alone adds only odd harmonics;
//!   the even "warmth" comes from the harmonic generator.
//! - Never louder than its input: the denominator is >= 1 whenever k >= 0.
//! - Not clamped. Inputs well above 1.0 come out smaller, not limited.
//!
//! # Shape at full drive (k = 3)
//!
//!   input  0.1  ->  0.0991
//!   input  0.5  ->  0.3267
//!   input  1.0  ->  0.2500
//!   input  2.5  ->  0.0816

/// Nonlinearity coefficient at zero drive.
pub const SATURATION_COEFF_MIN: f32 = 0.0;
/// Nonlinearity coefficient at full drive.
pub const SATURATION_COEFF_MAX: f32 = 3.0;
/// Curve exponent. Harder knee as it grows.
pub const SATURATION_CURVE: f32 = 2.5;

/// Coefficient `k` for a normalized drive in [0, 1].
#[inline]
pub fn saturation_coeff(normalized_drive: f32) -> f32 {
    SATURATION_COEFF_MIN + normalized_drive * (SATURATION_COEFF_MAX - SATURATION_COEFF_MIN)
}

/// Apply the density curve to one sample.
#[inline]
pub fn saturate(input: f32, normalized_drive: f32) -> f32 {
    let k = saturation_coeff(normalized_drive);
    input / (1.0 + k * input.abs().powf(SATURATION_CURVE))
}

/// Apply the density curve to a whole buffer in place.
pub fn saturate_buffer(buffer: &mut [f32], normalized_drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = saturate(*sample, normalized_drive);
    }
}
