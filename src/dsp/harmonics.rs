//! Low-order harmonic generator.

/*
Harmonic Generator
==================

Adds a second- and third-order polynomial term on top of the saturated
signal. The result is summed in, never substituted, so at low drive the chain
still sounds like the input with a little extra body.

  2nd order   x² × HARMONIC_2ND_AMOUNT × drive, then given the sign of x.

              Squaring alone would rectify the waveform and shift its DC.
              Re-applying the input's sign gives x·|x|: the curve bends
              outward on both half-cycles. On a symmetric waveform that
              lands on the odd harmonics; on asymmetric material (kicks,
              plucks, anything with uneven half-cycles) it adds the even
              "warmth" content.

  3rd order   x³ × HARMONIC_3RD_AMOUNT × drive.

              Odd-symmetric. Adds edge and presence.

Both terms scale linearly with normalized drive, so drive = 0 contributes
nothing at all.

Note that the generator is fed from the BOOSTED DRY sample, not from the
saturation stage output. Saturation squashes peaks; taking the harmonics
from its output would make them vanish exactly where they are most audible.
*/

/// Weight of the sign-matched 2nd-order term (warmth).
pub const HARMONIC_2ND_AMOUNT: f32 = 0.40;
/// Weight of the 3rd-order term (edge).
pub const HARMONIC_3RD_AMOUNT: f32 = 0.25;

/// Harmonic content to add for one sample.
#[inline]
pub fn harmonics(input: f32, normalized_drive: f32) -> f32 {
    let squared = input * input;

    let second = squared * HARMONIC_2ND_AMOUNT * normalized_drive;
    let second = if input >= 0.0 { second } else { -second };

    let third = squared * input * HARMONIC_3RD_AMOUNT * normalized_drive;

    second + third
}
