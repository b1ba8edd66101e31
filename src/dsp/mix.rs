//! Dry/wet blending.

/*
Dry/Wet Mix
===========

The last step of the chain crossfades the untouched input (dry) against the
processed signal (wet):

    output = dry × (1 - mix) + wet × mix

  mix = 0.0  →  dry only. The wet term is multiplied by exactly zero, so the
                output is the input bit-for-bit (given a finite wet sample).
  mix = 1.0  →  wet only.

This is a LINEAR crossfade. Both paths are strongly correlated (same source,
no phase shift in the chain), so the mid-point does not dip the way an
uncorrelated crossfade would, and an equal-power law would bump it up instead.

The Mix knob reads 0 - 100 %. It is divided by 100 before it reaches the
smoother, so everything here works in [0, 1].
*/

/// Blend one dry and one wet sample.
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Blend `dry` into `wet` in place with a fixed mix.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_dry_wet(dry_sample, *wet_sample, mix);
    }
}

/// Convert a 0 - 100 % knob value into a [0, 1] mix amount.
#[inline]
pub fn percent_to_mix(percent: f32) -> f32 {
    percent / 100.0
}
