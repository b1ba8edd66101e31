//! Transient shaper: envelope follower plus soft-knee peak reduction.

/*
Transient Shaper
================

The saturation and harmonic stages add energy. Left alone, sharp attacks
(snare hits, plucked bass) poke out of the glued mix. This stage rides a fast
envelope follower and pulls the gain down a little whenever the envelope
climbs past a threshold.

It is NOT a compressor: no ratio, no lookahead, no makeup. It only ever turns
the signal down, by at most `amount`.

Vocabulary
----------

  envelope    One scalar per channel tracking |signal|. Rises fast (attack),
              falls slowly (release). Never negative.

  threshold   Envelope level where reduction begins (0.2).

  knee        Envelope distance over which reduction ramps from 0 to full
              (0.15). Above threshold + knee the reduction is at its maximum.

  amount      Maximum fractional gain reduction. Grows with drive from 8%
              to 50%.


Envelope Follower
-----------------

A one-pole lowpass on |x| with two coefficients:

    coeff = 1 - exp(-1 / (sample_rate × tau))

    if |x| > env:  env += attack_coeff  × (|x| - env)     tau = 1 ms
    else:          env += release_coeff × (|x| - env)     tau = 50 ms

Coefficients are recomputed on every call from the sample rate passed in, so
a rate change needs no extra bookkeeping here.


Gain Computer
-------------

    reduction
     amount ┤              ┌──────────
            │            ╱
            │          ╱
          0 ┤─────────╱
            └─────────┬────┬─────────→ envelope
                 threshold  threshold + knee

    gain = 1 - reduction


Ordering
--------

Each sample first moves the envelope, then the gain is read from the moved
envelope and applied to that same sample. A sample that carries the envelope
over the threshold is already reduced.

The 1 ms attack still means one isolated sample moves the envelope only a
little (about 2% of its magnitude at 44.1 kHz), so a lone full-scale click
stays under the threshold and passes untouched.


Drive = 0
---------

`amount` is faded in across the first drive step (normalized drive 0 to
ENGAGE_DRIVE). That keeps the stage a true no-op at zero drive, while any
knob position from 0.1 up gets the full 8% - 50% range and the gain stays
continuous while the drive smoother ramps through zero.
*/

/// Envelope level where reduction starts.
pub const TRANSIENT_THRESHOLD: f32 = 0.2;
/// Width of the soft knee above the threshold.
pub const TRANSIENT_KNEE: f32 = 0.15;
/// Reduction amount at the lowest engaged drive.
pub const TRANSIENT_AMOUNT_MIN: f32 = 0.08;
/// Reduction amount at full drive.
pub const TRANSIENT_AMOUNT_MAX: f32 = 0.50;
/// Attack time constant in seconds.
pub const ENVELOPE_ATTACK: f32 = 0.001;
/// Release time constant in seconds.
pub const ENVELOPE_RELEASE: f32 = 0.050;
/// Normalized drive at which `amount` reaches its minimum (one 0.1 drive step).
pub const ENGAGE_DRIVE: f32 = 0.01;

/// One-pole smoothing coefficient for a time constant in seconds.
#[inline]
pub fn one_pole_coeff(time_seconds: f32, sample_rate: f32) -> f32 {
    1.0 - (-1.0 / (sample_rate * time_seconds)).exp()
}

/// Maximum fractional reduction for a normalized drive.
#[inline]
pub fn reduction_amount(normalized_drive: f32) -> f32 {
    let amount =
        TRANSIENT_AMOUNT_MIN + normalized_drive * (TRANSIENT_AMOUNT_MAX - TRANSIENT_AMOUNT_MIN);
    let engage = (normalized_drive / ENGAGE_DRIVE).clamp(0.0, 1.0);
    amount * engage
}

/// Per-channel transient detector and gain stage.
#[derive(Debug, Clone, Default)]
pub struct TransientShaper {
    envelope: f32,
    last_reduction: f32,
}

impl TransientShaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape one sample and advance the envelope.
    #[inline]
    pub fn shape(&mut self, input: f32, normalized_drive: f32, sample_rate: f32) -> f32 {
        self.follow(input.abs(), sample_rate);
        let reduction = self.reduction_for(normalized_drive);
        self.last_reduction = reduction;

        input * (1.0 - reduction)
    }

    /// Reduction the gain computer would apply at the current envelope.
    #[inline]
    pub fn reduction_for(&self, normalized_drive: f32) -> f32 {
        if self.envelope <= TRANSIENT_THRESHOLD {
            return 0.0;
        }

        let excess = ((self.envelope - TRANSIENT_THRESHOLD) / TRANSIENT_KNEE).min(1.0);
        excess * reduction_amount(normalized_drive)
    }

    #[inline]
    fn follow(&mut self, magnitude: f32, sample_rate: f32) {
        let coeff = if magnitude > self.envelope {
            one_pole_coeff(ENVELOPE_ATTACK, sample_rate)
        } else {
            one_pole_coeff(ENVELOPE_RELEASE, sample_rate)
        };

        self.envelope += coeff * (magnitude - self.envelope);
        debug_assert!(self.envelope >= 0.0 || self.envelope.is_nan());
    }

    /// Zero the envelope (stream restart).
    pub fn reset(&mut self) {
        self.envelope = 0.0;
        self.last_reduction = 0.0;
    }

    /// Current envelope level.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Reduction applied to the most recent sample, in [0, 1].
    pub fn last_reduction(&self) -> f32 {
        self.last_reduction
    }
}
