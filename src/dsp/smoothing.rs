//! Click-free parameter ramps.

/*
Parameter Smoothing
===================

A knob on screen moves in jumps: the control thread publishes a new value and
the audio thread sees it at the start of the next block. Feeding that jump
straight into the gain stages produces "zipper noise" - a burst of clicks as the
waveshaper coefficients step from one value to the next.

SmoothedValue turns the jump into a straight-line ramp.

Vocabulary
----------

  current     The value handed to the DSP for this sample.

  target      Where the ramp is heading. Set once per block from the
              parameter registry.

  ramp_len    How many samples a full ramp takes. Derived from the ramp time
              (20 ms for both Drive and Mix) and the sample rate.

  countdown   Samples left before current lands on target. Zero = settled.


The Shape: Linear Ramp
----------------------

    value
  target ┤            ┌──────────
         │          ╱
         │        ╱
         │      ╱
 current ┤────╱
         └────┬───────┬──────────→ samples
          set_target  +ramp_len

On set_target we compute:

    step = (target - current) / ramp_len

and then each sample:

    current += step

The last step does NOT add; it assigns `current = target`. Floating point
accumulation would otherwise leave us a few ULPs off, and "Mix = 0 means the
dry signal exactly" depends on landing on the target bit-for-bit.

Retargeting mid-ramp restarts the ramp from wherever current is now. Samples
already handed out are never touched again.
*/

/// Linear per-sample ramp toward a target value.
#[derive(Debug, Clone)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    step: f32,
    countdown: u32,
    ramp_len: u32,
}

impl SmoothedValue {
    /// Create a settled value. Ramping is off until [`reset`](Self::reset).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            countdown: 0,
            ramp_len: 0,
        }
    }

    /// Configure the ramp length and snap to the current target.
    ///
    /// Call on stream start and whenever the sample rate changes.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let samples = (ramp_seconds * sample_rate).floor();
        self.ramp_len = if samples.is_finite() && samples > 0.0 {
            samples as u32
        } else {
            0
        };
        self.set_current_and_target(self.target);
    }

    /// Aim at a new value. Output does not move until [`next_value`](Self::next_value).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }

        if self.ramp_len == 0 {
            self.set_current_and_target(target);
            return;
        }

        self.target = target;
        self.countdown = self.ramp_len;
        self.step = (self.target - self.current) / self.ramp_len as f32;
    }

    /// Jump straight to `value` with no ramp.
    pub fn set_current_and_target(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.countdown = 0;
        self.step = 0.0;
    }

    /// Advance one sample and return the new current value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.countdown == 0 {
            return self.target;
        }

        self.countdown -= 1;
        if self.countdown == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
        }

        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a ramp is still in flight.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.countdown > 0
    }

    /// Number of samples a full ramp takes at the configured rate.
    pub fn ramp_len(&self) -> u32 {
        self.ramp_len
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
