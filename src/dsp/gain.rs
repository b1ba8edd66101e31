//! Drive-dependent gain staging around the nonlinear stages.
//!
//! Two open-loop gains bracket the chain:
//!
//! - **Pre-drive gain** pushes the dry signal up into the curve, up to 2.5x
//!   (about +8 dB) at full drive. Without it the knob would mostly change the
//!   shape of quiet material that barely reaches the knee.
//! - **Makeup gain** pulls the wet signal back down by `1 / (1 + 0.8 * drive)`.
//!   It deliberately under-compensates: turning Drive up should still sound
//!   denser and a touch louder, the way pushing a console bus does.

/// Extra input gain at full drive (1.0 + this).
pub const PRE_DRIVE_BOOST: f32 = 1.5;
/// Makeup gain coefficient.
pub const MAKEUP_COEFF: f32 = 0.8;

/// Input boost applied to the dry sample before any nonlinear stage.
#[inline]
pub fn pre_drive_gain(normalized_drive: f32) -> f32 {
    1.0 + normalized_drive * PRE_DRIVE_BOOST
}

/// Level compensation applied to the wet sample.
#[inline]
pub fn makeup_gain(normalized_drive: f32) -> f32 {
    1.0 / (1.0 + normalized_drive * MAKEUP_COEFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_at_zero_drive() {
        assert_eq!(pre_drive_gain(0.0), 1.0);
        assert_eq!(makeup_gain(0.0), 1.0);
    }

    #[test]
    fn full_drive_values() {
        assert!((pre_drive_gain(1.0) - 2.5).abs() < 1e-6);
        assert!((makeup_gain(1.0) - 1.0 / 1.8).abs() < 1e-6);
    }

    #[test]
    fn makeup_decreases_with_drive() {
        let mut previous = makeup_gain(0.0);
        for i in 1..=10 {
            let gain = makeup_gain(i as f32 / 10.0);
            assert!(gain < previous);
            previous = gain;
        }
    }

    #[test]
    fn makeup_under_compensates_boost() {
        // Small signals come out louder as drive rises
        let net = |drive: f32| pre_drive_gain(drive) * makeup_gain(drive);
        assert!(net(0.5) > 1.0);
        assert!(net(1.0) > net(0.5));
    }
}
