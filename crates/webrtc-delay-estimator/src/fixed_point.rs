//! Q9 fixed-point values and the recursive mean estimator.
//!
//! All smoothed bit counts and probability thresholds of the delay estimator
//! are kept as `i32` scaled by `2^9`.

use std::ops::{Add, Sub};

/// Number of fractional bits in a [`Q9`] value.
const Q9_FRACTIONAL_BITS: u32 = 9;

/// Signed fixed-point number with 9 fractional bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Q9(i32);

impl Q9 {
    /// `0.0` in Q9.
    pub const ZERO: Self = Self(0);
    /// `1.0` in Q9.
    pub const ONE: Self = Self(1 << Q9_FRACTIONAL_BITS);
    /// Smallest representable step, `1 / 512`.
    pub const EPSILON: Self = Self(1);

    /// Converts an integer to Q9.
    pub const fn from_int(value: i32) -> Self {
        Self(value << Q9_FRACTIONAL_BITS)
    }

    /// Wraps an already scaled value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the scaled representation.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the value as a float, for diagnostics.
    pub(crate) fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE.0 as f32
    }

    /// Adds `rhs`, clamping at the bounds of `i32` instead of overflowing.
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Moves `self` toward `target` by `(target - self) / 2^shifts`, rounding
    /// the step toward zero. See [`mean_estimator_fix`].
    #[inline]
    pub fn smooth_toward(&mut self, target: Self, shifts: u32) {
        mean_estimator_fix(target.0, shifts, &mut self.0);
    }
}

impl Add for Q9 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Q9 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// Updates `mean_value` recursively with a step size of `2^-shifts`:
///
/// `mean_value += (new_value - mean_value) >> shifts`
///
/// The shift is applied to the magnitude of the difference, so negative
/// steps round toward zero the same way positive ones do.
#[inline]
pub fn mean_estimator_fix(new_value: i32, shifts: u32, mean_value: &mut i32) {
    debug_assert!(shifts < 32);
    let diff = new_value - *mean_value;
    let step = if diff < 0 {
        -((-diff) >> shifts)
    } else {
        diff >> shifts
    };
    *mean_value += step;
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn scaling() {
        assert_eq!(Q9::from_int(20).raw(), 10240);
        assert_eq!(Q9::from_int(32).raw(), 16384);
        assert_eq!(Q9::from_int(17).raw(), 8704);
        assert_eq!(Q9::from_raw(2816).to_f32(), 5.5);
        assert_eq!(Q9::ONE + Q9::ONE, Q9::from_int(2));
        assert_eq!(Q9::from_int(3) - Q9::ONE, Q9::from_int(2));
    }

    #[test]
    fn saturating_add_clamps() {
        assert_eq!(
            Q9::from_raw(i32::MAX).saturating_add(Q9::EPSILON),
            Q9::from_raw(i32::MAX)
        );
        assert_eq!(
            Q9::from_raw(i32::MIN).saturating_add(Q9::from_raw(-1)),
            Q9::from_raw(i32::MIN)
        );
        assert_eq!(Q9::ONE.saturating_add(Q9::ONE), Q9::from_int(2));
    }

    /// Port of `MeanEstimatorFix` from delay_estimator_unittest.cc.
    #[test]
    fn mean_estimator_moves_in_correct_direction() {
        let mut mean_value = 4000;
        let mut mean_value_before = mean_value;
        let mut new_mean_value = mean_value * 2;

        mean_estimator_fix(new_mean_value, 10, &mut mean_value);
        assert!(mean_value_before < mean_value);
        assert!(new_mean_value > mean_value);

        new_mean_value = mean_value / 2;
        mean_value_before = mean_value;
        mean_estimator_fix(new_mean_value, 10, &mut mean_value);
        assert!(mean_value_before > mean_value);
        assert!(new_mean_value < mean_value);
    }

    #[test]
    fn negative_steps_round_toward_zero() {
        let mut mean = 10;
        mean_estimator_fix(0, 2, &mut mean);
        // -(10 >> 2) = -2, not the arithmetic -10 >> 2 = -3.
        assert_eq!(mean, 8);

        let mut mean = 0;
        mean_estimator_fix(10, 2, &mut mean);
        assert_eq!(mean, 2);
    }

    #[test]
    fn small_differences_are_absorbed() {
        let mut mean = Q9::from_raw(1000);
        mean.smooth_toward(Q9::from_raw(1001), 7);
        assert_eq!(mean.raw(), 1000);
        mean.smooth_toward(Q9::from_raw(999), 7);
        assert_eq!(mean.raw(), 1000);
    }

    #[proptest]
    fn mean_stays_between_old_mean_and_target(
        #[strategy(0..=16384i32)] mean: i32,
        #[strategy(0..=16384i32)] target: i32,
        #[strategy(0..13u32)] shifts: u32,
    ) {
        let mut updated = mean;
        mean_estimator_fix(target, shifts, &mut updated);
        let (lo, hi) = if mean <= target { (mean, target) } else { (target, mean) };
        assert!(updated >= lo && updated <= hi);
        if shifts == 0 {
            assert_eq!(updated, target);
        }
    }
}
