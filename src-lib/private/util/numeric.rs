// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Numeric utilities

use std::time::Duration;

/// Interval between ticks for a target refresh rate. Zero fps is treated as one.
pub fn fps_to_tick_interval(fps: u32) -> Duration {
    let millis = 1000u32.div_ceil_placeholder(fps.max(1));
    Duration::from_millis(millis as u64)
}

pub trait DivCeil {
    /// Intentionally _not_ named `div_ceil` to avoid name conflicts with the inherent methods on
    /// the unsigned integer types, which would otherwise shadow this trait for some types and not
    /// for others.
    ///
    /// This does an integer ceiling division.
    fn div_ceil_placeholder(&self, rhs: Self) -> Self;
}

impl DivCeil for u32 {
    fn div_ceil_placeholder(&self, rhs: Self) -> Self {
        let quotient = self / rhs;
        let remainder = self % rhs;
        if remainder > 0 { quotient + 1 } else { quotient }
    }
}

pub trait DivFloor {
    /// Intentionally _not_ named `div_floor` to avoid name conflicts with an
    /// [unstable feature I can't use](https://github.com/rust-lang/rust/issues/88581).
    ///
    /// This does an integer floor division, which matters for pixel math on monitors left of or
    /// above the primary one.
    fn div_floor_placeholder(&self, rhs: Self) -> Self;
}

impl DivFloor for i32 {
    fn div_floor_placeholder(&self, rhs: Self) -> Self {
        let d = self / rhs;
        let r = self % rhs;
        if (r > 0 && rhs < 0) || (r < 0 && rhs > 0) {
            d - 1
        } else {
            d
        }
    }
}

#[cfg(test)]
mod test_div_rounding {
    use super::*;

    /// rust integer division always rounds towards zero, this test is just to document that because we actually care about rounding towards -Infinity for some pixel math
    #[test]
    fn negative_div_rounds_up() {
        assert_eq!(-101 / 2, -50);
    }

    #[test]
    fn div_ceil_u32_no_round() {
        assert_eq!(100u32.div_ceil_placeholder(2), 50);
    }

    #[test]
    fn div_ceil_u32_rounds_up() {
        assert_eq!(101u32.div_ceil_placeholder(2), 51);
    }

    #[test]
    fn positive_div_floor_rounds_down() {
        assert_eq!(101.div_floor_placeholder(2), 50);
    }

    #[test]
    fn negative_div_floor_rounds_down() {
        assert_eq!((-101).div_floor_placeholder(2), -51);
    }

    #[test]
    fn negative_div_floor_no_round() {
        assert_eq!((-100).div_floor_placeholder(2), -50);
    }
}

#[cfg(test)]
mod test_tick_interval {
    use super::*;

    #[test]
    fn sixty_fps_rounds_up() {
        assert_eq!(fps_to_tick_interval(60), Duration::from_millis(17));
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        assert_eq!(fps_to_tick_interval(0), Duration::from_millis(1000));
    }

    #[test]
    fn absurd_fps_clamps_to_one_millisecond() {
        assert_eq!(fps_to_tick_interval(5000), Duration::from_millis(1));
    }
}
