//! Tolerance and rounding primitives.
//!
//! Both functions map a raw minute-of-day to an adjusted minute-of-day.
//! Grid rounding is aligned to an optional anchor minute so that the same
//! arithmetic serves midnight-anchored and plan-anchored grids.

use crate::models::{MINUTES_PER_DAY, Rounding};

/// Snaps `raw_time` to `planned_boundary` when it lies within `tolerance_minutes`.
///
/// Times further away pass through unchanged.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::apply_tolerance;
///
/// // 07:57 with five minutes tolerance around 08:00
/// assert_eq!(apply_tolerance(477, 480, 5), 480);
/// // 08:06 is outside the tolerance
/// assert_eq!(apply_tolerance(486, 480, 5), 486);
/// ```
pub fn apply_tolerance(raw_time: i32, planned_boundary: i32, tolerance_minutes: i32) -> i32 {
    if tolerance_minutes > 0 && (raw_time - planned_boundary).abs() <= tolerance_minutes {
        planned_boundary
    } else {
        raw_time
    }
}

/// Rounds a minute-of-day according to `rounding`.
///
/// For the grid modes the grid points are `anchor mod interval + k * interval`.
/// Without an anchor the grid starts at midnight. Add and subtract ignore the
/// anchor. Results stay within `0..=1440`.
///
/// # Examples
///
/// Plan starts at 08:10, punch at 08:11, fifteen minute round-up:
///
/// ```
/// use flextime_engine::calculation::round_time;
/// use flextime_engine::models::Rounding;
///
/// let up = Rounding::Up { interval: 15 };
/// assert_eq!(round_time(491, &up, Some(490)), 505); // relative to plan: 08:25
/// assert_eq!(round_time(491, &up, None), 495); // relative to midnight: 08:15
/// ```
pub fn round_time(minutes: i32, rounding: &Rounding, anchor: Option<i32>) -> i32 {
    let rounded = match *rounding {
        Rounding::None => return minutes,
        Rounding::Up { interval } => {
            grid_round(minutes, interval, anchor, |remainder, interval| {
                interval - remainder
            })
        }
        Rounding::Down { interval } => {
            grid_round(minutes, interval, anchor, |remainder, _| -remainder)
        }
        Rounding::Nearest { interval } => {
            grid_round(minutes, interval, anchor, |remainder, interval| {
                if remainder * 2 >= interval {
                    interval - remainder
                } else {
                    -remainder
                }
            })
        }
        Rounding::Add { value } => minutes + value,
        Rounding::Subtract { value } => minutes - value,
    };
    rounded.clamp(0, MINUTES_PER_DAY)
}

/// Shared grid arithmetic: `step` turns the distance above the previous grid
/// point into the signed adjustment. On-grid times are returned untouched.
fn grid_round(
    minutes: i32,
    interval: i32,
    anchor: Option<i32>,
    step: impl Fn(i32, i32) -> i32,
) -> i32 {
    if interval <= 0 {
        return minutes;
    }
    let offset = anchor.unwrap_or(0).rem_euclid(interval);
    let remainder = (minutes - offset).rem_euclid(interval);
    if remainder == 0 {
        return minutes;
    }
    minutes + step(remainder, interval)
}
