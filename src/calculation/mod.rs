//! Calculation logic for the flextime engine.
//!
//! The daily stage turns one employee-day of punches into a
//! [`DailyResult`](crate::models::DailyResult): punches are paired into
//! spans, tolerance and rounding are applied, breaks are deducted, core
//! time is checked and the net time is compared to the target. The monthly
//! stage sums daily results, applies the crediting policy and clamps the
//! balance to the annual limits.

mod breaks;
mod core_time;
mod daily;
mod monthly;
mod pairing;
mod rounding;

pub use breaks::resolve_break;
pub use core_time::{CoreTimeViolation, check_core_time};
pub use daily::{DayJob, calculate_day, calculate_day_at, calculate_days};
pub use monthly::{FlextimeCredit, apply_credit_type, calculate_month, calculate_month_at};
pub use pairing::{PairedPunches, PunchSequenceError, TimeSpan, pair_punches};
pub use rounding::{apply_tolerance, round_time};
