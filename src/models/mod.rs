//! Core data models for the flextime engine.
//!
//! This module contains the punch and rule inputs as well as the daily and
//! monthly results produced by the engine.

pub mod codes;
mod daily_result;
mod day_rules;
mod monthly;
mod punch;

pub use daily_result::{DailyResult, DayContext, DayStatus, minutes_to_hours};
pub use day_rules::{
    BreakRule, BreakStep, CoreTime, DayRules, NoPunchPolicy, PlannedWindow, Rounding,
};
pub use monthly::{AbsenceSummary, CreditType, MonthKey, MonthlyResult, MonthlyRules};
pub use punch::{MINUTES_PER_DAY, Punch, PunchCategory, PunchDirection};
