//! Daily calculation inputs and results.
//!
//! [`DayContext`] carries the per-day facts supplied by the absence and
//! holiday lookups. [`DailyResult`] is the canonical outcome of one
//! employee-day and is always rebuilt in full.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::codes::push_code;

/// Facts about the day that do not come from the punch clock.
///
/// # Example
///
/// ```
/// use flextime_engine::models::DayContext;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let day = DayContext::workday(Uuid::nil(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// assert!(!day.is_holiday);
/// assert_eq!(day.holiday_category, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContext {
    /// The employee the day belongs to.
    pub employee_id: Uuid,
    /// The calendar day.
    pub date: NaiveDate,
    /// Whether the day is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Holiday category used to look up the credit.
    #[serde(default)]
    pub holiday_category: Option<u8>,
    /// Whether an approved absence covers the day.
    #[serde(default)]
    pub is_approved_absence: bool,
    /// Daily target from the employee master record.
    #[serde(default)]
    pub employee_master_target_minutes: Option<i32>,
}

impl DayContext {
    /// An ordinary working day with no holiday or absence.
    pub fn workday(employee_id: Uuid, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            is_holiday: false,
            holiday_category: None,
            is_approved_absence: false,
            employee_master_target_minutes: None,
        }
    }
}

/// Outcome status of a daily calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The day was calculated.
    Calculated,
    /// The day needs correction before its times can be trusted.
    Error,
}

/// The calculated working time for one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    /// The employee the result belongs to.
    pub employee_id: Uuid,
    /// The calendar day.
    pub date: NaiveDate,
    /// Resolved target minutes.
    pub target_minutes: i32,
    /// Worked span before break deduction.
    pub gross_minutes: i32,
    /// Worked time after break deduction.
    pub net_minutes: i32,
    /// Net time above target.
    pub overtime_minutes: i32,
    /// Net time below target.
    pub undertime_minutes: i32,
    /// Break minutes deducted.
    pub break_minutes: i32,
    /// Minutes removed by the daily maximum.
    pub capped_minutes: i32,
    /// First adjusted work arrival.
    pub first_arrival: Option<i32>,
    /// Last adjusted work departure.
    pub last_departure: Option<i32>,
    /// Calculated or error.
    pub status: DayStatus,
    /// Warning codes in the order they were raised.
    pub warnings: Vec<String>,
    /// Error codes in the order they were raised.
    pub errors: Vec<String>,
    /// When the result was produced.
    pub computed_at: DateTime<Utc>,
}

impl DailyResult {
    /// Creates an empty calculated result carrying only the target.
    pub(crate) fn new(
        employee_id: Uuid,
        date: NaiveDate,
        target_minutes: i32,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id,
            date,
            target_minutes,
            gross_minutes: 0,
            net_minutes: 0,
            overtime_minutes: 0,
            undertime_minutes: 0,
            break_minutes: 0,
            capped_minutes: 0,
            first_arrival: None,
            last_departure: None,
            status: DayStatus::Calculated,
            warnings: Vec::new(),
            errors: Vec::new(),
            computed_at,
        }
    }

    pub(crate) fn warn(&mut self, code: &str) {
        push_code(&mut self.warnings, code);
    }

    pub(crate) fn fail(&mut self, code: &str) {
        push_code(&mut self.errors, code);
        self.status = DayStatus::Error;
    }

    /// Sets net and gross and derives overtime/undertime against the target.
    pub(crate) fn set_worked(&mut self, gross_minutes: i32, net_minutes: i32) {
        self.gross_minutes = gross_minutes;
        self.net_minutes = net_minutes;
        self.overtime_minutes = (net_minutes - self.target_minutes).max(0);
        self.undertime_minutes = (self.target_minutes - net_minutes).max(0);
    }

    /// Returns true if the day is in error.
    pub fn has_error(&self) -> bool {
        self.status == DayStatus::Error
    }

    /// Returns true if `code` was raised as a warning or an error.
    pub fn has_code(&self, code: &str) -> bool {
        self.warnings.iter().chain(self.errors.iter()).any(|c| c == code)
    }

    /// Signed flextime contribution of the day (overtime minus undertime).
    pub fn balance_minutes(&self) -> i32 {
        self.overtime_minutes - self.undertime_minutes
    }

    /// Net time in hours.
    ///
    /// ```
    /// use flextime_engine::calculation::calculate_day;
    /// use flextime_engine::config::EngineSettings;
    /// use flextime_engine::models::{DayContext, DayRules, NoPunchPolicy};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let rules = DayRules {
    ///     target_minutes: 450,
    ///     no_punch_policy: NoPunchPolicy::CreditTarget,
    ///     ..DayRules::off_day()
    /// };
    /// let day = DayContext::workday(Uuid::nil(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// let result = calculate_day(&[], Some(&rules), &day, &EngineSettings::default());
    /// assert_eq!(result.net_hours(), Decimal::new(75, 1)); // 7.5
    /// ```
    pub fn net_hours(&self) -> Decimal {
        minutes_to_hours(self.net_minutes)
    }

    /// Signed flextime contribution in hours.
    pub fn balance_hours(&self) -> Decimal {
        minutes_to_hours(self.balance_minutes())
    }
}

/// Converts minutes to hours as a Decimal.
pub fn minutes_to_hours(minutes: i32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}
