//! Monthly rules, keys and results.
//!
//! A [`MonthlyResult`] is addressed by its [`MonthKey`]. Months never hold
//! references to each other; the carryover is passed explicitly from one
//! month's result into the next month's calculation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::daily_result::minutes_to_hours;

/// How a month's net flextime change is credited to the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    /// Pass the change through unmodified.
    #[default]
    NoEvaluation,
    /// Credit the change, limited by the monthly cap.
    CompleteCarryover,
    /// Credit only the surplus beyond the threshold.
    AfterThreshold,
    /// Credit nothing.
    NoCarryover,
}

/// Crediting rules for one employee and period.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{CreditType, MonthlyRules};
///
/// let rules: MonthlyRules = serde_yaml::from_str(
///     "credit_type: complete_carryover\nmonthly_cap: 480\nannual_lower_limit: -1200",
/// )
/// .unwrap();
/// assert_eq!(rules.credit_type, CreditType::CompleteCarryover);
/// assert_eq!(rules.monthly_cap, Some(480));
/// assert_eq!(rules.annual_upper_limit, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRules {
    /// Crediting policy.
    #[serde(default)]
    pub credit_type: CreditType,
    /// Most minutes that may be credited in one month.
    #[serde(default)]
    pub monthly_cap: Option<i32>,
    /// Surplus forfeited before anything is credited (after-threshold only).
    #[serde(default)]
    pub flextime_threshold: Option<i32>,
    /// Ceiling of the flextime balance.
    #[serde(default)]
    pub annual_upper_limit: Option<i32>,
    /// Floor of the flextime balance (usually negative).
    #[serde(default)]
    pub annual_lower_limit: Option<i32>,
}

/// Unique key of a monthly result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// The employee.
    pub employee_id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1..=12.
    pub month: u32,
}

impl MonthKey {
    /// Creates a key, rejecting month numbers outside 1..=12.
    ///
    /// ```
    /// use flextime_engine::models::MonthKey;
    /// use uuid::Uuid;
    ///
    /// let key = MonthKey::new(Uuid::nil(), 2026, 12).unwrap();
    /// assert_eq!(key.next(), MonthKey::new(Uuid::nil(), 2027, 1).unwrap());
    /// assert!(MonthKey::new(Uuid::nil(), 2026, 0).is_err());
    /// ```
    pub fn new(employee_id: Uuid, year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth { year, month });
        }
        Ok(Self {
            employee_id,
            year,
            month,
        })
    }

    /// The following month.
    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self { year, month, ..*self }
    }

    /// The preceding month.
    pub fn previous(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self { year, month, ..*self }
    }

    /// Returns true if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Orders keys of one employee by calendar position.
    pub(crate) fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

/// Absence totals supplied by the absence bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceSummary {
    /// Vacation days taken.
    #[serde(default)]
    pub vacation_taken: Decimal,
    /// Sick days.
    #[serde(default)]
    pub sick_days: u32,
    /// Other absence days.
    #[serde(default)]
    pub other_absence_days: u32,
}

/// The monthly balance for one employee-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyResult {
    /// The employee.
    pub employee_id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Sum of daily gross minutes.
    pub total_gross_minutes: i32,
    /// Sum of daily net minutes.
    pub total_net_minutes: i32,
    /// Sum of daily target minutes.
    pub total_target_minutes: i32,
    /// Sum of daily overtime minutes.
    pub total_overtime_minutes: i32,
    /// Sum of daily undertime minutes.
    pub total_undertime_minutes: i32,
    /// Sum of daily break minutes.
    pub total_break_minutes: i32,
    /// Balance carried in from the previous month.
    pub flextime_start: i32,
    /// Overtime minus undertime before crediting.
    pub flextime_raw_change: i32,
    /// Change credited after applying the credit type.
    pub flextime_change: i32,
    /// Part of the raw change that was not credited.
    pub flextime_forfeited: i32,
    /// Minutes removed by the annual limits.
    pub flextime_clamped: i32,
    /// Balance at the end of the month.
    pub flextime_end: i32,
    /// Balance carried into the next month.
    pub flextime_carryover: i32,
    /// Pass-through absence totals.
    pub absences: AbsenceSummary,
    /// Days with gross time.
    pub work_days: u32,
    /// Days in error.
    pub days_with_errors: u32,
    /// Whether the month is closed.
    pub closed: bool,
    /// When the month was last closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who last closed the month.
    pub closed_by: Option<String>,
    /// When the month was last reopened.
    pub reopened_at: Option<DateTime<Utc>>,
    /// Who last reopened the month.
    pub reopened_by: Option<String>,
    /// Warning codes in the order they were raised.
    pub warnings: Vec<String>,
    /// When the result was produced.
    pub computed_at: DateTime<Utc>,
}

impl MonthlyResult {
    /// The key this result is stored under.
    pub fn key(&self) -> MonthKey {
        MonthKey {
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
        }
    }

    /// Returns true if `code` was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|c| c == code)
    }

    /// End-of-month balance in hours.
    pub fn flextime_end_hours(&self) -> Decimal {
        minutes_to_hours(self.flextime_end)
    }
}
