//! Error types for the flextime engine.
//!
//! Per-day problems never show up here: they are recorded on the
//! [`DailyResult`](crate::models::DailyResult) itself so batch processing can
//! continue. This type covers configuration loading, missing required inputs
//! and month lifecycle violations.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the flextime engine.
///
/// # Example
///
/// ```
/// use flextime_engine::error::EngineError;
///
/// let error = EngineError::DayPlanNotFound {
///     code: "late_shift".to_string(),
/// };
/// assert_eq!(error.to_string(), "Day plan not found: late_shift");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Day plan code was not found in the configuration.
    #[error("Day plan not found: {code}")]
    DayPlanNotFound {
        /// The day plan code that was not found.
        code: String,
    },

    /// Monthly rule set code was not found in the configuration.
    #[error("Monthly rules not found: {code}")]
    MonthlyRulesNotFound {
        /// The rule set code that was not found.
        code: String,
    },

    /// A month was evaluated without any monthly rules.
    #[error("No monthly rules supplied for employee {employee_id} in {year}-{month:02}")]
    MissingMonthlyRules {
        /// The employee being evaluated.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// A month number outside 1..=12 was supplied.
    #[error("Invalid month {year}-{month}")]
    InvalidMonth {
        /// The year supplied.
        year: i32,
        /// The month number supplied.
        month: u32,
    },

    /// Recalculation was attempted on a closed month.
    #[error("Month {year}-{month:02} is closed for employee {employee_id}")]
    MonthClosed {
        /// The employee the month belongs to.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// Close was attempted on a month that is already closed.
    #[error("Month {year}-{month:02} is already closed for employee {employee_id}")]
    MonthAlreadyClosed {
        /// The employee the month belongs to.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// Reopen was attempted on a month that is not closed.
    #[error("Month {year}-{month:02} is not closed for employee {employee_id}")]
    MonthNotClosed {
        /// The employee the month belongs to.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// Close was attempted before the month had been calculated.
    #[error("Month {year}-{month:02} has not been calculated for employee {employee_id}")]
    MonthNotCalculated {
        /// The employee the month belongs to.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for the distinguished "month closed" condition.
    pub fn is_month_closed(&self) -> bool {
        matches!(self, EngineError::MonthClosed { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
