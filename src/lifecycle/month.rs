//! The Open/Closed state machine of one employee-month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::calculate_month;
use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceSummary, DailyResult, MonthKey, MonthlyResult, MonthlyRules};

/// Lifecycle state of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthState {
    /// The month may be recalculated.
    Open,
    /// The month is frozen until reopened.
    Closed,
}

/// One employee-month and its stored result, if any.
///
/// A month starts [`MonthState::Open`]. Closing requires a calculated
/// result; while closed, recalculation fails with
/// [`EngineError::MonthClosed`] and leaves the result untouched.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use flextime_engine::lifecycle::{MonthRecord, MonthState};
/// use flextime_engine::models::{AbsenceSummary, MonthKey, MonthlyRules};
/// use uuid::Uuid;
///
/// let key = MonthKey::new(Uuid::nil(), 2026, 3).unwrap();
/// let mut record = MonthRecord::new(key, None);
/// let rules = MonthlyRules::default();
///
/// record.recalculate(&[], Some(&rules), None, AbsenceSummary::default()).unwrap();
/// record.close("payroll", Utc::now()).unwrap();
/// assert_eq!(record.state(), MonthState::Closed);
///
/// let err = record
///     .recalculate(&[], Some(&rules), Some(60), AbsenceSummary::default())
///     .unwrap_err();
/// assert!(err.is_month_closed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    key: MonthKey,
    result: Option<MonthlyResult>,
}

impl MonthRecord {
    /// Creates a record from a previously stored result.
    pub fn new(key: MonthKey, result: Option<MonthlyResult>) -> Self {
        Self { key, result }
    }

    /// The month this record belongs to.
    pub fn key(&self) -> MonthKey {
        self.key
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MonthState {
        match &self.result {
            Some(result) if result.closed => MonthState::Closed,
            _ => MonthState::Open,
        }
    }

    /// The stored result, if the month has been calculated.
    pub fn result(&self) -> Option<&MonthlyResult> {
        self.result.as_ref()
    }

    /// Consumes the record, returning its result.
    pub fn into_result(self) -> Option<MonthlyResult> {
        self.result
    }

    /// Recalculates the month and replaces the stored result.
    ///
    /// The audit fields of the previous result are carried over. A closed
    /// month is never recalculated and never implicitly reopened.
    ///
    /// # Errors
    ///
    /// [`EngineError::MonthClosed`] when the month is closed, otherwise any
    /// error from [`calculate_month`].
    pub fn recalculate(
        &mut self,
        daily_results: &[DailyResult],
        rules: Option<&MonthlyRules>,
        previous_carryover: Option<i32>,
        absences: AbsenceSummary,
    ) -> EngineResult<&MonthlyResult> {
        if self.state() == MonthState::Closed {
            return Err(self.closed_error());
        }

        let mut result =
            calculate_month(self.key, daily_results, rules, previous_carryover, absences)?;
        if let Some(previous) = &self.result {
            result.closed_at = previous.closed_at;
            result.closed_by = previous.closed_by.clone();
            result.reopened_at = previous.reopened_at;
            result.reopened_by = previous.reopened_by.clone();
        }

        info!(
            employee_id = %self.key.employee_id,
            year = self.key.year,
            month = self.key.month,
            flextime_carryover = result.flextime_carryover,
            "Month recalculated"
        );

        Ok(self.result.insert(result))
    }

    /// Closes the month.
    ///
    /// # Errors
    ///
    /// [`EngineError::MonthNotCalculated`] when no result exists yet and
    /// [`EngineError::MonthAlreadyClosed`] when the month is closed.
    pub fn close(&mut self, actor: &str, at: DateTime<Utc>) -> EngineResult<()> {
        let key = self.key;
        let result = self.result.as_mut().ok_or(EngineError::MonthNotCalculated {
            employee_id: key.employee_id,
            year: key.year,
            month: key.month,
        })?;
        if result.closed {
            return Err(EngineError::MonthAlreadyClosed {
                employee_id: key.employee_id,
                year: key.year,
                month: key.month,
            });
        }

        result.closed = true;
        result.closed_at = Some(at);
        result.closed_by = Some(actor.to_string());

        info!(
            employee_id = %key.employee_id,
            year = key.year,
            month = key.month,
            actor,
            "Month closed"
        );
        Ok(())
    }

    /// Reopens a closed month.
    ///
    /// # Errors
    ///
    /// [`EngineError::MonthNotClosed`] unless the month is closed.
    pub fn reopen(&mut self, actor: &str, at: DateTime<Utc>) -> EngineResult<()> {
        let key = self.key;
        let result = match self.result.as_mut() {
            Some(result) if result.closed => result,
            _ => {
                return Err(EngineError::MonthNotClosed {
                    employee_id: key.employee_id,
                    year: key.year,
                    month: key.month,
                });
            }
        };

        result.closed = false;
        result.reopened_at = Some(at);
        result.reopened_by = Some(actor.to_string());

        info!(
            employee_id = %key.employee_id,
            year = key.year,
            month = key.month,
            actor,
            "Month reopened"
        );
        Ok(())
    }

    fn closed_error(&self) -> EngineError {
        EngineError::MonthClosed {
            employee_id: self.key.employee_id,
            year: self.key.year,
            month: self.key.month,
        }
    }
}
