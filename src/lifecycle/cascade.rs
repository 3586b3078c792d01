//! Cascading recalculation across consecutive months.
//!
//! Changing one month's totals changes the carryover of every later month,
//! so months are walked in calendar order and the carryover of each step is
//! fed into the next. Months are addressed by [`MonthKey`] through a
//! [`MonthLedger`]; they never reference each other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceSummary, DailyResult, MonthKey, MonthlyResult, MonthlyRules};

use super::month::{MonthRecord, MonthState};

/// Everything needed to recalculate one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInput {
    /// Daily results of the month.
    pub daily_results: Vec<DailyResult>,
    /// Crediting rules in effect for the month.
    pub rules: Option<MonthlyRules>,
    /// Absence totals passed through to the result.
    pub absences: AbsenceSummary,
}

/// Storage seam for month inputs and results.
///
/// Implementations must serialize writes per key; the engine does not
/// guard against concurrent recalculation of the same month.
pub trait MonthLedger {
    /// Loads the inputs of a month.
    fn inputs(&self, key: &MonthKey) -> EngineResult<MonthInput>;

    /// Loads the stored result of a month.
    fn stored(&self, key: &MonthKey) -> Option<MonthlyResult>;

    /// Persists a result under its key, replacing any previous one.
    fn store(&mut self, result: MonthlyResult) -> EngineResult<()>;

    /// Loads a month as a lifecycle record.
    fn load_record(&self, key: MonthKey) -> MonthRecord {
        MonthRecord::new(key, self.stored(&key))
    }

    /// Persists the result of a lifecycle record, if it has one.
    fn save_record(&mut self, record: MonthRecord) -> EngineResult<()> {
        match record.into_result() {
            Some(result) => self.store(result),
            None => Ok(()),
        }
    }
}

/// A ledger held in memory, ordered by month.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    inputs: BTreeMap<MonthKey, MonthInput>,
    results: BTreeMap<MonthKey, MonthlyResult>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the inputs of a month.
    pub fn set_inputs(&mut self, key: MonthKey, input: MonthInput) {
        self.inputs.insert(key, input);
    }

    /// Returns the stored result of a month without cloning it.
    pub fn result(&self, key: &MonthKey) -> Option<&MonthlyResult> {
        self.results.get(key)
    }

    /// Iterates stored results in calendar order.
    pub fn results(&self) -> impl Iterator<Item = &MonthlyResult> {
        self.results.values()
    }
}

impl MonthLedger for InMemoryLedger {
    fn inputs(&self, key: &MonthKey) -> EngineResult<MonthInput> {
        self.inputs
            .get(key)
            .cloned()
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "No inputs recorded for employee {} in {}-{:02}",
                    key.employee_id, key.year, key.month
                ),
            })
    }

    fn stored(&self, key: &MonthKey) -> Option<MonthlyResult> {
        self.results.get(key).cloned()
    }

    fn store(&mut self, result: MonthlyResult) -> EngineResult<()> {
        self.results.insert(result.key(), result);
        Ok(())
    }
}

/// A month the cascade could not recalculate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeFailure {
    /// Year of the failed month.
    pub year: i32,
    /// Month number of the failed month.
    pub month: u32,
    /// Why it failed.
    pub message: String,
}

/// Outcome counts of a cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    /// Months recalculated and stored.
    pub processed: u32,
    /// Closed months left untouched.
    pub skipped: u32,
    /// Months whose recalculation failed.
    pub failed: u32,
    /// One entry per failed month, in calendar order.
    pub errors: Vec<CascadeFailure>,
}

/// Recalculates every month from the start month through the current month.
///
/// The start month is seeded with the stored carryover of the month before
/// it. Each successfully recalculated month passes its carryover to the
/// next; a closed month is skipped and passes its stored carryover on. A
/// month that fails is recorded and the walk continues with the month's
/// previously stored carryover, or the incoming one when nothing is stored.
///
/// A start month after the current month processes nothing.
///
/// # Errors
///
/// Only [`EngineError::InvalidMonth`] for an out-of-range start or current
/// month; per-month failures are reported in the summary.
///
/// # Examples
///
/// ```
/// use flextime_engine::lifecycle::{InMemoryLedger, MonthInput, recalculate_from};
/// use flextime_engine::models::{MonthKey, MonthlyRules};
/// use uuid::Uuid;
///
/// let employee = Uuid::nil();
/// let mut ledger = InMemoryLedger::new();
/// for month in 1..=3 {
///     let input = MonthInput {
///         rules: Some(MonthlyRules::default()),
///         ..MonthInput::default()
///     };
///     ledger.set_inputs(MonthKey::new(employee, 2026, month).unwrap(), input);
/// }
///
/// let summary = recalculate_from(&mut ledger, employee, 2026, 1, 2026, 3).unwrap();
/// assert_eq!(summary.processed, 3);
/// assert_eq!(summary.failed, 0);
/// ```
pub fn recalculate_from<L: MonthLedger + ?Sized>(
    ledger: &mut L,
    employee_id: Uuid,
    start_year: i32,
    start_month: u32,
    current_year: i32,
    current_month: u32,
) -> EngineResult<CascadeSummary> {
    let start = MonthKey::new(employee_id, start_year, start_month)?;
    let current = MonthKey::new(employee_id, current_year, current_month)?;

    let mut summary = CascadeSummary::default();
    let mut carryover = ledger
        .stored(&start.previous())
        .map(|result| result.flextime_carryover)
        .unwrap_or(0);

    let mut key = start;
    while key.ordinal() <= current.ordinal() {
        let mut record = ledger.load_record(key);

        if record.state() == MonthState::Closed {
            if let Some(result) = record.result() {
                carryover = result.flextime_carryover;
            }
            summary.skipped += 1;
            warn!(
                employee_id = %employee_id,
                year = key.year,
                month = key.month,
                "Skipping closed month"
            );
            key = key.next();
            continue;
        }

        let stored_carryover = record.result().map(|result| result.flextime_carryover);
        match recalculate_month(ledger, &mut record, carryover) {
            Ok(next_carryover) => {
                carryover = next_carryover;
                summary.processed += 1;
            }
            Err(error) => {
                warn!(
                    employee_id = %employee_id,
                    year = key.year,
                    month = key.month,
                    %error,
                    "Month recalculation failed"
                );
                carryover = stored_carryover.unwrap_or(carryover);
                summary.failed += 1;
                summary.errors.push(CascadeFailure {
                    year: key.year,
                    month: key.month,
                    message: error.to_string(),
                });
            }
        }
        key = key.next();
    }

    info!(
        employee_id = %employee_id,
        start = %format!("{}-{:02}", start.year, start.month),
        current = %format!("{}-{:02}", current.year, current.month),
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "Cascade finished"
    );

    Ok(summary)
}

/// Recalculates and stores one open month, returning its carryover.
fn recalculate_month<L: MonthLedger + ?Sized>(
    ledger: &mut L,
    record: &mut MonthRecord,
    carryover: i32,
) -> EngineResult<i32> {
    let input = ledger.inputs(&record.key())?;
    let result = record
        .recalculate(
            &input.daily_results,
            input.rules.as_ref(),
            Some(carryover),
            input.absences,
        )?
        .clone();
    let next_carryover = result.flextime_carryover;
    ledger.store(result)?;
    Ok(next_carryover)
}
