//! Monthly evaluation.
//!
//! Sums a month of daily results, applies the crediting policy to the net
//! flextime change and clamps the resulting balance to the annual limits.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceSummary, CreditType, DailyResult, MonthKey, MonthlyResult, MonthlyRules, codes,
};

/// Outcome of applying a credit type to a month's raw flextime change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlextimeCredit {
    /// Minutes added to the balance.
    pub credited: i32,
    /// Minutes of the raw change that were not credited.
    pub forfeited: i32,
    /// Codes describing why anything was withheld.
    pub warnings: Vec<&'static str>,
}

impl FlextimeCredit {
    fn pass_through(raw_change: i32) -> Self {
        Self {
            credited: raw_change,
            forfeited: 0,
            warnings: Vec::new(),
        }
    }

    /// Limits the credited amount to `cap`, moving the excess to forfeited.
    fn with_cap(mut self, cap: Option<i32>) -> Self {
        if let Some(cap) = cap {
            if self.credited > cap {
                self.forfeited += self.credited - cap;
                self.credited = cap;
                self.warnings.push(codes::MONTHLY_CAP);
            }
        }
        self
    }
}

/// Applies the credit type of `rules` to a raw flextime change.
///
/// * no evaluation: the change passes through unmodified
/// * complete carryover: credited up to the monthly cap, the rest forfeited
/// * after threshold: the first `flextime_threshold` minutes of a surplus
///   are forfeited and only the excess is credited (still subject to the
///   monthly cap); deficits are credited in full
/// * no carryover: nothing is credited and the whole change is forfeited
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::apply_credit_type;
/// use flextime_engine::models::{CreditType, MonthlyRules};
///
/// let capped = MonthlyRules {
///     credit_type: CreditType::CompleteCarryover,
///     monthly_cap: Some(480),
///     ..MonthlyRules::default()
/// };
/// let credit = apply_credit_type(600, &capped);
/// assert_eq!((credit.credited, credit.forfeited), (480, 120));
///
/// let threshold = MonthlyRules {
///     credit_type: CreditType::AfterThreshold,
///     flextime_threshold: Some(120),
///     ..MonthlyRules::default()
/// };
/// let credit = apply_credit_type(300, &threshold);
/// assert_eq!((credit.credited, credit.forfeited), (180, 120));
/// ```
pub fn apply_credit_type(raw_change: i32, rules: &MonthlyRules) -> FlextimeCredit {
    match rules.credit_type {
        CreditType::NoEvaluation => FlextimeCredit::pass_through(raw_change),
        CreditType::CompleteCarryover => {
            FlextimeCredit::pass_through(raw_change).with_cap(rules.monthly_cap)
        }
        CreditType::AfterThreshold => {
            let threshold = rules.flextime_threshold.unwrap_or(0).max(0);
            let credit = if raw_change <= 0 {
                FlextimeCredit::pass_through(raw_change)
            } else if raw_change <= threshold {
                FlextimeCredit {
                    credited: 0,
                    forfeited: raw_change,
                    warnings: vec![codes::THRESHOLD_FORFEITED],
                }
            } else {
                FlextimeCredit {
                    credited: raw_change - threshold,
                    forfeited: threshold,
                    warnings: if threshold > 0 {
                        vec![codes::THRESHOLD_FORFEITED]
                    } else {
                        Vec::new()
                    },
                }
            };
            credit.with_cap(rules.monthly_cap)
        }
        CreditType::NoCarryover => FlextimeCredit {
            credited: 0,
            forfeited: raw_change,
            warnings: if raw_change != 0 {
                vec![codes::NO_CARRYOVER_FORFEITED]
            } else {
                Vec::new()
            },
        },
    }
}

/// Evaluates one employee-month.
///
/// # Arguments
///
/// * `key` - employee, year and month being evaluated
/// * `daily_results` - the month's daily results; results for another
///   employee or month are ignored with a warning
/// * `rules` - crediting rules; `None` fails the call
/// * `previous_carryover` - the prior month's carryover, 0 when absent
/// * `absences` - absence totals passed through unchanged
///
/// # Errors
///
/// [`EngineError::InvalidMonth`] for a month outside 1..=12 and
/// [`EngineError::MissingMonthlyRules`] when no rules are supplied.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::calculate_month;
/// use flextime_engine::models::{AbsenceSummary, MonthKey, MonthlyRules};
/// use uuid::Uuid;
///
/// let key = MonthKey::new(Uuid::nil(), 2026, 3).unwrap();
/// let result = calculate_month(
///     key,
///     &[],
///     Some(&MonthlyRules::default()),
///     Some(90),
///     AbsenceSummary::default(),
/// )
/// .unwrap();
/// assert_eq!(result.flextime_start, 90);
/// assert_eq!(result.flextime_carryover, 90);
/// ```
pub fn calculate_month(
    key: MonthKey,
    daily_results: &[DailyResult],
    rules: Option<&MonthlyRules>,
    previous_carryover: Option<i32>,
    absences: AbsenceSummary,
) -> EngineResult<MonthlyResult> {
    calculate_month_at(key, daily_results, rules, previous_carryover, absences, Utc::now())
}

/// [`calculate_month`] stamped with a caller-supplied `computed_at`.
pub fn calculate_month_at(
    key: MonthKey,
    daily_results: &[DailyResult],
    rules: Option<&MonthlyRules>,
    previous_carryover: Option<i32>,
    absences: AbsenceSummary,
    computed_at: DateTime<Utc>,
) -> EngineResult<MonthlyResult> {
    if !(1..=12).contains(&key.month) {
        return Err(EngineError::InvalidMonth {
            year: key.year,
            month: key.month,
        });
    }
    let rules = rules.ok_or(EngineError::MissingMonthlyRules {
        employee_id: key.employee_id,
        year: key.year,
        month: key.month,
    })?;

    let mut warnings: Vec<String> = Vec::new();
    let mut totals = MonthTotals::default();
    for day in daily_results {
        if day.employee_id != key.employee_id || !key.contains(day.date) {
            codes::push_code(&mut warnings, codes::FOREIGN_DAILY_RESULT);
            continue;
        }
        totals.add(day);
    }
    if totals.days_with_errors > 0 {
        codes::push_code(&mut warnings, codes::DAYS_WITH_ERRORS);
    }

    let raw_change = totals.overtime - totals.undertime;
    let credit = apply_credit_type(raw_change, rules);
    for code in &credit.warnings {
        codes::push_code(&mut warnings, code);
    }

    let flextime_start = previous_carryover.unwrap_or(0);
    let unclamped_end = flextime_start + credit.credited;
    let mut flextime_end = unclamped_end;
    if let Some(upper) = rules.annual_upper_limit {
        if flextime_end > upper {
            flextime_end = upper;
            codes::push_code(&mut warnings, codes::ANNUAL_CAP);
        }
    }
    if let Some(lower) = rules.annual_lower_limit {
        if flextime_end < lower {
            flextime_end = lower;
            codes::push_code(&mut warnings, codes::ANNUAL_FLOOR);
        }
    }

    debug!(
        employee_id = %key.employee_id,
        year = key.year,
        month = key.month,
        credit_type = ?rules.credit_type,
        raw_change,
        credited = credit.credited,
        forfeited = credit.forfeited,
        flextime_end,
        "Month evaluated"
    );

    Ok(MonthlyResult {
        employee_id: key.employee_id,
        year: key.year,
        month: key.month,
        total_gross_minutes: totals.gross,
        total_net_minutes: totals.net,
        total_target_minutes: totals.target,
        total_overtime_minutes: totals.overtime,
        total_undertime_minutes: totals.undertime,
        total_break_minutes: totals.breaks,
        flextime_start,
        flextime_raw_change: raw_change,
        flextime_change: credit.credited,
        flextime_forfeited: credit.forfeited,
        flextime_clamped: unclamped_end - flextime_end,
        flextime_end,
        flextime_carryover: flextime_end,
        absences,
        work_days: totals.work_days,
        days_with_errors: totals.days_with_errors,
        closed: false,
        closed_at: None,
        closed_by: None,
        reopened_at: None,
        reopened_by: None,
        warnings,
        computed_at,
    })
}

#[derive(Debug, Default)]
struct MonthTotals {
    gross: i32,
    net: i32,
    target: i32,
    overtime: i32,
    undertime: i32,
    breaks: i32,
    work_days: u32,
    days_with_errors: u32,
}

impl MonthTotals {
    fn add(&mut self, day: &DailyResult) {
        self.gross += day.gross_minutes;
        self.net += day.net_minutes;
        self.target += day.target_minutes;
        self.overtime += day.overtime_minutes;
        self.undertime += day.undertime_minutes;
        self.breaks += day.break_minutes;
        if day.gross_minutes > 0 {
            self.work_days += 1;
        }
        if day.has_error() {
            self.days_with_errors += 1;
        }
    }
}
