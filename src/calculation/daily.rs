//! Daily calculation.
//!
//! Turns one employee-day of punches plus the day's rules into a
//! [`DailyResult`]. The function never fails: every problem is recorded on
//! the result as an error or warning code so that batch recalculation can
//! move on to the next day.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{DailyResult, DayContext, DayRules, NoPunchPolicy, Punch, codes};

use super::breaks::resolve_break;
use super::core_time::check_core_time;
use super::pairing::{TimeSpan, pair_punches};
use super::rounding::{apply_tolerance, round_time};

/// Calculates the working time of one employee-day.
///
/// # Arguments
///
/// * `punches` - the day's raw punches in any order
/// * `rules` - the assigned day plan; `None` falls back to an off day
/// * `day` - holiday, absence and employee master facts for the day
/// * `settings` - system-wide switches
///
/// # Branches
///
/// 1. Holiday: punches are ignored and the configured category credit is
///    booked as net and gross time. A category without credit books zero.
/// 2. No punches: the day plan's [`NoPunchPolicy`] decides.
/// 3. Punches: tolerance, rounding, break deduction, core time and the
///    daily maximum are applied to the paired work spans.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::calculate_day;
/// use flextime_engine::config::EngineSettings;
/// use flextime_engine::models::{
///     DayContext, DayRules, DayStatus, Punch, PunchCategory, PunchDirection,
/// };
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let punch = |direction, time, sequence| Punch {
///     employee_id: Uuid::nil(),
///     date,
///     category: PunchCategory::Work,
///     direction,
///     time,
///     sequence,
/// };
/// let rules = DayRules {
///     target_minutes: 480,
///     ..DayRules::off_day()
/// };
///
/// let result = calculate_day(
///     &[
///         punch(PunchDirection::Arrival, 480, 1),
///         punch(PunchDirection::Departure, 1020, 2),
///     ],
///     Some(&rules),
///     &DayContext::workday(Uuid::nil(), date),
///     &EngineSettings::default(),
/// );
///
/// assert_eq!(result.status, DayStatus::Calculated);
/// assert_eq!(result.net_minutes, 540);
/// assert_eq!(result.overtime_minutes, 60);
/// ```
pub fn calculate_day(
    punches: &[Punch],
    rules: Option<&DayRules>,
    day: &DayContext,
    settings: &EngineSettings,
) -> DailyResult {
    calculate_day_at(punches, rules, day, settings, Utc::now())
}

/// [`calculate_day`] with a caller-supplied `computed_at`, so the same
/// inputs always give the same result.
pub fn calculate_day_at(
    punches: &[Punch],
    rules: Option<&DayRules>,
    day: &DayContext,
    settings: &EngineSettings,
    computed_at: DateTime<Utc>,
) -> DailyResult {
    let has_plan = rules.is_some();
    let total_punches = punches.len();
    let off_day;
    let rules = match rules {
        Some(rules) => rules,
        None => {
            off_day = DayRules::off_day();
            &off_day
        }
    };

    let target = rules.resolve_target(day.is_approved_absence, day.employee_master_target_minutes);
    let mut result = DailyResult::new(day.employee_id, day.date, target, computed_at);
    if !has_plan {
        result.warn(codes::NO_DAY_PLAN);
    }

    let punches: Vec<Punch> = punches
        .iter()
        .filter(|punch| punch.employee_id == day.employee_id && punch.date == day.date)
        .cloned()
        .collect();
    let punches = punches.as_slice();
    if punches.len() < total_punches {
        result.warn(codes::FOREIGN_PUNCH_IGNORED);
    }

    if day.is_holiday {
        credit_holiday(&mut result, rules, day.holiday_category, !punches.is_empty());
    } else if punches.is_empty() {
        apply_no_punch_policy(&mut result, rules.no_punch_policy);
    } else {
        evaluate_punches(&mut result, punches, rules, settings);
    }

    debug!(
        employee_id = %result.employee_id,
        date = %result.date,
        status = ?result.status,
        target = result.target_minutes,
        net = result.net_minutes,
        warnings = ?result.warnings,
        errors = ?result.errors,
        "Day calculated"
    );

    result
}

/// Books the holiday credit for the category; zero when none is configured.
fn credit_holiday(
    result: &mut DailyResult,
    rules: &DayRules,
    category: Option<u8>,
    has_punches: bool,
) {
    result.warn(codes::HOLIDAY);

    let credit = match category.and_then(|category| rules.holiday_credit(category)) {
        Some(credit) => credit,
        None => {
            result.warn(codes::HOLIDAY_CREDIT_NOT_CONFIGURED);
            0
        }
    };
    if has_punches {
        result.warn(codes::HOLIDAY_PUNCHES_IGNORED);
    }

    result.set_worked(credit, credit);
}

fn apply_no_punch_policy(result: &mut DailyResult, policy: NoPunchPolicy) {
    let target = result.target_minutes;
    match policy {
        NoPunchPolicy::FlagAsError => {
            result.set_worked(0, 0);
            result.fail(codes::NO_PUNCHES);
        }
        NoPunchPolicy::CreditTarget => {
            result.set_worked(target, target);
            result.warn(codes::NO_PUNCHES_CREDITED);
        }
        NoPunchPolicy::DeductTarget => {
            result.set_worked(0, 0);
            result.warn(codes::NO_PUNCHES_DEDUCTED);
        }
        NoPunchPolicy::VocationalSchool => {
            result.set_worked(target, target);
            result.warn(codes::NO_PUNCHES_CREDITED);
            result.warn(codes::ABSENCE_CREATION_DELEGATED);
        }
        NoPunchPolicy::CreditTargetToDefaultOrder => {
            result.set_worked(target, target);
            result.warn(codes::NO_PUNCHES_CREDITED);
            result.warn(codes::ORDER_BOOKING_DELEGATED);
        }
    }
}

fn evaluate_punches(
    result: &mut DailyResult,
    punches: &[Punch],
    rules: &DayRules,
    settings: &EngineSettings,
) {
    let paired = match pair_punches(punches) {
        Ok(paired) => paired,
        Err(error) => {
            // time fields stay zero, only the target survives
            result.fail(error.code());
            return;
        }
    };

    let presence: Vec<TimeSpan> = paired
        .work
        .iter()
        .map(|span| tolerance_adjusted(span, rules))
        .collect();
    let adjusted = round_spans(&presence, rules, settings);

    let gross: i32 = adjusted.iter().map(TimeSpan::minutes).sum();
    if paired.stray_break_minutes() > 0 {
        result.warn(codes::BREAK_OUTSIDE_WORK);
    }
    let break_minutes = resolve_break(
        gross,
        paired.booked_break_minutes(),
        rules.break_rule.as_ref(),
    );
    let mut net = gross - break_minutes;
    let mut gross = gross;

    if let Some(core_time) = rules.core_time.as_ref() {
        if let Some(violation) = check_core_time(&presence, core_time) {
            if settings.core_time_violation_is_error {
                result.fail(violation.code());
            } else {
                result.warn(violation.code());
            }
        }
    }

    if let Some(max_net) = rules.max_net_work_minutes {
        if net > max_net {
            let excess = net - max_net;
            net = max_net;
            gross -= excess;
            result.capped_minutes = excess;
            result.warn(codes::CAPPED);
        }
    }

    result.break_minutes = break_minutes;
    result.first_arrival = adjusted.first().map(|span| span.start);
    result.last_departure = adjusted.last().map(|span| span.end);
    result.set_worked(gross, net);
}

fn tolerance_adjusted(span: &TimeSpan, rules: &DayRules) -> TimeSpan {
    let tolerance = rules.tolerance_minutes;
    TimeSpan {
        start: rules
            .arrival_boundary()
            .map_or(span.start, |boundary| apply_tolerance(span.start, boundary, tolerance)),
        end: rules
            .departure_boundary()
            .map_or(span.end, |boundary| apply_tolerance(span.end, boundary, tolerance)),
    }
}

/// Rounds the first arrival and last departure, or every pair when
/// `round_all_punches` is set.
///
/// A span never starts before the previous one ends, so rounding cannot
/// count the same minute twice.
fn round_spans(spans: &[TimeSpan], rules: &DayRules, settings: &EngineSettings) -> Vec<TimeSpan> {
    let (arrival_anchor, departure_anchor) = if settings.rounding_relative_to_plan {
        (rules.arrival_boundary(), rules.departure_boundary())
    } else {
        (None, None)
    };
    let last = spans.len().saturating_sub(1);
    let mut previous_end: Option<i32> = None;

    spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            let mut start = if rules.round_all_punches || index == 0 {
                round_time(span.start, &rules.arrival_rounding, arrival_anchor)
            } else {
                span.start
            };
            if let Some(previous_end) = previous_end {
                start = start.max(previous_end);
            }
            let end = if rules.round_all_punches || index == last {
                round_time(span.end, &rules.departure_rounding, departure_anchor)
            } else {
                span.end
            };
            previous_end = Some(previous_end.map_or(end, |previous| previous.max(end)));
            TimeSpan { start, end }
        })
        .collect()
}

/// One employee-day to calculate as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayJob {
    /// The day's punches.
    pub punches: Vec<Punch>,
    /// The assigned day plan, if any.
    pub rules: Option<DayRules>,
    /// Holiday, absence and employee master facts.
    pub day: DayContext,
}

/// Calculates many independent employee-days in parallel.
///
/// Results are returned in the order of `jobs`.
pub fn calculate_days(jobs: &[DayJob], settings: &EngineSettings) -> Vec<DailyResult> {
    jobs.par_iter()
        .map(|job| calculate_day(&job.punches, job.rules.as_ref(), &job.day, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BreakRule, CoreTime, DayStatus, PlannedWindow, PunchCategory, PunchDirection, Rounding,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn punch(
        category: PunchCategory,
        direction: PunchDirection,
        time: i32,
        sequence: u32,
    ) -> Punch {
        Punch {
            employee_id: Uuid::nil(),
            date: date(),
            category,
            direction,
            time,
            sequence,
        }
    }

    /// Work arrival/departure pairs from (arrival, departure) minutes.
    fn work_day(pairs: &[(i32, i32)]) -> Vec<Punch> {
        let mut punches = Vec::new();
        let mut sequence = 1;
        for &(arrival, departure) in pairs {
            punches.push(punch(
                PunchCategory::Work,
                PunchDirection::Arrival,
                arrival,
                sequence,
            ));
            punches.push(punch(
                PunchCategory::Work,
                PunchDirection::Departure,
                departure,
                sequence + 1,
            ));
            sequence += 2;
        }
        punches
    }

    fn plan(target: i32) -> DayRules {
        DayRules {
            target_minutes: target,
            no_punch_policy: NoPunchPolicy::FlagAsError,
            ..DayRules::off_day()
        }
    }

    fn planned_flex_day() -> DayRules {
        DayRules {
            arrival: Some(PlannedWindow {
                from: 490,
                to: Some(540),
            }),
            departure: Some(PlannedWindow {
                from: 960,
                to: Some(1020),
            }),
            ..plan(480)
        }
    }

    fn workday() -> DayContext {
        DayContext::workday(Uuid::nil(), date())
    }

    fn holiday(category: Option<u8>) -> DayContext {
        DayContext {
            is_holiday: true,
            holiday_category: category,
            ..workday()
        }
    }

    fn calc(punches: &[Punch], rules: &DayRules) -> DailyResult {
        calculate_day(punches, Some(rules), &workday(), &EngineSettings::default())
    }

    // ==========================================================================
    // Target resolution
    // ==========================================================================

    #[test]
    fn test_absence_day_uses_alternate_target() {
        let rules = DayRules {
            absence_target_minutes: Some(240),
            no_punch_policy: NoPunchPolicy::DeductTarget,
            ..plan(480)
        };
        let day = DayContext {
            is_approved_absence: true,
            ..workday()
        };
        let result = calculate_day(&[], Some(&rules), &day, &EngineSettings::default());
        assert_eq!(result.target_minutes, 240);
        assert_eq!(result.undertime_minutes, 240);
    }

    #[test]
    fn test_employee_master_target_wins() {
        let rules = DayRules {
            absence_target_minutes: Some(240),
            target_from_employee_master: true,
            ..plan(480)
        };
        let day = DayContext {
            is_approved_absence: true,
            employee_master_target_minutes: Some(300),
            ..workday()
        };
        let result = calculate_day(
            &work_day(&[(480, 780)]),
            Some(&rules),
            &day,
            &EngineSettings::default(),
        );
        assert_eq!(result.target_minutes, 300);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
    }

    // ==========================================================================
    // Holidays
    // ==========================================================================

    #[test]
    fn test_holiday_credits_configured_category() {
        let mut credits = BTreeMap::new();
        credits.insert(1, 480);
        credits.insert(2, 240);
        let rules = DayRules {
            holiday_credits: credits,
            ..plan(480)
        };

        let result = calculate_day(&[], Some(&rules), &holiday(Some(2)), &EngineSettings::default());
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.net_minutes, 240);
        assert_eq!(result.gross_minutes, 240);
        assert_eq!(result.undertime_minutes, 240);
        assert!(result.has_code(codes::HOLIDAY));
        assert!(!result.has_code(codes::HOLIDAY_CREDIT_NOT_CONFIGURED));
    }

    #[test]
    fn test_holiday_without_credit_books_zero_not_target() {
        let rules = plan(480);
        let result = calculate_day(&[], Some(&rules), &holiday(Some(3)), &EngineSettings::default());
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.undertime_minutes, 480);
        assert_eq!(result.status, DayStatus::Calculated);
        assert!(result.has_code(codes::HOLIDAY_CREDIT_NOT_CONFIGURED));
    }

    #[test]
    fn test_holiday_ignores_punches() {
        let mut credits = BTreeMap::new();
        credits.insert(1, 480);
        let rules = DayRules {
            holiday_credits: credits,
            ..plan(480)
        };
        let result = calculate_day(
            &work_day(&[(480, 600)]),
            Some(&rules),
            &holiday(Some(1)),
            &EngineSettings::default(),
        );
        assert_eq!(result.net_minutes, 480);
        assert_eq!(result.first_arrival, None);
        assert!(result.has_code(codes::HOLIDAY_PUNCHES_IGNORED));
    }

    #[test]
    fn test_holiday_credit_above_target_is_overtime() {
        let mut credits = BTreeMap::new();
        credits.insert(1, 480);
        let rules = DayRules {
            holiday_credits: credits,
            ..plan(0)
        };
        let result = calculate_day(&[], Some(&rules), &holiday(Some(1)), &EngineSettings::default());
        assert_eq!(result.overtime_minutes, 480);
    }

    // ==========================================================================
    // No-punch policies
    // ==========================================================================

    #[test]
    fn test_no_punches_flag_as_error() {
        let result = calc(&[], &plan(480));
        assert_eq!(result.status, DayStatus::Error);
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.undertime_minutes, 480);
        assert_eq!(result.errors, vec![codes::NO_PUNCHES.to_string()]);
    }

    #[test]
    fn test_no_punches_credit_target() {
        let rules = DayRules {
            no_punch_policy: NoPunchPolicy::CreditTarget,
            ..plan(480)
        };
        let result = calc(&[], &rules);
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.net_minutes, 480);
        assert_eq!(result.gross_minutes, 480);
        assert_eq!(result.undertime_minutes, 0);
        assert!(result.has_code(codes::NO_PUNCHES_CREDITED));
    }

    #[test]
    fn test_no_punches_deduct_target() {
        let rules = DayRules {
            no_punch_policy: NoPunchPolicy::DeductTarget,
            ..plan(480)
        };
        let result = calc(&[], &rules);
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.undertime_minutes, 480);
        assert!(result.has_code(codes::NO_PUNCHES_DEDUCTED));
    }

    #[test]
    fn test_no_punches_vocational_school_delegates_absence() {
        let rules = DayRules {
            no_punch_policy: NoPunchPolicy::VocationalSchool,
            ..plan(480)
        };
        let result = calc(&[], &rules);
        assert_eq!(result.net_minutes, 480);
        assert!(result.has_code(codes::NO_PUNCHES_CREDITED));
        assert!(result.has_code(codes::ABSENCE_CREATION_DELEGATED));
    }

    #[test]
    fn test_no_punches_default_order_delegates_booking() {
        let rules = DayRules {
            no_punch_policy: NoPunchPolicy::CreditTargetToDefaultOrder,
            ..plan(480)
        };
        let result = calc(&[], &rules);
        assert_eq!(result.net_minutes, 480);
        assert!(result.has_code(codes::ORDER_BOOKING_DELEGATED));
        assert_eq!(result.status, DayStatus::Calculated);
    }

    #[test]
    fn test_missing_plan_is_off_day() {
        let result = calculate_day(&[], None, &workday(), &EngineSettings::default());
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.target_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
        assert!(result.has_code(codes::NO_DAY_PLAN));
    }

    #[test]
    fn test_missing_plan_with_punches_is_all_overtime() {
        let result = calculate_day(
            &work_day(&[(480, 600)]),
            None,
            &workday(),
            &EngineSettings::default(),
        );
        assert_eq!(result.net_minutes, 120);
        assert_eq!(result.overtime_minutes, 120);
    }

    // ==========================================================================
    // Punch evaluation
    // ==========================================================================

    #[test]
    fn test_plain_day() {
        let result = calc(&work_day(&[(480, 960)]), &plan(480));
        assert_eq!(result.gross_minutes, 480);
        assert_eq!(result.net_minutes, 480);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
        assert_eq!(result.first_arrival, Some(480));
        assert_eq!(result.last_departure, Some(960));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_tolerance_snaps_to_plan() {
        let rules = DayRules {
            tolerance_minutes: 5,
            ..planned_flex_day()
        };
        // 08:13 arrival snaps to 08:10, 16:57 departure snaps to 17:00
        let result = calc(&work_day(&[(493, 1017)]), &rules);
        assert_eq!(result.first_arrival, Some(490));
        assert_eq!(result.last_departure, Some(1020));
        assert_eq!(result.gross_minutes, 530);
    }

    #[test]
    fn test_relative_rounding_anchors_to_plan_start() {
        let rules = DayRules {
            arrival_rounding: Rounding::Up { interval: 15 },
            ..planned_flex_day()
        };
        let punches = work_day(&[(491, 1020)]);

        let relative = calculate_day(
            &punches,
            Some(&rules),
            &workday(),
            &EngineSettings {
                rounding_relative_to_plan: true,
                ..EngineSettings::default()
            },
        );
        assert_eq!(relative.first_arrival, Some(505));

        let absolute = calc(&punches, &rules);
        assert_eq!(absolute.first_arrival, Some(495));
    }

    #[test]
    fn test_only_outer_punches_rounded_by_default() {
        let rules = DayRules {
            arrival_rounding: Rounding::Up { interval: 15 },
            departure_rounding: Rounding::Down { interval: 15 },
            ..plan(480)
        };
        let result = calc(&work_day(&[(481, 722), (781, 1019)]), &rules);
        // 495..722 and 781..1005
        assert_eq!(result.first_arrival, Some(495));
        assert_eq!(result.last_departure, Some(1005));
        assert_eq!(result.gross_minutes, 227 + 224);
    }

    #[test]
    fn test_round_all_punches_rounds_every_pair() {
        let rules = DayRules {
            arrival_rounding: Rounding::Up { interval: 15 },
            departure_rounding: Rounding::Down { interval: 15 },
            round_all_punches: true,
            ..plan(480)
        };
        let result = calc(&work_day(&[(481, 722), (781, 1019)]), &rules);
        // 495..720 and 795..1005
        assert_eq!(result.gross_minutes, 225 + 210);
    }

    #[test]
    fn test_rounded_pairs_never_overlap() {
        let rules = DayRules {
            arrival_rounding: Rounding::Down { interval: 15 },
            departure_rounding: Rounding::Up { interval: 15 },
            round_all_punches: true,
            ..plan(480)
        };
        // 480..735 and 720..1020 before clamping
        let result = calc(&work_day(&[(480, 721), (730, 1020)]), &rules);
        assert_eq!(result.gross_minutes, 540);
        assert_eq!(result.net_minutes, 540);
        assert_eq!(result.first_arrival, Some(480));
        assert_eq!(result.last_departure, Some(1020));
    }

    #[test]
    fn test_fixed_break_deduction() {
        let rules = DayRules {
            break_rule: Some(BreakRule::Fixed { minutes: 30 }),
            ..plan(480)
        };
        let result = calc(&work_day(&[(480, 990)]), &rules);
        assert_eq!(result.gross_minutes, 510);
        assert_eq!(result.break_minutes, 30);
        assert_eq!(result.net_minutes, 480);
    }

    #[test]
    fn test_booked_break_deducted_without_rule() {
        let mut punches = work_day(&[(480, 1020)]);
        punches.push(punch(PunchCategory::Break, PunchDirection::Departure, 720, 10));
        punches.push(punch(PunchCategory::Break, PunchDirection::Arrival, 765, 11));
        // work departure is punched after the break
        punches[1].sequence = 12;

        let result = calc(&punches, &plan(480));
        assert_eq!(result.gross_minutes, 540);
        assert_eq!(result.break_minutes, 45);
        assert_eq!(result.net_minutes, 495);
        assert_eq!(result.overtime_minutes, 15);
    }

    #[test]
    fn test_core_time_violation_is_warning_by_default() {
        let rules = DayRules {
            core_time: Some(CoreTime {
                start: 540,
                end: 900,
            }),
            ..plan(480)
        };
        let result = calc(&work_day(&[(600, 1080)]), &rules);
        assert_eq!(result.status, DayStatus::Calculated);
        assert!(result.warnings.contains(&codes::CORE_TIME_LATE_ARRIVAL.to_string()));
        assert_eq!(result.net_minutes, 480);
    }

    #[test]
    fn test_core_time_violation_as_error_keeps_times() {
        let rules = DayRules {
            core_time: Some(CoreTime {
                start: 540,
                end: 900,
            }),
            ..plan(480)
        };
        let result = calculate_day(
            &work_day(&[(480, 840)]),
            Some(&rules),
            &workday(),
            &EngineSettings {
                core_time_violation_is_error: true,
                ..EngineSettings::default()
            },
        );
        assert_eq!(result.status, DayStatus::Error);
        assert!(result.errors.contains(&codes::CORE_TIME_EARLY_DEPARTURE.to_string()));
        assert_eq!(result.net_minutes, 360);
        assert_eq!(result.undertime_minutes, 120);
    }

    #[test]
    fn test_core_time_uses_unrounded_presence() {
        let rules = DayRules {
            core_time: Some(CoreTime {
                start: 540,
                end: 900,
            }),
            arrival_rounding: Rounding::Add { value: 10 },
            ..plan(480)
        };
        // arrival 08:55 is booked as 09:05 but presence began before core time
        let result = calc(&work_day(&[(535, 1020)]), &rules);
        assert_eq!(result.first_arrival, Some(545));
        assert!(!result.has_code(codes::CORE_TIME_LATE_ARRIVAL));
    }

    #[test]
    fn test_daily_cap_reports_excess() {
        let rules = DayRules {
            max_net_work_minutes: Some(600),
            break_rule: Some(BreakRule::Fixed { minutes: 45 }),
            ..plan(480)
        };
        let result = calc(&work_day(&[(360, 1140)]), &rules);
        // 780 gross, 735 net, capped to 600
        assert_eq!(result.capped_minutes, 135);
        assert_eq!(result.net_minutes, 600);
        assert_eq!(result.gross_minutes, 645);
        assert_eq!(result.overtime_minutes, 120);
        assert!(result.has_code(codes::CAPPED));
    }

    #[test]
    fn test_unpaired_punch_is_error_with_zeroed_times() {
        let punches = vec![punch(PunchCategory::Work, PunchDirection::Arrival, 480, 1)];
        let result = calc(&punches, &plan(480));
        assert_eq!(result.status, DayStatus::Error);
        assert_eq!(result.errors, vec![codes::MISSING_DEPARTURE.to_string()]);
        assert_eq!(result.target_minutes, 480);
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
    }

    #[test]
    fn test_out_of_order_punches_are_error() {
        let mut punches = work_day(&[(480, 960)]);
        punches[0].sequence = 5;
        let result = calc(&punches, &plan(480));
        assert_eq!(result.status, DayStatus::Error);
        assert!(result.has_code(codes::PUNCHES_OUT_OF_ORDER));
    }

    #[test]
    fn test_break_only_punches_count_as_no_work() {
        let punches = vec![
            punch(PunchCategory::Break, PunchDirection::Departure, 720, 1),
            punch(PunchCategory::Break, PunchDirection::Arrival, 750, 2),
        ];
        let result = calc(&punches, &plan(480));
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.break_minutes, 0);
        assert_eq!(result.undertime_minutes, 480);
        assert!(result.has_code(codes::BREAK_OUTSIDE_WORK));
    }

    #[test]
    fn test_break_after_work_is_not_deducted() {
        let mut punches = work_day(&[(480, 720)]);
        punches.push(punch(PunchCategory::Break, PunchDirection::Departure, 800, 3));
        punches.push(punch(PunchCategory::Break, PunchDirection::Arrival, 860, 4));

        let result = calc(&punches, &plan(240));
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.break_minutes, 0);
        assert_eq!(result.net_minutes, 240);
        assert_eq!(result.undertime_minutes, 0);
        assert!(result.has_code(codes::BREAK_OUTSIDE_WORK));
    }

    #[test]
    fn test_break_inside_work_raises_no_warning() {
        let mut punches = work_day(&[(480, 1020)]);
        punches.push(punch(PunchCategory::Break, PunchDirection::Departure, 720, 10));
        punches.push(punch(PunchCategory::Break, PunchDirection::Arrival, 750, 11));
        punches[1].sequence = 12;

        let result = calc(&punches, &plan(480));
        assert_eq!(result.break_minutes, 30);
        assert!(!result.has_code(codes::BREAK_OUTSIDE_WORK));
    }

    // ==========================================================================
    // Punch ownership
    // ==========================================================================

    #[test]
    fn test_punches_of_other_employee_and_date_are_ignored() {
        let other_date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let punches: Vec<Punch> = work_day(&[(480, 1020)])
            .into_iter()
            .map(|punch| Punch {
                employee_id: Uuid::from_u128(9),
                date: other_date,
                ..punch
            })
            .collect();

        let result = calc(&punches, &plan(480));
        assert!(result.has_code(codes::FOREIGN_PUNCH_IGNORED));
        assert!(result.has_code(codes::NO_PUNCHES));
        assert_eq!(result.status, DayStatus::Error);
        assert_eq!(result.net_minutes, 0);
    }

    #[test]
    fn test_foreign_punches_mixed_with_own_are_dropped() {
        let mut punches = work_day(&[(480, 960)]);
        punches.push(Punch {
            date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            ..punch(PunchCategory::Work, PunchDirection::Departure, 1020, 3)
        });

        let result = calc(&punches, &plan(480));
        assert_eq!(result.status, DayStatus::Calculated);
        assert_eq!(result.net_minutes, 480);
        assert!(result.has_code(codes::FOREIGN_PUNCH_IGNORED));
    }

    #[test]
    fn test_own_punches_raise_no_ownership_warning() {
        let result = calc(&work_day(&[(480, 960)]), &plan(480));
        assert!(!result.has_code(codes::FOREIGN_PUNCH_IGNORED));
    }

    #[test]
    fn test_fixed_timestamp_gives_identical_results() {
        let computed_at = DateTime::parse_from_rfc3339("2026-03-02T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let punches = work_day(&[(481, 1019)]);
        let rules = planned_flex_day();
        let settings = EngineSettings::default();

        let first = calculate_day_at(&punches, Some(&rules), &workday(), &settings, computed_at);
        let second = calculate_day_at(&punches, Some(&rules), &workday(), &settings, computed_at);
        assert_eq!(first, second);
        assert_eq!(first.computed_at, computed_at);
    }

    // ==========================================================================
    // Batch
    // ==========================================================================

    #[test]
    fn test_batch_preserves_order() {
        let jobs: Vec<DayJob> = (0..20)
            .map(|i| DayJob {
                punches: work_day(&[(480, 480 + i * 10)]),
                rules: Some(plan(0)),
                day: workday(),
            })
            .collect();

        let results = calculate_days(&jobs, &EngineSettings::default());
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.net_minutes, i as i32 * 10);
        }
    }
}
