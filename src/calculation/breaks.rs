//! Break deduction.

use crate::models::BreakRule;

/// Resolves the break minutes to deduct for a day.
///
/// * `work_span_minutes` - gross work time of the day
/// * `booked_break_minutes` - break time actually punched
/// * `rule` - the day's break rule; without one the booked time is deducted
///
/// The result is never negative and never exceeds the work span.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::resolve_break;
/// use flextime_engine::models::{BreakRule, BreakStep};
///
/// let variable = BreakRule::Variable {
///     steps: vec![
///         BreakStep { threshold: 360, deduction: 30 },
///         BreakStep { threshold: 540, deduction: 45 },
///     ],
/// };
/// assert_eq!(resolve_break(300, 0, Some(&variable)), 0);
/// assert_eq!(resolve_break(480, 0, Some(&variable)), 30);
/// assert_eq!(resolve_break(600, 0, Some(&variable)), 45);
///
/// let minimum = BreakRule::Minimum { minutes: 30, after_work_minutes: 0 };
/// assert_eq!(resolve_break(480, 20, Some(&minimum)), 30);
/// assert_eq!(resolve_break(480, 45, Some(&minimum)), 45);
/// ```
pub fn resolve_break(
    work_span_minutes: i32,
    booked_break_minutes: i32,
    rule: Option<&BreakRule>,
) -> i32 {
    let booked = booked_break_minutes.max(0);
    let deduction = match rule {
        None => booked,
        Some(BreakRule::Fixed { minutes }) => *minutes,
        Some(BreakRule::Variable { steps }) => steps
            .iter()
            .filter(|step| step.threshold <= work_span_minutes)
            .max_by_key(|step| step.threshold)
            .map(|step| step.deduction)
            .unwrap_or(0),
        Some(BreakRule::Minimum {
            minutes,
            after_work_minutes,
        }) => {
            if work_span_minutes >= *after_work_minutes {
                booked.max(*minutes)
            } else {
                booked
            }
        }
    };
    deduction.clamp(0, work_span_minutes.max(0))
}
