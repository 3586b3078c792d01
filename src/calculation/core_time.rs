//! Core-time presence check.

use serde::{Deserialize, Serialize};

use crate::models::{CoreTime, codes};

use super::pairing::TimeSpan;

/// Ways in which presence can fail to cover the core window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreTimeViolation {
    /// Presence starts after the core window opens.
    LateArrival,
    /// Presence ends before the core window closes.
    EarlyDeparture,
    /// Presence is interrupted inside the core window.
    Gap,
    /// No presence inside the core window at all.
    Absent,
}

impl CoreTimeViolation {
    /// Result code for the violation.
    pub fn code(self) -> &'static str {
        match self {
            CoreTimeViolation::LateArrival => codes::CORE_TIME_LATE_ARRIVAL,
            CoreTimeViolation::EarlyDeparture => codes::CORE_TIME_EARLY_DEPARTURE,
            CoreTimeViolation::Gap => codes::CORE_TIME_GAP,
            CoreTimeViolation::Absent => codes::CORE_TIME_ABSENT,
        }
    }
}

/// Checks that the work spans fully cover the core window.
///
/// Late arrival is reported before early departure, early departure before
/// a gap. An empty or inverted window never fails.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::{CoreTimeViolation, TimeSpan, check_core_time};
/// use flextime_engine::models::CoreTime;
///
/// let core = CoreTime { start: 540, end: 900 };
/// let full_day = [TimeSpan { start: 480, end: 1020 }];
/// assert_eq!(check_core_time(&full_day, &core), None);
///
/// let late = [TimeSpan { start: 560, end: 1020 }];
/// assert_eq!(check_core_time(&late, &core), Some(CoreTimeViolation::LateArrival));
/// ```
pub fn check_core_time(work_spans: &[TimeSpan], core_time: &CoreTime) -> Option<CoreTimeViolation> {
    if core_time.end <= core_time.start {
        return None;
    }

    let mut inside: Vec<TimeSpan> = work_spans
        .iter()
        .filter(|span| span.end > core_time.start && span.start < core_time.end)
        .map(|span| TimeSpan {
            start: span.start.max(core_time.start),
            end: span.end.min(core_time.end),
        })
        .collect();

    if inside.is_empty() {
        return Some(CoreTimeViolation::Absent);
    }
    inside.sort_by_key(|span| span.start);

    if inside[0].start > core_time.start {
        return Some(CoreTimeViolation::LateArrival);
    }

    let mut covered_until = inside[0].end;
    let mut gap = false;
    for span in &inside[1..] {
        if span.start > covered_until {
            gap = true;
        }
        covered_until = covered_until.max(span.end);
    }

    if covered_until < core_time.end {
        Some(CoreTimeViolation::EarlyDeparture)
    } else if gap {
        Some(CoreTimeViolation::Gap)
    } else {
        None
    }
}
