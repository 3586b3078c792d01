//! Punch validation and pairing.
//!
//! Turns a day's punches into closed work and break spans, or reports the
//! first structural problem as a [`PunchSequenceError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Punch, PunchCategory, PunchDirection, codes};

/// Structural problems that make a day's punches unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PunchSequenceError {
    /// A punch time lies outside the day.
    #[error("Punch time outside the day")]
    InvalidTime,
    /// Terminal sequence contradicts clock order.
    #[error("Punch sequence contradicts clock order")]
    OutOfOrder,
    /// A closing punch has no opening punch.
    #[error("Closing punch without an opening punch")]
    MissingArrival,
    /// An opening punch has no closing punch.
    #[error("Opening punch without a closing punch")]
    MissingDeparture,
}

impl PunchSequenceError {
    /// Result code recorded on the daily result.
    pub fn code(self) -> &'static str {
        match self {
            PunchSequenceError::InvalidTime => codes::INVALID_PUNCH_TIME,
            PunchSequenceError::OutOfOrder => codes::PUNCHES_OUT_OF_ORDER,
            PunchSequenceError::MissingArrival => codes::MISSING_ARRIVAL,
            PunchSequenceError::MissingDeparture => codes::MISSING_DEPARTURE,
        }
    }
}

/// A closed interval of the day in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Opening minute.
    pub start: i32,
    /// Closing minute.
    pub end: i32,
}

impl TimeSpan {
    /// Length of the span; an inverted span counts as zero.
    pub fn minutes(&self) -> i32 {
        (self.end - self.start).max(0)
    }

    /// Minutes shared with `other`.
    pub fn overlap(&self, other: &TimeSpan) -> i32 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0)
    }
}

/// Work and break spans of one day, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedPunches {
    /// Arrival/departure work spans.
    pub work: Vec<TimeSpan>,
    /// Departure/arrival break spans.
    pub breaks: Vec<TimeSpan>,
}

impl PairedPunches {
    /// Punched break minutes that fall inside a work span.
    pub fn booked_break_minutes(&self) -> i32 {
        self.breaks
            .iter()
            .flat_map(|brk| self.work.iter().map(move |work| brk.overlap(work)))
            .sum()
    }

    /// Punched break minutes outside every work span.
    pub fn stray_break_minutes(&self) -> i32 {
        let punched: i32 = self.breaks.iter().map(TimeSpan::minutes).sum();
        punched - self.booked_break_minutes()
    }
}

/// Validates and pairs a day's punches.
///
/// Punches are checked for valid times and for terminal sequence agreeing
/// with clock order, then sorted chronologically and paired per category.
/// The error describes the first problem found.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::{PunchSequenceError, pair_punches};
/// use flextime_engine::models::{Punch, PunchCategory, PunchDirection};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let punch = |direction, time, sequence| Punch {
///     employee_id: Uuid::nil(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     category: PunchCategory::Work,
///     direction,
///     time,
///     sequence,
/// };
///
/// let paired = pair_punches(&[
///     punch(PunchDirection::Arrival, 480, 1),
///     punch(PunchDirection::Departure, 960, 2),
/// ])
/// .unwrap();
/// assert_eq!(paired.work.len(), 1);
///
/// let unpaired = pair_punches(&[punch(PunchDirection::Arrival, 480, 1)]);
/// assert_eq!(unpaired, Err(PunchSequenceError::MissingDeparture));
/// ```
pub fn pair_punches(punches: &[Punch]) -> Result<PairedPunches, PunchSequenceError> {
    if punches.iter().any(|punch| !punch.is_valid_time()) {
        return Err(PunchSequenceError::InvalidTime);
    }

    let mut by_sequence: Vec<&Punch> = punches.iter().collect();
    by_sequence.sort_by_key(|punch| punch.sequence);
    if by_sequence.windows(2).any(|pair| pair[1].time < pair[0].time) {
        return Err(PunchSequenceError::OutOfOrder);
    }

    let mut chronological = by_sequence;
    chronological.sort_by_key(|punch| (punch.time, punch.sequence));

    Ok(PairedPunches {
        work: pair_category(&chronological, PunchCategory::Work)?,
        breaks: pair_category(&chronological, PunchCategory::Break)?,
    })
}

fn pair_category(
    punches: &[&Punch],
    category: PunchCategory,
) -> Result<Vec<TimeSpan>, PunchSequenceError> {
    let opening = category.opening_direction();
    let mut spans = Vec::new();
    let mut open: Option<i32> = None;

    for punch in punches.iter().filter(|punch| punch.category == category) {
        match (punch.opens_span(), open) {
            (true, None) => open = Some(punch.time),
            (true, Some(_)) => return Err(missing(closing_direction(opening))),
            (false, Some(start)) => {
                spans.push(TimeSpan {
                    start,
                    end: punch.time,
                });
                open = None;
            }
            (false, None) => return Err(missing(opening)),
        }
    }

    if open.is_some() {
        return Err(missing(closing_direction(opening)));
    }
    Ok(spans)
}

fn closing_direction(opening: PunchDirection) -> PunchDirection {
    match opening {
        PunchDirection::Arrival => PunchDirection::Departure,
        PunchDirection::Departure => PunchDirection::Arrival,
    }
}

fn missing(direction: PunchDirection) -> PunchSequenceError {
    match direction {
        PunchDirection::Arrival => PunchSequenceError::MissingArrival,
        PunchDirection::Departure => PunchSequenceError::MissingDeparture,
    }
}
