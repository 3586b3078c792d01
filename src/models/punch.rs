//! Punch model and related types.
//!
//! A punch is a single raw clock event. Times are minutes from midnight so
//! the rounding arithmetic can work on plain integers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minutes in a calendar day. Also the largest value a rounded time may take.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Whether a punch belongs to a work span or a break span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchCategory {
    /// Start or end of work.
    Work,
    /// Start or end of a booked break.
    Break,
}

/// Direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchDirection {
    /// Coming in (to work, or back from a break).
    Arrival,
    /// Going out (from work, or leaving for a break).
    Departure,
}

impl PunchCategory {
    /// The direction that opens a span of this category.
    ///
    /// Work spans open with an arrival. Break spans open when the employee
    /// leaves for the break and close when they return.
    ///
    /// ```
    /// use flextime_engine::models::{PunchCategory, PunchDirection};
    ///
    /// assert_eq!(PunchCategory::Work.opening_direction(), PunchDirection::Arrival);
    /// assert_eq!(PunchCategory::Break.opening_direction(), PunchDirection::Departure);
    /// ```
    pub fn opening_direction(self) -> PunchDirection {
        match self {
            PunchCategory::Work => PunchDirection::Arrival,
            PunchCategory::Break => PunchDirection::Departure,
        }
    }
}

/// A raw clock punch for one employee on one day.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{Punch, PunchCategory, PunchDirection};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let punch = Punch {
///     employee_id: Uuid::nil(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     category: PunchCategory::Work,
///     direction: PunchDirection::Arrival,
///     time: 8 * 60,
///     sequence: 1,
/// };
/// assert!(punch.is_valid_time());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The employee who punched.
    pub employee_id: Uuid,
    /// The calendar day the punch belongs to.
    pub date: NaiveDate,
    /// Work or break.
    pub category: PunchCategory,
    /// Arrival or departure.
    pub direction: PunchDirection,
    /// Raw clock time in minutes from midnight (0..=1439).
    pub time: i32,
    /// Order in which the terminal recorded the punch.
    pub sequence: u32,
}

impl Punch {
    /// Returns true if the raw time lies within a calendar day.
    pub fn is_valid_time(&self) -> bool {
        (0..MINUTES_PER_DAY).contains(&self.time)
    }

    /// Returns true if this punch opens a span of its category.
    pub fn opens_span(&self) -> bool {
        self.direction == self.category.opening_direction()
    }
}
