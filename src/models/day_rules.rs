//! Day rule configuration.
//!
//! [`DayRules`] describes everything the daily calculator needs to know about
//! one planned day: the planned windows, tolerance, rounding, break handling,
//! core time, target time and what to do when nobody punched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A planned arrival or departure window in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWindow {
    /// Earliest planned minute.
    pub from: i32,
    /// Latest planned minute, if the window is a range.
    #[serde(default)]
    pub to: Option<i32>,
}

/// A mandatory presence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTime {
    /// First minute of mandatory presence.
    pub start: i32,
    /// Minute at which mandatory presence ends.
    pub end: i32,
}

/// How a punch time is rounded.
///
/// Grid modes carry their interval, offset modes carry the fixed value.
///
/// ```
/// use flextime_engine::models::Rounding;
///
/// let rounding: Rounding = serde_json::from_str(r#"{"mode":"up","interval":15}"#).unwrap();
/// assert_eq!(rounding, Rounding::Up { interval: 15 });
/// assert!(rounding.is_grid());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Rounding {
    /// Leave the time as it is.
    #[default]
    None,
    /// Advance to the next grid point.
    Up {
        /// Grid spacing in minutes.
        interval: i32,
    },
    /// Recede to the previous grid point.
    Down {
        /// Grid spacing in minutes.
        interval: i32,
    },
    /// Closest grid point, ties go up.
    Nearest {
        /// Grid spacing in minutes.
        interval: i32,
    },
    /// Add a fixed number of minutes.
    Add {
        /// Minutes to add.
        value: i32,
    },
    /// Subtract a fixed number of minutes.
    Subtract {
        /// Minutes to subtract.
        value: i32,
    },
}

impl Rounding {
    /// Returns true for the grid-based modes (up, down, nearest).
    pub fn is_grid(&self) -> bool {
        matches!(
            self,
            Rounding::Up { .. } | Rounding::Down { .. } | Rounding::Nearest { .. }
        )
    }
}

/// One step of a variable break table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakStep {
    /// Minimum work span in minutes for this step to apply.
    pub threshold: i32,
    /// Break minutes deducted once the threshold is reached.
    pub deduction: i32,
}

/// How break time is deducted from gross time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakRule {
    /// Always deduct the same number of minutes.
    Fixed {
        /// Minutes deducted.
        minutes: i32,
    },
    /// Deduct according to the largest threshold the work span reaches.
    Variable {
        /// Threshold table, in any order.
        steps: Vec<BreakStep>,
    },
    /// Deduct the booked break, but at least `minutes`.
    Minimum {
        /// Floor for the deduction.
        minutes: i32,
        /// Work span from which the floor applies.
        #[serde(default)]
        after_work_minutes: i32,
    },
}

/// What happens on a non-holiday day without any punches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoPunchPolicy {
    /// Mark the day as an error.
    #[default]
    FlagAsError,
    /// Credit the target time.
    CreditTarget,
    /// Book the full target as undertime.
    DeductTarget,
    /// Credit the target; an absence is created elsewhere.
    VocationalSchool,
    /// Credit the target; the time is booked to the default order elsewhere.
    CreditTargetToDefaultOrder,
}

/// The rule set for one planned day.
///
/// # Example
///
/// ```
/// use flextime_engine::models::DayRules;
///
/// let yaml = r#"
/// arrival: { from: 480, to: 540 }
/// departure: { from: 960, to: 1080 }
/// tolerance_minutes: 5
/// arrival_rounding: { mode: up, interval: 15 }
/// target_minutes: 480
/// holiday_credits: { 1: 480, 2: 240 }
/// "#;
/// let rules: DayRules = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(rules.departure_boundary(), Some(1080));
/// assert_eq!(rules.holiday_credit(2), Some(240));
/// assert_eq!(rules.holiday_credit(3), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRules {
    /// Planned arrival window.
    #[serde(default)]
    pub arrival: Option<PlannedWindow>,
    /// Planned departure window.
    #[serde(default)]
    pub departure: Option<PlannedWindow>,
    /// Distance in minutes within which a punch snaps to the planned boundary.
    #[serde(default)]
    pub tolerance_minutes: i32,
    /// Rounding applied to arrivals.
    #[serde(default)]
    pub arrival_rounding: Rounding,
    /// Rounding applied to departures.
    #[serde(default)]
    pub departure_rounding: Rounding,
    /// Round every pair instead of only the first arrival and last departure.
    #[serde(default)]
    pub round_all_punches: bool,
    /// Break deduction; without one the booked break time is deducted.
    #[serde(default)]
    pub break_rule: Option<BreakRule>,
    /// Mandatory presence window.
    #[serde(default)]
    pub core_time: Option<CoreTime>,
    /// Regular target minutes.
    pub target_minutes: i32,
    /// Target minutes on approved-absence days.
    #[serde(default)]
    pub absence_target_minutes: Option<i32>,
    /// Prefer the employee master's daily target when one is supplied.
    #[serde(default)]
    pub target_from_employee_master: bool,
    /// Behaviour when no punches exist.
    #[serde(default)]
    pub no_punch_policy: NoPunchPolicy,
    /// Credit minutes per holiday category.
    #[serde(default)]
    pub holiday_credits: BTreeMap<u8, i32>,
    /// Upper limit for net work time.
    #[serde(default)]
    pub max_net_work_minutes: Option<i32>,
}

impl DayRules {
    /// Rules used when no day plan is assigned: nothing is expected, nothing is owed.
    pub fn off_day() -> Self {
        Self {
            arrival: None,
            departure: None,
            tolerance_minutes: 0,
            arrival_rounding: Rounding::None,
            departure_rounding: Rounding::None,
            round_all_punches: false,
            break_rule: None,
            core_time: None,
            target_minutes: 0,
            absence_target_minutes: None,
            target_from_employee_master: false,
            no_punch_policy: NoPunchPolicy::DeductTarget,
            holiday_credits: BTreeMap::new(),
            max_net_work_minutes: None,
        }
    }

    /// Resolves the target minutes for a day.
    ///
    /// Priority: the employee master value (when enabled and supplied), then
    /// the absence target on approved-absence days, then the regular target.
    ///
    /// ```
    /// use flextime_engine::models::DayRules;
    ///
    /// let mut rules = DayRules::off_day();
    /// rules.target_minutes = 480;
    /// rules.absence_target_minutes = Some(420);
    /// assert_eq!(rules.resolve_target(false, Some(450)), 480);
    /// assert_eq!(rules.resolve_target(true, None), 420);
    ///
    /// rules.target_from_employee_master = true;
    /// assert_eq!(rules.resolve_target(true, Some(450)), 450);
    /// ```
    pub fn resolve_target(
        &self,
        is_approved_absence: bool,
        employee_master_minutes: Option<i32>,
    ) -> i32 {
        if self.target_from_employee_master {
            if let Some(minutes) = employee_master_minutes {
                return minutes;
            }
        }
        if is_approved_absence {
            if let Some(minutes) = self.absence_target_minutes {
                return minutes;
            }
        }
        self.target_minutes
    }

    /// Configured credit for a holiday category, if any.
    pub fn holiday_credit(&self, category: u8) -> Option<i32> {
        self.holiday_credits.get(&category).copied()
    }

    /// Planned boundary arrivals snap to.
    pub fn arrival_boundary(&self) -> Option<i32> {
        self.arrival.map(|window| window.from)
    }

    /// Planned boundary departures snap to: the end of the window, else its start.
    pub fn departure_boundary(&self) -> Option<i32> {
        self.departure.map(|window| window.to.unwrap_or(window.from))
    }
}
