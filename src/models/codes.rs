//! Warning and error codes attached to daily and monthly results.

/// Day was a holiday and credited from the holiday table.
pub const HOLIDAY: &str = "HOLIDAY";
/// Holiday category has no credit entry; zero was credited.
pub const HOLIDAY_CREDIT_NOT_CONFIGURED: &str = "HOLIDAY_CREDIT_NOT_CONFIGURED";
/// Punches exist on a holiday and were not evaluated.
pub const HOLIDAY_PUNCHES_IGNORED: &str = "HOLIDAY_PUNCHES_IGNORED";
/// No day plan was supplied; off-day defaults were used.
pub const NO_DAY_PLAN: &str = "NO_DAY_PLAN";

/// No punches and the policy flags the day.
pub const NO_PUNCHES: &str = "NO_PUNCHES";
/// No punches and the target was credited.
pub const NO_PUNCHES_CREDITED: &str = "NO_PUNCHES_CREDITED";
/// No punches and the target was booked as undertime.
pub const NO_PUNCHES_DEDUCTED: &str = "NO_PUNCHES_DEDUCTED";
/// Absence creation for a vocational-school day is left to the caller.
pub const ABSENCE_CREATION_DELEGATED: &str = "ABSENCE_CREATION_DELEGATED";
/// Booking to the default order is left to the caller.
pub const ORDER_BOOKING_DELEGATED: &str = "ORDER_BOOKING_DELEGATED";

/// A punch time lies outside the day.
pub const INVALID_PUNCH_TIME: &str = "INVALID_PUNCH_TIME";
/// Terminal sequence contradicts clock order.
pub const PUNCHES_OUT_OF_ORDER: &str = "PUNCHES_OUT_OF_ORDER";
/// A closing punch has no opening punch.
pub const MISSING_ARRIVAL: &str = "MISSING_ARRIVAL";
/// An opening punch has no closing punch.
pub const MISSING_DEPARTURE: &str = "MISSING_DEPARTURE";
/// Punched break time outside every work span was not deducted.
pub const BREAK_OUTSIDE_WORK: &str = "BREAK_OUTSIDE_WORK";
/// Punches for another employee or date were ignored.
pub const FOREIGN_PUNCH_IGNORED: &str = "FOREIGN_PUNCH_IGNORED";

/// Net time exceeded the daily maximum and was cut.
pub const CAPPED: &str = "CAPPED";

/// Work started after the core window opened.
pub const CORE_TIME_LATE_ARRIVAL: &str = "CORE_TIME_LATE_ARRIVAL";
/// Work ended before the core window closed.
pub const CORE_TIME_EARLY_DEPARTURE: &str = "CORE_TIME_EARLY_DEPARTURE";
/// Presence was interrupted inside the core window.
pub const CORE_TIME_GAP: &str = "CORE_TIME_GAP";
/// No presence at all inside the core window.
pub const CORE_TIME_ABSENT: &str = "CORE_TIME_ABSENT";

/// Monthly cap withheld part of the surplus.
pub const MONTHLY_CAP: &str = "MONTHLY_CAP";
/// Threshold portion of the surplus was forfeited.
pub const THRESHOLD_FORFEITED: &str = "THRESHOLD_FORFEITED";
/// Credit type forfeits the whole change.
pub const NO_CARRYOVER_FORFEITED: &str = "NO_CARRYOVER_FORFEITED";
/// Balance was clamped to the annual upper limit.
pub const ANNUAL_CAP: &str = "ANNUAL_CAP";
/// Balance was clamped to the annual lower limit.
pub const ANNUAL_FLOOR: &str = "ANNUAL_FLOOR";
/// At least one day of the month is in error.
pub const DAYS_WITH_ERRORS: &str = "DAYS_WITH_ERRORS";
/// A daily result for another employee or month was passed in and ignored.
pub const FOREIGN_DAILY_RESULT: &str = "FOREIGN_DAILY_RESULT";

/// Appends `code` unless it is already present, keeping first-seen order.
pub(crate) fn push_code(codes: &mut Vec<String>, code: &str) {
    if !codes.iter().any(|existing| existing == code) {
        codes.push(code.to_string());
    }
}
