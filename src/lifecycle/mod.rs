//! Month lifecycle and cascading recalculation.
//!
//! [`MonthRecord`] gates recalculation of one employee-month behind an
//! Open/Closed state machine. [`recalculate_from`] walks consecutive months
//! through a [`MonthLedger`], skipping closed months and carrying the
//! flextime balance forward.

mod cascade;
mod month;

pub use cascade::{
    CascadeFailure, CascadeSummary, InMemoryLedger, MonthInput, MonthLedger, recalculate_from,
};
pub use month::{MonthRecord, MonthState};
