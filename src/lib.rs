//! Flextime Calculation Engine
//!
//! This crate turns raw time-clock punches into daily working-time results
//! and aggregates them into monthly flextime balances. It covers tolerance
//! and rounding of punches, break deduction, core-time checks, the four
//! monthly crediting policies with their caps, and the close/reopen
//! lifecycle that gates cascading recalculation across months.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
