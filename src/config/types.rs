//! Configuration types for the flextime engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a rule set directory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{DayRules, MonthlyRules};

/// System-wide calculation switches.
///
/// # Example
///
/// ```
/// use flextime_engine::config::EngineSettings;
///
/// let settings: EngineSettings = serde_yaml::from_str("rounding_relative_to_plan: true").unwrap();
/// assert!(settings.rounding_relative_to_plan);
/// assert!(!settings.core_time_violation_is_error);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Align rounding grids to the planned boundary instead of midnight.
    #[serde(default)]
    pub rounding_relative_to_plan: bool,
    /// Record core-time violations as errors instead of warnings.
    #[serde(default)]
    pub core_time_violation_is_error: bool,
}

/// Day plans file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DayPlansConfig {
    /// Map of day plan code to rules.
    pub day_plans: HashMap<String, DayRules>,
}

/// Monthly rules file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyRulesConfig {
    /// Map of rule set code to monthly rules.
    pub monthly_rules: HashMap<String, MonthlyRules>,
}

/// A complete rule set loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RuleSet {
    settings: EngineSettings,
    day_plans: HashMap<String, DayRules>,
    monthly_rules: HashMap<String, MonthlyRules>,
}

impl RuleSet {
    /// Creates a new RuleSet from its component parts.
    pub fn new(
        settings: EngineSettings,
        day_plans: HashMap<String, DayRules>,
        monthly_rules: HashMap<String, MonthlyRules>,
    ) -> Self {
        Self {
            settings,
            day_plans,
            monthly_rules,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all day plans.
    pub fn day_plans(&self) -> &HashMap<String, DayRules> {
        &self.day_plans
    }

    /// Returns all monthly rule sets.
    pub fn monthly_rules(&self) -> &HashMap<String, MonthlyRules> {
        &self.monthly_rules
    }
}
