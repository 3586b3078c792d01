//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule sets
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayRules, MonthlyRules};

use super::types::{DayPlansConfig, EngineSettings, MonthlyRulesConfig, RuleSet};

/// Loads and provides access to a rule set.
///
/// The loader only hands out values; callers pass them explicitly into
/// [`calculate_day`](crate::calculation::calculate_day) and
/// [`calculate_month`](crate::calculation::calculate_month).
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── engine.yaml          # Engine settings (optional)
/// ├── day_plans.yaml       # Day plans by code
/// └── monthly_rules.yaml   # Monthly crediting rules by code
/// ```
///
/// # Example
///
/// ```no_run
/// use flextime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let plan = loader.get_day_plan("flex_8h")?;
/// println!("Target: {} minutes", plan.target_minutes);
/// # Ok::<(), flextime_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RuleSet,
}

impl ConfigLoader {
    /// Loads a rule set from the specified directory.
    ///
    /// `engine.yaml` may be absent, in which case default settings apply.
    /// Fails if `day_plans.yaml` or `monthly_rules.yaml` is missing or if any
    /// file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("engine.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<EngineSettings>(&settings_path)?
        } else {
            EngineSettings::default()
        };

        let day_plans = Self::load_yaml::<DayPlansConfig>(&path.join("day_plans.yaml"))?;
        let monthly_rules =
            Self::load_yaml::<MonthlyRulesConfig>(&path.join("monthly_rules.yaml"))?;

        debug!(
            path = %path.display(),
            day_plans = day_plans.day_plans.len(),
            monthly_rules = monthly_rules.monthly_rules.len(),
            "Loaded rule set"
        );

        Ok(Self {
            config: RuleSet::new(settings, day_plans.day_plans, monthly_rules.monthly_rules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rule set.
    pub fn config(&self) -> &RuleSet {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Gets a day plan by its code.
    pub fn get_day_plan(&self, code: &str) -> EngineResult<&DayRules> {
        self.config
            .day_plans()
            .get(code)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a monthly rule set by its code.
    pub fn get_monthly_rules(&self, code: &str) -> EngineResult<&MonthlyRules> {
        self.config
            .monthly_rules()
            .get(code)
            .ok_or_else(|| EngineError::MonthlyRulesNotFound {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreditType, NoPunchPolicy, Rounding};
    use std::path::PathBuf;

    fn write_rule_set(name: &str, engine: Option<&str>, day_plans: &str, monthly: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flextime_engine_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        if let Some(engine) = engine {
            fs::write(dir.join("engine.yaml"), engine).unwrap();
        }
        fs::write(dir.join("day_plans.yaml"), day_plans).unwrap();
        fs::write(dir.join("monthly_rules.yaml"), monthly).unwrap();
        dir
    }

    const DAY_PLANS: &str = r#"
day_plans:
  flex_8h:
    arrival: { from: 480, to: 540 }
    departure: { from: 960, to: 1080 }
    tolerance_minutes: 5
    arrival_rounding: { mode: up, interval: 15 }
    departure_rounding: { mode: down, interval: 15 }
    break_rule: { type: fixed, minutes: 30 }
    target_minutes: 480
    no_punch_policy: deduct_target
"#;

    const MONTHLY: &str = r#"
monthly_rules:
  capped:
    credit_type: complete_carryover
    monthly_cap: 480
"#;

    #[test]
    fn test_load_rule_set() {
        let dir = write_rule_set(
            "load",
            Some("rounding_relative_to_plan: true\n"),
            DAY_PLANS,
            MONTHLY,
        );
        let loader = ConfigLoader::load(&dir).unwrap();

        assert!(loader.settings().rounding_relative_to_plan);

        let plan = loader.get_day_plan("flex_8h").unwrap();
        assert_eq!(plan.target_minutes, 480);
        assert_eq!(plan.arrival_rounding, Rounding::Up { interval: 15 });
        assert_eq!(plan.no_punch_policy, NoPunchPolicy::DeductTarget);

        let rules = loader.get_monthly_rules("capped").unwrap();
        assert_eq!(rules.credit_type, CreditType::CompleteCarryover);
        assert_eq!(rules.monthly_cap, Some(480));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_engine_yaml_uses_defaults() {
        let dir = write_rule_set("defaults", None, DAY_PLANS, MONTHLY);
        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(*loader.settings(), EngineSettings::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unknown_codes() {
        let dir = write_rule_set("unknown", None, DAY_PLANS, MONTHLY);
        let loader = ConfigLoader::load(&dir).unwrap();

        assert_eq!(
            loader.get_day_plan("night").unwrap_err(),
            EngineError::DayPlanNotFound {
                code: "night".to_string()
            }
        );
        assert_eq!(
            loader.get_monthly_rules("none").unwrap_err(),
            EngineError::MonthlyRulesNotFound {
                code: "none".to_string()
            }
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let result = ConfigLoader::load("/nonexistent/rule/set");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let dir = write_rule_set("invalid", None, "day_plans: [not, a, map", MONTHLY);
        let result = ConfigLoader::load(&dir);
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("day_plans.yaml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        fs::remove_dir_all(dir).unwrap();
    }
}
