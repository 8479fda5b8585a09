use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::planner::constants::*;

/// What to roll back before rebuilding an under-target day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationPolicy {
    /// Undo only the registrations made for the day being rebuilt.
    #[default]
    CurrentDay,
    /// Forget all usage and restart tracking for days 1..=current.
    FullReset,
}

/// Engine knobs. Every field falls back to its default when missing from a
/// config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_repetitions: u32,
    pub consecutive_day_gap: u32,
    pub max_items_per_meal: usize,
    pub min_meal_calories: f64,
    pub reconcile_tolerance_kcal: f64,
    pub max_reconcile_attempts: u32,
    pub snack_max_density: f64,
    pub calorie_fit_weight: f64,
    pub variety_weight: f64,
    pub regeneration: RegenerationPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            consecutive_day_gap: DEFAULT_CONSECUTIVE_DAY_GAP,
            max_items_per_meal: DEFAULT_MAX_ITEMS_PER_MEAL,
            min_meal_calories: MIN_MEAL_CALORIES,
            reconcile_tolerance_kcal: RECONCILE_TOLERANCE_KCAL,
            max_reconcile_attempts: MAX_RECONCILE_ATTEMPTS,
            snack_max_density: SNACK_MAX_DENSITY,
            calorie_fit_weight: CALORIE_FIT_WEIGHT,
            variety_weight: VARIETY_WEIGHT,
            regeneration: RegenerationPolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Load from a JSON file and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_repetitions == 0 {
            return Err(PlannerError::InvalidInput(
                "max_repetitions must be at least 1".to_string(),
            ));
        }
        if self.max_items_per_meal == 0 {
            return Err(PlannerError::InvalidInput(
                "max_items_per_meal must be at least 1".to_string(),
            ));
        }
        if self.max_reconcile_attempts == 0 {
            return Err(PlannerError::InvalidInput(
                "max_reconcile_attempts must be at least 1".to_string(),
            ));
        }
        let non_negative = [
            ("min_meal_calories", self.min_meal_calories),
            ("reconcile_tolerance_kcal", self.reconcile_tolerance_kcal),
            ("snack_max_density", self.snack_max_density),
            ("calorie_fit_weight", self.calorie_fit_weight),
            ("variety_weight", self.variety_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
        Ok(())
    }
}
