use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for Gender {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(PlannerError::InvalidArgument(
                "Gender must be 'male' or 'female'".to_string(),
            )),
        }
    }
}

/// User-supplied macro overrides in grams. Absent fields count as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomMacros {
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
}

impl CustomMacros {
    /// An override with no fields set is treated as no override at all.
    pub fn is_empty(&self) -> bool {
        self.protein.is_none() && self.carbs.is_none() && self.fat.is_none()
    }
}

/// Daily nutrient targets for one plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMacros {
    pub calorie_target: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber_min: f64,
    pub sugar_max: f64,
    pub gender: Gender,
    pub is_custom: bool,
}

/// Percentage deviation from target per macro, plus achieved fiber/sugar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroVariance {
    pub calories_variance: f64,
    pub protein_variance: f64,
    pub carbs_variance: f64,
    pub fat_variance: f64,
    pub fiber_achieved: f64,
    pub sugar_consumed: f64,
}
