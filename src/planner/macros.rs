use crate::error::{PlannerError, Result};
use crate::models::{CustomMacros, Gender, MacroVariance, NutrientTotals, TargetMacros};
use crate::planner::calculations::{percent_variance, round2};
use crate::planner::constants::*;

/// Calorie fractions for one gender.
struct MacroRatios {
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar_max: f64,
}

fn ratios_for(gender: Gender) -> MacroRatios {
    match gender {
        Gender::Male => MacroRatios {
            protein: MALE_PROTEIN_RATIO,
            carbs: MALE_CARBS_RATIO,
            fat: MALE_FAT_RATIO,
            fiber: MALE_FIBER_RATIO,
            sugar_max: MALE_SUGAR_MAX_RATIO,
        },
        Gender::Female => MacroRatios {
            protein: FEMALE_PROTEIN_RATIO,
            carbs: FEMALE_CARBS_RATIO,
            fat: FEMALE_FAT_RATIO,
            fiber: FEMALE_FIBER_RATIO,
            sugar_max: FEMALE_SUGAR_MAX_RATIO,
        },
    }
}

/// Daily macro targets for a calorie goal.
///
/// `gender` is matched case-insensitively after trimming. Custom overrides
/// replace protein/carbs/fat verbatim (absent fields become 0); fiber and
/// sugar limits are always derived from the calorie target.
pub fn calculate_macros(
    calorie_target: u32,
    gender: &str,
    custom_macros: Option<&CustomMacros>,
) -> Result<TargetMacros> {
    if calorie_target == 0 {
        return Err(PlannerError::InvalidArgument(
            "Calorie target must be a positive number".to_string(),
        ));
    }
    let gender: Gender = gender.parse()?;
    let ratios = ratios_for(gender);
    let kcal = calorie_target as f64;

    let fiber_min = round2(kcal * ratios.fiber / KCAL_PER_GRAM_FIBER_SUGAR);
    let sugar_max = round2(kcal * ratios.sugar_max / KCAL_PER_GRAM_FIBER_SUGAR);

    if let Some(custom) = custom_macros.filter(|c| !c.is_empty()) {
        return Ok(TargetMacros {
            calorie_target,
            protein: custom.protein.unwrap_or(0.0),
            carbs: custom.carbs.unwrap_or(0.0),
            fat: custom.fat.unwrap_or(0.0),
            fiber_min,
            sugar_max,
            gender,
            is_custom: true,
        });
    }

    Ok(TargetMacros {
        calorie_target,
        protein: round2(kcal * ratios.protein / KCAL_PER_GRAM_PROTEIN),
        carbs: round2(kcal * ratios.carbs / KCAL_PER_GRAM_CARBS),
        fat: round2(kcal * ratios.fat / KCAL_PER_GRAM_FAT),
        fiber_min,
        sugar_max,
        gender,
        is_custom: false,
    })
}

/// Percentage deviation of achieved nutrients from the targets.
pub fn calculate_macro_variance(target: &TargetMacros, actual: &NutrientTotals) -> MacroVariance {
    MacroVariance {
        calories_variance: percent_variance(actual.calories, target.calorie_target as f64),
        protein_variance: percent_variance(actual.protein, target.protein),
        carbs_variance: percent_variance(actual.carbs, target.carbs),
        fat_variance: percent_variance(actual.fat, target.fat),
        fiber_achieved: actual.fiber,
        sugar_consumed: actual.sugar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_2500() {
        let t = calculate_macros(2500, "male", None).unwrap();
        assert_eq!(t.protein, 168.75);
        assert_eq!(t.carbs, 281.25);
        assert_eq!(t.fat, 77.78);
        assert_eq!(t.fiber_min, 7.5);
        assert_eq!(t.sugar_max, 7.5);
        assert!(!t.is_custom);
    }

    #[test]
    fn test_female_2000() {
        let t = calculate_macros(2000, "Female ", None).unwrap();
        assert_eq!(t.protein, 115.0);
        assert_eq!(t.carbs, 235.0);
        assert_eq!(t.fat, 66.67);
        assert_eq!(t.fiber_min, 7.0);
        assert_eq!(t.sugar_max, 5.0);
        assert_eq!(t.gender, Gender::Female);
    }

    #[test]
    fn test_custom_macros_keep_derived_limits() {
        let custom = CustomMacros {
            protein: Some(180.0),
            carbs: Some(280.0),
            fat: None,
        };
        let t = calculate_macros(2500, "male", Some(&custom)).unwrap();
        assert!(t.is_custom);
        assert_eq!(t.protein, 180.0);
        assert_eq!(t.carbs, 280.0);
        assert_eq!(t.fat, 0.0);
        assert_eq!(t.fiber_min, 7.5);
        assert_eq!(t.sugar_max, 7.5);
    }

    #[test]
    fn test_empty_custom_falls_back_to_defaults() {
        let t = calculate_macros(2500, "male", Some(&CustomMacros::default())).unwrap();
        assert!(!t.is_custom);
        assert_eq!(t.protein, 168.75);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            calculate_macros(0, "male", None),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            calculate_macros(2000, "robot", None),
            Err(PlannerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_macro_variance() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let actual = NutrientTotals {
            calories: 2450.0,
            protein: 155.0,
            carbs: 295.0,
            fat: 80.0,
            fiber: 28.0,
            sugar: 25.0,
        };
        let v = calculate_macro_variance(&target, &actual);
        assert_eq!(v.calories_variance, -2.0);
        assert_eq!(v.protein_variance, -8.15);
        assert_eq!(v.carbs_variance, 4.89);
        assert_eq!(v.fat_variance, 2.85);
        assert_eq!(v.fiber_achieved, 28.0);
        assert_eq!(v.sugar_consumed, 25.0);
    }
}
