use crate::error::{PlannerError, Result};
use crate::models::{MealItem, NutrientTotals, TargetMacros, ValidationResult, Variance, WeeklySummary};
use crate::planner::calculations::{percent_variance, round_to};
use crate::planner::constants::{CALORIE_VARIANCE_TOLERANCE, DAYS_IN_PLAN};

/// Outcome of a single constraint check.
struct Check {
    valid: bool,
    message: String,
}

/// Sum of item nutrients, each total rounded to 2 decimals.
pub fn calculate_totals<'a>(items: impl IntoIterator<Item = &'a MealItem>) -> NutrientTotals {
    items
        .into_iter()
        .map(MealItem::nutrients)
        .sum::<NutrientTotals>()
        .rounded()
}

fn check_calories(actual: f64, target: u32) -> Check {
    if target == 0 {
        return Check {
            valid: true,
            message: "Calorie target is 0".to_string(),
        };
    }

    let variance = (actual - target as f64).abs() / target as f64;
    let percentage = round_to(variance * 100.0, 1);

    if variance <= CALORIE_VARIANCE_TOLERANCE {
        Check {
            valid: true,
            message: format!(
                "Calories: {:?} kcal (Target: {}, Variance: ±{:?}%)",
                actual, target, percentage
            ),
        }
    } else {
        Check {
            valid: false,
            message: format!(
                "Calories: {:?} kcal exceeds tolerance (Target: {}, Variance: {:?}%)",
                actual, target, percentage
            ),
        }
    }
}

fn check_fiber(actual: f64, minimum: f64) -> Check {
    if actual >= minimum {
        Check {
            valid: true,
            message: format!("Fiber: {:?}g ✓ (Minimum: {:?}g)", actual, minimum),
        }
    } else {
        let deficit = round_to(minimum - actual, 1);
        Check {
            valid: false,
            message: format!(
                "Fiber: {:?}g below minimum (Need {:?}g, Short by {:?}g)",
                actual, minimum, deficit
            ),
        }
    }
}

fn check_sugar(actual: f64, maximum: f64) -> Check {
    if actual <= maximum {
        let remaining = round_to(maximum - actual, 1);
        Check {
            valid: true,
            message: format!(
                "Sugar: {:?}g ✓ (Maximum: {:?}g, Remaining: {:?}g)",
                actual, maximum, remaining
            ),
        }
    } else {
        let excess = round_to(actual - maximum, 1);
        Check {
            valid: false,
            message: format!(
                "Sugar: {:?}g exceeds maximum (Limit: {:?}g, Excess: {:?}g)",
                actual, maximum, excess
            ),
        }
    }
}

fn calculate_variance(totals: &NutrientTotals, target: &TargetMacros) -> Variance {
    Variance {
        calories: percent_variance(totals.calories, target.calorie_target as f64),
        protein: percent_variance(totals.protein, target.protein),
        carbs: percent_variance(totals.carbs, target.carbs),
        fat: percent_variance(totals.fat, target.fat),
    }
}

/// Check one day's items against the daily targets.
///
/// The calorie message always lands somewhere: in `warnings` when within
/// ±2%, in `errors` otherwise. Fiber and sugar failures go to both lists.
pub fn validate_daily_meal<'a>(
    items: impl IntoIterator<Item = &'a MealItem>,
    target: &TargetMacros,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let totals = calculate_totals(items);

    let calories = check_calories(totals.calories, target.calorie_target);
    if calories.valid {
        warnings.push(calories.message);
    } else {
        errors.push(calories.message);
    }

    for check in [
        check_fiber(totals.fiber, target.fiber_min),
        check_sugar(totals.sugar, target.sugar_max),
    ] {
        if !check.valid {
            errors.push(check.message.clone());
            warnings.push(check.message);
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        variance: calculate_variance(&totals, target),
        totals,
    }
}

/// Aggregate a full week of daily results.
pub fn validate_weekly_plan(
    daily_results: &[ValidationResult],
    _target: &TargetMacros,
) -> Result<WeeklySummary> {
    if daily_results.len() != DAYS_IN_PLAN as usize {
        return Err(PlannerError::InvalidArgument(format!(
            "Weekly validation needs {} daily results, got {}",
            DAYS_IN_PLAN,
            daily_results.len()
        )));
    }

    let days_valid = daily_results.iter().filter(|r| r.is_valid).count() as u32;
    let total_errors = daily_results.iter().map(|r| r.errors.len()).sum();
    let total_warnings = daily_results.iter().map(|r| r.warnings.len()).sum();

    let weekly_totals = daily_results
        .iter()
        .map(|r| r.totals)
        .sum::<NutrientTotals>()
        .rounded();
    let weekly_averages = weekly_totals.divided(DAYS_IN_PLAN as f64).rounded();

    Ok(WeeklySummary {
        overall_valid: days_valid == DAYS_IN_PLAN,
        days_valid,
        days_invalid: DAYS_IN_PLAN - days_valid,
        total_errors,
        total_warnings,
        weekly_totals,
        weekly_averages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::macros::calculate_macros;

    fn item(calories: f64, fiber: f64, sugar: f64) -> MealItem {
        MealItem {
            food_id: 1,
            food_name: "Item".to_string(),
            brand: String::new(),
            quantity: 100.0,
            unit: "g".to_string(),
            calories,
            protein: 10.0,
            carbs: 20.0,
            fat: 5.0,
            fiber,
            sugar,
        }
    }

    #[test]
    fn test_totals_are_rounded_sums() {
        let items = [item(100.004, 1.0, 0.5), item(200.003, 2.0, 0.25)];
        let totals = calculate_totals(&items);
        assert_eq!(totals.calories, 300.01);
        assert_eq!(totals.fiber, 3.0);
        assert_eq!(totals.sugar, 0.75);
        assert_eq!(totals.protein, 20.0);
    }

    #[test]
    fn test_valid_day_reports_calories_as_warning() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let items = [item(1250.0, 5.0, 2.0), item(1240.0, 5.0, 2.0)];
        let result = validate_daily_meal(&items, &target);

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("±0.4%"));
    }

    #[test]
    fn test_calorie_miss_is_error() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let items = [item(2000.0, 10.0, 1.0)];
        let result = validate_daily_meal(&items, &target);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0],
            "Calories: 2000.0 kcal exceeds tolerance (Target: 2500, Variance: 20.0%)"
        );
        assert_eq!(result.variance.calories, -20.0);
    }

    #[test]
    fn test_fiber_and_sugar_failures_hit_both_lists() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let items = [item(2500.0, 2.0, 12.5)];
        let result = validate_daily_meal(&items, &target);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        // calorie message + fiber + sugar
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(
            result.errors[0],
            "Fiber: 2.0g below minimum (Need 7.5g, Short by 5.5g)"
        );
        assert_eq!(
            result.errors[1],
            "Sugar: 12.5g exceeds maximum (Limit: 7.5g, Excess: 5.0g)"
        );
    }

    #[test]
    fn test_empty_day() {
        let target = calculate_macros(2000, "female", None).unwrap();
        let items: Vec<MealItem> = Vec::new();
        let result = validate_daily_meal(&items, &target);
        assert!(!result.is_valid);
        assert_eq!(result.totals, NutrientTotals::default());
        assert_eq!(result.variance.calories, -100.0);
    }

    #[test]
    fn test_weekly_all_valid() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let items = [item(2500.0, 10.0, 1.0)];
        let day = validate_daily_meal(&items, &target);
        assert!(day.is_valid);

        let week = vec![day; 7];
        let summary = validate_weekly_plan(&week, &target).unwrap();
        assert!(summary.overall_valid);
        assert_eq!(summary.days_valid, 7);
        assert_eq!(summary.days_invalid, 0);
        assert_eq!(summary.total_errors, 0);
        assert_eq!(summary.total_warnings, 7);
        assert_eq!(summary.weekly_totals.calories, 17500.0);
        assert_eq!(summary.weekly_averages.calories, 2500.0);
        assert_eq!(summary.weekly_averages.fiber, 10.0);
    }

    #[test]
    fn test_weekly_counts_invalid_days() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let good = validate_daily_meal(&[item(2500.0, 10.0, 1.0)], &target);
        let bad = validate_daily_meal(&[item(1000.0, 1.0, 1.0)], &target);

        let mut week = vec![good; 5];
        week.extend(vec![bad; 2]);
        let summary = validate_weekly_plan(&week, &target).unwrap();
        assert!(!summary.overall_valid);
        assert_eq!(summary.days_valid, 5);
        assert_eq!(summary.days_invalid, 2);
        assert_eq!(summary.total_errors, 4);
    }

    #[test]
    fn test_weekly_requires_seven_days() {
        let target = calculate_macros(2500, "male", None).unwrap();
        let result = validate_weekly_plan(&[], &target);
        assert!(matches!(result, Err(PlannerError::InvalidArgument(_))));
    }
}
