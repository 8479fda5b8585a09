use crate::models::FoodItem;
use crate::planner::constants::*;

/// Round to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Linear scaling factor from a reference serving to `quantity`.
///
/// A non-positive reference yields 0 so malformed foods contribute nothing.
#[inline]
pub fn scale_factor(quantity: f64, reference_quantity: f64) -> f64 {
    if reference_quantity > 0.0 {
        quantity / reference_quantity
    } else {
        0.0
    }
}

/// Calories per unit of reference quantity.
#[inline]
pub fn calorie_density(calories: f64, reference_quantity: f64) -> f64 {
    if reference_quantity > 0.0 {
        calories / reference_quantity
    } else {
        0.0
    }
}

/// `(actual - target) / target` as a percentage, 2 decimals; 0 for a zero target.
pub fn percent_variance(actual: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    round2((actual - target) / target * 100.0)
}

/// Portion of `food` that supplies `target_calories`, clamped by density.
///
/// Dense foods (>= 4 kcal/unit) are held to 5..=100 units, everything else
/// to 20..=500. Returns 0 for foods with no calories or no reference serving.
pub fn calculate_quantity(food: &FoodItem, target_calories: f64) -> f64 {
    if food.calories <= 0.0 || food.quantity <= 0.0 {
        return 0.0;
    }

    let quantity = (target_calories / food.calories) * food.quantity;

    let clamped = if food.calorie_density() >= DENSE_FOOD_THRESHOLD {
        quantity.clamp(DENSE_MIN_QUANTITY, DENSE_MAX_QUANTITY)
    } else {
        quantity.clamp(NORMAL_MIN_QUANTITY, NORMAL_MAX_QUANTITY)
    };

    round2(clamped)
}

/// How closely a full reference serving matches the remaining budget (0..=1).
pub fn calorie_fit(food_calories: f64, remaining_calories: f64) -> f64 {
    let fit = 1.0 - (food_calories - remaining_calories).abs() / (remaining_calories + 1.0);
    fit.clamp(0.0, 1.0)
}

/// Factor applied to the last item of an over-target day.
///
/// Removes half of the excess relative to the item, bounded to 0.5..=1.0.
/// `None` when the item carries no calories to shrink.
pub fn reduction_factor(excess: f64, item_calories: f64) -> Option<f64> {
    if item_calories <= 0.0 {
        return None;
    }
    let factor = 1.0 - (excess / item_calories) * REDUCTION_DAMPING;
    Some(factor.clamp(MIN_REDUCTION_FACTOR, MAX_REDUCTION_FACTOR))
}
