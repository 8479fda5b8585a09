use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{CustomMacros, FoodId, FoodItem, Gender, NutrientTotals, TargetMacros};
use crate::planner::calculations::round2;
use crate::planner::constants::{MAX_CALORIE_TARGET, MIN_CALORIE_TARGET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Build order for a day.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Fraction of the daily calorie target given to this meal.
    pub fn calorie_share(&self) -> f64 {
        match self {
            MealType::Breakfast => 0.25,
            MealType::Lunch => 0.35,
            MealType::Dinner => 0.30,
            MealType::Snack => 0.10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog food portioned to a chosen quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub food_id: FoodId,
    pub food_name: String,
    pub brand: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl MealItem {
    /// Portion `food` at `quantity`; nutrients scale linearly from the
    /// reference serving and are rounded to 2 decimals.
    pub fn from_food(food: &FoodItem, quantity: f64) -> Self {
        let n = food.nutrition_for_quantity(quantity);
        Self {
            food_id: food.id,
            food_name: food.name.clone(),
            brand: food.brand.clone(),
            quantity: round2(quantity),
            unit: food.unit.clone(),
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
            fiber: n.fiber,
            sugar: n.sugar,
        }
    }

    /// A copy with quantity and every nutrient multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let n = self.nutrients().scaled(factor).rounded();
        Self {
            quantity: round2(self.quantity * factor),
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
            fiber: n.fiber,
            sugar: n.sugar,
            ..self.clone()
        }
    }

    pub fn nutrients(&self) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            sugar: self.sugar,
        }
    }
}

/// A day's meals keyed by meal type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    pub breakfast: Vec<MealItem>,
    pub lunch: Vec<MealItem>,
    pub dinner: Vec<MealItem>,
    pub snack: Vec<MealItem>,
}

impl DayMeals {
    pub fn get(&self, meal_type: MealType) -> &[MealItem] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }

    pub fn get_mut(&mut self, meal_type: MealType) -> &mut Vec<MealItem> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    /// All items in build order (breakfast first, snack last).
    pub fn items(&self) -> impl Iterator<Item = &MealItem> {
        MealType::ALL.into_iter().flat_map(|t| self.get(t).iter())
    }

    /// The most recently added item of the day.
    pub fn last_item_mut(&mut self) -> Option<&mut MealItem> {
        let meal_type = MealType::ALL
            .into_iter()
            .rev()
            .find(|t| !self.get(*t).is_empty())?;
        self.get_mut(meal_type).last_mut()
    }

    pub fn total_calories(&self) -> f64 {
        self.items().map(|i| i.calories).sum()
    }

    pub fn item_count(&self) -> usize {
        MealType::ALL.into_iter().map(|t| self.get(t).len()).sum()
    }
}

/// Percentage deviation from target, per macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub totals: NutrientTotals,
    pub variance: Variance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub date: NaiveDate,
    pub meals: DayMeals,
    pub daily_totals: NutrientTotals,
    pub validation: ValidationResult,
    /// Calorie checks made before the day was accepted.
    pub reconciliation_attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub overall_valid: bool,
    pub days_valid: u32,
    pub days_invalid: u32,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub weekly_totals: NutrientTotals,
    pub weekly_averages: NutrientTotals,
}

/// Complete output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub success: bool,
    pub meal_plan: Vec<DayPlan>,
    pub weekly_summary: WeeklySummary,
    pub target_macros: TargetMacros,
    pub variety_stats: BTreeMap<FoodId, usize>,
}

/// Parameters of a plan request as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub calorie_target: u32,
    pub gender: String,
    #[serde(default)]
    pub custom_macros: Option<CustomMacros>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl PlanRequest {
    /// Enforce request-level rules; returns the parsed gender.
    pub fn validate(&self) -> Result<Gender> {
        if !(MIN_CALORIE_TARGET..=MAX_CALORIE_TARGET).contains(&self.calorie_target) {
            return Err(PlannerError::InvalidInput(format!(
                "Calorie target must be between {} and {}.",
                MIN_CALORIE_TARGET, MAX_CALORIE_TARGET
            )));
        }
        let gender = self.gender.parse::<Gender>()?;

        if let Some(custom) = &self.custom_macros {
            for (name, value) in [
                ("protein", custom.protein),
                ("carbs", custom.carbs),
                ("fat", custom.fat),
            ] {
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(PlannerError::InvalidInput(format!(
                            "Custom {} must be a non-negative number",
                            name
                        )));
                    }
                }
            }
        }

        Ok(gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> FoodItem {
        FoodItem {
            id: 1,
            name: "Oats".to_string(),
            brand: "Mill".to_string(),
            unit: "g".to_string(),
            quantity: 100.0,
            calories: 389.0,
            carbs: 66.3,
            protein: 16.9,
            fat: 6.9,
            sugar: 1.0,
            fiber: 10.6,
        }
    }

    #[test]
    fn test_meal_item_from_food() {
        let item = MealItem::from_food(&oats(), 80.0);
        assert_eq!(item.food_id, 1);
        assert!((item.calories - 311.2).abs() < 1e-9);
        assert!((item.fiber - 8.48).abs() < 1e-9);
    }

    #[test]
    fn test_meal_item_scaled_is_new_value() {
        let item = MealItem::from_food(&oats(), 100.0);
        let half = item.scaled(0.5);
        assert!((half.quantity - 50.0).abs() < 1e-9);
        assert!((half.calories - 194.5).abs() < 1e-9);
        assert!((item.calories - 389.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_item_skips_empty_meals() {
        let mut meals = DayMeals::default();
        meals.breakfast.push(MealItem::from_food(&oats(), 50.0));
        meals.lunch.push(MealItem::from_food(&oats(), 100.0));

        let last = meals.last_item_mut().unwrap();
        assert!((last.quantity - 100.0).abs() < 1e-9);
        assert_eq!(meals.item_count(), 2);
    }

    #[test]
    fn test_calorie_shares_sum_to_one() {
        let total: f64 = MealType::ALL.iter().map(|t| t.calorie_share()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_request_validation() {
        let mut request = PlanRequest {
            calorie_target: 2500,
            gender: "Male".to_string(),
            custom_macros: None,
            start_date: None,
        };
        assert_eq!(request.validate().unwrap(), Gender::Male);

        request.calorie_target = 900;
        assert!(matches!(
            request.validate(),
            Err(PlannerError::InvalidInput(_))
        ));

        request.calorie_target = 2000;
        request.custom_macros = Some(CustomMacros {
            protein: Some(-5.0),
            ..Default::default()
        });
        assert!(request.validate().is_err());
    }
}
