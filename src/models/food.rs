use serde::{Deserialize, Serialize};

use crate::models::NutrientTotals;
use crate::planner::calculations::{calorie_density, round2, scale_factor};

/// Catalog identifier for a food.
pub type FoodId = u32;

fn default_unit() -> String {
    "g".to_string()
}

/// A catalog food with nutrients recorded at a reference serving.
///
/// `quantity` is the reference serving (e.g. 100 for "per 100 g"); all
/// nutrient fields are absolute values at that serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(rename = "FoodID")]
    pub id: FoodId,

    #[serde(rename = "FoodName")]
    pub name: String,

    #[serde(rename = "BrandName", default)]
    pub brand: String,

    #[serde(rename = "Unit", default = "default_unit")]
    pub unit: String,

    #[serde(rename = "Quantity")]
    pub quantity: f64,

    #[serde(rename = "Calories")]
    pub calories: f64,

    #[serde(rename = "Carbs")]
    pub carbs: f64,

    #[serde(rename = "Protein")]
    pub protein: f64,

    #[serde(rename = "Fat")]
    pub fat: f64,

    #[serde(rename = "Sugar", default)]
    pub sugar: f64,

    #[serde(rename = "Fiber", default)]
    pub fiber: f64,
}

impl FoodItem {
    /// Calories per unit of reference quantity (0 when the serving is zero).
    #[inline]
    pub fn calorie_density(&self) -> f64 {
        calorie_density(self.calories, self.quantity)
    }

    /// Reference serving must be positive and nutrients non-negative.
    pub fn is_valid(&self) -> bool {
        self.quantity > 0.0
            && self.calories >= 0.0
            && self.protein >= 0.0
            && self.carbs >= 0.0
            && self.fat >= 0.0
            && self.sugar >= 0.0
            && self.fiber >= 0.0
    }

    /// Nutrients at the reference serving.
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

    /// Nutrients scaled linearly to `quantity`, each rounded to 2 decimals.
    pub fn nutrition_for_quantity(&self, quantity: f64) -> NutrientTotals {
        let factor = scale_factor(quantity, self.quantity);
        let n = self.nutrients();
        NutrientTotals {
            calories: round2(n.calories * factor),
            protein: round2(n.protein * factor),
            carbs: round2(n.carbs * factor),
            fat: round2(n.fat * factor),
            fiber: round2(n.fiber * factor),
            sugar: round2(n.sugar * factor),
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "#{} {} ({}): {} kcal/{}{}, P:{} C:{} F:{} Fi:{} S:{}",
            self.id,
            self.name,
            self.brand,
            self.calories,
            self.quantity,
            self.unit,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn almonds() -> FoodItem {
        FoodItem {
            id: 42,
            name: "Almonds".to_string(),
            brand: "Generic".to_string(),
            unit: "g".to_string(),
            quantity: 100.0,
            calories: 579.0,
            carbs: 21.6,
            protein: 21.2,
            fat: 49.9,
            sugar: 4.4,
            fiber: 12.5,
        }
    }

    #[test]
    fn test_calorie_density() {
        assert!((almonds().calorie_density() - 5.79).abs() < 0.001);

        let mut broken = almonds();
        broken.quantity = 0.0;
        assert_eq!(broken.calorie_density(), 0.0);
    }

    #[test]
    fn test_nutrition_for_quantity_scales_linearly() {
        let scaled = almonds().nutrition_for_quantity(50.0);
        assert!((scaled.calories - 289.5).abs() < 0.001);
        assert!((scaled.fat - 24.95).abs() < 0.001);
        assert!((scaled.fiber - 6.25).abs() < 0.001);
    }

    #[test]
    fn test_nutrition_for_quantity_zero_reference() {
        let mut broken = almonds();
        broken.quantity = 0.0;
        assert_eq!(broken.nutrition_for_quantity(50.0), NutrientTotals::default());
    }

    #[test]
    fn test_is_valid() {
        assert!(almonds().is_valid());

        let mut invalid = almonds();
        invalid.sugar = -1.0;
        assert!(!invalid.is_valid());

        let mut no_serving = almonds();
        no_serving.quantity = 0.0;
        assert!(!no_serving.is_valid());
    }

    #[test]
    fn test_deserialize_catalog_columns() {
        let json = r#"{"FoodID": 7, "FoodName": "Oats", "Quantity": 100, "Calories": 389,
                       "Carbs": 66.3, "Protein": 16.9, "Fat": 6.9}"#;
        let food: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(food.id, 7);
        assert_eq!(food.unit, "g");
        assert_eq!(food.brand, "");
        assert_eq!(food.fiber, 0.0);
    }
}
