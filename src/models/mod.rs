mod food;
mod macros;
mod nutrients;
mod plan;

pub use food::{FoodId, FoodItem};
pub use macros::{CustomMacros, Gender, MacroVariance, TargetMacros};
pub use nutrients::NutrientTotals;
pub use plan::{
    DayMeals, DayPlan, MealItem, MealType, PlanRequest, PlanResult, ValidationResult, Variance,
    WeeklySummary,
};
