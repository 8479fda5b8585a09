pub mod calculations;
pub mod constants;
pub mod generator;
pub mod macros;
pub mod ranking;
pub mod validator;
pub mod variety;

pub use calculations::{calculate_quantity, calorie_density, percent_variance, round2, round_to};
pub use constants::*;
pub use generator::{generate, MealPlanGenerator};
pub use macros::{calculate_macro_variance, calculate_macros};
pub use ranking::{candidate_pool, choose_best_candidate, score_food, Candidate};
pub use validator::{calculate_totals, validate_daily_meal, validate_weekly_plan};
pub use variety::{VarietyManager, VarietySnapshot};
