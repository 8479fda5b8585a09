pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod state;

pub use config::{PlannerConfig, RegenerationPolicy};
pub use error::{PlannerError, Result};
pub use models::{FoodItem, PlanRequest, PlanResult, TargetMacros};
pub use planner::{calculate_macros, generate, MealPlanGenerator, VarietyManager};
