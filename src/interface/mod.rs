pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_request, prompt_calorie_target, prompt_custom_macros, prompt_gender,
    prompt_start_date, prompt_yes_no,
};
pub use render::{display_food_list, display_meal_plan, display_targets};
