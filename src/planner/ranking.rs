use crate::config::PlannerConfig;
use crate::models::{FoodItem, MealType};
use crate::planner::calculations::calorie_fit;
use crate::planner::variety::VarietyManager;

/// Candidate food with its computed scores.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub food: &'a FoodItem,
    pub calorie_fit: f64,
    pub variety_score: f64,
    pub score: f64,
}

/// Foods eligible for a meal on `day`, in catalog order.
///
/// Drops foods the variety rules block, foods already used today and, for
/// snacks, foods at or above the snack density limit.
pub fn candidate_pool<'a>(
    foods: &'a [FoodItem],
    variety: &VarietyManager,
    day: u32,
    meal_type: MealType,
    config: &PlannerConfig,
) -> Vec<&'a FoodItem> {
    let used_today = variety.get_day_foods(day);

    foods
        .iter()
        .filter(|f| variety.can_use_food(f.id, day))
        .filter(|f| !used_today.contains(&f.id))
        .filter(|f| meal_type != MealType::Snack || f.calorie_density() < config.snack_max_density)
        .collect()
}

/// Score a food against the meal's remaining calorie budget.
///
/// The fit uses the full reference serving, not the portion that will
/// eventually be sized.
pub fn score_food<'a>(
    food: &'a FoodItem,
    remaining_calories: f64,
    variety: &VarietyManager,
    config: &PlannerConfig,
) -> Candidate<'a> {
    let fit = calorie_fit(food.calories, remaining_calories);
    let variety_score = variety.calculate_variety_score(food.id);

    Candidate {
        food,
        calorie_fit: fit,
        variety_score,
        score: fit * config.calorie_fit_weight + variety_score * config.variety_weight,
    }
}

/// Highest-scoring food in `pool` with its index. Ties go to the earlier entry.
pub fn choose_best_candidate<'a>(
    pool: &[&'a FoodItem],
    remaining_calories: f64,
    variety: &VarietyManager,
    config: &PlannerConfig,
) -> Option<(usize, Candidate<'a>)> {
    let mut best: Option<(usize, Candidate<'a>)> = None;

    for (idx, &food) in pool.iter().enumerate() {
        let candidate = score_food(food, remaining_calories, variety, config);
        let better = match &best {
            Some((_, current)) => candidate.score > current.score,
            None => true,
        };
        if better {
            best = Some((idx, candidate));
        }
    }

    best
}
