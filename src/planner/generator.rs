use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::{PlannerConfig, RegenerationPolicy};
use crate::error::{PlannerError, Result};
use crate::models::{
    CustomMacros, DayMeals, DayPlan, FoodItem, MealItem, MealType, PlanResult, TargetMacros,
    ValidationResult,
};
use crate::planner::calculations::{calculate_quantity, reduction_factor};
use crate::planner::constants::{DAYS_IN_PLAN, NON_FINAL_ITEM_SHARE};
use crate::planner::macros::calculate_macros;
use crate::planner::ranking::{candidate_pool, choose_best_candidate};
use crate::planner::validator::{validate_daily_meal, validate_weekly_plan};
use crate::planner::variety::VarietyManager;

/// Builds a seven-day plan from a read-only food catalog.
///
/// One generator owns its variety state; run independent plans on separate
/// generators.
pub struct MealPlanGenerator<'a> {
    foods: &'a [FoodItem],
    config: PlannerConfig,
    target_macros: TargetMacros,
    variety: VarietyManager,
}

impl<'a> MealPlanGenerator<'a> {
    pub fn new(
        foods: &'a [FoodItem],
        calorie_target: u32,
        gender: &str,
        custom_macros: Option<&CustomMacros>,
    ) -> Result<Self> {
        Self::with_config(
            foods,
            calorie_target,
            gender,
            custom_macros,
            PlannerConfig::default(),
        )
    }

    pub fn with_config(
        foods: &'a [FoodItem],
        calorie_target: u32,
        gender: &str,
        custom_macros: Option<&CustomMacros>,
        config: PlannerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let target_macros = calculate_macros(calorie_target, gender, custom_macros)?;
        let variety = VarietyManager::new(config.max_repetitions, config.consecutive_day_gap);

        Ok(Self {
            foods,
            config,
            target_macros,
            variety,
        })
    }

    pub fn target_macros(&self) -> &TargetMacros {
        &self.target_macros
    }

    pub fn variety(&self) -> &VarietyManager {
        &self.variety
    }

    /// Generate the full week starting at `start_date` (today when `None`).
    ///
    /// Variety state is cleared first, so repeated calls with the same
    /// catalog produce the same plan.
    pub fn generate(&mut self, start_date: Option<NaiveDate>) -> Result<PlanResult> {
        let start = start_date.unwrap_or_else(|| Local::now().date_naive());
        self.variety.reset();

        info!(
            calorie_target = self.target_macros.calorie_target,
            gender = %self.target_macros.gender,
            foods = self.foods.len(),
            %start,
            "generating meal plan"
        );

        let mut meal_plan = Vec::with_capacity(DAYS_IN_PLAN as usize);
        for day in 1..=DAYS_IN_PLAN {
            let date = start
                .checked_add_days(Days::new(u64::from(day - 1)))
                .ok_or_else(|| {
                    PlannerError::InvalidArgument(format!("start date {} is out of range", start))
                })?;

            self.variety.start_day(day);
            meal_plan.push(self.generate_day(day, date));
        }

        if self.config.regeneration == RegenerationPolicy::FullReset {
            self.replay_usage(&meal_plan);
        }

        let daily_results: Vec<ValidationResult> =
            meal_plan.iter().map(|d| d.validation.clone()).collect();
        let weekly_summary = validate_weekly_plan(&daily_results, &self.target_macros)?;

        info!(
            days_valid = weekly_summary.days_valid,
            days_invalid = weekly_summary.days_invalid,
            "meal plan generated"
        );

        Ok(PlanResult {
            success: true,
            meal_plan,
            weekly_summary,
            target_macros: self.target_macros.clone(),
            variety_stats: self.variety.get_food_usage_summary(),
        })
    }

    /// Build one day, then pull its calorie total toward target.
    fn generate_day(&mut self, day: u32, date: NaiveDate) -> DayPlan {
        let target = self.target_macros.calorie_target as f64;
        let mut meals = self.build_meals(day);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let total = meals.total_calories();
            let diff = total - target;

            if diff.abs() <= self.config.reconcile_tolerance_kcal {
                debug!(day, attempts, total, "day within tolerance");
                break;
            }
            if attempts >= self.config.max_reconcile_attempts {
                debug!(day, attempts, total, "accepting day outside tolerance");
                break;
            }

            if diff > 0.0 {
                debug!(day, excess = diff, "shrinking last item");
                shrink_last_item(&mut meals, diff);
                continue;
            }

            match self.config.regeneration {
                // Same variety state into the same greedy search gives the same day.
                RegenerationPolicy::CurrentDay => {
                    debug!(day, shortfall = -diff, "rebuild would repeat the day, skipping");
                }
                RegenerationPolicy::FullReset => {
                    debug!(day, shortfall = -diff, "resetting usage and rebuilding day");
                    self.variety.reset();
                    for d in 1..=day {
                        self.variety.start_day(d);
                    }
                    meals = self.build_meals(day);
                }
            }
        }

        let validation = validate_daily_meal(meals.items(), &self.target_macros);

        DayPlan {
            day,
            date,
            daily_totals: validation.totals,
            meals,
            validation,
            reconciliation_attempts: attempts,
        }
    }

    /// Rebuild usage from the finished plan. A full reset drops earlier days'
    /// registrations, so the tracked counts no longer match what was planned.
    fn replay_usage(&mut self, meal_plan: &[DayPlan]) {
        self.variety.reset();
        for day in meal_plan {
            self.variety.start_day(day.day);
            for item in day.meals.items() {
                self.variety.register_food(item.food_id, day.day);
            }
        }
    }

    fn build_meals(&mut self, day: u32) -> DayMeals {
        let daily_target = self.target_macros.calorie_target as f64;
        let mut meals = DayMeals::default();

        for meal_type in MealType::ALL {
            let budget = daily_target * meal_type.calorie_share();
            let items = self.generate_meal(meal_type, budget, day);
            if items.is_empty() {
                warn!(day, meal = %meal_type, "no foods fit this meal");
            }
            *meals.get_mut(meal_type) = items;
        }

        meals
    }

    /// Greedily fill one meal up to `max_items_per_meal` foods.
    fn generate_meal(&mut self, meal_type: MealType, calorie_target: f64, day: u32) -> Vec<MealItem> {
        let foods = self.foods;
        let max_items = self.config.max_items_per_meal;
        let mut pool = candidate_pool(foods, &self.variety, day, meal_type, &self.config);
        let mut items = Vec::with_capacity(max_items);
        let mut remaining = calorie_target;

        while items.len() < max_items
            && remaining > self.config.min_meal_calories
            && !pool.is_empty()
        {
            let Some((idx, best)) =
                choose_best_candidate(&pool, remaining, &self.variety, &self.config)
            else {
                break;
            };
            pool.remove(idx);

            let target_for_item = if items.len() + 1 == max_items {
                remaining
            } else {
                remaining * NON_FINAL_ITEM_SHARE
            };

            let quantity = calculate_quantity(best.food, target_for_item);
            if quantity <= 0.0 {
                debug!(food = best.food.id, "skipping food with no usable serving");
                continue;
            }

            let item = MealItem::from_food(best.food, quantity);
            if item.calories > remaining {
                debug!(
                    food = best.food.id,
                    calories = item.calories,
                    remaining,
                    "portion exceeds meal budget"
                );
                continue;
            }

            debug!(day, meal = %meal_type, food = %best.food.name, quantity, score = best.score, "picked");
            remaining -= item.calories;
            self.variety.register_food(item.food_id, day);
            items.push(item);
        }

        items
    }
}

/// Replace the day's most recent item with a smaller copy.
fn shrink_last_item(meals: &mut DayMeals, excess: f64) {
    if let Some(last) = meals.last_item_mut() {
        if let Some(factor) = reduction_factor(excess, last.calories) {
            *last = last.scaled(factor);
        }
    }
}

/// Generate a plan with default engine settings.
pub fn generate(
    foods: &[FoodItem],
    calorie_target: u32,
    gender: &str,
    custom_macros: Option<&CustomMacros>,
    start_date: Option<NaiveDate>,
) -> Result<PlanResult> {
    MealPlanGenerator::new(foods, calorie_target, gender, custom_macros)?.generate(start_date)
}
