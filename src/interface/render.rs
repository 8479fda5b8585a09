use crate::models::{DayPlan, FoodItem, MealType, PlanResult, TargetMacros, WeeklySummary};

/// Display daily targets.
pub fn display_targets(targets: &TargetMacros) {
    println!();
    println!(
        "=== Daily Targets ({} kcal, {}{}) ===",
        targets.calorie_target,
        targets.gender,
        if targets.is_custom { ", custom macros" } else { "" }
    );
    println!("  Protein:   {:>7.2} g", targets.protein);
    println!("  Carbs:     {:>7.2} g", targets.carbs);
    println!("  Fat:       {:>7.2} g", targets.fat);
    println!("  Fiber min: {:>7.2} g", targets.fiber_min);
    println!("  Sugar max: {:>7.2} g", targets.sugar_max);
    println!();
}

fn display_day(day: &DayPlan) {
    let status = if day.validation.is_valid { "OK" } else { "!!" };
    println!(
        "--- Day {} ({}) [{}] ---",
        day.day,
        day.date.format("%a %Y-%m-%d"),
        status
    );

    let name_width = day
        .meals
        .items()
        .map(|i| i.food_name.len())
        .max()
        .unwrap_or(10);

    for meal_type in MealType::ALL {
        let items = day.meals.get(meal_type);
        if items.is_empty() {
            println!("  {:<9} (nothing fit)", meal_type.as_str());
            continue;
        }
        for (i, item) in items.iter().enumerate() {
            let label = if i == 0 { meal_type.as_str() } else { "" };
            println!(
                "  {:<9} {:<width$}  {:>7.2} {:<4} {:>7.1} kcal",
                label,
                item.food_name,
                item.quantity,
                item.unit,
                item.calories,
                width = name_width
            );
        }
    }

    let t = &day.daily_totals;
    println!(
        "  Total: {:.0} kcal | P {:.1} g  C {:.1} g  F {:.1} g  Fi {:.1} g  S {:.1} g",
        t.calories, t.protein, t.carbs, t.fat, t.fiber, t.sugar
    );
    for error in &day.validation.errors {
        println!("    x {}", error);
    }
    println!();
}

fn display_summary(summary: &WeeklySummary) {
    println!("=== Weekly Summary ===");
    println!(
        "Valid days: {}/{}{}",
        summary.days_valid,
        summary.days_valid + summary.days_invalid,
        if summary.overall_valid { " (all targets met)" } else { "" }
    );
    println!(
        "Errors: {}  Warnings: {}",
        summary.total_errors, summary.total_warnings
    );
    let a = &summary.weekly_averages;
    println!(
        "Daily average: {:.0} kcal | P {:.1} g  C {:.1} g  F {:.1} g  Fi {:.1} g  S {:.1} g",
        a.calories, a.protein, a.carbs, a.fat, a.fiber, a.sugar
    );
    println!();
}

/// Display a generated plan: targets, each day, then the weekly summary.
pub fn display_meal_plan(plan: &PlanResult) {
    display_targets(&plan.target_macros);

    for day in &plan.meal_plan {
        display_day(day);
    }

    display_summary(&plan.weekly_summary);

    let distinct = plan.variety_stats.len();
    let most_used = plan.variety_stats.values().copied().max().unwrap_or(0);
    println!(
        "Variety: {} distinct foods, most repeated food used {} times",
        distinct, most_used
    );
    println!();
}

/// Display a list of catalog foods.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  #{:<5} {} [{}] - {} kcal per {}{}, P:{} C:{} F:{} Fi:{} S:{}",
            food.id,
            food.name,
            food.brand,
            food.calories,
            food.quantity,
            food.unit,
            food.protein,
            food.carbs,
            food.fat,
            food.fiber,
            food.sugar
        );
    }

    println!();
}
