use chrono::NaiveDate;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

use metafit_planner_rs::cli::{Cli, Command, GenerateArgs, MacroArgs};
use metafit_planner_rs::config::PlannerConfig;
use metafit_planner_rs::error::{PlannerError, Result};
use metafit_planner_rs::interface::{
    collect_plan_request, display_food_list, display_meal_plan, display_targets, prompt_yes_no,
};
use metafit_planner_rs::logging::{init_logging, LogFormat};
use metafit_planner_rs::models::{CustomMacros, FoodItem, PlanRequest};
use metafit_planner_rs::planner::{calculate_macros, MealPlanGenerator};
use metafit_planner_rs::state::{load_catalog, save_plan_json, write_plan_csv};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format.parse::<LogFormat>()?);

    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading planner config");
            PlannerConfig::load(path)?
        }
        None => PlannerConfig::default(),
    };

    match cli.command.unwrap_or_default() {
        Command::Generate(args) => cmd_generate(&cli.foods, config, args),
        Command::Macros {
            calories,
            gender,
            macros,
        } => cmd_macros(calories, &gender, &macros),
        Command::Search { query, limit } => cmd_search(&cli.foods, &query, limit),
    }
}

fn custom_macros(args: &MacroArgs) -> Option<CustomMacros> {
    let custom = CustomMacros {
        protein: args.protein,
        carbs: args.carbs,
        fat: args.fat,
    };
    (!custom.is_empty()).then_some(custom)
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")?)
}

/// Generate a seven-day plan and optionally save it.
fn cmd_generate(file_path: &str, config: PlannerConfig, args: GenerateArgs) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Food catalog not found: {}", file_path);
        eprintln!("Pass --foods with a JSON or CSV catalog.");
        return Ok(());
    }

    let catalog = load_catalog(path)?;
    println!("Loaded {} foods", catalog.len());

    let start_date = args.start_date.as_deref().map(parse_date).transpose()?;
    let custom = custom_macros(&args.macros);

    let request = if args.interactive {
        collect_plan_request(args.calories, args.gender, custom, start_date)?
    } else {
        let calorie_target = args.calories.ok_or_else(|| {
            PlannerError::InvalidInput("--calories is required (or use --interactive)".to_string())
        })?;
        let gender = args.gender.ok_or_else(|| {
            PlannerError::InvalidInput("--gender is required (or use --interactive)".to_string())
        })?;
        PlanRequest {
            calorie_target,
            gender,
            custom_macros: custom,
            start_date,
        }
    };
    let gender = request.validate()?;

    let foods: Vec<FoodItem> = catalog.valid_foods().into_iter().cloned().collect();
    if foods.is_empty() {
        println!("No usable foods in the catalog; every meal will be empty.");
    }

    let mut generator = MealPlanGenerator::with_config(
        &foods,
        request.calorie_target,
        gender.as_str(),
        request.custom_macros.as_ref(),
        config,
    )?;
    let plan = generator.generate(request.start_date)?;

    info!(
        days_valid = plan.weekly_summary.days_valid,
        overall_valid = plan.weekly_summary.overall_valid,
        "plan generated"
    );

    display_meal_plan(&plan);

    let output = match args.output {
        Some(output) => Some(output),
        None if args.interactive && prompt_yes_no("Save plan as JSON?", false)? => {
            Some("meal_plan.json".into())
        }
        None => None,
    };

    if let Some(output) = output {
        save_plan_json(&output, &plan)?;
        println!("Plan saved to {}", output.display());
    }

    if let Some(csv_path) = args.csv {
        write_plan_csv(&csv_path, &plan)?;
        println!("Plan CSV written to {}", csv_path.display());
    }

    Ok(())
}

/// Show daily targets for a calorie level.
fn cmd_macros(calories: u32, gender: &str, macros: &MacroArgs) -> Result<()> {
    let request = PlanRequest {
        calorie_target: calories,
        gender: gender.to_string(),
        custom_macros: custom_macros(macros),
        start_date: None,
    };
    let gender = request.validate()?;

    let targets = calculate_macros(
        request.calorie_target,
        gender.as_str(),
        request.custom_macros.as_ref(),
    )?;
    display_targets(&targets);

    Ok(())
}

/// Search the catalog, falling back to fuzzy name suggestions.
fn cmd_search(file_path: &str, query: &str, limit: usize) -> Result<()> {
    let catalog = load_catalog(file_path)?;

    let hits = catalog.search(query, limit);
    if !hits.is_empty() {
        display_food_list(&hits, &format!("Matches for '{}'", query));
        return Ok(());
    }

    let suggestions: Vec<&FoodItem> = catalog
        .suggest(query, limit)
        .into_iter()
        .map(|(food, _)| food)
        .collect();

    if suggestions.is_empty() {
        println!("No matching food found for '{}'", query);
    } else {
        display_food_list(&suggestions, "Did you mean");
    }

    Ok(())
}
