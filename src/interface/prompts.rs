use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

use crate::error::{PlannerError, Result};
use crate::models::{CustomMacros, Gender, PlanRequest};
use crate::planner::constants::{MAX_CALORIE_TARGET, MIN_CALORIE_TARGET};

/// Prompt for the daily calorie target.
pub fn prompt_calorie_target() -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(format!(
            "Daily calorie target ({}-{})",
            MIN_CALORIE_TARGET, MAX_CALORIE_TARGET
        ))
        .default("2000".to_string())
        .interact_text()?;

    let target: u32 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput("Invalid number".to_string()))?;

    if !(MIN_CALORIE_TARGET..=MAX_CALORIE_TARGET).contains(&target) {
        return Err(PlannerError::InvalidInput(format!(
            "Calorie target must be between {} and {}.",
            MIN_CALORIE_TARGET, MAX_CALORIE_TARGET
        )));
    }

    Ok(target)
}

/// Prompt for the gender used to pick default macro ratios.
pub fn prompt_gender() -> Result<Gender> {
    let options = [Gender::Male, Gender::Female];
    let labels: Vec<&str> = options.iter().map(|g| g.as_str()).collect();

    let selection = Select::new()
        .with_prompt("Gender (selects default macro ratios)")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[selection])
}

fn prompt_grams(name: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(format!("{} grams (Enter to use default)", name))
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let grams: f64 = input
        .parse()
        .map_err(|_| PlannerError::InvalidInput("Invalid number".to_string()))?;

    if !grams.is_finite() || grams < 0.0 {
        return Err(PlannerError::InvalidInput(format!(
            "Custom {} must be a non-negative number",
            name.to_lowercase()
        )));
    }

    Ok(Some(grams))
}

/// Ask whether to override macros, then for each gram target.
pub fn prompt_custom_macros() -> Result<Option<CustomMacros>> {
    if !prompt_yes_no("Set custom macro targets?", false)? {
        return Ok(None);
    }

    let custom = CustomMacros {
        protein: prompt_grams("Protein")?,
        carbs: prompt_grams("Carbs")?,
        fat: prompt_grams("Fat")?,
    };

    Ok((!custom.is_empty()).then_some(custom))
}

/// Prompt for the first day of the plan; empty means today.
pub fn prompt_start_date() -> Result<Option<NaiveDate>> {
    let input: String = Input::new()
        .with_prompt("Start date YYYY-MM-DD (Enter for today)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    Ok(Some(NaiveDate::parse_from_str(input, "%Y-%m-%d")?))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Fill in whatever parts of a request were not supplied up front.
pub fn collect_plan_request(
    calorie_target: Option<u32>,
    gender: Option<String>,
    custom_macros: Option<CustomMacros>,
    start_date: Option<NaiveDate>,
) -> Result<PlanRequest> {
    let calorie_target = match calorie_target {
        Some(target) => target,
        None => prompt_calorie_target()?,
    };
    let gender = match gender {
        Some(gender) => gender,
        None => prompt_gender()?.to_string(),
    };
    let custom_macros = match custom_macros {
        Some(custom) => Some(custom),
        None => prompt_custom_macros()?,
    };
    let start_date = match start_date {
        Some(date) => Some(date),
        None => prompt_start_date()?,
    };

    Ok(PlanRequest {
        calorie_target,
        gender,
        custom_macros,
        start_date,
    })
}
