use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{FoodItem, MealType, PlanResult};
use crate::state::FoodCatalog;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

fn read_csv_foods(path: &Path) -> Result<Vec<FoodItem>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut foods = Vec::new();
    for record in reader.deserialize() {
        let food: FoodItem = record?;
        foods.push(food);
    }
    Ok(foods)
}

/// Load a food catalog from a `.csv` file or a JSON array.
///
/// Repeated ids keep the last entry. Entries failing validation are kept
/// (the planner skips what it cannot portion) but logged.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<FoodCatalog> {
    let path = path.as_ref();
    let foods: Vec<FoodItem> = if is_csv(path) {
        read_csv_foods(path)?
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    };

    for food in foods.iter().filter(|f| !f.is_valid()) {
        warn!(food = %food.debug_string(), "catalog entry fails validation");
    }

    let catalog = FoodCatalog::new(foods);
    debug!(path = %path.display(), foods = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Write a plan as pretty JSON.
pub fn save_plan_json<P: AsRef<Path>>(path: P, plan: &PlanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write one CSV row per meal item.
pub fn write_plan_csv<P: AsRef<Path>>(path: P, plan: &PlanResult) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "day",
        "date",
        "meal_type",
        "food_id",
        "food_name",
        "brand",
        "quantity",
        "unit",
        "calories",
        "protein",
        "carbs",
        "fat",
        "fiber",
        "sugar",
    ])?;

    for day in &plan.meal_plan {
        let date = day.date.format("%Y-%m-%d").to_string();
        for meal_type in MealType::ALL {
            for item in day.meals.get(meal_type) {
                wtr.write_record([
                    day.day.to_string(),
                    date.clone(),
                    meal_type.to_string(),
                    item.food_id.to_string(),
                    item.food_name.clone(),
                    item.brand.clone(),
                    format!("{:.2}", item.quantity),
                    item.unit.clone(),
                    format!("{:.2}", item.calories),
                    format!("{:.2}", item.protein),
                    format!("{:.2}", item.carbs),
                    format!("{:.2}", item.fat),
                    format!("{:.2}", item.fiber),
                    format!("{:.2}", item.sugar),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_json_catalog() {
        let json = r#"[
            {"FoodID": 1, "FoodName": "Apple", "BrandName": "Orchard", "Unit": "g", "Quantity": 100,
             "Calories": 52, "Carbs": 14, "Protein": 0.3, "Fat": 0.2, "Sugar": 10, "Fiber": 2.4},
            {"FoodID": 1, "FoodName": "Red Apple", "Quantity": 100,
             "Calories": 59, "Carbs": 15, "Protein": 0.3, "Fat": 0.2}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().name, "Red Apple");
    }

    #[test]
    fn test_load_csv_catalog() {
        let csv = "FoodID,FoodName,BrandName,Unit,Quantity,Calories,Carbs,Protein,Fat,Sugar,Fiber\n\
                   1,Oats,Mill,g,100,389,66.3,16.9,6.9,1,10.6\n\
                   2,Milk,Farm,ml,100,42,5,3.4,1,5,0\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let milk = catalog.get(2).unwrap();
        assert_eq!(milk.unit, "ml");
        assert!((milk.calories - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_catalog("/nonexistent/foods.json").is_err());
    }
}
