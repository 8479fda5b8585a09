mod catalog;
mod persistence;

pub use catalog::FoodCatalog;
pub use persistence::{load_catalog, save_plan_json, write_plan_csv};
