use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::{FoodId, FoodItem};

/// Minimum Jaro-Winkler similarity for a fuzzy suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Read-only food catalog in its original order.
pub struct FoodCatalog {
    foods: Vec<FoodItem>,
    /// Position of each food in `foods`.
    index: HashMap<FoodId, usize>,
}

impl FoodCatalog {
    /// Build a catalog. A repeated id replaces the earlier entry in place.
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let mut catalog = Self {
            foods: Vec::with_capacity(foods.len()),
            index: HashMap::new(),
        };
        for food in foods {
            match catalog.index.get(&food.id) {
                Some(&pos) => catalog.foods[pos] = food,
                None => {
                    catalog.index.insert(food.id, catalog.foods.len());
                    catalog.foods.push(food);
                }
            }
        }
        catalog
    }

    pub fn get(&self, id: FoodId) -> Option<&FoodItem> {
        self.index.get(&id).map(|&pos| &self.foods[pos])
    }

    /// Like [`get`](Self::get) but a missing id is an error.
    pub fn require(&self, id: FoodId) -> Result<&FoodItem> {
        self.get(id).ok_or(PlannerError::FoodNotFound(id))
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.foods.iter()
    }

    /// Entries with a positive serving and non-negative nutrients.
    pub fn valid_foods(&self) -> Vec<&FoodItem> {
        self.foods.iter().filter(|f| f.is_valid()).collect()
    }

    /// Case-insensitive substring match on name or brand, sorted by name.
    ///
    /// A blank term matches nothing.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&FoodItem> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&FoodItem> = self
            .foods
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&term) || f.brand.to_lowercase().contains(&term)
            })
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        matches
    }

    /// Names resembling `term`, best match first.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<(&FoodItem, f64)> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<(&FoodItem, f64)> = self
            .foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &term)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(limit);
        candidates
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: FoodId, name: &str, brand: &str) -> FoodItem {
        FoodItem {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            unit: "g".to_string(),
            quantity: 100.0,
            calories: 100.0,
            carbs: 10.0,
            protein: 5.0,
            fat: 2.0,
            sugar: 1.0,
            fiber: 1.0,
        }
    }

    fn sample_catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            food(3, "Greek Yogurt", "Fage"),
            food(1, "Apple", "Orchard"),
            food(2, "Almond Butter", "Justin's"),
        ])
    }

    #[test]
    fn test_keeps_catalog_order() {
        let catalog = sample_catalog();
        let ids: Vec<FoodId> = catalog.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_id_last_wins_first_position() {
        let catalog = FoodCatalog::new(vec![
            food(1, "Apple", ""),
            food(2, "Bread", ""),
            food(1, "Green Apple", ""),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.foods()[0].name, "Green Apple");
        assert_eq!(catalog.get(1).unwrap().name, "Green Apple");
    }

    #[test]
    fn test_require_missing() {
        let catalog = sample_catalog();
        assert!(catalog.require(1).is_ok());
        assert!(matches!(
            catalog.require(99),
            Err(PlannerError::FoodNotFound(99))
        ));
    }

    #[test]
    fn test_search_name_or_brand_sorted() {
        let catalog = sample_catalog();
        let hits = catalog.search("a", 10);
        let names: Vec<&str> = hits.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Almond Butter", "Apple", "Greek Yogurt"]);

        let by_brand = catalog.search("FAGE", 10);
        assert_eq!(by_brand.len(), 1);
        assert_eq!(by_brand[0].id, 3);

        assert_eq!(catalog.search("a", 1).len(), 1);
        assert!(catalog.search("   ", 10).is_empty());
    }

    #[test]
    fn test_suggest_fuzzy() {
        let catalog = sample_catalog();
        let suggestions = catalog.suggest("aple", 5);
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].0.name, "Apple");
    }
}
