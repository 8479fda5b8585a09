use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::FoodId;
use crate::planner::constants::{DEFAULT_CONSECUTIVE_DAY_GAP, DEFAULT_MAX_REPETITIONS};

/// Serializable view of the variety state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietySnapshot {
    pub food_usage: BTreeMap<FoodId, Vec<u32>>,
    pub day_foods: BTreeMap<u32, Vec<FoodId>>,
    pub max_repetitions: u32,
    pub consecutive_day_gap: u32,
}

/// Tracks which foods were used on which plan days.
///
/// A food may appear at most `max_repetitions` times in total, and after a
/// use on day `d` it is blocked through day `d + consecutive_day_gap`.
#[derive(Debug, Clone)]
pub struct VarietyManager {
    max_repetitions: u32,
    consecutive_day_gap: u32,
    /// Days each food was used on, in registration order.
    food_usage: HashMap<FoodId, Vec<u32>>,
    /// Foods used on each day, in registration order.
    day_foods: BTreeMap<u32, Vec<FoodId>>,
    current_day: Option<u32>,
}

impl Default for VarietyManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPETITIONS, DEFAULT_CONSECUTIVE_DAY_GAP)
    }
}

impl VarietyManager {
    pub fn new(max_repetitions: u32, consecutive_day_gap: u32) -> Self {
        Self {
            max_repetitions,
            consecutive_day_gap,
            food_usage: HashMap::new(),
            day_foods: BTreeMap::new(),
            current_day: None,
        }
    }

    pub fn max_repetitions(&self) -> u32 {
        self.max_repetitions
    }

    pub fn current_day(&self) -> Option<u32> {
        self.current_day
    }

    /// Mark `day` as current. Calling it again for the same day is a no-op.
    pub fn start_day(&mut self, day: u32) {
        self.current_day = Some(day);
        self.day_foods.entry(day).or_default();
    }

    /// Whether `food_id` may be placed on `day`.
    pub fn can_use_food(&self, food_id: FoodId, day: u32) -> bool {
        let Some(days) = self.food_usage.get(&food_id) else {
            return true;
        };

        if days.len() >= self.max_repetitions as usize {
            return false;
        }

        match days.iter().max() {
            Some(&last) => i64::from(day) - i64::from(last) > i64::from(self.consecutive_day_gap),
            None => true,
        }
    }

    /// Record a use of `food_id` on `day`. Does not deduplicate.
    pub fn register_food(&mut self, food_id: FoodId, day: u32) {
        self.food_usage.entry(food_id).or_default().push(day);
        self.day_foods.entry(day).or_default().push(food_id);
    }

    /// The subset of `all_ids` usable on `day`, order preserved.
    pub fn get_available_foods(&self, all_ids: &[FoodId], day: u32) -> Vec<FoodId> {
        all_ids
            .iter()
            .copied()
            .filter(|&id| self.can_use_food(id, day))
            .collect()
    }

    /// Foods already registered on `day`.
    pub fn get_day_foods(&self, day: u32) -> &[FoodId] {
        self.day_foods.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 1.0 for unused foods down to 0.0 at the repetition cap.
    pub fn calculate_variety_score(&self, food_id: FoodId) -> f64 {
        if self.max_repetitions == 0 {
            return 0.0;
        }
        let usage = self.usage_count(food_id) as f64;
        (1.0 - usage / self.max_repetitions as f64).clamp(0.0, 1.0)
    }

    pub fn usage_count(&self, food_id: FoodId) -> usize {
        self.food_usage.get(&food_id).map_or(0, Vec::len)
    }

    /// Clear all usage state.
    pub fn reset(&mut self) {
        self.food_usage.clear();
        self.day_foods.clear();
        self.current_day = None;
    }

    /// Undo every registration made on `day`, leaving other days intact.
    pub fn clear_day(&mut self, day: u32) {
        let Some(foods) = self.day_foods.get_mut(&day) else {
            return;
        };

        for food_id in foods.drain(..) {
            if let Some(days) = self.food_usage.get_mut(&food_id) {
                if let Some(pos) = days.iter().rposition(|&d| d == day) {
                    days.remove(pos);
                }
                if days.is_empty() {
                    self.food_usage.remove(&food_id);
                }
            }
        }
    }

    /// Use count per food.
    pub fn get_food_usage_summary(&self) -> BTreeMap<FoodId, usize> {
        self.food_usage
            .iter()
            .map(|(&id, days)| (id, days.len()))
            .collect()
    }

    pub fn snapshot(&self) -> VarietySnapshot {
        VarietySnapshot {
            food_usage: self
                .food_usage
                .iter()
                .map(|(&id, days)| (id, days.clone()))
                .collect(),
            day_foods: self.day_foods.clone(),
            max_repetitions: self.max_repetitions,
            consecutive_day_gap: self.consecutive_day_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_blocks_next_day_only() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        assert!(vm.can_use_food(42, 1));
        vm.register_food(42, 1);

        vm.start_day(2);
        assert!(!vm.can_use_food(42, 2));
        assert!(vm.can_use_food(1, 2));

        vm.start_day(3);
        assert!(vm.can_use_food(42, 3));
    }

    #[test]
    fn test_same_day_reuse_blocked() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(5, 1);
        assert!(!vm.can_use_food(5, 1));
    }

    #[test]
    fn test_max_repetitions_is_final() {
        let mut vm = VarietyManager::new(3, 1);
        for day in [1, 3, 5] {
            vm.start_day(day);
            vm.register_food(9, day);
        }
        assert!(!vm.can_use_food(9, 7));
        assert!(!vm.can_use_food(9, 100));
        assert_eq!(vm.calculate_variety_score(9), 0.0);
    }

    #[test]
    fn test_wider_gap() {
        let mut vm = VarietyManager::new(3, 2);
        vm.start_day(1);
        vm.register_food(1, 1);
        assert!(!vm.can_use_food(1, 3));
        assert!(vm.can_use_food(1, 4));
    }

    #[test]
    fn test_variety_score() {
        let mut vm = VarietyManager::default();
        assert_eq!(vm.calculate_variety_score(1), 1.0);
        vm.start_day(1);
        vm.register_food(1, 1);
        assert!((vm.calculate_variety_score(1) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_available_foods_preserve_order() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(2, 1);
        vm.start_day(2);
        assert_eq!(vm.get_available_foods(&[3, 2, 1], 2), vec![3, 1]);
    }

    #[test]
    fn test_start_day_idempotent() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(4, 1);
        vm.start_day(1);
        assert_eq!(vm.get_day_foods(1), &[4]);
        assert_eq!(vm.current_day(), Some(1));
        assert!(vm.get_day_foods(6).is_empty());
    }

    #[test]
    fn test_clear_day_keeps_other_days() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(1, 1);
        vm.start_day(3);
        vm.register_food(1, 3);
        vm.register_food(2, 3);

        vm.clear_day(3);

        assert!(vm.get_day_foods(3).is_empty());
        assert_eq!(vm.usage_count(1), 1);
        assert_eq!(vm.usage_count(2), 0);
        assert!(vm.can_use_food(1, 3));
        assert_eq!(vm.get_food_usage_summary().len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(1, 1);
        vm.reset();
        assert!(vm.get_food_usage_summary().is_empty());
        assert_eq!(vm.current_day(), None);
        assert!(vm.can_use_food(1, 2));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut vm = VarietyManager::default();
        vm.start_day(1);
        vm.register_food(42, 1);
        let json = serde_json::to_value(vm.snapshot()).unwrap();
        assert_eq!(json["food_usage"]["42"][0], 1);
        assert_eq!(json["max_repetitions"], 3);
    }
}
