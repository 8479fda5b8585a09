use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::planner::calculations::round2;

/// The six tracked nutrients. Used for item values, day totals and weekly
/// aggregates alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl NutrientTotals {
    /// Every field rounded to 2 decimals.
    pub fn rounded(self) -> Self {
        self.map(round2)
    }

    /// Every field multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Every field divided by `divisor`.
    pub fn divided(self, divisor: f64) -> Self {
        self.map(|v| v / divisor)
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: f(self.fiber),
            sugar: f(self.sugar),
        }
    }
}

impl Add for NutrientTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            sugar: self.sugar + rhs.sugar,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_round() {
        let a = NutrientTotals {
            calories: 100.111,
            protein: 1.0,
            ..Default::default()
        };
        let b = NutrientTotals {
            calories: 50.222,
            fiber: 2.5,
            ..Default::default()
        };

        let total: NutrientTotals = [a, b].into_iter().sum();
        let total = total.rounded();
        assert!((total.calories - 150.33).abs() < 1e-9);
        assert!((total.protein - 1.0).abs() < 1e-9);
        assert!((total.fiber - 2.5).abs() < 1e-9);
    }
}
