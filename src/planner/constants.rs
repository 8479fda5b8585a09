/// Energy per gram of protein and carbohydrate.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Energy per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Divisor used to turn fiber/sugar calorie ratios into grams.
pub const KCAL_PER_GRAM_FIBER_SUGAR: f64 = 4.0;

// ─────────────────────────────────────────────────────────────────────────────
// Default macro split, as a fraction of daily calories
// ─────────────────────────────────────────────────────────────────────────────

pub const MALE_PROTEIN_RATIO: f64 = 0.27;
pub const MALE_CARBS_RATIO: f64 = 0.45;
pub const MALE_FAT_RATIO: f64 = 0.28;
pub const MALE_FIBER_RATIO: f64 = 0.012;
pub const MALE_SUGAR_MAX_RATIO: f64 = 0.012;

pub const FEMALE_PROTEIN_RATIO: f64 = 0.23;
pub const FEMALE_CARBS_RATIO: f64 = 0.47;
pub const FEMALE_FAT_RATIO: f64 = 0.30;
pub const FEMALE_FIBER_RATIO: f64 = 0.014;
pub const FEMALE_SUGAR_MAX_RATIO: f64 = 0.010;

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Accepted relative calorie deviation for a day (±2%).
pub const CALORIE_VARIANCE_TOLERANCE: f64 = 0.02;

/// Number of days in a generated plan.
pub const DAYS_IN_PLAN: u32 = 7;

/// Accepted calorie request range (inclusive).
pub const MIN_CALORIE_TARGET: u32 = 1000;
pub const MAX_CALORIE_TARGET: u32 = 5000;

// ─────────────────────────────────────────────────────────────────────────────
// Variety
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum appearances of one food across the plan.
pub const DEFAULT_MAX_REPETITIONS: u32 = 3;

/// Days that must pass after a use before the food may appear again.
pub const DEFAULT_CONSECUTIVE_DAY_GAP: u32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Meal assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Foods per meal.
pub const DEFAULT_MAX_ITEMS_PER_MEAL: usize = 2;

/// A meal stops taking items once its remaining budget drops to this.
pub const MIN_MEAL_CALORIES: f64 = 80.0;

/// Share of the remaining budget given to a non-final item.
pub const NON_FINAL_ITEM_SHARE: f64 = 0.5;

/// Snacks skip foods at or above this many kcal per unit.
pub const SNACK_MAX_DENSITY: f64 = 6.0;

/// Foods at or above this many kcal per unit get small portions.
pub const DENSE_FOOD_THRESHOLD: f64 = 4.0;

/// Portion bounds for dense foods (oils, nuts, sweets).
pub const DENSE_MIN_QUANTITY: f64 = 5.0;
pub const DENSE_MAX_QUANTITY: f64 = 100.0;

/// Portion bounds for everything else.
pub const NORMAL_MIN_QUANTITY: f64 = 20.0;
pub const NORMAL_MAX_QUANTITY: f64 = 500.0;

/// Ranking weights.
pub const CALORIE_FIT_WEIGHT: f64 = 0.6;
pub const VARIETY_WEIGHT: f64 = 0.4;

// ─────────────────────────────────────────────────────────────────────────────
// Reconciliation
// ─────────────────────────────────────────────────────────────────────────────

/// Day total accepted when within this many kcal of target.
pub const RECONCILE_TOLERANCE_KCAL: f64 = 50.0;

/// Calorie checks per day before the day is accepted as is.
pub const MAX_RECONCILE_ATTEMPTS: u32 = 3;

/// Reduction factor bounds when shrinking the last item.
pub const MIN_REDUCTION_FACTOR: f64 = 0.5;
pub const MAX_REDUCTION_FACTOR: f64 = 1.0;

/// Fraction of the relative excess removed from the last item.
pub const REDUCTION_DAMPING: f64 = 0.5;
