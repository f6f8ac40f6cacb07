use std::ops::Add;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MANUAL_ENTRY_NAME: &str = "Manual Entry";

/// One identified (or manually specified) food item.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FoodEntry {
    name: String,
    portion_description: String,
    carbohydrates: f64,
    protein: f64,
    fat: f64,
    calories: f64,
}

impl FoodEntry {
    /// Numbers that are negative or not finite are stored as 0.
    pub fn new(
        name: String,
        portion_description: String,
        carbohydrates: f64,
        protein: f64,
        fat: f64,
        calories: f64,
    ) -> Self {
        Self {
            name,
            portion_description,
            carbohydrates: non_negative(carbohydrates),
            protein: non_negative(protein),
            fat: non_negative(fat),
            calories: non_negative(calories),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn portion_description(&self) -> &str {
        &self.portion_description
    }

    pub fn carbohydrates(&self) -> f64 {
        self.carbohydrates
    }

    pub fn protein(&self) -> f64 {
        self.protein
    }

    pub fn fat(&self) -> f64 {
        self.fat
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }
}

/// Summed macros and calories across a list of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
    pub calories: f64,
}

impl Totals {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl From<&FoodEntry> for Totals {
    fn from(entry: &FoodEntry) -> Self {
        Self {
            carbohydrates: non_negative(entry.carbohydrates),
            protein: non_negative(entry.protein),
            fat: non_negative(entry.fat),
            calories: non_negative(entry.calories),
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            carbohydrates: self.carbohydrates + other.carbohydrates,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            calories: self.calories + other.calories,
        }
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::zero(), |acc, t| acc + t)
    }
}

/// How the entry list of a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Manual,
    Analysis,
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
