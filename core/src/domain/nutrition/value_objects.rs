use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const MIN_INSULIN_RATIO: f64 = 1.0;
pub const MAX_INSULIN_RATIO: f64 = 50.0;
pub const DEFAULT_INSULIN_RATIO: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter valid positive numbers for calculation.")]
    InvalidManualEntry,

    #[error("Carb-to-insulin ratio must be between 1 and 50")]
    RatioOutOfRange,
}

/// Validated manual-entry form values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualEntryInput {
    total_grams: f64,
    carbs_per_100g: f64,
}

impl ManualEntryInput {
    pub fn new(total_grams: f64, carbs_per_100g: f64) -> Result<Self, ValidationError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(total_grams) || !valid(carbs_per_100g) {
            return Err(ValidationError::InvalidManualEntry);
        }
        // The carbohydrate amount must be representable too.
        if !(total_grams * carbs_per_100g / 100.0).is_finite() {
            return Err(ValidationError::InvalidManualEntry);
        }

        Ok(Self {
            total_grams,
            carbs_per_100g,
        })
    }

    /// Parses raw form text. Anything that is not a number is rejected.
    pub fn parse(total_grams: &str, carbs_per_100g: &str) -> Result<Self, ValidationError> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidManualEntry)
        };

        Self::new(parse(total_grams)?, parse(carbs_per_100g)?)
    }

    pub fn total_grams(&self) -> f64 {
        self.total_grams
    }

    pub fn carbs_per_100g(&self) -> f64 {
        self.carbs_per_100g
    }
}

/// Grams of carbohydrate covered by one unit of insulin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
pub struct InsulinRatio(f64);

impl InsulinRatio {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(MIN_INSULIN_RATIO..=MAX_INSULIN_RATIO).contains(&value) {
            return Err(ValidationError::RatioOutOfRange);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for InsulinRatio {
    fn default() -> Self {
        Self(DEFAULT_INSULIN_RATIO)
    }
}

impl TryFrom<f64> for InsulinRatio {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InsulinRatio> for f64 {
    fn from(ratio: InsulinRatio) -> Self {
        ratio.0
    }
}
