//! What the results screen shows, as plain values.
//!
//! Numbers are pre-formatted: grams with one decimal, calories with none,
//! insulin units with one decimal.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    nutrition::{
        entities::{EntrySource, FoodEntry, Totals},
        services::{aggregate, estimate_dose},
        value_objects::InsulinRatio,
    },
    session::entities::ResultsData,
};

pub const DOSE_DISCLAIMER: &str = "This is an estimate based on the provided Carb-to-Insulin Ratio. It is not medical advice. Always consult with your healthcare provider before making decisions about your insulin dose.";

pub const NO_FOOD_IDENTIFIED_MESSAGE: &str = "Could not identify any food items in the image. Please try another one or use the manual calculator.";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MacroDetails {
    pub protein: String,
    pub fat: String,
    pub calories: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EntryCard {
    pub name: String,
    pub portion: String,
    pub carbohydrates: String,
    pub details: Option<MacroDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TotalsView {
    pub carbohydrates: String,
    pub details: Option<MacroDetails>,
}

/// A dose is never rendered without the disclaimer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DoseView {
    pub ratio: String,
    pub units: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsBody {
    Entries {
        totals: TotalsView,
        dose: DoseView,
        cards: Vec<EntryCard>,
    },
    NoFoodIdentified {
        message: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultsView {
    pub can_toggle_details: bool,
    pub details_visible: bool,
    pub body: ResultsBody,
}

pub fn grams(value: f64) -> String {
    format!("{:.1}g", value)
}

pub fn calories(value: f64) -> String {
    format!("{:.0}", value)
}

pub fn insulin_units(value: f64) -> String {
    format!("{:.1}", value)
}

/// Details can only be shown for analysis results that have entries.
pub fn details_allowed(data: &ResultsData) -> bool {
    data.source == EntrySource::Analysis && !data.entries.is_empty()
}

pub fn render_dose(total_carbs: f64, ratio: InsulinRatio) -> DoseView {
    DoseView {
        ratio: format!("1:{}", ratio.value()),
        units: insulin_units(estimate_dose(total_carbs, ratio.value())),
        disclaimer: DOSE_DISCLAIMER.to_string(),
    }
}

pub fn render_results(
    data: &ResultsData,
    ratio: InsulinRatio,
    details_visible: bool,
) -> ResultsView {
    let can_toggle_details = details_allowed(data);
    let details_visible = details_visible && can_toggle_details;

    let body = if let Some(message) = &data.error {
        ResultsBody::Failed {
            message: message.clone(),
        }
    } else if data.entries.is_empty() {
        ResultsBody::NoFoodIdentified {
            message: NO_FOOD_IDENTIFIED_MESSAGE.to_string(),
        }
    } else {
        let totals = aggregate(&data.entries);
        ResultsBody::Entries {
            totals: render_totals(&totals, details_visible),
            dose: render_dose(totals.carbohydrates, ratio),
            cards: data
                .entries
                .iter()
                .map(|entry| render_entry(entry, details_visible))
                .collect(),
        }
    };

    ResultsView {
        can_toggle_details,
        details_visible,
        body,
    }
}

fn render_entry(entry: &FoodEntry, details_visible: bool) -> EntryCard {
    EntryCard {
        name: entry.name().to_string(),
        portion: entry.portion_description().to_string(),
        carbohydrates: grams(entry.carbohydrates()),
        details: details_visible.then(|| MacroDetails {
            protein: grams(entry.protein()),
            fat: grams(entry.fat()),
            calories: calories(entry.calories()),
        }),
    }
}

fn render_totals(totals: &Totals, details_visible: bool) -> TotalsView {
    TotalsView {
        carbohydrates: grams(totals.carbohydrates),
        details: details_visible.then(|| MacroDetails {
            protein: grams(totals.protein),
            fat: grams(totals.fat),
            calories: calories(totals.calories),
        }),
    }
}
