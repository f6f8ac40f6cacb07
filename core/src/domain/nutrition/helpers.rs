use crate::domain::{
    food_analysis::value_objects::ProviderRecord,
    nutrition::{
        entities::{FoodEntry, MANUAL_ENTRY_NAME},
        value_objects::ManualEntryInput,
    },
};

/// Build the single entry of a manual calculation.
///
/// Protein, fat and calories are unknown for manual entries and stay at 0.
pub fn from_manual(input: &ManualEntryInput) -> FoodEntry {
    let carbohydrates = input.total_grams() * input.carbs_per_100g() / 100.0;

    FoodEntry::new(
        MANUAL_ENTRY_NAME.to_string(),
        format!("{}g", input.total_grams()),
        carbohydrates,
        0.0,
        0.0,
        0.0,
    )
}

/// Map provider records 1:1 onto entries.
pub fn from_analysis(records: Vec<ProviderRecord>) -> Vec<FoodEntry> {
    records
        .into_iter()
        .map(|record| {
            FoodEntry::new(
                record.food_name,
                record.size,
                record.carbohydrates,
                record.protein,
                record.fat,
                record.calories,
            )
        })
        .collect()
}
