use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Manual-entry form. Each field is taken as the browser sends it: a number,
/// the raw field text, or anything else, which then fails numeric parsing.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ManualEntryRequest {
    #[serde(default)]
    #[schema(value_type = f64)]
    pub total_grams: Value,

    #[serde(default)]
    #[schema(value_type = f64)]
    pub carbs_per_100g: Value,
}

impl ManualEntryRequest {
    pub fn total_grams_text(&self) -> String {
        form_text(&self.total_grams)
    }

    pub fn carbs_per_100g_text(&self) -> String {
        form_text(&self.carbs_per_100g)
    }
}

fn form_text(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateRatioRequest {
    #[validate(range(min = 1.0, max = 50.0, message = "ratio must be between 1 and 50"))]
    pub ratio: f64,
}
