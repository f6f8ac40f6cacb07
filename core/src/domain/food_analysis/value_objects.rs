use serde::{Deserialize, Deserializer};

use crate::domain::food_analysis::entities::EncodedImage;

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image: EncodedImage,
}

impl AnalyzeImageInput {
    pub fn from_bytes(image_data: &[u8], mime_type: Option<&str>) -> Self {
        Self {
            image: EncodedImage::from_bytes(image_data, mime_type),
        }
    }
}

/// One food item as returned by the provider.
///
/// The provider is asked for all six fields, but anything missing or
/// malformed is defaulted here so it can never reach aggregation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub food_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub size: String,
    #[serde(deserialize_with = "lenient_number")]
    pub carbohydrates: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub protein: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub fat: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub calories: f64,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_full() {
        let record: ProviderRecord = serde_json::from_str(
            r#"{"foodName":"Apple","size":"1 medium apple","carbohydrates":25,"protein":0.5,"fat":0.3,"calories":95}"#,
        )
        .unwrap();

        assert_eq!(
            record,
            ProviderRecord {
                food_name: "Apple".to_string(),
                size: "1 medium apple".to_string(),
                carbohydrates: 25.0,
                protein: 0.5,
                fat: 0.3,
                calories: 95.0,
            }
        );
    }

    #[test]
    fn test_record_lenient_values() {
        let record: ProviderRecord = serde_json::from_str(
            r#"{"foodName":null,"size":2,"carbohydrates":"12.5","protein":"lots","fat":[1],"extra":true}"#,
        )
        .unwrap();

        assert_eq!(record.food_name, "");
        assert_eq!(record.size, "2");
        assert_eq!(record.carbohydrates, 12.5);
        assert_eq!(record.protein, 0.0);
        assert_eq!(record.fat, 0.0);
        assert_eq!(record.calories, 0.0);
    }
}
