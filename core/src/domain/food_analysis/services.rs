use crate::domain::{
    common::services::Service,
    food_analysis::{
        entities::AnalysisError,
        ports::{FoodAnalysisService, LLMClient},
        schema::{FOOD_ANALYSIS_PROMPT, get_food_analysis_schema},
        value_objects::{AnalyzeImageInput, ProviderRecord},
    },
    nutrition::{entities::FoodEntry, helpers::from_analysis},
};

impl<LLM> FoodAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> Result<Vec<FoodEntry>, AnalysisError> {
        tracing::debug!(
            mime_type = %input.image.mime_type,
            payload_len = input.image.data.len(),
            "analyzing food image"
        );

        let raw_response = self
            .llm_client
            .generate_with_image(
                FOOD_ANALYSIS_PROMPT.to_string(),
                input.image,
                get_food_analysis_schema(),
            )
            .await
            .map_err(|e| {
                tracing::error!("Error analyzing food image: {}", e);
                AnalysisError::failed(e)
            })?;

        let records = parse_analysis_response(&raw_response).map_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
            AnalysisError::failed(e)
        })?;

        let entries = from_analysis(records);
        tracing::info!(items = entries.len(), "food image analyzed");

        Ok(entries)
    }
}

/// Blank text means the provider identified nothing.
fn parse_analysis_response(raw_response: &str) -> Result<Vec<ProviderRecord>, String> {
    let text = raw_response.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("Invalid JSON response: {}", e))?;

    if !parsed.is_array() {
        return Err("Expected a JSON array of food items".to_string());
    }

    serde_json::from_value(parsed).map_err(|e| format!("Invalid food item format: {}", e))
}
