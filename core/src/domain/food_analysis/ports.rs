use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisError, EncodedImage},
        value_objects::AnalyzeImageInput,
    },
    nutrition::entities::FoodEntry,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for food image analysis
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    /// One provider call per invocation. An empty list means no food was
    /// identified and is not an error.
    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<Vec<FoodEntry>, AnalysisError>> + Send;
}
