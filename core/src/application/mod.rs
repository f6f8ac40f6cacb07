use crate::{
    domain::common::{CarbVisionConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type CarbVisionService = Service<GeminiLLMClient>;

/// Builds the application service. A missing provider credential is a
/// startup error rather than a per-request one.
pub fn create_service(config: CarbVisionConfig) -> Result<CarbVisionService, CoreError> {
    let llm_client = GeminiLLMClient::from_config(&config.llm)?;
    tracing::info!(model = llm_client.model_name(), "food analysis client ready");

    Ok(Service::new(llm_client))
}
