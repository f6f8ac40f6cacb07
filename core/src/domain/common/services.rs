use crate::domain::food_analysis::ports::LLMClient;

/// Application service. Holds the injected provider client; the analysis
/// port is implemented on it in `food_analysis::services`.
#[derive(Debug, Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: LLM,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM) -> Self {
        Self { llm_client }
    }
}
