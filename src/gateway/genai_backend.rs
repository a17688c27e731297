use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use super::{CompletionBackend, GatewayError};

/// Completion backend on a `genai::Client`. Provider credentials come from the
/// environment variables `genai` reads by default.
#[derive(Clone)]
pub struct GenaiBackend {
    client: Client,
    model: String,
}

impl GenaiBackend {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn from_model(model: impl Into<String>) -> Self {
        Self::new(Client::default(), model)
    }
}

impl std::fmt::Debug for GenaiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiBackend")
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl CompletionBackend for GenaiBackend {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GatewayError> {
        let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(prompt)]);

        tracing::debug!(model = %self.model, "calling AI service");
        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| GatewayError::Backend(e.to_string()))?;

        response
            .first_text()
            .map(|text| text.to_string())
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "genai"
    }
}
