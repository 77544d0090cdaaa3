use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Opaque model-inference capability. Implementations return raw completion
/// text that should look like the requested schema but is never guaranteed to
/// be exact; the extraction pipeline owns making sense of it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        instruction: &str,
        user_content: &str,
        output_schema: &Value,
    ) -> AppResult<String>;
}

/// Gemini `generateContent` backend. The output schema rides along as a
/// constrained-decoding hint in `generationConfig`; the service treats it as
/// best-effort only.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiBackend {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()
            .map_err(|err| {
                AppError::InternalError(format!("failed to build HTTP client: {}", err))
            })?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        instruction: &str,
        user_content: &str,
        output_schema: &Value,
    ) -> AppResult<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_content }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": output_schema,
            },
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::BackendError(format!(
                "model backend returned {}: {}",
                status,
                detail.chars().take(500).collect::<String>()
            )));
        }

        let payload: Value = response.json().await?;

        let text = payload["candidates"]
            .get(0)
            .and_then(|candidate| candidate["content"]["parts"].get(0))
            .and_then(|part| part["text"].as_str())
            .ok_or_else(|| {
                AppError::BackendError("model backend returned an empty completion".to_string())
            })?;

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_the_configured_model() {
        let backend = GeminiBackend::from_config(&Config::test_config())
            .expect("backend should build from test config");

        assert_eq!(
            backend.endpoint(),
            "http://localhost:9090/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base_url() {
        let mut config = Config::test_config();
        config.gemini_base_url = "http://localhost:9090/".to_string();
        let backend = GeminiBackend::from_config(&config).unwrap();

        assert!(!backend.endpoint().contains("//v1beta"));
    }

    #[tokio::test]
    async fn mocked_backend_returns_raw_text() {
        let mut backend = MockGenerationBackend::new();
        backend
            .expect_generate()
            .returning(|_, _, _| Ok("[]".to_string()));

        let raw = backend
            .generate("instruction", "content", &json!({}))
            .await
            .expect("mock should succeed");
        assert_eq!(raw, "[]");
    }
}
