use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::domain::Question;
use crate::models::dto::request::GenerateQuizRequest;
use crate::services::{extraction, model_service::GenerationBackend, prompt_builder, validation};

/// Orchestrates one generation request: prompt contract, model call,
/// extraction, validation. Only configuration and backend failures propagate;
/// everything the pipeline cannot recover becomes `Ok(None)`.
pub struct GenerationService {
    backend: Arc<dyn GenerationBackend>,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(
        &self,
        request: &GenerateQuizRequest,
    ) -> AppResult<Option<Vec<Question>>> {
        let spec = prompt_builder::build(request)?;

        let raw = self
            .backend
            .generate(spec.instruction, &spec.user_content, &spec.output_schema)
            .await?;

        let Some(candidates) = extraction::extract(&raw) else {
            log::warn!(
                "generation in mode '{}' produced no parseable question payload",
                request.mode
            );
            return Ok(None);
        };

        let candidate_count = candidates.len();
        let questions = validation::validate_batch(candidates);
        if questions.len() < candidate_count {
            log::info!(
                "accepted {} of {} generated candidates",
                questions.len(),
                candidate_count
            );
        }

        Ok(Some(questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::dto::request::Difficulty;
    use crate::services::model_service::MockGenerationBackend;

    fn service_returning(raw: &'static str) -> GenerationService {
        let mut backend = MockGenerationBackend::new();
        backend
            .expect_generate()
            .returning(move |_, _, _| Ok(raw.to_string()));
        GenerationService::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn valid_payload_yields_validated_questions() {
        let service = service_returning(
            r#"[{"questionText":[{"type":"text","content":"2+2=?"}],"options":["3","4","5","6"],"correctOption":1,"explanation":"Basic addition.","id":"q1"}]"#,
        );

        let request = GenerateQuizRequest::guided("Arithmetic", Difficulty::Easy, 1);
        let questions = service
            .generate(&request)
            .await
            .expect("generation should succeed")
            .expect("payload should extract");

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_option, 1);
    }

    #[tokio::test]
    async fn unparseable_reply_yields_none_not_an_error() {
        let service = service_returning("I cannot help with that.");

        let request = GenerateQuizRequest::custom("quiz me");
        let result = service.generate(&request).await.expect("no hard failure");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let mut backend = MockGenerationBackend::new();
        backend
            .expect_generate()
            .returning(|_, _, _| Err(AppError::BackendError("quota exceeded".to_string())));
        let service = GenerationService::new(Arc::new(backend));

        let request = GenerateQuizRequest::custom("quiz me");
        assert!(matches!(
            service.generate(&request).await,
            Err(AppError::BackendError(_))
        ));
    }

    #[tokio::test]
    async fn unknown_mode_never_reaches_the_backend() {
        let mut backend = MockGenerationBackend::new();
        backend.expect_generate().times(0);
        let service = GenerationService::new(Arc::new(backend));

        let mut request = GenerateQuizRequest::custom("quiz me");
        request.mode = "exam".to_string();

        assert!(matches!(
            service.generate(&request).await,
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn invalid_candidates_are_dropped_from_the_batch() {
        let service = service_returning(
            r#"[
                {"questionText":[{"type":"text","content":"ok"}],"options":["a","b","c","d"],"correctOption":5,"explanation":"","id":"bad"},
                {"questionText":[{"type":"text","content":"ok"}],"options":["a","b","c","d"],"correctOption":0,"explanation":"","id":"good"}
            ]"#,
        );

        let request = GenerateQuizRequest::custom("quiz me");
        let questions = service
            .generate(&request)
            .await
            .expect("generation should succeed")
            .expect("payload should extract");

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "good");
    }
}
