use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoQuizRepository,
    services::{
        generation_service::GenerationService, model_service::GeminiBackend,
        quiz_service::QuizService, upload_session_service::UploadSessionStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub generation_service: Arc<GenerationService>,
    pub upload_sessions: Arc<UploadSessionStore>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config));
        quiz_repository.ensure_indexes().await?;
        let quiz_service = Arc::new(QuizService::new(quiz_repository));

        let backend = Arc::new(GeminiBackend::from_config(&config)?);
        let generation_service = Arc::new(GenerationService::new(backend));

        let upload_sessions = Arc::new(UploadSessionStore::new(config.upload_session_ttl_minutes));

        Ok(Self {
            quiz_service,
            generation_service,
            upload_sessions,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
