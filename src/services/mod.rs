pub mod extraction;
pub mod generation_service;
pub mod model_service;
pub mod prompt_builder;
pub mod quiz_service;
pub mod upload_session_service;
pub mod validation;
