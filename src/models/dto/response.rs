use serde::Serialize;

use crate::models::domain::{Question, Quiz};
use crate::services::upload_session_service::UploadedFile;

/// Result of a generation call. `questions` is `null` exactly when the
/// extraction pipeline produced no usable content, which is distinct from a
/// backend or configuration error; those never reach this shape.
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub success: bool,
    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizListResponse {
    pub quizzes: Vec<Quiz>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSessionResponse {
    pub session_token: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedFilesResponse {
    pub success: bool,
    pub files: Vec<UploadedFile>,
}
