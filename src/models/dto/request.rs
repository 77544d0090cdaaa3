use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Question;

/// Difficulty levels accepted by guided generation. Wire values match the
/// labels shown to the model ("Easy" | "Medium" | "Hard").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A single generation request. `mode` stays a plain string here so that an
/// unrecognized mode reaches the prompt builder and fails as a
/// `ConfigurationError` rather than a deserialization error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 32))]
    pub mode: String,

    #[validate(length(min = 1, max = 200))]
    pub topic: Option<String>,

    pub difficulty: Option<Difficulty>,

    #[validate(range(min = 1, max = 50))]
    pub num_questions: Option<u8>,

    #[validate(length(min = 1, max = 10000))]
    pub user_prompt: Option<String>,
}

impl GenerateQuizRequest {
    pub fn guided(topic: &str, difficulty: Difficulty, num_questions: u8) -> Self {
        Self {
            mode: "guided".to_string(),
            topic: Some(topic.to_string()),
            difficulty: Some(difficulty),
            num_questions: Some(num_questions),
            user_prompt: None,
        }
    }

    pub fn custom(user_prompt: &str) -> Self {
        Self {
            mode: "custom".to_string(),
            topic: None,
            difficulty: None,
            num_questions: None,
            user_prompt: Some(user_prompt.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    /// Optional client-supplied identifier; generated when absent.
    pub quiz_id: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[serde(default)]
    pub endless: bool,

    pub end_date: Option<DateTime<Utc>>,

    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}
