use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::segment::Segment;

/// A single multiple-choice question. Segment order is display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question_text: Vec<Segment>,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub marks: i32,
}

impl Question {
    pub fn new(
        question_text: Vec<Segment>,
        options: Vec<String>,
        correct_option: usize,
        explanation: impl Into<String>,
        marks: i32,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            question_text,
            options,
            correct_option,
            explanation: explanation.into(),
            marks,
        }
    }

    /// Entity invariants checked before a question is accepted or persisted.
    pub fn validate(&self) -> AppResult<()> {
        if !self.question_text.iter().any(Segment::has_content) {
            return Err(AppError::ValidationError(
                "question text must have at least one non-empty segment".to_string(),
            ));
        }
        if self.options.len() < 2 {
            return Err(AppError::ValidationError(
                "each question must have at least 2 options".to_string(),
            ));
        }
        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "options cannot be empty".to_string(),
            ));
        }
        if self.correct_option >= self.options.len() {
            return Err(AppError::ValidationError(format!(
                "correct option index {} is outside the range of {} options",
                self.correct_option,
                self.options.len()
            )));
        }
        if self.marks < 0 {
            return Err(AppError::ValidationError(
                "marks cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
