use serde_json::{json, Value};

use crate::constants::generation_prompts::{CUSTOM_GENERATION_PROMPT, GUIDED_GENERATION_PROMPT};
use crate::errors::{AppError, AppResult};
use crate::models::dto::request::GenerateQuizRequest;

/// The full contract sent to the model backend: a fixed system instruction,
/// the user-derived content, and a structural output descriptor the backend
/// may use for constrained decoding. The validator re-checks the same shape
/// regardless of whether the backend honored the descriptor.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub instruction: &'static str,
    pub user_content: String,
    pub output_schema: Value,
}

pub fn build(request: &GenerateQuizRequest) -> AppResult<PromptSpec> {
    match request.mode.as_str() {
        "guided" => {
            let topic = request
                .topic
                .as_deref()
                .map(str::trim)
                .filter(|topic| !topic.is_empty())
                .ok_or_else(|| {
                    AppError::ValidationError("guided mode requires a topic".to_string())
                })?;
            let num_questions = request.num_questions.ok_or_else(|| {
                AppError::ValidationError("guided mode requires numQuestions".to_string())
            })?;
            let difficulty = request.difficulty.ok_or_else(|| {
                AppError::ValidationError("guided mode requires a difficulty".to_string())
            })?;

            Ok(PromptSpec {
                instruction: GUIDED_GENERATION_PROMPT,
                user_content: format!(
                    "Generate {} multiple-choice questions on the topic \"{}\". \
                     The difficulty level is \"{}\".",
                    num_questions, topic, difficulty
                ),
                output_schema: question_batch_schema(),
            })
        }
        "custom" => {
            let user_prompt = request
                .user_prompt
                .as_deref()
                .map(str::trim)
                .filter(|prompt| !prompt.is_empty())
                .ok_or_else(|| {
                    AppError::ValidationError("custom mode requires a userPrompt".to_string())
                })?;

            // The free-form prompt is passed through verbatim; the system
            // instruction carries the anti-override directive.
            Ok(PromptSpec {
                instruction: CUSTOM_GENERATION_PROMPT,
                user_content: user_prompt.to_string(),
                output_schema: question_batch_schema(),
            })
        }
        other => Err(AppError::ConfigurationError(format!(
            "unknown generation mode '{}'",
            other
        ))),
    }
}

/// Structural descriptor for an array of question objects, in the backend's
/// constrained-decoding format.
fn question_batch_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "questionText": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "type": {
                                "type": "STRING",
                                "enum": ["text", "code", "table", "image", "math"]
                            },
                            "content": { "type": "STRING" },
                            "lang": { "type": "STRING", "nullable": true }
                        },
                        "required": ["type", "content"]
                    }
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "correctOption": { "type": "INTEGER", "minimum": 0, "maximum": 3 },
                "explanation": { "type": "STRING" },
                "id": { "type": "STRING" }
            },
            "required": ["questionText", "options", "correctOption", "explanation", "id"]
        }
    })
}
