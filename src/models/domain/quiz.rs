use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::Question;

/// A persisted quiz document. `total_marks` is derived from the questions and
/// recomputed whenever they change; `attempts` holds references to attempt
/// documents owned elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub quiz_id: String,
    pub creator: String,
    pub title: String,
    pub subject: String,
    pub endless: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub questions: Vec<Question>,
    pub total_marks: i32,
    #[serde(default)]
    pub attempts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        quiz_id: impl Into<String>,
        creator: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
        endless: bool,
        end_date: Option<DateTime<Utc>>,
        questions: Vec<Question>,
    ) -> Self {
        let mut quiz = Quiz {
            quiz_id: quiz_id.into(),
            creator: creator.into(),
            title: title.into(),
            subject: subject.into(),
            endless,
            end_date,
            questions,
            total_marks: 0,
            attempts: Vec::new(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        };
        quiz.recompute_total_marks();
        quiz
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn recompute_total_marks(&mut self) {
        self.total_marks = self.questions.iter().map(|question| question.marks).sum();
    }

    pub fn replace_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.recompute_total_marks();
        self.modified_at = Some(Utc::now());
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.recompute_total_marks();
        self.modified_at = Some(Utc::now());
    }

    pub fn remove_question(&mut self, question_id: &str) -> bool {
        let before = self.questions.len();
        self.questions.retain(|question| question.id != question_id);
        let removed = self.questions.len() != before;
        if removed {
            self.recompute_total_marks();
            self.modified_at = Some(Utc::now());
        }
        removed
    }

    /// Invariants a quiz must satisfy before being persisted.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError("title is required".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(AppError::ValidationError("subject is required".to_string()));
        }
        if self.questions.is_empty() {
            return Err(AppError::ValidationError(
                "quiz must have at least one question".to_string(),
            ));
        }
        match (self.endless, self.end_date) {
            (true, Some(_)) => {
                return Err(AppError::ValidationError(
                    "an endless quiz cannot have an end date".to_string(),
                ));
            }
            (false, None) => {
                return Err(AppError::ValidationError(
                    "a non-endless quiz requires an end date".to_string(),
                ));
            }
            (false, Some(end_date)) if end_date <= Utc::now() => {
                return Err(AppError::ValidationError(
                    "end date must be in the future".to_string(),
                ));
            }
            _ => {}
        }
        for question in &self.questions {
            question.validate()?;
        }

        let expected: i32 = self.questions.iter().map(|question| question.marks).sum();
        if self.total_marks != expected {
            return Err(AppError::ValidationError(format!(
                "total marks {} does not match the question sum {}",
                self.total_marks, expected
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::segment::Segment;
    use chrono::Duration;

    fn question(marks: i32) -> Question {
        Question::new(
            vec![Segment::text("What is 2+2?")],
            vec!["3".into(), "4".into()],
            1,
            "Basic addition.",
            marks,
        )
    }

    fn endless_quiz(questions: Vec<Question>) -> Quiz {
        Quiz::new(
            Quiz::generate_id(),
            "user-1",
            "Arithmetic",
            "Maths",
            true,
            None,
            questions,
        )
    }

    #[test]
    fn total_marks_is_the_sum_of_question_marks() {
        let quiz = endless_quiz(vec![question(2), question(3)]);
        assert_eq!(quiz.total_marks, 5);
    }

    #[test]
    fn total_marks_tracks_question_changes() {
        let mut quiz = endless_quiz(vec![question(2)]);
        assert_eq!(quiz.total_marks, 2);

        quiz.add_question(question(4));
        assert_eq!(quiz.total_marks, 6);

        let removed_id = quiz.questions[0].id.clone();
        assert!(quiz.remove_question(&removed_id));
        assert_eq!(quiz.total_marks, 4);

        quiz.replace_questions(vec![question(1), question(1)]);
        assert_eq!(quiz.total_marks, 2);
    }

    #[test]
    fn quiz_with_no_questions_fails_validation() {
        let quiz = endless_quiz(vec![]);
        assert!(matches!(quiz.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn expiry_is_endless_xor_future_end_date() {
        let quiz = endless_quiz(vec![question(1)]);
        assert!(quiz.validate().is_ok());

        let mut both = quiz.clone();
        both.end_date = Some(Utc::now() + Duration::days(1));
        assert!(both.validate().is_err());

        let mut neither = quiz.clone();
        neither.endless = false;
        assert!(neither.validate().is_err());

        let mut dated = quiz.clone();
        dated.endless = false;
        dated.end_date = Some(Utc::now() + Duration::days(7));
        assert!(dated.validate().is_ok());

        let mut past = quiz;
        past.endless = false;
        past.end_date = Some(Utc::now() - Duration::days(1));
        assert!(past.validate().is_err());
    }

    #[test]
    fn quiz_with_out_of_range_correct_option_fails_validation() {
        let mut bad = question(1);
        bad.correct_option = 9;
        let quiz = endless_quiz(vec![bad]);
        assert!(quiz.validate().is_err());
    }

    #[test]
    fn quiz_round_trips_through_persisted_shape_preserving_question_order() {
        let quiz = endless_quiz(vec![question(1), question(2), question(3)]);

        let json = serde_json::to_string(&quiz).expect("should serialize");
        assert!(json.contains("\"quizId\""));
        assert!(json.contains("\"totalMarks\""));

        let parsed: Quiz = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, quiz);
        let ids: Vec<&str> = parsed.questions.iter().map(|q| q.id.as_str()).collect();
        let original: Vec<&str> = quiz.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, original);
    }
}
