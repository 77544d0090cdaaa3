use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::request::CreateQuizRequest,
    },
    repositories::QuizRepository,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    /// Assembles and persists a quiz from validated questions. Enforces the
    /// persistence invariants: non-empty question list, per-question bounds,
    /// expiry policy, and a total-marks value derived from the questions.
    pub async fn create_quiz(&self, request: CreateQuizRequest, creator: &str) -> AppResult<Quiz> {
        request.validate()?;

        let quiz_id = request
            .quiz_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(Quiz::generate_id);

        if self.repository.find_by_quiz_id(&quiz_id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz_id
            )));
        }

        let quiz = Quiz::new(
            quiz_id,
            creator,
            request.title,
            request.subject,
            request.endless,
            request.end_date,
            request.questions,
        );
        quiz.validate()?;

        let created = self.repository.insert(quiz).await?;
        log::info!(
            "created quiz '{}' with {} questions",
            created.quiz_id,
            created.questions.len()
        );
        Ok(created)
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_quiz_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        Ok(quiz)
    }

    pub async fn list_quizzes(
        &self,
        creator: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        match creator {
            Some(creator) => {
                self.repository
                    .list_quizzes_by_creator(creator, offset, limit)
                    .await
            }
            None => self.repository.list_quizzes(offset, limit).await,
        }
    }

    /// Swaps a quiz's question list, recomputing the derived total. The same
    /// invariants as creation apply to the new list.
    pub async fn replace_questions(
        &self,
        quiz_id: &str,
        questions: Vec<Question>,
    ) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz(quiz_id).await?;
        quiz.replace_questions(questions);
        quiz.validate()?;

        let updated = self.repository.update(quiz).await?;
        Ok(updated)
    }

    pub async fn delete_quiz(&self, quiz_id: &str) -> AppResult<()> {
        let deleted = self.repository.delete(quiz_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz_id
            )));
        }
        Ok(())
    }
}
