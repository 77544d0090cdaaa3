use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use quizforge_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz, Segment},
        dto::request::CreateQuizRequest,
    },
    repositories::QuizRepository,
    services::quiz_service::QuizService,
};

struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.quiz_id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.quiz_id
            )));
        }
        quizzes.insert(quiz.quiz_id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_quiz_id(&self, quiz_id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(quiz_id).cloned())
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| a.quiz_id.cmp(&b.quiz_id));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn list_quizzes_by_creator(
        &self,
        creator: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|quiz| quiz.creator == creator)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.quiz_id.cmp(&b.quiz_id));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if !quizzes.contains_key(&quiz.quiz_id) {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.quiz_id
            )));
        }
        quizzes.insert(quiz.quiz_id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, quiz_id: &str) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        Ok(quizzes.remove(quiz_id).is_some())
    }
}

fn make_question(marks: i32) -> Question {
    Question::new(
        vec![Segment::text("What is 2+2?")],
        vec!["3".into(), "4".into(), "5".into(), "6".into()],
        1,
        "Basic addition.",
        marks,
    )
}

fn make_request(quiz_id: &str, questions: Vec<Question>) -> CreateQuizRequest {
    CreateQuizRequest {
        quiz_id: Some(quiz_id.to_string()),
        title: "Arithmetic Basics".to_string(),
        subject: "Maths".to_string(),
        endless: true,
        end_date: None,
        questions,
    }
}

fn service() -> QuizService {
    QuizService::new(Arc::new(InMemoryQuizRepository::new()))
}

#[tokio::test]
async fn create_and_fetch_round_trips_questions_in_order() {
    let service = service();
    let questions = vec![make_question(1), make_question(2), make_question(3)];
    let question_ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();

    let created = service
        .create_quiz(make_request("quiz-1", questions), "user-a")
        .await
        .expect("create should succeed");
    assert_eq!(created.total_marks, 6);

    let fetched = service.get_quiz("quiz-1").await.expect("quiz exists");
    let fetched_ids: Vec<String> = fetched.questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(fetched_ids, question_ids);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn quiz_with_zero_questions_is_never_persisted() {
    let service = service();

    let result = service
        .create_quiz(make_request("quiz-1", vec![]), "user-a")
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(matches!(
        service.get_quiz("quiz-1").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn out_of_range_correct_option_blocks_persistence() {
    let service = service();
    let mut bad = make_question(1);
    bad.correct_option = 7;

    let result = service
        .create_quiz(make_request("quiz-1", vec![bad]), "user-a")
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn duplicate_quiz_id_is_a_conflict() {
    let service = service();
    service
        .create_quiz(make_request("quiz-1", vec![make_question(1)]), "user-a")
        .await
        .expect("first create should succeed");

    let duplicate = service
        .create_quiz(make_request("quiz-1", vec![make_question(1)]), "user-b")
        .await;

    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn expiry_must_be_endless_or_a_future_end_date() {
    let service = service();

    let mut neither = make_request("quiz-1", vec![make_question(1)]);
    neither.endless = false;
    neither.end_date = None;
    assert!(service.create_quiz(neither, "user-a").await.is_err());

    let mut both = make_request("quiz-2", vec![make_question(1)]);
    both.endless = true;
    both.end_date = Some(Utc::now() + Duration::days(1));
    assert!(service.create_quiz(both, "user-a").await.is_err());

    let mut past = make_request("quiz-3", vec![make_question(1)]);
    past.endless = false;
    past.end_date = Some(Utc::now() - Duration::days(1));
    assert!(service.create_quiz(past, "user-a").await.is_err());

    let mut dated = make_request("quiz-4", vec![make_question(1)]);
    dated.endless = false;
    dated.end_date = Some(Utc::now() + Duration::days(7));
    assert!(service.create_quiz(dated, "user-a").await.is_ok());
}

#[tokio::test]
async fn replace_questions_recomputes_total_marks() {
    let service = service();
    service
        .create_quiz(
            make_request("quiz-1", vec![make_question(2), make_question(2)]),
            "user-a",
        )
        .await
        .expect("create should succeed");

    let updated = service
        .replace_questions("quiz-1", vec![make_question(5)])
        .await
        .expect("replace should succeed");

    assert_eq!(updated.total_marks, 5);
    assert_eq!(updated.questions.len(), 1);

    let emptied = service.replace_questions("quiz-1", vec![]).await;
    assert!(matches!(emptied, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn listing_filters_by_creator() {
    let service = service();
    service
        .create_quiz(make_request("quiz-1", vec![make_question(1)]), "user-a")
        .await
        .unwrap();
    service
        .create_quiz(make_request("quiz-2", vec![make_question(1)]), "user-a")
        .await
        .unwrap();
    service
        .create_quiz(make_request("quiz-3", vec![make_question(1)]), "user-b")
        .await
        .unwrap();

    let (all, total_all) = service.list_quizzes(None, 0, 10).await.unwrap();
    assert_eq!(total_all, 3);
    assert_eq!(all.len(), 3);

    let (mine, total_mine) = service.list_quizzes(Some("user-a"), 0, 10).await.unwrap();
    assert_eq!(total_mine, 2);
    assert!(mine.iter().all(|quiz| quiz.creator == "user-a"));

    let (page, _) = service.list_quizzes(None, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].quiz_id, "quiz-2");
}

#[tokio::test]
async fn delete_removes_the_quiz_and_its_questions() {
    let service = service();
    service
        .create_quiz(make_request("quiz-1", vec![make_question(1)]), "user-a")
        .await
        .unwrap();

    service.delete_quiz("quiz-1").await.expect("delete should succeed");
    assert!(matches!(
        service.get_quiz("quiz-1").await,
        Err(AppError::NotFound(_))
    ));

    let missing = service.delete_quiz("quiz-1").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn generated_quiz_id_is_assigned_when_absent() {
    let service = service();
    let mut request = make_request("ignored", vec![make_question(1)]);
    request.quiz_id = None;

    let created = service
        .create_quiz(request, "user-a")
        .await
        .expect("create should succeed");

    assert!(!created.quiz_id.is_empty());
    assert!(service.get_quiz(&created.quiz_id).await.is_ok());
}
