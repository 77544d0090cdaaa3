use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, PaginationParams},
        response::QuizListResponse,
    },
};

#[derive(Debug, Deserialize)]
pub struct ListQuizzesQuery {
    pub creator: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizBody {
    pub creator: String,
    #[serde(flatten)]
    pub quiz: CreateQuizRequest,
}

#[post("/api/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizBody>,
) -> Result<HttpResponse, AppError> {
    let body = request.into_inner();
    let quiz = state
        .quiz_service
        .create_quiz(body.quiz, &body.creator)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/api/quizzes/{quiz_id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<ListQuizzesQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let pagination = PaginationParams {
        offset: query.offset,
        limit: query.limit,
    };

    let (quizzes, total) = state
        .quiz_service
        .list_quizzes(
            query.creator.as_deref(),
            pagination.offset(),
            pagination.limit(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(QuizListResponse {
        quizzes,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[delete("/api/quizzes/{quiz_id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&quiz_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
