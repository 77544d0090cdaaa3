use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::GenerateQuizRequest, response::GenerateQuizResponse},
};

/// Generation entrypoint. `questions` is `null` when the model replied but
/// nothing parseable could be recovered; backend and configuration failures
/// return an error payload instead.
#[post("/api/quiz/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let questions = state.generation_service.generate(&request).await?;

    Ok(HttpResponse::Ok().json(GenerateQuizResponse {
        success: true,
        questions,
    }))
}
