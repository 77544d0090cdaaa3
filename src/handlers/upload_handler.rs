use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::response::{UploadSessionResponse, UploadedFilesResponse},
};

/// Opens a new upload session and returns its capability token. The actual
/// file transfer is owned by the upload subsystem; this service only tracks
/// the session and its descriptor set.
#[post("/api/uploads/sessions")]
async fn begin_upload_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.upload_sessions.begin_session().await;

    Ok(HttpResponse::Created().json(UploadSessionResponse {
        session_token: session.token,
        expires_at: session.expires_at.to_rfc3339(),
    }))
}

#[get("/api/uploads/sessions/{token}/files")]
async fn get_session_files(
    state: web::Data<AppState>,
    token: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let files = state.upload_sessions.get_files(&token).await?;

    Ok(HttpResponse::Ok().json(UploadedFilesResponse {
        success: true,
        files,
    }))
}
