pub mod dashboard;
pub mod entity;
pub mod health;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::notify::Notification;
use crate::state::AppState;

/// GET /api/v1/notifications
/// Drains pending notifications (the admin UI shows them as toasts).
async fn handle_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications.drain())
}

/// GET /api/v1/attachments/:id
async fn handle_attachment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let attachment = state
        .attachments
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Attachment {id} not found")))?;
    let disposition = format!(
        "{}; filename=\"{}\"",
        disposition_kind(&attachment.content_type),
        attachment.file_name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, attachment.content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        ],
        attachment.bytes,
    ))
}

/// Only PDFs and raster images are shown in the browser; anything else
/// (HTML, SVG, scripts) is served as a download.
fn disposition_kind(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let viewable = mime == "application/pdf"
        || (mime.starts_with("image/") && mime != "image/svg+xml");
    if viewable {
        "inline"
    } else {
        "attachment"
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/notifications", get(handle_notifications))
        .route("/api/v1/attachments/:id", get(handle_attachment))
        // Dashboard proxy
        .route(
            "/api/v1/dashboard/subadmin/:section",
            get(dashboard::handle_subadmin),
        )
        .route(
            "/api/v1/dashboard/superadmin/info",
            get(dashboard::handle_superadmin_info),
        )
        // Content admin
        .nest(
            "/api/v1/institutes",
            entity::router(state.institutes.clone(), state.upload_limit),
        )
        .nest(
            "/api/v1/courses",
            entity::router(state.courses.clone(), state.upload_limit),
        )
        .nest(
            "/api/v1/articles",
            entity::router(state.articles.clone(), state.upload_limit),
        )
        .nest(
            "/api/v1/merit-lists",
            entity::router(state.merit_lists.clone(), state.upload_limit),
        )
        .nest(
            "/api/v1/exams",
            entity::router(state.exams.clone(), state.upload_limit),
        )
        .with_state(state)
}
