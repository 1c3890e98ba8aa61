use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::remote::AdminEndpoint;
use crate::state::AppState;

/// GET /api/v1/dashboard/subadmin/:section  (stats | info | institute)
pub async fn handle_subadmin(
    State(state): State<AppState>,
    Path(section): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let endpoint = AdminEndpoint::subadmin(&section)
        .ok_or_else(|| AppError::NotFound(format!("Unknown dashboard section '{section}'")))?;
    proxy(&state, endpoint, &headers).await
}

/// GET /api/v1/dashboard/superadmin/info
pub async fn handle_superadmin_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    proxy(&state, AdminEndpoint::SuperadminInfo, &headers).await
}

async fn proxy(
    state: &AppState,
    endpoint: AdminEndpoint,
    headers: &HeaderMap,
) -> Result<Json<Value>, AppError> {
    let client = state
        .admin
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("ADMIN_API_URL is not configured".to_string()))?;
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Ok(Json(client.fetch(endpoint, authorization).await?))
}
