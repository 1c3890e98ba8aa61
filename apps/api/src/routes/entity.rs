//! Generic admin routes, mounted once per record kind under `/api/v1/{kind}`.
//!
//! Each UI action of the list/form screen maps to one call: Add, Edit row k,
//! field edits, course rows, Show list, Submit and Delete.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::attachments::{parse_object_url, Attachment};
use crate::catalog::{Commit, FormController, PanelSnapshot};
use crate::errors::AppError;
use crate::models::{Entity, EntitySchema};
use crate::state::Collection;

#[derive(Debug, Serialize)]
pub struct ListedRecord<T> {
    pub index: usize,
    #[serde(flatten)]
    pub record: T,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub name: String,
    pub value: String,
}

pub fn router<T: Entity, S>(collection: Collection<T>, upload_limit: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handle_list::<T>))
        .route("/schema", get(handle_schema::<T>))
        .route("/:index", delete(handle_delete::<T>))
        .route("/panel", get(handle_panel::<T>))
        .route("/panel/add", post(handle_add::<T>))
        .route("/panel/edit/:index", post(handle_edit::<T>))
        .route("/panel/list", post(handle_show_list::<T>))
        .route("/panel/resume", post(handle_resume::<T>))
        .route("/panel/field", patch(handle_set_field::<T>))
        .route(
            "/panel/file/:field",
            post(handle_upload::<T>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/panel/sub", post(handle_append_sub::<T>))
        .route(
            "/panel/sub/:index",
            patch(handle_set_sub_field::<T>).delete(handle_remove_sub::<T>),
        )
        .route("/panel/submit", post(handle_submit::<T>))
        .with_state(collection)
}

/// GET /api/v1/{kind}
pub async fn handle_list<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Json<Vec<ListedRecord<T>>> {
    let store = collection.store.read().await;
    Json(
        store
            .list()
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, record)| ListedRecord { index, record })
            .collect(),
    )
}

/// GET /api/v1/{kind}/schema
pub async fn handle_schema<T: Entity>() -> Json<&'static EntitySchema> {
    Json(T::schema())
}

/// DELETE /api/v1/{kind}/:index
///
/// Immediate, unconfirmed removal. Remote-backed kinds delete by the row's
/// id and only drop the row once the backend agreed.
pub async fn handle_delete<T: Entity>(
    State(collection): State<Collection<T>>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    let mut panel = collection.panel.lock().await;
    match &collection.remote {
        Some(remote) => {
            let id = collection.store.read().await.id_at(index)?;
            if !remote.remove(&id).await {
                return Err(AppError::Upstream(format!(
                    "Failed to delete {}",
                    T::schema().label
                )));
            }
        }
        None => {
            let mut store = collection.store.write().await;
            panel.delete(&mut store, index)?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/{kind}/panel
pub async fn handle_panel<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Json<PanelSnapshot<T>> {
    Json(collection.panel.lock().await.snapshot())
}

/// POST /api/v1/{kind}/panel/add
pub async fn handle_add<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Json<PanelSnapshot<T>> {
    let mut panel = collection.panel.lock().await;
    panel.add();
    Json(panel.snapshot())
}

/// POST /api/v1/{kind}/panel/edit/:index
pub async fn handle_edit<T: Entity>(
    State(collection): State<Collection<T>>,
    Path(index): Path<usize>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    let store = collection.store.read().await;
    panel.edit(&store, index)?;
    Ok(Json(panel.snapshot()))
}

/// POST /api/v1/{kind}/panel/list
pub async fn handle_show_list<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Json<PanelSnapshot<T>> {
    let mut panel = collection.panel.lock().await;
    panel.show_list();
    Json(panel.snapshot())
}

/// POST /api/v1/{kind}/panel/resume
pub async fn handle_resume<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Json<PanelSnapshot<T>> {
    let mut panel = collection.panel.lock().await;
    panel.resume();
    Json(panel.snapshot())
}

/// PATCH /api/v1/{kind}/panel/field
pub async fn handle_set_field<T: Entity>(
    State(collection): State<Collection<T>>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    panel.form_mut()?.set_field(&update.name, update.value)?;
    Ok(Json(panel.snapshot()))
}

/// POST /api/v1/{kind}/panel/file/:field
///
/// Takes the first multipart part, keeps it in the in-process attachment
/// store and points the field at its local URL. A local attachment the field
/// pointed at before is dropped unless a stored record still uses it.
pub async fn handle_upload<T: Entity>(
    State(collection): State<Collection<T>>,
    Path(field): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    FormController::<T>::check_file_field(&field)?;
    let mut panel = collection.panel.lock().await;
    panel.form_mut()?;

    let part = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
        .ok_or_else(|| AppError::Validation("No file in upload".to_string()))?;
    let file_name = part.file_name().unwrap_or("upload").to_string();
    let content_type = part
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes: Bytes = part
        .bytes()
        .await
        .map_err(|e| upload_error("Failed to read upload", e))?;

    let url = collection
        .attachments
        .put(Attachment {
            file_name,
            content_type,
            bytes,
        })
        .await;
    let previous = panel
        .form()
        .working()
        .field(&field)
        .map(str::to_string)
        .unwrap_or_default();
    panel.form_mut()?.attach_file(&field, url)?;

    if let Some(old) = parse_object_url(&previous) {
        let still_used = collection
            .store
            .read()
            .await
            .list()
            .iter()
            .any(|record| record.field(&field) == Some(previous.as_str()));
        if !still_used {
            collection.attachments.remove(old).await;
        }
    }
    Ok(Json(panel.snapshot()))
}

fn upload_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", e.body_text()))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

/// POST /api/v1/{kind}/panel/sub
pub async fn handle_append_sub<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    panel.form_mut()?.append_sub()?;
    Ok(Json(panel.snapshot()))
}

/// PATCH /api/v1/{kind}/panel/sub/:index
pub async fn handle_set_sub_field<T: Entity>(
    State(collection): State<Collection<T>>,
    Path(index): Path<usize>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    panel
        .form_mut()?
        .set_sub_field(index, &update.name, update.value)?;
    Ok(Json(panel.snapshot()))
}

/// DELETE /api/v1/{kind}/panel/sub/:index
pub async fn handle_remove_sub<T: Entity>(
    State(collection): State<Collection<T>>,
    Path(index): Path<usize>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    panel.form_mut()?.remove_sub(index)?;
    Ok(Json(panel.snapshot()))
}

/// POST /api/v1/{kind}/panel/submit
///
/// Local kinds write straight into the store. Remote kinds go through the
/// sync adapter; on failure the panel stays in edit mode with the draft.
pub async fn handle_submit<T: Entity>(
    State(collection): State<Collection<T>>,
) -> Result<Json<PanelSnapshot<T>>, AppError> {
    let mut panel = collection.panel.lock().await;
    let label = T::schema().label;

    match &collection.remote {
        None => {
            let mut store = collection.store.write().await;
            let id = panel.submit(&mut store)?;
            info!("Saved {label} {id}");
        }
        Some(remote) => {
            let saved = match panel.prepare_submit()? {
                Commit::Create(record) => remote.add(record).await,
                Commit::Update { id, record } => remote.edit(&id, record).await,
            };
            if saved.is_none() {
                return Err(AppError::Upstream(format!("Failed to save {label}")));
            }
            panel.complete_submit();
        }
    }

    Ok(Json(panel.snapshot()))
}
