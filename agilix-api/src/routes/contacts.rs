//! Contacts REST API Route
//!
//! `GET /api/contacts` returns every row of the contacts CSV. The daily view
//! limit is enforced by the client; this endpoint serves the full list.

use std::path::PathBuf;
use std::sync::Arc;

use agilix_core::ContactRecord;
use axum::{extract::State, routing::get, Json, Router};

use crate::contacts::read_contacts;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthExtractor;

#[derive(Debug, Clone)]
pub struct ContactsState {
    pub contacts_path: PathBuf,
}

impl ContactsState {
    pub fn new(contacts_path: PathBuf) -> Self {
        Self { contacts_path }
    }
}

/// GET /api/contacts - List every contact row
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    responses(
        (status = 200, description = "All contact rows", body = [ContactRecord]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Contacts file missing or unreadable", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_contacts(
    State(state): State<Arc<ContactsState>>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<Json<Vec<ContactRecord>>> {
    let path = state.contacts_path.clone();
    let records = tokio::task::spawn_blocking(move || read_contacts(&path))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "contacts reader task failed");
            ApiError::internal_error("Failed to fetch contacts")
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "failed to read contacts");
            ApiError::internal_error("Failed to fetch contacts")
        })?;

    tracing::info!(user_id = %auth.user_id, count = records.len(), "served contacts");
    Ok(Json(records))
}

/// Create the contacts router. Mount behind `auth_middleware`.
pub fn create_router(state: ContactsState) -> Router {
    Router::new()
        .route("/", get(list_contacts))
        .with_state(Arc::new(state))
}
