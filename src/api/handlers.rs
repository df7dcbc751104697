use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Redirect},
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConsoleError;
use crate::logic::{AdminDashboard, ConfirmationGate, FamilyImageStats, FormDraft, PublicStatus};
use crate::model::{
    Build, Id, Image, ListQuery, OsArchitecture, OsBuilder, OsFamily, Provider, Record,
};
use crate::store::{collection_of, RecordStore, Store};

pub type AppState<S> = Arc<S>;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Record waiting on a delete confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            pending: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub confirm: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse<T> {
    pub deleted: T,
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub architectures: Vec<OsArchitecture>,
    pub builders: Vec<OsBuilder>,
}

#[derive(Debug, Serialize)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub fn status_for(err: &ConsoleError) -> StatusCode {
    match err {
        ConsoleError::NotFound { .. } => StatusCode::NOT_FOUND,
        ConsoleError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ConsoleError::InvalidFilter { .. } | ConsoleError::InvalidDraft { .. } => {
            StatusCode::BAD_REQUEST
        }
        ConsoleError::ConfirmationRequired { .. } => StatusCode::PRECONDITION_REQUIRED,
    }
}

fn api_error(err: ConsoleError) -> ApiError {
    (status_for(&err), Json(ErrorResponse::new(&err.to_string())))
}

// Generic CRUD handlers shared by every entity kind

pub async fn list_records<R, S>(
    State(store): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListResponse<R>>, ApiError>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    let query = ListQuery::from_params(params);
    let items = collection_of::<R, S>(&store)
        .query(&query)
        .map_err(api_error)?;
    let total = items.len();
    Ok(Json(ListResponse { items, total }))
}

pub async fn get_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<R>, ApiError>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    collection_of::<R, S>(&store)
        .require(id)
        .map(Json)
        .map_err(api_error)
}

pub async fn create_record<R, S>(
    State(store): State<AppState<S>>,
    RequestJson(body): RequestJson<serde_json::Value>,
) -> Result<(StatusCode, Json<R>), ApiError>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    let mut form = FormDraft::<R>::create();
    form.merge_value(body).map_err(api_error)?;
    let draft = form.submit().map_err(api_error)?;

    let record = collection_of::<R, S>(&store).add(draft);
    Ok((StatusCode::CREATED, Json(record)))
}

/// Shallow-merge the submitted fields over the stored record. The merge runs
/// against the record as it is when the collection lock is taken.
pub async fn update_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(body): RequestJson<serde_json::Value>,
) -> Result<Json<R>, ApiError>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    collection_of::<R, S>(&store)
        .edit_with(id, |existing| {
            let mut form = FormDraft::edit(existing);
            form.merge_value(body)?;
            form.submit()
        })
        .map(Json)
        .map_err(api_error)
}

/// Delete behind the confirmation gate: without `confirm=true` the gate is
/// cancelled and the pending record is returned with 428.
pub async fn delete_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    Query(params): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse<R>>, ApiError>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    let collection = collection_of::<R, S>(&store);
    let target = collection.require(id).map_err(api_error)?;
    let mut gate = ConfirmationGate::armed(target);

    if !params.confirm.unwrap_or(false) {
        let err = ConsoleError::ConfirmationRequired { kind: R::KIND, id };
        let pending = gate
            .cancel()
            .and_then(|record| serde_json::to_value(record).ok());
        return Err((
            status_for(&err),
            Json(ErrorResponse {
                error: err.to_string(),
                pending,
            }),
        ));
    }

    let deleted = gate
        .confirm(|record| collection.delete(record.id()))
        .flatten()
        .ok_or_else(|| api_error(ConsoleError::NotFound { kind: R::KIND, id }))?;

    Ok(Json(DeleteResponse {
        deleted,
        remaining: collection.len(),
    }))
}

pub async fn toggle_image<S>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Image>, ApiError>
where
    S: RecordStore<Image> + 'static,
{
    collection_of::<Image, S>(&store)
        .toggle_enabled(id)
        .map(Json)
        .ok_or_else(|| api_error(ConsoleError::NotFound { kind: Image::KIND, id }))
}

// Dashboards and static pages

pub async fn family_stats<S>(State(store): State<AppState<S>>) -> Json<FamilyImageStats>
where
    S: RecordStore<OsFamily> + 'static,
{
    let families = collection_of::<OsFamily, S>(&store).list();
    Json(FamilyImageStats::from_families(&families))
}

pub async fn admin_dashboard<S: Store + 'static>(
    State(store): State<AppState<S>>,
) -> Json<AdminDashboard> {
    Json(AdminDashboard::build(
        collection_of::<Provider, S>(&store).list(),
        collection_of::<Image, S>(&store).list(),
        collection_of::<Build, S>(&store).list(),
    ))
}

pub async fn public_status<S: Store + 'static>(
    State(store): State<AppState<S>>,
) -> Json<PublicStatus> {
    let images = collection_of::<Image, S>(&store).list();
    let families = collection_of::<OsFamily, S>(&store).list();
    let builds = collection_of::<Build, S>(&store).list();
    Json(PublicStatus::build(&images, &families, &builds))
}

pub async fn settings<S: Store + 'static>(
    State(store): State<AppState<S>>,
) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        architectures: collection_of::<OsArchitecture, S>(&store).list(),
        builders: collection_of::<OsBuilder, S>(&store).list(),
    })
}

pub async fn redirect_admin() -> Redirect {
    Redirect::permanent("/dashboard")
}

pub async fn get_api_docs() -> Json<Vec<RouteDoc>> {
    Json(vec![
        RouteDoc { method: "GET", path: "/", description: "Public status dashboard" },
        RouteDoc { method: "GET", path: "/dashboard", description: "Admin dashboard: stats, providers, images, builds" },
        RouteDoc { method: "GET", path: "/admin", description: "Redirects to /dashboard" },
        RouteDoc { method: "GET", path: "/health", description: "Health check" },
        RouteDoc { method: "GET", path: "/settings", description: "OS architectures and builders" },
        RouteDoc { method: "GET", path: "/images", description: "List images (search, type=ami|docker, status=enabled|disabled)" },
        RouteDoc { method: "POST", path: "/images", description: "Add an image" },
        RouteDoc { method: "PATCH", path: "/images/:id", description: "Edit an image" },
        RouteDoc { method: "DELETE", path: "/images/:id?confirm=true", description: "Delete an image" },
        RouteDoc { method: "POST", path: "/images/:id/toggle", description: "Enable or disable an image" },
        RouteDoc { method: "GET", path: "/os", description: "List operating systems (search, run_test=yes|no, family=<id>)" },
        RouteDoc { method: "GET", path: "/os-family", description: "List OS families (search, nature=linux|windows)" },
        RouteDoc { method: "GET", path: "/os-family/stats", description: "Image totals per OS nature" },
        RouteDoc { method: "GET", path: "/providers", description: "List providers (search, provider=aws|gcp, region=<region>)" },
        RouteDoc { method: "GET", path: "/settings/architectures", description: "List OS architectures (search)" },
        RouteDoc { method: "GET", path: "/settings/builders", description: "List OS builders (search)" },
        RouteDoc { method: "GET", path: "/builds", description: "List builds (search, image_id=<id>, status=success|building|failed)" },
    ])
}
