use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::model::{Build, Image, OperatingSystem, OsArchitecture, OsBuilder, OsFamily, Provider, Record};
use crate::store::traits::{RecordStore, Store};

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(handlers::get_api_docs))
        // Dashboards
        .route("/", get(handlers::public_status::<S>))
        .route("/dashboard", get(handlers::admin_dashboard::<S>))
        .route("/admin", get(handlers::redirect_admin))
        .route("/settings", get(handlers::settings::<S>))
        // Images (the only kind with an enable switch)
        .merge(crud_routes::<Image, S>("/images"))
        .route("/images/:id/toggle", post(handlers::toggle_image::<S>))
        // OS catalog
        .merge(crud_routes::<OperatingSystem, S>("/os"))
        .route("/os-family/stats", get(handlers::family_stats::<S>))
        .merge(crud_routes::<OsFamily, S>("/os-family"))
        .merge(crud_routes::<OsArchitecture, S>("/settings/architectures"))
        .merge(crud_routes::<OsBuilder, S>("/settings/builders"))
        // Providers and build history
        .merge(crud_routes::<Provider, S>("/providers"))
        .merge(crud_routes::<Build, S>("/builds"))
}

/// List/add on the collection path, get/edit/delete on `<path>/:id`
fn crud_routes<R, S>(path: &str) -> Router<Arc<S>>
where
    R: Record,
    S: RecordStore<R> + 'static,
{
    Router::new()
        .route(
            path,
            get(handlers::list_records::<R, S>).post(handlers::create_record::<R, S>),
        )
        .route(
            &format!("{}/:id", path),
            get(handlers::get_record::<R, S>)
                .patch(handlers::update_record::<R, S>)
                .delete(handlers::delete_record::<R, S>),
        )
}
