use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::contact_handler::{create_contact_handler, subscribe_handler};
use crate::service::contact_service::ContactService;

pub fn contact_router(service: Arc<dyn ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(create_contact_handler))
        .route("/api/subscribe", post(subscribe_handler))
        .with_state(service)
}
