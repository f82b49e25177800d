use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::property_handler::{
    get_property_details_handler, get_property_images_handler, get_property_reviews_handler,
};
use crate::service::property_service::PropertyService;

pub fn property_router(service: Arc<dyn PropertyService>) -> Router {
    Router::new()
        .route("/api/hospitable/properties/{id}", get(get_property_details_handler))
        .route("/api/hospitable/properties/{id}/images", get(get_property_images_handler))
        .route("/api/hospitable/properties/{id}/reviews", get(get_property_reviews_handler))
        .with_state(service)
}
