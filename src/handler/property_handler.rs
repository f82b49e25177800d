use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::service::property_service::PropertyService;
use crate::util::error::HandlerError;

/// GET /api/hospitable/properties/{id} — upstream JSON relayed verbatim.
pub async fn get_property_details_handler(
    State(service): State<Arc<dyn PropertyService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[get_property_details_handler] Handler called");

    let details = service.fetch_details(&id).await.map_err(|e| {
        error!("[get_property_details_handler] {}", e);
        HandlerError::upstream("Property details are unavailable right now.")
    })?;

    Ok(Json(details))
}

/// GET /api/hospitable/properties/{id}/images — normalized image list.
pub async fn get_property_images_handler(
    State(service): State<Arc<dyn PropertyService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[get_property_images_handler] Handler called");

    let images = service.fetch_images(&id).await.map_err(|e| {
        error!("[get_property_images_handler] {}", e);
        HandlerError::upstream("Property images are unavailable right now.")
    })?;

    Ok(Json(json!({ "data": images })))
}

/// GET /api/hospitable/properties/{id}/reviews — passthrough, degrading to
/// `null` when upstream fails: reviews are decorative and should never
/// break the page.
pub async fn get_property_reviews_handler(
    State(service): State<Arc<dyn PropertyService>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("[get_property_reviews_handler] Handler called");

    match service.fetch_reviews(&id).await {
        Ok(reviews) => Json(reviews),
        Err(e) => {
            warn!("[get_property_reviews_handler] degrading to null: {}", e);
            Json(Value::Null)
        }
    }
}
