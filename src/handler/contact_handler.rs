use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{error, info};
use validator::Validate;

use crate::dto::contact_dto::{ApiResponse, ContactRequest, SubscribeRequest};
use crate::service::contact_service::ContactService;
use crate::util::error::HandlerError;

pub async fn create_contact_handler(
    State(service): State<Arc<dyn ContactService>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_contact_handler] Handler called");

    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }

    service.submit_inquiry(payload.into()).await.map_err(|e| {
        error!("[create_contact_handler] Inquiry failed: {}", e);
        HandlerError::internal("We could not send your message right now. Please try again later.")
    })?;

    Ok(Json(ApiResponse::ok("Thanks for reaching out! We will get back to you shortly.")))
}

pub async fn subscribe_handler(
    State(service): State<Arc<dyn ContactService>>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[subscribe_handler] Handler called");

    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }

    service.subscribe(&payload.email).await.map_err(|e| {
        error!("[subscribe_handler] Signup failed: {}", e);
        HandlerError::internal("We could not complete your signup right now. Please try again later.")
    })?;

    Ok(Json(ApiResponse::ok("You're on the list!")))
}
