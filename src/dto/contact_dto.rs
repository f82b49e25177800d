use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::submission::ContactInquiry;

/// Length checks alone would accept a string of spaces; required fields
/// must survive a trim, matching the client-side rule.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// `/api/contact` request body. Mirrors the client-side rules so the relay
/// never trusts client validation alone.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 100))]
    pub dates: Option<String>,

    #[validate(custom(function = not_blank), length(max = 5000))]
    pub message: String,
}

impl From<ContactRequest> for ContactInquiry {
    fn from(value: ContactRequest) -> Self {
        ContactInquiry {
            name: value.name,
            email: value.email,
            phone: value.phone.filter(|p| !p.trim().is_empty()),
            dates: value.dates.filter(|d| !d.trim().is_empty()),
            message: value.message,
        }
    }
}

/// `/api/subscribe` request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
}

/// Wire shape of every relay form response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiResponse { success: true, message: Some(message.into()) }
    }
}
