use serde::{Deserialize, Serialize};

/// Client-side working copy of a contact form. Constructed fresh per form
/// open, mutated field by field, serialized as the `/api/contact` body.
/// `dates` is derived from the date-range control and never validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dates: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn clear(&mut self) {
        *self = ContactSubmission::default();
    }
}

/// Relay-side view of an inquiry, after DTO validation. Optional fields
/// arrive absent rather than empty.
#[derive(Debug, Clone)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dates: Option<String>,
    pub message: String,
}

/// Semantic outcome of a submission as seen by the form controller.
/// The submission client always resolves to one of these; transport and
/// HTTP-level failures are folded in, never thrown past it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        SubmissionResult { success: true, message: Some(message.into()) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        SubmissionResult { success: false, message: Some(message.into()) }
    }
}
