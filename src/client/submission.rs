use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::error;

use crate::config::ClientConfig;
use crate::model::submission::{ContactSubmission, SubmissionResult};

/// Relay endpoints accepting form submissions.
pub mod endpoints {
    pub const CONTACT: &str = "/api/contact";
    pub const SUBSCRIBE: &str = "/api/subscribe";
}

pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Could not connect to the server. Please check your connection and try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Seam between form controllers and the network. Implementations resolve
/// to a [`SubmissionResult`] in every case; nothing escapes as an error.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, endpoint: &str, payload: &Value) -> SubmissionResult;
}

/// HTTP submission client against the backend relay.
pub struct SubmissionClient {
    http: Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http = Client::builder()
            .user_agent("villamar-client/0.1")
            .build()
            .expect("failed to build http client");
        SubmissionClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn submit_contact(&self, submission: &ContactSubmission) -> SubmissionResult {
        let payload = serde_json::to_value(submission).unwrap_or_else(|_| json!({}));
        self.submit(endpoints::CONTACT, &payload).await
    }

    pub async fn subscribe(&self, email: &str) -> SubmissionResult {
        self.submit(endpoints::SUBSCRIBE, &json!({ "email": email })).await
    }
}

#[async_trait]
impl SubmissionTransport for SubmissionClient {
    /// One request, no retries. The result reflects the backend's semantic
    /// outcome: a non-2xx response becomes `success: false` with the most
    /// specific message the body offers.
    async fn submit(&self, endpoint: &str, payload: &Value) -> SubmissionResult {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = match self.http.post(&url).json(payload).send().await {
            Ok(r) => r,
            Err(e) => {
                error!("Submission transport failure for {}: {}", endpoint, e);
                return SubmissionResult::failure(CONNECTION_FAILURE_MESSAGE);
            }
        };

        let status = response.status();
        match response.json::<SubmissionResult>().await {
            Ok(body) if status.is_success() && body.success => body,
            Ok(body) => {
                let message = body
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                SubmissionResult::failure(message)
            }
            Err(e) => {
                error!("Unparseable submission response ({}) for {}: {}", status, endpoint, e);
                SubmissionResult::failure(GENERIC_FAILURE_MESSAGE)
            }
        }
    }
}
