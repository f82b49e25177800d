use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config::HospitableConfig;
use crate::model::property::PropertyImage;
use crate::util::error::ServiceError;

#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn fetch_details(&self, property_id: &str) -> Result<Value, ServiceError>;
    async fn fetch_images(&self, property_id: &str) -> Result<Vec<PropertyImage>, ServiceError>;
    async fn fetch_reviews(&self, property_id: &str) -> Result<Value, ServiceError>;
}

/// Relays property data from the upstream hospitality API. The bearer
/// token lives here and in the config only; responses are passed back to
/// the client without it.
pub struct PropertyServiceImpl {
    http: Client,
    config: HospitableConfig,
}

impl PropertyServiceImpl {
    pub fn new(config: HospitableConfig) -> Self {
        let http = Client::builder()
            .user_agent("villamar-backend/0.1")
            .build()
            .expect("failed to build http client");
        PropertyServiceImpl { http, config }
    }

    async fn get_upstream(&self, path: &str) -> Result<Value, ServiceError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| {
                error!("Upstream request failed for {}: {}", path, e);
                ServiceError::Upstream("Upstream request failed".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Upstream returned {} for {}", status, path);
            return Err(ServiceError::Upstream(format!("Upstream returned {}", status)));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Failed to parse upstream body for {}: {}", path, e);
            ServiceError::Upstream("Upstream returned an unreadable body".to_string())
        })
    }
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    #[instrument(skip(self), fields(property_id = %property_id))]
    async fn fetch_details(&self, property_id: &str) -> Result<Value, ServiceError> {
        info!("Fetching property details from upstream");
        self.get_upstream(&format!("properties/{}", property_id)).await
    }

    #[instrument(skip(self), fields(property_id = %property_id))]
    async fn fetch_images(&self, property_id: &str) -> Result<Vec<PropertyImage>, ServiceError> {
        info!("Fetching property images from upstream");
        let body = self
            .get_upstream(&format!("properties/{}/images", property_id))
            .await?;

        // Upstream wraps the list in {"data": [...]}; unknown per-image
        // fields are dropped, only url/caption survive the relay.
        let images = body
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let url = item.get("url").and_then(Value::as_str)?.to_string();
                        let caption = item
                            .get("caption")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        Some(PropertyImage { url, caption })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(images)
    }

    #[instrument(skip(self), fields(property_id = %property_id))]
    async fn fetch_reviews(&self, property_id: &str) -> Result<Value, ServiceError> {
        info!("Fetching property reviews from upstream");
        self.get_upstream(&format!("properties/{}/reviews", property_id)).await
    }
}
