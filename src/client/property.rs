use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::config::ClientConfig;
use crate::model::property::{PropertyDataset, PropertyImage};

#[derive(Deserialize)]
struct ImagesEnvelope {
    data: Vec<PropertyImage>,
}

/// Fetches property data through the relay. Each call degrades to `None`
/// on failure; nothing is thrown at the page.
pub struct PropertyClient {
    http: Client,
    base_url: String,
    property_id: String,
}

impl PropertyClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http = Client::builder()
            .user_agent("villamar-client/0.1")
            .build()
            .expect("failed to build http client");
        PropertyClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            property_id: config.property_id.clone(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/api/hospitable/properties/{}{}",
            self.base_url, self.property_id, suffix
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, suffix: &str) -> Option<T> {
        let url = self.url(suffix);
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                error!("Property fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            error!("Property fetch returned {} for {}", response.status(), url);
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Property fetch body unreadable for {}: {}", url, e);
                None
            }
        }
    }

    pub async fn fetch_details(&self) -> Option<Value> {
        self.get_json("").await
    }

    pub async fn fetch_images(&self) -> Option<Vec<PropertyImage>> {
        self.get_json::<ImagesEnvelope>("/images").await.map(|e| e.data)
    }

    pub async fn fetch_reviews(&self) -> Option<Value> {
        self.get_json("/reviews").await
    }

    /// Issue the two independent fetches concurrently and aggregate once
    /// both settle. Page render is never serialized behind one of them.
    pub async fn load_dataset(&self) -> PropertyDataset {
        let (details, images) = tokio::join!(self.fetch_details(), self.fetch_images());
        PropertyDataset { details, images }
    }

    /// Targeted reload for the failed half of a partial dataset.
    pub async fn reload_images(&self, dataset: &mut PropertyDataset) {
        dataset.images = self.fetch_images().await;
    }
}
