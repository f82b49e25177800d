use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Aggregate of the two independent property fetches. Either half may be
/// missing on its own: `details: None` means that fetch failed, and
/// `images: None` means the images fetch failed — distinct from
/// `Some(vec![])`, a property that genuinely has no images.
#[derive(Debug, Clone, Default)]
pub struct PropertyDataset {
    pub details: Option<Value>,
    pub images: Option<Vec<PropertyImage>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetStatus {
    /// Both fetches landed.
    Complete,
    /// Exactly one fetch failed; the page renders degraded with a reload
    /// affordance for the failed half.
    Partial,
    /// Both fetches failed; the page shows an error state with manual retry.
    Failed,
}

impl PropertyDataset {
    pub fn status(&self) -> DatasetStatus {
        match (&self.details, &self.images) {
            (Some(_), Some(_)) => DatasetStatus::Complete,
            (None, None) => DatasetStatus::Failed,
            _ => DatasetStatus::Partial,
        }
    }

    pub fn images_failed(&self) -> bool {
        self.images.is_none()
    }

    pub fn details_failed(&self) -> bool {
        self.details.is_none()
    }
}
