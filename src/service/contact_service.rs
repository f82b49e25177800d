use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::model::submission::ContactInquiry;
use crate::util::email::InquiryDispatcher;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn submit_inquiry(&self, inquiry: ContactInquiry) -> Result<(), ServiceError>;
    async fn subscribe(&self, email: &str) -> Result<(), ServiceError>;
}

pub struct ContactServiceImpl {
    dispatcher: Arc<dyn InquiryDispatcher>,
}

impl ContactServiceImpl {
    pub fn new(dispatcher: Arc<dyn InquiryDispatcher>) -> Self {
        ContactServiceImpl { dispatcher }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, inquiry), fields(from = %inquiry.email))]
    async fn submit_inquiry(&self, inquiry: ContactInquiry) -> Result<(), ServiceError> {
        info!("Forwarding contact inquiry");
        let res = self.dispatcher.dispatch_inquiry(&inquiry).await;
        match &res {
            Ok(_) => info!("Inquiry forwarded successfully"),
            Err(e) => error!("Failed to forward inquiry: {e}"),
        }
        // Dispatch detail stays in the logs; callers get a generic failure.
        res.map_err(|_| ServiceError::InternalError("Inquiry dispatch failed".to_string()))
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, email: &str) -> Result<(), ServiceError> {
        info!("Forwarding newsletter signup");
        let res = self.dispatcher.dispatch_subscription(email).await;
        match &res {
            Ok(_) => info!("Signup forwarded successfully"),
            Err(e) => error!("Failed to forward signup: {e}"),
        }
        res.map_err(|_| ServiceError::InternalError("Signup dispatch failed".to_string()))
    }
}
