use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::{EmailConfig, HospitableConfig};
use crate::router::contact_router::contact_router;
use crate::router::property_router::property_router;
use crate::service::contact_service::{ContactService, ContactServiceImpl};
use crate::service::property_service::{PropertyService, PropertyServiceImpl};
use crate::util::email::SmtpEmailService;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env().expect("App config error");

        let email_config = EmailConfig::from_env().expect("Email config error");
        let hospitable_config = HospitableConfig::from_env().expect("Hospitable config error");

        let email_service =
            Arc::new(SmtpEmailService::new(email_config).expect("Email service error"));
        let contact_service =
            Arc::new(ContactServiceImpl::new(email_service)) as Arc<dyn ContactService>;
        let property_service = Arc::new(PropertyServiceImpl::new(hospitable_config))
            as Arc<dyn PropertyService>;

        let router = Self::create_router(contact_service, property_service);

        App { config, router }
    }

    fn create_router(
        contact_service: Arc<dyn ContactService>,
        property_service: Arc<dyn PropertyService>,
    ) -> Router {
        Router::new()
            .merge(contact_router(contact_service))
            .merge(property_router(property_service))
            .route("/health", get(|| async { "OK" }))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
