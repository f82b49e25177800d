use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, instrument};

use crate::config::{ConfigError, EmailConfig};
use crate::model::submission::ContactInquiry;

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }
}

/// Internal handling for contact and newsletter submissions. The relay
/// forwards form payloads through this seam; the SMTP implementation below
/// is the default collaborator.
#[async_trait]
pub trait InquiryDispatcher: Send + Sync {
    async fn dispatch_inquiry(&self, inquiry: &ContactInquiry) -> Result<(), EmailError>;
    async fn dispatch_subscription(&self, email: &str) -> Result<(), EmailError>;
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        // Configure TLS settings
        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if config.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            let credentials =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized");
        Ok(Self { config, transport })
    }

    /// Send an email message
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email to: {}", message.to);

        let email_message = self.build_message(message)?;

        self.transport.send(email_message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, EmailError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let builder = Message::builder().from(from).to(to).subject(message.subject);

        // Prefer HTML when both bodies are set
        let built = match (message.html_body, message.text_body) {
            (Some(html), _) => builder.header(ContentType::TEXT_HTML).body(html),
            (None, Some(text)) => builder.header(ContentType::TEXT_PLAIN).body(text),
            (None, None) => {
                return Err(EmailError::MessageError("Email has no body".to_string()));
            }
        };

        built.map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
    }

    fn inquiry_template(&self, inquiry: &ContactInquiry) -> (String, String) {
        let phone = inquiry.phone.as_deref().unwrap_or("not provided");
        let dates = inquiry.dates.as_deref().unwrap_or("not specified");

        let text = format!(
            "New inquiry from the Villa Mar website\n\n\
             Name: {}\nEmail: {}\nPhone: {}\nDates: {}\n\nMessage:\n{}\n",
            inquiry.name, inquiry.email, phone, dates, inquiry.message
        );

        let html = format!(
            "<h2>New inquiry from the Villa Mar website</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Phone:</strong> {}</p>\
             <p><strong>Dates:</strong> {}</p>\
             <p><strong>Message:</strong></p><p>{}</p>",
            inquiry.name, inquiry.email, phone, dates, inquiry.message
        );

        (text, html)
    }
}

#[async_trait]
impl InquiryDispatcher for SmtpEmailService {
    #[instrument(skip(self, inquiry), fields(from = %inquiry.email))]
    async fn dispatch_inquiry(&self, inquiry: &ContactInquiry) -> Result<(), EmailError> {
        let (text, html) = self.inquiry_template(inquiry);
        let message = EmailMessage::new(
            self.config.inquiry_inbox.clone(),
            format!("Villa Mar inquiry from {}", inquiry.name),
        )
        .with_text_body(text)
        .with_html_body(html);

        self.send_email(message).await
    }

    #[instrument(skip(self))]
    async fn dispatch_subscription(&self, email: &str) -> Result<(), EmailError> {
        let message = EmailMessage::new(
            self.config.inquiry_inbox.clone(),
            "New Villa Mar newsletter signup".to_string(),
        )
        .with_text_body(format!("New newsletter subscriber: {}\n", email));

        self.send_email(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder_accumulates_bodies() {
        let message = EmailMessage::new("owner@example.com".to_string(), "Subject".to_string())
            .with_text_body("text".to_string())
            .with_html_body("<p>html</p>".to_string());
        assert_eq!(message.to, "owner@example.com");
        assert!(message.text_body.is_some());
        assert!(message.html_body.is_some());
    }

    // SMTP service construction wants a tokio runtime for its pool
    #[tokio::test]
    async fn test_inquiry_template_includes_fields() {
        let service = SmtpEmailService::new(EmailConfig::from_test_env()).unwrap();
        let inquiry = ContactInquiry {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("5551234567".to_string()),
            dates: None,
            message: "Is the villa free in June?".to_string(),
        };
        let (text, html) = service.inquiry_template(&inquiry);
        assert!(text.contains("ana@example.com"));
        assert!(text.contains("not specified"));
        assert!(html.contains("<strong>Phone:</strong> 5551234567"));
    }
}
