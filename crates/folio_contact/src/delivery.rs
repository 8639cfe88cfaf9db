//! Delivery service boundary
//!
//! A [`DeliveryService`] takes a validated message and answers with the
//! numeric status of the remote service. Only 200 counts as delivered.
//! [`EmailJsClient`] implements it against the EmailJS REST API.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{DeliveryError, Result};
use crate::validate::ContactFields;

/// Status code that marks a successful delivery
pub const STATUS_OK: u16 = 200;

/// Status and body returned by a delivery service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResponse {
    pub status: u16,
    pub text: String,
}

impl DeliveryResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK,
            text: "OK".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Something that can deliver a contact message
pub trait DeliveryService {
    fn deliver(&self, fields: &ContactFields) -> impl Future<Output = Result<DeliveryResponse>>;
}

/// EmailJS account settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    /// Public key, sent as `user_id`
    #[serde(default)]
    pub public_key: String,
    /// Recipient name filled into the template
    #[serde(default = "default_recipient")]
    pub recipient_name: String,
}

fn default_base_url() -> String {
    "https://api.emailjs.com".to_string()
}

fn default_recipient() -> String {
    "Priyangshu".to_string()
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            recipient_name: default_recipient(),
        }
    }
}

impl EmailJsConfig {
    /// Whether every credential is present
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// Template variables sent with every message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_name: String,
    pub reply_to: String,
}

/// JSON body of `POST /api/v1.0/email/send`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJsRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

/// EmailJS REST client
#[derive(Debug, Clone)]
pub struct EmailJsClient {
    config: EmailJsConfig,
    http: reqwest::Client,
}

impl EmailJsClient {
    /// Create a client, rejecting incomplete credentials
    pub fn new(config: EmailJsConfig) -> Result<Self> {
        if !config.is_complete() {
            return Err(DeliveryError::Config(
                "service_id, template_id and public_key are required".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &EmailJsConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v1.0/email/send", self.config.base_url.trim_end_matches('/'))
    }

    /// Request body for `fields`
    pub fn request_body(&self, fields: &ContactFields) -> EmailJsRequest {
        EmailJsRequest {
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            user_id: self.config.public_key.clone(),
            template_params: TemplateParams {
                from_name: fields.name.clone(),
                from_email: fields.email.clone(),
                subject: fields.subject.clone(),
                message: fields.message.clone(),
                to_name: self.config.recipient_name.clone(),
                reply_to: fields.email.clone(),
            },
        }
    }
}

impl DeliveryService for EmailJsClient {
    async fn deliver(&self, fields: &ContactFields) -> Result<DeliveryResponse> {
        let body = self.request_body(fields);
        tracing::debug!("sending contact message via {}", self.endpoint());

        let response = self.http.post(self.endpoint()).json(&body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if status != STATUS_OK {
            tracing::warn!("delivery service answered {}: {}", status, text);
        }
        Ok(DeliveryResponse { status, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> EmailJsConfig {
        EmailJsConfig {
            base_url,
            service_id: "service_test".into(),
            template_id: "template_test".into(),
            public_key: "pk_test".into(),
            recipient_name: "Owner".into(),
        }
    }

    fn fields() -> ContactFields {
        ContactFields::new("Ada", "ada@example.com", "Hello", "I would like to talk.")
    }

    #[test]
    fn test_incomplete_config_is_rejected() {
        let err = EmailJsClient::new(EmailJsConfig::default()).unwrap_err();
        assert!(matches!(err, DeliveryError::Config(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let client = EmailJsClient::new(config("http://localhost/".into())).unwrap();
        assert_eq!(client.endpoint(), "http://localhost/api/v1.0/email/send");

        let body = serde_json::to_value(client.request_body(&fields())).unwrap();
        assert_eq!(body["user_id"], "pk_test");
        assert_eq!(body["template_params"]["from_name"], "Ada");
        assert_eq!(body["template_params"]["reply_to"], "ada@example.com");
        assert_eq!(body["template_params"]["to_name"], "Owner");
    }

    #[tokio::test]
    async fn test_deliver_posts_to_emailjs() {
        let server = MockServer::start().await;
        let client = EmailJsClient::new(config(server.uri())).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .and(body_json(client.request_body(&fields())))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client.deliver(&fields()).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.text, "OK");
    }

    #[tokio::test]
    async fn test_non_200_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
            .mount(&server)
            .await;

        let client = EmailJsClient::new(config(server.uri())).unwrap();
        let response = client.deliver(&fields()).await.unwrap();
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
    }
}
