//! src/client/registration_client.rs
//! ============================================================================
//! # RegistrationClient: POSTs the record to the registration endpoint
//!
//! One request per call. No retries, no cancellation; the only timeout is the
//! optional one from the endpoint config.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::client::outcome::{ResponseBody, SubmitOutcome};
use crate::config::EndpointConfig;
use crate::error::AppError;
use crate::model::form_record::FormRecord;

/// Anything that can take a record and tell how the submission went.
#[async_trait]
pub trait RegistrationSink: Send + Sync {
    async fn submit(&self, record: &FormRecord) -> SubmitOutcome;
}

#[derive(Debug, Clone)]
pub struct RegistrationClient {
    client: Client,
    url: String,
}

impl RegistrationClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the record and returns the 2xx status with its parsed body.
    /// Non-2xx statuses are errors, the same as a failed connection.
    pub async fn post_record(&self, record: &FormRecord) -> Result<(StatusCode, ResponseBody), AppError> {
        let response = self.client.post(&self.url).json(record).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::http_status(&self.url, status.as_u16()));
        }

        let text = response.text().await?;
        debug!(status = status.as_u16(), body_len = text.len(), "Registration response received");
        Ok((status, ResponseBody::parse(&text)))
    }
}

#[async_trait]
impl RegistrationSink for RegistrationClient {
    #[instrument(
        level = "info",
        skip_all,
        fields(
            marker = "REGISTRATION_SUBMIT",
            operation_type = "http_post",
            url = %self.url,
            emp_id = %record.emp_id
        )
    )]
    async fn submit(&self, record: &FormRecord) -> SubmitOutcome {
        let start = Instant::now();

        match self.post_record(record).await {
            Ok((status, body)) => {
                let outcome = SubmitOutcome::from_response(status.as_u16(), body);
                info!(
                    status = status.as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    severity = ?outcome.level(),
                    "Registration request completed"
                );
                outcome
            }
            Err(e) => {
                warn!(
                    error = %e,
                    transport = e.is_transport(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Registration request failed"
                );
                SubmitOutcome::TransportFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::outcome::INTERNAL_SERVER_ERROR;
    use crate::model::form_record::Department;
    use crate::model::ui_state::NotificationLevel;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> FormRecord {
        FormRecord {
            emp_name: "Ada Lovelace".into(),
            emp_id: "42".into(),
            emp_email: "ada@example.com".into(),
            emp_phone: "1234567890".into(),
            emp_dept: Department::Engineering,
            emp_doj: "2024-01-15".into(),
            emp_role: "Analyst".into(),
        }
    }

    fn client_for(server: &MockServer) -> RegistrationClient {
        RegistrationClient::new(&EndpointConfig {
            url: format!("{}/api", server.uri()),
            timeout: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_created_posts_all_fields_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "emp_name": "Ada Lovelace",
                "emp_id": "42",
                "emp_email": "ada@example.com",
                "emp_phone": "1234567890",
                "emp_dept": "Engineering",
                "emp_doj": "2024-01-15",
                "emp_role": "Analyst",
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "success": "OK", "result": {} })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).submit(&record()).await;
        assert_eq!(outcome.notification(), (NotificationLevel::Success, "OK"));
    }

    #[tokio::test]
    async fn test_ok_status_is_warning() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "warning": "dup" })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).submit(&record()).await;
        assert_eq!(outcome, SubmitOutcome::Warning { message: "dup".into() });
    }

    #[tokio::test]
    async fn test_other_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "failure": "queued" })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).submit(&record()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                status: 202,
                message: "queued".into()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_status_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "failure": "boom" })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).submit(&record()).await;
        assert!(matches!(outcome, SubmitOutcome::TransportFailed { .. }));
        assert_eq!(outcome.message(), INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = RegistrationClient::new(&EndpointConfig {
            url: format!("http://127.0.0.1:{port}/api"),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();

        let outcome = client.submit(&record()).await;
        assert_eq!(
            outcome.notification(),
            (NotificationLevel::Error, INTERNAL_SERVER_ERROR)
        );
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = RegistrationClient::new(&EndpointConfig {
            url: format!("{}/api", server.uri()),
            timeout: Some(Duration::from_millis(50)),
        })
        .unwrap();

        let outcome = client.submit(&record()).await;
        assert!(matches!(outcome, SubmitOutcome::TransportFailed { .. }));
    }
}
