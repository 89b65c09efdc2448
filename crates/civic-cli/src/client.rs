//! HTTP client for the civic report store

use crate::error::CliResult;
use async_trait::async_trait;
use civic_lifecycle::{NewReport, ReportStore, StoreError, StoreResult};
use civic_types::{Report, ReportId, StatusFilter, StatusUpdate, Statistics, StoreAck};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

/// Report store reached over the daemon's REST API
#[derive(Clone)]
pub struct HttpReportStore {
    client: Client,
    base_url: String,
    admin_token: Option<String>,
}

/// Daemon health response
#[derive(Debug, Deserialize)]
pub struct DaemonStatus {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Error body returned by the daemon
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpReportStore {
    /// Create a new client
    pub fn new(endpoint: &str, admin_token: Option<String>, timeout: Duration) -> CliResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            admin_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check daemon health
    pub async fn health_check(&self) -> StoreResult<DaemonStatus> {
        self.send(self.client.get(self.url("/health"))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> StoreResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        if status.is_success() {
            serde_json::from_slice(&body)
                .map_err(|e| StoreError::Connectivity(format!("Unreadable response: {}", e)))
        } else {
            match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(ErrorBody { error: message }) => {
                    tracing::debug!(status = status.as_u16(), %message, "Store refused request");
                    Err(StoreError::Rejected {
                        status: Some(status.as_u16()),
                        message,
                    })
                }
                // not the store talking, e.g. a proxy error page
                Err(_) => Err(StoreError::Connectivity(format!(
                    "Unexpected response with status {}",
                    status
                ))),
            }
        }
    }
}

fn photo_part(report: &NewReport) -> Part {
    let part = Part::bytes(report.photo.bytes.clone()).file_name(report.photo.file_name.clone());
    match &report.photo.content_type {
        Some(mime) => match part.mime_str(mime) {
            Ok(part) => part,
            // the daemon judges the extension, not the MIME type
            Err(_) => Part::bytes(report.photo.bytes.clone())
                .file_name(report.photo.file_name.clone()),
        },
        None => part,
    }
}

#[async_trait]
impl ReportStore for HttpReportStore {
    async fn create_report(&self, report: &NewReport) -> StoreResult<StoreAck> {
        let mut form = Form::new()
            .text("address", report.address.clone())
            .text("comment", report.comment.clone())
            .part("photo", photo_part(report));
        if let Some(email) = &report.contact_email {
            form = form.text("email", email.clone());
        }
        if let Some(at) = report.coordinates {
            form = form
                .text("lat", at.lat.to_string())
                .text("lng", at.lng.to_string());
        }

        self.send(self.client.post(self.url("/api/reports")).multipart(form))
            .await
    }

    async fn list_reports(&self, filter: StatusFilter) -> StoreResult<Vec<Report>> {
        let mut request = self.client.get(self.url("/api/reports"));
        if let Some(status) = filter.as_query_value() {
            request = request.query(&[("status", status)]);
        }
        self.send(request).await
    }

    async fn get_report(&self, id: &ReportId) -> StoreResult<Report> {
        self.send(self.client.get(self.url(&format!("/api/reports/{}", id))))
            .await
    }

    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StoreResult<StoreAck> {
        let request = self
            .client
            .put(self.url(&format!("/api/reports/{}/status", id)))
            .json(update);
        self.send(self.authorized(request)).await
    }

    async fn statistics(&self) -> StoreResult<Statistics> {
        let request = self.client.get(self.url("/api/statistics"));
        self.send(self.authorized(request)).await
    }
}
