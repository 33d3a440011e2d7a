//! Template store backed by a remote `formscan-api` server.

use async_trait::async_trait;
use formscan_core::error::{FormscanError, Result};
use formscan_core::models::{NewTemplate, Template, TemplateId, TemplateUpdate};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ports::TemplateStore;

/// HTTP implementation of TemplateStore
pub struct HttpTemplateStore {
    /// Base URL of the API server (e.g., "http://localhost:8000")
    base_url: String,

    /// HTTP client; configure timeouts on the client passed to `with_client`
    client: reqwest::Client,
}

impl HttpTemplateStore {
    /// Create a store talking to the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a store with a preconfigured client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/v1/templates", self.base_url)
    }

    fn item_url(&self, id: TemplateId) -> String {
        format!("{}/api/v1/templates/{}", self.base_url, id)
    }

    fn unreachable(&self, err: reqwest::Error) -> FormscanError {
        FormscanError::Storage(format!(
            "Failed to reach template server at {}: {}",
            self.base_url, err
        ))
    }
}

/// `error` value the server uses for geometry failures
const GEOMETRY_CATEGORY: &str = "Invalid geometry";

/// Error body returned by the API server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Turn a non-success response into the matching domain error
async fn error_from_response(response: Response, subject: &str) -> FormscanError {
    let status = response.status();
    let (category, reason) = match response.json::<ErrorBody>().await {
        Ok(body) => {
            let reason = body.details.unwrap_or_else(|| body.error.clone());
            (body.error, reason)
        }
        Err(_) => (String::new(), status.to_string()),
    };

    match status {
        StatusCode::NOT_FOUND => FormscanError::not_found(subject),
        StatusCode::BAD_REQUEST if category == GEOMETRY_CATEGORY => FormscanError::Geometry { reason },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            FormscanError::Validation { reason }
        }
        StatusCode::CONFLICT => FormscanError::SaveInProgress,
        _ => FormscanError::Storage(format!("Template server error ({}): {}", status, reason)),
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response, subject: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response, subject).await);
    }

    response.json::<T>().await.map_err(|e| {
        FormscanError::Serialization(format!("Failed to parse template server response: {}", e))
    })
}

#[async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn create(&self, template: NewTemplate) -> Result<Template> {
        // Reject locally before spending a round trip
        let template = template.validated()?;

        tracing::debug!(name = %template.name, url = %self.collection_url(), "Creating template");
        let response = self
            .client
            .post(self.collection_url())
            .json(&template)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        parse_json(response, &template.name).await
    }

    async fn list(&self) -> Result<Vec<Template>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        parse_json(response, "templates").await
    }

    async fn get(&self, id: TemplateId) -> Result<Template> {
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        parse_json(response, &id.to_string()).await
    }

    async fn update(&self, id: TemplateId, update: TemplateUpdate) -> Result<Template> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&update)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        parse_json(response, &id.to_string()).await
    }

    async fn delete(&self, id: TemplateId) -> Result<()> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &id.to_string()).await);
        }
        Ok(())
    }
}
