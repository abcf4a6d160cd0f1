//! HTTP client for the login endpoints

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::LoginCategory;

use super::models::{Credentials, LoginResponse};

/// Server authentication API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit credentials to the endpoint of `category`.
    ///
    /// A refusal is an `Ok` response with `success == false`; `Err` means
    /// no parsable answer came back.
    async fn login(&self, category: LoginCategory, credentials: &Credentials)
        -> Result<LoginResponse>;
}

/// reqwest-backed [`AuthApi`]
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Config("api.base_url must not be empty".to_string()));
        }
        Self::new(&config.base_url, config.timeout())
    }

    /// Full URL of the endpoint for `category`
    pub fn endpoint_url(&self, category: LoginCategory) -> String {
        format!("{}{}", self.base_url, category.endpoint())
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn login(
        &self,
        category: LoginCategory,
        credentials: &Credentials,
    ) -> Result<LoginResponse> {
        let url = self.endpoint_url(category);
        tracing::debug!("POST {} as {}", url, credentials.username);

        let response = self.client.post(&url).json(credentials).send().await?;
        let status = response.status();

        // Refusals arrive as 4xx with the same JSON body, so the status
        // alone does not decide the outcome.
        let body = response.bytes().await?;
        let parsed: LoginResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Unparsable login response from {} ({}): {}", url, status, e);
            Error::Json(e)
        })?;

        tracing::debug!("Login response from {}: {} success={}", url, status, parsed.success);
        Ok(parsed)
    }
}
