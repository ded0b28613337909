//! Typed HTTP clients for the storefront backend
//!
//! Two client types enforce the authentication requirement at compile time:
//! [`PublicShopClient`] for the unauthenticated surface (login, registration,
//! OTP, token refresh, logout, face-shape detection) and
//! [`AuthenticatedShopClient`], which decorates every request with a bearer
//! token.

mod account;
mod auth;
mod detect;

use crate::config::ShopConfig;
use crate::error::{server_message, ClientError};
use reqwest::{header, Client, ClientBuilder};
use std::time::Duration;

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicShopClient {
    client: Client,
    base_url: String,
}

/// Client for authenticated endpoints that require a valid access token
#[derive(Clone)]
pub struct AuthenticatedShopClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl PublicShopClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new().base_url(base_url).build_public()
    }

    /// Create a public client from configuration.
    pub fn from_config(config: &ShopConfig) -> Result<Self, ClientError> {
        TypedClientBuilder::from_config(config).build_public()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        execute(request).await
    }

    /// Upgrade to an authenticated client carrying the given access token
    pub fn authenticate(self, access_token: impl Into<String>) -> AuthenticatedShopClient {
        AuthenticatedShopClient {
            client: self.client,
            base_url: self.base_url,
            access_token: access_token.into(),
        }
    }
}

impl AuthenticatedShopClient {
    /// Create a new authenticated client
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(PublicShopClient::new(base_url)?.authenticate(access_token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder with the bearer token attached
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url).header(
            header::AUTHORIZATION,
            format!("Bearer {}", self.access_token),
        )
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        execute(request).await
    }

    /// Create a public client sharing the same connection pool
    pub fn to_public(&self) -> PublicShopClient {
        PublicShopClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

async fn execute<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let fallback = status.to_string();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_status(
            status,
            server_message(&body, &fallback),
        ))
    }
}

/// Type-safe builder that creates the appropriate client type
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Builder pre-populated from configuration
    pub fn from_config(config: &ShopConfig) -> Self {
        Self::new()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicShopClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = ClientBuilder::new().user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("optishop-client/", env!("CARGO_PKG_VERSION")).into()),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(PublicShopClient { client, base_url })
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        access_token: impl Into<String>,
    ) -> Result<AuthenticatedShopClient, ClientError> {
        Ok(self.build_public()?.authenticate(access_token))
    }
}

impl Default for TypedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
