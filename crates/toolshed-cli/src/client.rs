//! HTTP client for a running Toolshed API

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use toolshed_core::{Category, Host, Testimonial, Workshop};

/// Non-success response from the API
#[derive(Debug, Error)]
#[error("{message} (HTTP {status})")]
pub struct ApiFailure {
    /// Response status
    pub status: StatusCode,
    /// `message` from the error body, or the status reason
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed wrapper over the REST endpoints
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the API rooted at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("toolshed-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "calling API");

        let response = self
            .http
            .request(method, &url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ApiFailure { status, message }.into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Unexpected response body from {url}"))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::GET, path, &[]).await
    }

    /// `GET /api/categories`
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.get("/api/categories").await
    }

    /// `GET /api/categories/:id`
    pub async fn category(&self, id: i32) -> Result<Category> {
        self.get(&format!("/api/categories/{id}")).await
    }

    /// `GET /api/categories/:id/workshops`
    pub async fn category_workshops(&self, id: i32) -> Result<Vec<Workshop>> {
        self.get(&format!("/api/categories/{id}/workshops")).await
    }

    /// `GET /api/workshops`, optionally searching
    pub async fn workshops(&self, q: Option<&str>, category_id: Option<i32>) -> Result<Vec<Workshop>> {
        let mut query = Vec::new();
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        if let Some(id) = category_id {
            query.push(("categoryId", id.to_string()));
        }
        self.call(Method::GET, "/api/workshops", &query).await
    }

    /// `GET /api/workshops/featured`
    pub async fn featured_workshops(&self) -> Result<Vec<Workshop>> {
        self.get("/api/workshops/featured").await
    }

    /// `GET /api/workshops/weekend`
    pub async fn weekend_workshops(&self) -> Result<Vec<Workshop>> {
        self.get("/api/workshops/weekend").await
    }

    /// `GET /api/workshops/:id`
    pub async fn workshop(&self, id: i32) -> Result<Workshop> {
        self.get(&format!("/api/workshops/{id}")).await
    }

    /// `POST /api/workshops/:id/book`
    pub async fn book(&self, id: i32) -> Result<Workshop> {
        self.call(Method::POST, &format!("/api/workshops/{id}/book"), &[])
            .await
    }

    /// `GET /api/hosts`
    pub async fn hosts(&self) -> Result<Vec<Host>> {
        self.get("/api/hosts").await
    }

    /// `GET /api/hosts/:id`
    pub async fn host(&self, id: i32) -> Result<Host> {
        self.get(&format!("/api/hosts/{id}")).await
    }

    /// `GET /api/testimonials`
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        self.get("/api/testimonials").await
    }
}

/// Status of an API failure buried in an `anyhow` chain
pub fn failure_status(err: &anyhow::Error) -> Option<StatusCode> {
    err.downcast_ref::<ApiFailure>().map(|f| f.status)
}
