use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Seam between the resolver and the REST backend. Production traffic goes
/// through [`HttpBackend`]; tests script responses behind this trait.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn get_json(&self, path: &str, token: Option<&str>) -> Result<Value>;
}

/// reqwest-backed client pinned to one backend origin.
///
/// Every request carries `Authorization: Bearer <token>`, with an empty token
/// when none was supplied. No retries and no explicit timeout are configured;
/// a hung backend is governed by the client defaults.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn get_json(&self, path: &str, token: Option<&str>) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token.unwrap_or_default()),
            )
            .send()
            .await
            .with_context(|| format!("request to `{url}` failed"))?
            .error_for_status()
            .with_context(|| format!("backend rejected GET {path}"))?;

        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("backend returned invalid JSON for GET {path}"))?;
        Ok(body)
    }
}
