use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::models::{Holding, Holdings, ModelType};
use crate::remote::{PortfolioBackend, PortfolioSnapshot, RawRecommendation};

#[derive(Debug, Serialize)]
struct RebalanceRequest<'a> {
    holdings: &'a [Holding],
}

#[derive(Debug, Deserialize)]
struct RebalanceResponse {
    recommendations: Vec<RawRecommendation>,
}

/// HTTP client for the aggregation/advisory backend. Stateless apart from
/// connection pooling; auth is a preconfigured bearer token.
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_token: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: cfg.backend_url.trim_end_matches('/').to_string(),
            api_token: cfg.api_token.clone(),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        if self.api_token.is_empty() {
            req
        } else {
            req.header("Authorization", format!("Bearer {}", self.api_token))
        }
    }
}

#[async_trait]
impl PortfolioBackend for BackendClient {
    async fn aggregate(&self, file_name: &str, raw_csv: &str) -> Result<PortfolioSnapshot> {
        let part = Part::text(raw_csv.to_string())
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .context("Failed to build upload part")?;
        let form = Form::new().part("file", part);

        let req = self
            .client
            .post(format!("{}/portfolio/upload", self.base_url))
            .timeout(self.timeout)
            .multipart(form);

        let resp = self
            .authorize(req)
            .send()
            .await
            .context("Failed to reach aggregation service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Aggregation service error {}: {}", status, body);
        }

        resp.json()
            .await
            .context("Failed to parse aggregation response")
    }

    async fn recommend(
        &self,
        model: ModelType,
        holdings: &Holdings,
    ) -> Result<Vec<RawRecommendation>> {
        let req = self
            .client
            .post(format!("{}/portfolio/rebalance", self.base_url))
            .timeout(self.timeout)
            .query(&[("model_type", model.as_str())])
            .json(&RebalanceRequest {
                holdings: holdings.as_slice(),
            });

        let resp = self
            .authorize(req)
            .send()
            .await
            .context("Failed to reach advisory service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Advisory service error {}: {}", status, body);
        }

        let data: RebalanceResponse = resp
            .json()
            .await
            .context("Failed to parse advisory response")?;

        Ok(data.recommendations)
    }
}
