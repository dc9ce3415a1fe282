pub mod backend;

pub use backend::BackendClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Holdings, ModelType, SectorAggregate};

/// Aggregation response: per-sector totals plus the sectors the service
/// itself flags as over-concentrated.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub sectors: Vec<SectorAggregate>,
    pub concentrated_sectors: Vec<String>,
    /// 0..=1 as reported by the service; informational only, the pipeline
    /// does not act on it.
    #[serde(default)]
    pub diversification_score: Option<f64>,
}

/// One advisory recommendation as it arrives. `action` is free text here;
/// the normalizer validates it, not the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecommendation {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    pub action: String,
    pub amount: f64,
    pub reasoning: String,
    #[serde(default)]
    pub ai_generated: Option<bool>,
}

/// The two remote collaborators the pipeline trusts: sector aggregation and
/// advisory recommendations. These calls are the session's only suspension
/// points.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    /// Upload the raw holdings file and get per-sector aggregates back.
    async fn aggregate(&self, file_name: &str, raw_csv: &str) -> Result<PortfolioSnapshot>;

    /// Request rebalancing recommendations against the given target model.
    async fn recommend(
        &self,
        model: ModelType,
        holdings: &Holdings,
    ) -> Result<Vec<RawRecommendation>>;
}
