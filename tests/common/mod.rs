use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rebalance_advisor::config::Config;
use rebalance_advisor::models::{Holdings, ModelType, SectorAggregate};
use rebalance_advisor::remote::{PortfolioBackend, PortfolioSnapshot, RawRecommendation};

/// A three-row holdings file in the accepted format.
pub fn sample_csv() -> &'static str {
    "ticker,shares,purchase_price\nAAPL,100,150.00\nMSFT,50,280.00\nXOM,40,100.00"
}

pub fn test_config() -> Config {
    Config {
        backend_url: "http://localhost:8200".to_string(),
        api_token: String::new(),
        request_timeout_secs: 5,
        max_upload_bytes: 1024 * 1024,
        default_model: ModelType::Balanced,
        log_level: "ERROR".to_string(),
    }
}

/// Canned aggregation/advisory backend: a 60/40 Technology/Energy portfolio
/// with Technology flagged as over-concentrated. All knobs are shared, so a
/// test can keep handles and reconfigure the backend after it is boxed into
/// a session.
pub struct MockBackend {
    pub fail_aggregate: Arc<AtomicBool>,
    pub fail_recommend: Arc<AtomicBool>,
    pub recommendations: Arc<Mutex<Vec<RawRecommendation>>>,
    pub aggregate_calls: Arc<AtomicUsize>,
    pub recommend_calls: Arc<AtomicUsize>,
    pub last_model: Arc<Mutex<Option<ModelType>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            fail_aggregate: Arc::new(AtomicBool::new(false)),
            fail_recommend: Arc::new(AtomicBool::new(false)),
            recommendations: Arc::new(Mutex::new(Vec::new())),
            aggregate_calls: Arc::new(AtomicUsize::new(0)),
            recommend_calls: Arc::new(AtomicUsize::new(0)),
            last_model: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_recommendations(recommendations: Vec<RawRecommendation>) -> Self {
        let backend = Self::new();
        *backend.recommendations.lock().unwrap() = recommendations;
        backend
    }

    /// Clones of every knob, for keeping after the backend is boxed.
    pub fn handles(&self) -> MockBackend {
        MockBackend {
            fail_aggregate: self.fail_aggregate.clone(),
            fail_recommend: self.fail_recommend.clone(),
            recommendations: self.recommendations.clone(),
            aggregate_calls: self.aggregate_calls.clone(),
            recommend_calls: self.recommend_calls.clone(),
            last_model: self.last_model.clone(),
        }
    }

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            total_value: 10_000.0,
            sectors: vec![
                SectorAggregate {
                    sector: "Technology".to_string(),
                    amount: 6000.0,
                    percentage: 60.0,
                },
                SectorAggregate {
                    sector: "Energy".to_string(),
                    amount: 4000.0,
                    percentage: 40.0,
                },
            ],
            concentrated_sectors: vec!["Technology".to_string()],
            diversification_score: Some(0.42),
        }
    }
}

#[async_trait]
impl PortfolioBackend for MockBackend {
    async fn aggregate(&self, _file_name: &str, _raw_csv: &str) -> Result<PortfolioSnapshot> {
        self.aggregate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_aggregate.load(Ordering::SeqCst) {
            anyhow::bail!("Aggregation service error 503 Service Unavailable: try again later");
        }
        Ok(Self::snapshot())
    }

    async fn recommend(
        &self,
        model: ModelType,
        _holdings: &Holdings,
    ) -> Result<Vec<RawRecommendation>> {
        self.recommend_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_model.lock().unwrap() = Some(model);
        if self.fail_recommend.load(Ordering::SeqCst) {
            anyhow::bail!("Advisory service error 401 Unauthorized: token expired");
        }
        Ok(self.recommendations.lock().unwrap().clone())
    }
}

/// A raw advisory record with no AI flag set.
pub fn raw_recommendation(
    ticker: &str,
    sector: &str,
    action: &str,
    amount: f64,
    reasoning: &str,
) -> RawRecommendation {
    RawRecommendation {
        ticker: Some(ticker.to_string()),
        sector: Some(sector.to_string()),
        action: action.to_string(),
        amount,
        reasoning: reasoning.to_string(),
        ai_generated: None,
    }
}
