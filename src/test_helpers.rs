use crate::config::Config;
use crate::models::{Holding, Holdings, ModelType, SectorAggregate};
use crate::remote::RawRecommendation;

/// Holdings from (ticker, shares, purchase_price) tuples.
pub fn make_holdings(data: &[(&str, f64, f64)]) -> Holdings {
    let holdings: Vec<Holding> = data
        .iter()
        .map(|&(ticker, shares, purchase_price)| Holding {
            ticker: ticker.to_string(),
            shares,
            purchase_price,
        })
        .collect();

    Holdings::new(holdings)
}

/// Aggregates from (sector, amount, percentage) tuples.
pub fn make_aggregates(data: &[(&str, f64, f64)]) -> Vec<SectorAggregate> {
    data.iter()
        .map(|&(sector, amount, percentage)| SectorAggregate {
            sector: sector.to_string(),
            amount,
            percentage,
        })
        .collect()
}

/// A raw advisory record with no AI flag set.
pub fn make_recommendation(
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

/// A three-row holdings file in the accepted format.
pub fn sample_csv() -> &'static str {
    "ticker,shares,purchase_price\nAAPL,100,150.00\nMSFT,50,280.00\nSPY,20,400.00"
}

/// A Config suitable for testing — local backend, no token, short timeout.
pub fn default_test_config() -> Config {
    Config {
        backend_url: "http://localhost:8200".to_string(),
        api_token: String::new(),
        request_timeout_secs: 5,
        max_upload_bytes: 1024 * 1024,
        default_model: ModelType::Balanced,
        log_level: "ERROR".to_string(),
    }
}
