use std::collections::HashMap;

use crate::models::ModelType;

/// A named reference allocation (sector -> weight percent) used as a
/// rebalancing benchmark. Weights need not sum to exactly 100; any sector
/// missing from the table targets 0.
#[derive(Debug, Clone)]
pub struct TargetModel {
    pub model_type: ModelType,
    pub weights: HashMap<String, f64>,
}

impl TargetModel {
    pub fn target_percent(&self, sector: &str) -> f64 {
        self.weights.get(sector).copied().unwrap_or(0.0)
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }
}

/// Immutable catalogue of the shipped allocation models. Lookup is total:
/// one entry exists per `ModelType` variant, so there is no failure mode.
#[derive(Debug, Clone)]
pub struct TargetModelRegistry {
    conservative: TargetModel,
    balanced: TargetModel,
    growth: TargetModel,
}

fn weights(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|&(s, w)| (s.to_string(), w)).collect()
}

impl TargetModelRegistry {
    pub fn builtin() -> Self {
        let conservative = TargetModel {
            model_type: ModelType::Conservative,
            weights: weights(&[
                ("Technology", 10.0),
                ("Healthcare", 15.0),
                ("Financial Services", 10.0),
                ("Consumer Cyclical", 5.0),
                ("Industrials", 10.0),
                ("Communication Services", 5.0),
                ("Consumer Defensive", 15.0),
                ("Energy", 5.0),
                ("Real Estate", 10.0),
                ("Utilities", 10.0),
                ("Basic Materials", 5.0),
            ]),
        };

        let balanced = TargetModel {
            model_type: ModelType::Balanced,
            weights: weights(&[
                ("Technology", 25.0),
                ("Healthcare", 15.0),
                ("Financial Services", 15.0),
                ("Consumer Cyclical", 15.0),
                ("Industrials", 10.0),
                ("Communication Services", 10.0),
                ("Consumer Defensive", 5.0),
                ("Energy", 5.0),
                ("Real Estate", 0.0),
                ("Utilities", 0.0),
                ("Basic Materials", 0.0),
            ]),
        };

        let growth = TargetModel {
            model_type: ModelType::Growth,
            weights: weights(&[
                ("Technology", 40.0),
                ("Consumer Cyclical", 20.0),
                ("Healthcare", 15.0),
                ("Communication Services", 15.0),
                ("Financial Services", 10.0),
            ]),
        };

        Self {
            conservative,
            balanced,
            growth,
        }
    }

    pub fn get(&self, model: ModelType) -> &TargetModel {
        match model {
            ModelType::Conservative => &self.conservative,
            ModelType::Balanced => &self.balanced,
            ModelType::Growth => &self.growth,
        }
    }
}

impl Default for TargetModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
