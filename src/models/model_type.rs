use serde::{Deserialize, Serialize};
use std::fmt;

/// Named reference allocation a portfolio is rebalanced toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Conservative,
    Balanced,
    Growth,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Conservative => "conservative",
            ModelType::Balanced => "balanced",
            ModelType::Growth => "growth",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<ModelType> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Some(ModelType::Conservative),
            "balanced" => Some(ModelType::Balanced),
            "growth" => Some(ModelType::Growth),
            _ => None,
        }
    }

    pub fn all() -> [ModelType; 3] {
        [
            ModelType::Conservative,
            ModelType::Balanced,
            ModelType::Growth,
        ]
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
