use serde::{Deserialize, Serialize};

use crate::models::{ConcentrationWarning, RebalanceSuggestion, SectorAllocation};

/// The single per-session analysis result. Replaced wholesale on a new
/// upload; `suggestions` is the only field that is ever updated in place.
/// Field names are pinned to the export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_value: f64,
    pub sectors: Vec<SectorAllocation>,
    pub warnings: Vec<ConcentrationWarning>,
    pub suggestions: Vec<RebalanceSuggestion>,
}

impl AnalysisResult {
    /// The downloadable artifact: indented JSON, lossless for this schema.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<AnalysisResult> {
        serde_json::from_str(s)
    }
}
