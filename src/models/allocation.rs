use serde::{Deserialize, Serialize};
use std::fmt;

/// One sector's externally computed totals, as reported by the aggregation
/// service. The set of sectors is whatever the service reports; it is not
/// constrained to the names a target model lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub sector: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Current vs. target allocation for one sector. Field names are pinned to
/// the export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    pub current_value: f64,
    pub current_percent: f64,
    pub target_percent: f64,
    /// Signed: positive means overweight, negative underweight.
    pub difference: f64,
}

impl SectorAllocation {
    pub fn is_overweight(&self) -> bool {
        self.difference > 0.0
    }

    pub fn is_underweight(&self) -> bool {
        self.difference < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Sector,
    /// Reserved for position-level concentration checks; not produced by the
    /// current aggregation contract.
    SingleStock,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::Sector => write!(f, "sector"),
            WarningKind::SingleStock => write!(f, "single_stock"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
        }
    }
}

/// A rendered concentration flag. Always derived fresh from the current
/// aggregates, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_serializes_with_camel_case_names() {
        let alloc = SectorAllocation {
            sector: "Technology".to_string(),
            current_value: 6000.0,
            current_percent: 60.0,
            target_percent: 25.0,
            difference: 35.0,
        };
        let json = serde_json::to_value(&alloc).unwrap();
        assert_eq!(json["currentValue"], 6000.0);
        assert_eq!(json["currentPercent"], 60.0);
        assert_eq!(json["targetPercent"], 25.0);
        assert_eq!(json["difference"], 35.0);
    }

    #[test]
    fn warning_kind_serializes_as_type() {
        let warning = ConcentrationWarning {
            kind: WarningKind::SingleStock,
            message: "test".to_string(),
            severity: Severity::Medium,
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "single_stock");
        assert_eq!(json["severity"], "medium");
    }

    #[test]
    fn overweight_underweight() {
        let mut alloc = SectorAllocation {
            sector: "Energy".to_string(),
            current_value: 4000.0,
            current_percent: 40.0,
            target_percent: 5.0,
            difference: 35.0,
        };
        assert!(alloc.is_overweight());
        alloc.difference = -3.0;
        assert!(alloc.is_underweight());
    }
}
