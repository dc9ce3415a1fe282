pub mod allocation;
pub mod holding;
pub mod model_type;
pub mod report;
pub mod suggestion;

pub use allocation::{
    ConcentrationWarning, SectorAggregate, SectorAllocation, Severity, WarningKind,
};
pub use holding::{Holding, Holdings};
pub use model_type::ModelType;
pub use report::AnalysisResult;
pub use suggestion::{RebalanceSuggestion, TradeAction};
