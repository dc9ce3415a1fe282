use tracing::debug;

use crate::models::{ConcentrationWarning, SectorAggregate, Severity, WarningKind};

/// Render the aggregation service's over-concentration flags as warnings.
///
/// The 30% threshold is applied by the service, not recomputed here; this
/// only turns each flagged name into a displayable warning, in input order.
/// Position-level (`single_stock`) warnings are not part of the current
/// service contract, so only `sector` warnings are produced. An empty
/// output means "analyzed, nothing flagged" and is a valid result.
pub fn detect(
    aggregates: &[SectorAggregate],
    flagged_sectors: &[String],
) -> Vec<ConcentrationWarning> {
    flagged_sectors
        .iter()
        .map(|sector| {
            if let Some(agg) = aggregates.iter().find(|a| a.sector == *sector) {
                debug!("{} flagged at {:.1}% of portfolio", sector, agg.percentage);
            }
            ConcentrationWarning {
                kind: WarningKind::Sector,
                message: format!("{} sector is overconcentrated (>30% of portfolio)", sector),
                severity: Severity::High,
            }
        })
        .collect()
}
