use crate::core::targets::TargetModel;
use crate::models::{SectorAggregate, SectorAllocation};

/// Merge remote per-sector aggregates with a target model, order-preserving.
///
/// One output record per input aggregate. Sectors the model does not list
/// target 0. The differ never invents sectors the service did not report,
/// so a sector with zero current value only appears if the service sent it.
pub fn diff(aggregates: &[SectorAggregate], model: &TargetModel) -> Vec<SectorAllocation> {
    aggregates
        .iter()
        .map(|agg| {
            let target_percent = model.target_percent(&agg.sector);
            SectorAllocation {
                sector: agg.sector.clone(),
                current_value: agg.amount,
                current_percent: agg.percentage,
                target_percent,
                difference: agg.percentage - target_percent,
            }
        })
        .collect()
}
