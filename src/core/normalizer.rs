use crate::error::AnalysisError;
use crate::models::{RebalanceSuggestion, TradeAction};
use crate::remote::RawRecommendation;

/// Map raw advisory-service records into the single display schema.
///
/// Renames `reasoning` to `reason` and defaults a missing `ai_generated`
/// flag to false. Amounts are stored as magnitudes; direction lives in the
/// action, so a negative amount from a misbehaving source is folded with
/// `abs()`. An unrecognized action fails the whole batch: a partially
/// normalized suggestion list would mislead a user making money decisions.
/// An empty input is the "already balanced" state, not an error.
pub fn normalize(raw: &[RawRecommendation]) -> Result<Vec<RebalanceSuggestion>, AnalysisError> {
    raw.iter()
        .map(|rec| {
            let action = TradeAction::from_str_loose(&rec.action).ok_or_else(|| {
                AnalysisError::Schema(format!(
                    "unrecognized recommendation action '{}' (expected buy, sell or hold)",
                    rec.action
                ))
            })?;

            Ok(RebalanceSuggestion {
                ticker: rec.ticker.clone(),
                sector: rec.sector.clone(),
                action,
                amount: rec.amount.abs(),
                reason: rec.reasoning.clone(),
                ai_generated: rec.ai_generated.unwrap_or(false),
            })
        })
        .collect()
}
