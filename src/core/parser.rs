use tracing::warn;

use crate::error::AnalysisError;
use crate::models::{Holding, Holdings};

const TICKER_ALIASES: [&str; 2] = ["ticker", "symbol"];

/// What a parse produced: the holdings that survived, plus the 1-based data
/// row numbers that were dropped as malformed.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub holdings: Holdings,
    pub skipped_rows: Vec<usize>,
}

/// Parse delimited holdings text.
///
/// The first line is a header, matched case-insensitively after trimming
/// each field name. The ticker column is accepted as either `ticker` or
/// `symbol`; `shares` and `purchase_price` are required. A missing column
/// fails the whole parse with a schema error naming it.
///
/// Data rows that cannot form a valid holding (empty ticker, non-numeric or
/// non-positive shares/price, too few fields) are dropped silently rather
/// than failing the upload: lenient parsing that returns a usable partial
/// dataset is intentional here, not an oversight. Dropped rows are listed in
/// the report so callers can still surface them.
pub fn parse(raw: &str) -> Result<ParseReport, AnalysisError> {
    let mut lines = raw.trim().lines();
    let header = lines.next().unwrap_or("");
    let columns: Vec<String> = header
        .split(',')
        .map(|c| c.trim().to_lowercase())
        .collect();

    let ticker_idx = columns
        .iter()
        .position(|c| TICKER_ALIASES.contains(&c.as_str()));
    let shares_idx = columns.iter().position(|c| c == "shares");
    let price_idx = columns.iter().position(|c| c == "purchase_price");

    let (ticker_idx, shares_idx, price_idx) = match (ticker_idx, shares_idx, price_idx) {
        (Some(t), Some(s), Some(p)) => (t, s, p),
        _ => {
            let mut missing = Vec::new();
            if ticker_idx.is_none() {
                missing.push("ticker (or symbol)");
            }
            if shares_idx.is_none() {
                missing.push("shares");
            }
            if price_idx.is_none() {
                missing.push("purchase_price");
            }
            return Err(AnalysisError::Schema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }
    };

    let mut holdings = Holdings::default();
    let mut skipped_rows = Vec::new();

    for (i, line) in lines.enumerate() {
        let row = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let ticker = fields.get(ticker_idx).copied().unwrap_or("");
        let shares = fields
            .get(shares_idx)
            .and_then(|f| f.parse::<f64>().ok());
        let price = fields
            .get(price_idx)
            .and_then(|f| f.parse::<f64>().ok());

        let (shares, price) = match (shares, price) {
            (Some(s), Some(p)) if s.is_finite() && p.is_finite() && s > 0.0 && p > 0.0 => (s, p),
            _ => {
                skipped_rows.push(row);
                continue;
            }
        };

        if ticker.is_empty() {
            skipped_rows.push(row);
            continue;
        }

        holdings.push(Holding {
            ticker: ticker.to_uppercase(),
            shares,
            purchase_price: price,
        });
    }

    if !skipped_rows.is_empty() {
        warn!(
            "Dropped {} malformed row(s): {:?}",
            skipped_rows.len(),
            skipped_rows
        );
    }

    Ok(ParseReport {
        holdings,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_csv;

    #[test]
    fn parses_well_formed_file() {
        let report = parse(sample_csv()).unwrap();
        assert_eq!(report.holdings.len(), 3);
        assert!(report.skipped_rows.is_empty());
        assert_eq!(report.holdings[0].ticker, "AAPL");
        assert!((report.holdings[0].shares - 100.0).abs() < 1e-9);
        assert!((report.holdings[1].purchase_price - 280.0).abs() < 1e-9);
    }

    #[test]
    fn accepts_symbol_alias_and_mixed_case_header() {
        let report = parse("Symbol , SHARES , Purchase_Price\naapl,10,99.5").unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].ticker, "AAPL");
    }

    #[test]
    fn missing_column_is_fatal_and_names_the_column() {
        let err = parse("ticker,shares\nAAPL,100").unwrap_err();
        match err {
            AnalysisError::Schema(msg) => assert!(msg.contains("purchase_price")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_ticker_column_names_both_aliases() {
        let err = parse("shares,purchase_price\n100,150").unwrap_err();
        match err {
            AnalysisError::Schema(msg) => assert!(msg.contains("ticker (or symbol)")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let report =
            parse("ticker,shares,purchase_price\nAAPL,100,150\nMSFT,abc,280\nSPY,20,400")
                .unwrap();
        assert_eq!(report.holdings.len(), 2);
        assert_eq!(report.skipped_rows, vec![2]);
        assert_eq!(report.holdings.tickers(), vec!["AAPL", "SPY"]);
    }

    #[test]
    fn empty_ticker_and_nonpositive_values_are_skipped() {
        let report = parse(
            "ticker,shares,purchase_price\n,100,150\nAAPL,0,150\nMSFT,50,-1\nSPY,20,400",
        )
        .unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.skipped_rows, vec![1, 2, 3]);
        assert_eq!(report.holdings[0].ticker, "SPY");
    }

    #[test]
    fn short_rows_and_blank_lines() {
        let report = parse("ticker,shares,purchase_price\nAAPL,100\n\nSPY,20,400\n").unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.skipped_rows, vec![1]);
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let report = parse("ticker,shares,purchase_price\nAAPL,NaN,150\nSPY,inf,400").unwrap();
        assert!(report.holdings.is_empty());
        assert_eq!(report.skipped_rows, vec![1, 2]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "ticker,shares,purchase_price\nAAPL,100,150\nMSFT,bad,280\nSPY,20,400";
        let first = parse(text).unwrap();
        let second = parse(text).unwrap();
        assert_eq!(first.holdings, second.holdings);
        assert_eq!(first.skipped_rows, second.skipped_rows);
    }

    #[test]
    fn values_are_trimmed_and_tickers_uppercased() {
        let report = parse("ticker,shares,purchase_price\n  nvda , 5 , 700.25 ").unwrap();
        assert_eq!(report.holdings[0].ticker, "NVDA");
        assert!((report.holdings[0].purchase_price - 700.25).abs() < 1e-9);
    }
}
