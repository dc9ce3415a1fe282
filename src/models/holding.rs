use serde::{Deserialize, Serialize};

/// One portfolio position as parsed from an uploaded file. Tickers are
/// upper-cased on ingestion; shares and purchase price are strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub shares: f64,
    pub purchase_price: f64,
}

impl Holding {
    pub fn cost_basis(&self) -> f64 {
        self.shares * self.purchase_price
    }
}

/// Wraps Vec<Holding> with the helpers the pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Holdings {
    holdings: Vec<Holding>,
}

impl Holdings {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Holding> {
        self.holdings.get(index)
    }

    pub fn first(&self) -> Option<&Holding> {
        self.holdings.first()
    }

    pub fn last(&self) -> Option<&Holding> {
        self.holdings.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn as_slice(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn push(&mut self, holding: Holding) {
        self.holdings.push(holding);
    }

    /// Total purchase cost across all positions.
    pub fn cost_basis(&self) -> f64 {
        self.holdings.iter().map(|h| h.cost_basis()).sum()
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.ticker.as_str()).collect()
    }

    pub fn contains_ticker(&self, ticker: &str) -> bool {
        self.holdings.iter().any(|h| h.ticker == ticker)
    }
}

impl std::ops::Index<usize> for Holdings {
    type Output = Holding;
    fn index(&self, index: usize) -> &Self::Output {
        &self.holdings[index]
    }
}

impl IntoIterator for Holdings {
    type Item = Holding;
    type IntoIter = std::vec::IntoIter<Holding>;
    fn into_iter(self) -> Self::IntoIter {
        self.holdings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Holdings {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;
    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
