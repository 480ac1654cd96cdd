/// Executed volume per symbol
///
/// Entries are kept in the order symbols were first credited.

use std::collections::HashMap;

use crate::protocol::Symbol;

#[derive(Debug, Clone, Default)]
pub struct VolumeAggregator {
    index: HashMap<Symbol, usize>,
    totals: Vec<(Symbol, u64)>,
}

impl VolumeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add shares to a symbol's running total, creating the entry at zero
    pub fn credit(&mut self, symbol: Symbol, shares: u32) {
        let slot = match self.index.get(&symbol) {
            Some(&i) => i,
            None => {
                self.totals.push((symbol, 0));
                self.index.insert(symbol, self.totals.len() - 1);
                self.totals.len() - 1
            }
        };
        self.totals[slot].1 += shares as u64;
    }

    /// Current totals in first-credit order
    pub fn snapshot(&self) -> &[(Symbol, u64)] {
        &self.totals
    }

    pub fn get(&self, symbol: &Symbol) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.totals[i].1)
    }

    /// Sum across all symbols
    pub fn total(&self) -> u64 {
        self.totals.iter().map(|&(_, v)| v).sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
