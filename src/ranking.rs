/// Top-N symbols by executed volume

use crate::protocol::Symbol;

/// Rank `(symbol, volume)` pairs by volume descending, keeping the first `count`.
///
/// Equal volumes are ordered by symbol ascending, so the result does not depend
/// on the order of the input.
pub fn top_performers(snapshot: &[(Symbol, u64)], count: usize) -> Vec<(Symbol, u64)> {
    let mut ranked = snapshot.to_vec();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(count);
    ranked
}
