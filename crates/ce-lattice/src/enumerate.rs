use std::collections::BTreeSet;

use ce_core::Partition;
use tracing::debug;

/// Enumerates every partition of `{0, …, n-1}` in canonical sorted order.
///
/// Partitions of the first `k` states are extended by placing state `k` into
/// each existing block and into a new singleton block. The result has exactly
/// `bell_number(n)` entries; `n == 0` yields the single empty partition.
/// Only tractable for small `n` (roughly `n <= 10`).
pub fn generate_all_partitions(n: usize) -> Vec<Partition> {
    let mut layer: Vec<Vec<Vec<usize>>> = vec![Vec::new()];
    for state in 0..n {
        let mut next = Vec::with_capacity(layer.len() * (state + 1));
        for blocks in &layer {
            for idx in 0..blocks.len() {
                let mut extended = blocks.clone();
                extended[idx].push(state);
                next.push(extended);
            }
            let mut extended = blocks.clone();
            extended.push(vec![state]);
            next.push(extended);
        }
        layer = next;
    }

    let unique: BTreeSet<Partition> = layer
        .into_iter()
        .filter_map(|blocks| Partition::from_blocks(blocks).ok())
        .collect();
    debug!(n, count = unique.len(), "enumerated partition lattice");
    unique.into_iter().collect()
}

/// Number of partitions of an `n`-element set, or `None` on `u128` overflow.
pub fn bell_number(n: usize) -> Option<u128> {
    // Bell triangle: each row starts with the last entry of the previous row.
    let mut row: Vec<u128> = vec![1];
    for _ in 0..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(*row.last()?);
        for value in &row {
            let prev = *next.last()?;
            next.push(prev.checked_add(*value)?);
        }
        row = next;
    }
    row.first().copied()
}
