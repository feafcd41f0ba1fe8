#![allow(dead_code)]

use ce_core::{Partition, Tpm};

/// Disjoint cycles, each state moving to its successor with `1 - p_self`
/// and staying with `p_self`.
pub fn cycles(lengths: &[usize], p_self: f64) -> Tpm {
    let n: usize = lengths.iter().sum();
    let mut data = vec![0.0; n * n];
    let mut start = 0;
    for &len in lengths {
        for offset in 0..len {
            let state = start + offset;
            let next = start + (offset + 1) % len;
            data[state * n + state] += p_self;
            data[state * n + next] += 1.0 - p_self;
        }
        start += len;
    }
    Tpm::from_row_major(n, data).unwrap()
}

pub fn blocks(blocks: &[&[usize]]) -> Partition {
    Partition::from_blocks(blocks.iter().map(|b| b.to_vec()).collect()).unwrap()
}

/// Row-normalises positive weights into an `n x n` matrix.
pub fn from_weights(n: usize, weights: &[f64]) -> Tpm {
    let mut data = Vec::with_capacity(n * n);
    for row in weights.chunks(n).take(n) {
        let total: f64 = row.iter().sum();
        data.extend(row.iter().map(|w| w / total));
    }
    Tpm::from_row_major(n, data).unwrap()
}
