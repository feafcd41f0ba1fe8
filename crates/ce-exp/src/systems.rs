use ce_core::errors::{CeError, ErrorInfo};
use ce_core::{Partition, RngHandle, Tpm};
use rand::Rng;

fn check_probability(name: &str, value: f64) -> Result<(), CeError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CeError::Tpm(
            ErrorInfo::new("tpm-parameter", "probability parameter must lie in [0, 1]")
                .with_context(name, value),
        ));
    }
    Ok(())
}

fn check_lengths(lengths: &[usize]) -> Result<(), CeError> {
    if lengths.is_empty() || lengths.contains(&0) {
        return Err(CeError::Tpm(
            ErrorInfo::new("tpm-parameter", "cycle lengths must be non-empty and positive")
                .with_context("lengths", format!("{lengths:?}")),
        ));
    }
    Ok(())
}

/// Disjoint cycles laid out consecutively: state `s` of a cycle stays put with
/// probability `p_self` and advances to its successor with `1 - p_self`.
///
/// A cycle of length one is an absorbing state.
pub fn cycles_tpm(lengths: &[usize], p_self: f64) -> Result<Tpm, CeError> {
    check_lengths(lengths)?;
    check_probability("p_self", p_self)?;
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
    Tpm::from_row_major(n, data)
}

/// Two equal cycles of `cycle_len` states each.
pub fn two_cycle_tpm(cycle_len: usize, p_self: f64) -> Result<Tpm, CeError> {
    cycles_tpm(&[cycle_len, cycle_len], p_self)
}

/// Partition grouping the states of each cycle laid out by [`cycles_tpm`].
pub fn cycle_partition(lengths: &[usize]) -> Result<Partition, CeError> {
    check_lengths(lengths)?;
    let mut blocks = Vec::with_capacity(lengths.len());
    let mut start = 0;
    for &len in lengths {
        blocks.push((start..start + len).collect());
        start += len;
    }
    Partition::from_blocks(blocks)
}

/// Every row uniform over all `n` states.
pub fn uniform_tpm(n: usize) -> Result<Tpm, CeError> {
    let value = if n == 0 { 0.0 } else { 1.0 / n as f64 };
    Tpm::from_row_major(n, vec![value; n * n])
}

/// Deterministic dynamics sending state `i` to `targets[i]`.
pub fn permutation_tpm(targets: &[usize]) -> Result<Tpm, CeError> {
    let n = targets.len();
    let mut data = vec![0.0; n * n];
    for (state, &target) in targets.iter().enumerate() {
        if target >= n {
            return Err(CeError::Tpm(
                ErrorInfo::new("tpm-parameter", "target state out of range")
                    .with_context("state", state)
                    .with_context("target", target),
            ));
        }
        data[state * n + target] = 1.0;
    }
    Tpm::from_row_major(n, data)
}

/// Dense random matrix with strictly positive entries, reproducible from the
/// seed of `rng`.
pub fn random_tpm(n: usize, rng: &mut RngHandle) -> Result<Tpm, CeError> {
    let mut data = Vec::with_capacity(n * n);
    for _ in 0..n {
        let row: Vec<f64> = (0..n).map(|_| rng.gen_range(1e-3..1.0)).collect();
        let total: f64 = row.iter().sum();
        data.extend(row.into_iter().map(|value| value / total));
    }
    Tpm::from_row_major(n, data)
}
