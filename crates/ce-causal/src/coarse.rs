use ce_core::errors::{CeError, ErrorInfo};
use ce_core::{Partition, Tpm};

/// Aggregates `tpm` into one macrostate per block of `partition`.
///
/// Macro index `a` is the canonical position of the block in `partition`, so
/// equal partitions always yield identical matrices. Mass from micro pair
/// `(i, j)` is summed into the macro pair of their blocks and each macro row is
/// then normalised.
pub fn coarse_grain_tpm(tpm: &Tpm, partition: &Partition) -> Result<Tpm, CeError> {
    let n = tpm.n();
    if partition.num_states() != n {
        return Err(CeError::Partition(
            ErrorInfo::new(
                "partition-size-mismatch",
                "partition ground set must match the number of tpm states",
            )
            .with_context("tpm_states", n)
            .with_context("partition_states", partition.num_states()),
        ));
    }
    let k = partition.len();
    let lookup = partition.block_index_map();
    let mut macro_data = vec![0.0; k * k];
    for (i, row) in tpm.rows().enumerate() {
        let macro_row = lookup[i] * k;
        for (j, &value) in row.iter().enumerate() {
            macro_data[macro_row + lookup[j]] += value;
        }
    }
    for row in macro_data.chunks_exact_mut(k) {
        let total: f64 = row.iter().sum();
        if total > 0.0 {
            for value in row.iter_mut() {
                *value /= total;
            }
        }
    }
    Tpm::from_row_major(k, macro_data)
}
