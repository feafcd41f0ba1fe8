use ce_causal::{causal_power, coarse_grain_tpm, partition_cp, CausalProfile};
use ce_core::{Partition, Tpm};
use proptest::prelude::*;

fn two_three_cycles(p_self: f64) -> Tpm {
    let n = 6;
    let mut data = vec![0.0; n * n];
    for cycle_start in [0usize, 3] {
        for offset in 0..3 {
            let state = cycle_start + offset;
            let next = cycle_start + (offset + 1) % 3;
            data[state * n + state] = p_self;
            data[state * n + next] = 1.0 - p_self;
        }
    }
    Tpm::from_row_major(n, data).unwrap()
}

fn random_stochastic(n: usize, weights: &[f64]) -> Tpm {
    let mut data = Vec::with_capacity(n * n);
    for row in weights.chunks(n).take(n) {
        let total: f64 = row.iter().sum();
        data.extend(row.iter().map(|w| w / total));
    }
    Tpm::from_row_major(n, data).unwrap()
}

#[test]
fn two_cycle_micro_and_macro_scores() {
    let tpm = two_three_cycles(0.2);
    let micro = CausalProfile::of(&tpm);
    assert!((micro.causal_power - 0.7207).abs() < 0.01, "{micro:?}");
    assert!(micro.degeneracy.abs() < 1e-12);

    let halves = Partition::from_blocks(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
    let macro_cp = partition_cp(&tpm, &halves).unwrap();
    assert!((macro_cp - 1.0).abs() < 1e-3);
    assert!((macro_cp - micro.causal_power - 0.279).abs() < 0.01);
}

#[test]
fn microscale_coarse_graining_is_identity() {
    let tpm = two_three_cycles(0.35);
    let coarse = coarse_grain_tpm(&tpm, &Partition::microscale(6)).unwrap();
    assert!(coarse.max_abs_diff(&tpm).unwrap() < 1e-12);
}

#[test]
fn macroscale_collapses_to_single_state() {
    let tpm = two_three_cycles(0.1);
    let coarse = coarse_grain_tpm(&tpm, &Partition::macroscale(6)).unwrap();
    assert_eq!(coarse.n(), 1);
    assert!((coarse.get(0, 0) - 1.0).abs() < 1e-12);
    assert_eq!(causal_power(&coarse), 0.0);
}

#[test]
fn size_mismatch_is_reported() {
    let tpm = two_three_cycles(0.2);
    let err = coarse_grain_tpm(&tpm, &Partition::microscale(4)).unwrap_err();
    assert_eq!(err.code(), "partition-size-mismatch");
}

#[test]
fn equal_partitions_give_equal_matrices() {
    let tpm = two_three_cycles(0.3);
    let a = Partition::from_blocks(vec![vec![5, 0], vec![1, 2, 3, 4]]).unwrap();
    let b = Partition::from_blocks(vec![vec![4, 3, 2, 1], vec![0, 5]]).unwrap();
    assert_eq!(coarse_grain_tpm(&tpm, &a).unwrap(), coarse_grain_tpm(&tpm, &b).unwrap());
}

#[test]
fn causal_profile_serialises_by_field_name() {
    let tpm = two_three_cycles(0.2);
    let halves = Partition::from_blocks(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
    let profile = CausalProfile::of_partition(&tpm, &halves).unwrap();
    let json = serde_json::to_value(profile).unwrap();
    for key in ["determinism", "degeneracy", "specificity", "causal_power"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    let restored: CausalProfile = serde_json::from_value(json).unwrap();
    assert_eq!(restored, profile);
}

proptest! {
    #[test]
    fn coarse_graining_stays_row_stochastic(
        weights in prop::collection::vec(0.01f64..1.0, 25),
        labels in prop::collection::vec(0usize..3, 5),
    ) {
        let tpm = random_stochastic(5, &weights);
        let mut groups: std::collections::BTreeMap<usize, Vec<usize>> = Default::default();
        for (state, label) in labels.iter().enumerate() {
            groups.entry(*label).or_default().push(state);
        }
        let partition = Partition::from_blocks(groups.into_values().collect()).unwrap();
        let coarse = coarse_grain_tpm(&tpm, &partition).unwrap();
        prop_assert_eq!(coarse.n(), partition.len());
        for row in coarse.rows() {
            let sum: f64 = row.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
        let profile = CausalProfile::of(&coarse);
        prop_assert!(profile.determinism >= -1e-9 && profile.determinism <= 1.0 + 1e-9);
        prop_assert!(profile.degeneracy >= -1e-9 && profile.degeneracy <= 1.0 + 1e-9);
    }
}
