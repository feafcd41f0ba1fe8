use ce_core::Tpm;

/// Shannon entropy in bits; zero-probability terms contribute nothing.
pub(crate) fn entropy_bits<'a>(probabilities: impl IntoIterator<Item = &'a f64>) -> f64 {
    probabilities
        .into_iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Determinism `1 - H(E|C) / log2(n)` under a uniform prior over causes.
///
/// A single-state system is fully deterministic.
pub fn determinism(tpm: &Tpm) -> f64 {
    let n = tpm.n();
    if n == 1 {
        return 1.0;
    }
    let conditional: f64 = tpm.rows().map(|row| entropy_bits(row)).sum::<f64>() / n as f64;
    1.0 - conditional / (n as f64).log2()
}

/// Degeneracy `1 - H(E) / log2(n)`, where `E` is the column-mean effect distribution.
///
/// A single-state system is fully degenerate.
pub fn degeneracy(tpm: &Tpm) -> f64 {
    let n = tpm.n();
    if n == 1 {
        return 1.0;
    }
    let mut effect = vec![0.0; n];
    for row in tpm.rows() {
        for (acc, value) in effect.iter_mut().zip(row) {
            *acc += value;
        }
    }
    for value in &mut effect {
        *value /= n as f64;
    }
    1.0 - entropy_bits(&effect) / (n as f64).log2()
}

/// Causal power `determinism + (1 - degeneracy) - 1`.
pub fn causal_power(tpm: &Tpm) -> f64 {
    let specificity = 1.0 - degeneracy(tpm);
    determinism(tpm) + specificity - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_skips_zero_terms() {
        assert_eq!(entropy_bits(&[1.0, 0.0, 0.0]), 0.0);
        assert!((entropy_bits(&[0.5, 0.5]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_state_is_guarded() {
        let tpm = Tpm::identity(1).unwrap();
        assert_eq!(determinism(&tpm), 1.0);
        assert_eq!(degeneracy(&tpm), 1.0);
        assert_eq!(causal_power(&tpm), 0.0);
    }

    #[test]
    fn permutation_has_full_causal_power() {
        let tpm = Tpm::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap();
        assert!((determinism(&tpm) - 1.0).abs() < 1e-12);
        assert!(degeneracy(&tpm).abs() < 1e-12);
        assert!((causal_power(&tpm) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_hits_lower_boundary() {
        let n = 4;
        let tpm = Tpm::from_row_major(n, vec![0.25; n * n]).unwrap();
        assert!(determinism(&tpm).abs() < 1e-12);
        assert!((degeneracy(&tpm) - 1.0).abs() < 1e-12);
        assert!((causal_power(&tpm) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_map_is_deterministic_but_degenerate() {
        let tpm = Tpm::from_rows(vec![vec![1.0, 0.0], vec![1.0, 0.0]]).unwrap();
        assert!((determinism(&tpm) - 1.0).abs() < 1e-12);
        assert!((degeneracy(&tpm) - 1.0).abs() < 1e-12);
        assert!(causal_power(&tpm).abs() < 1e-12);
    }
}
