use ce_lattice::{generate_all_partitions, is_refinement, HasseDiagram};

/// Transitive reduction of the strict refinement order, computed naively.
fn naive_covers(n: usize) -> Vec<(usize, usize)> {
    let partitions = generate_all_partitions(n);
    let strictly = |a: usize, b: usize| a != b && is_refinement(&partitions[a], &partitions[b]);
    let mut edges = Vec::new();
    for a in 0..partitions.len() {
        for b in 0..partitions.len() {
            if !strictly(a, b) {
                continue;
            }
            let intermediate = (0..partitions.len()).any(|c| strictly(a, c) && strictly(c, b));
            if !intermediate {
                edges.push((a, b));
            }
        }
    }
    edges
}

#[test]
fn covering_edges_equal_transitive_reduction() {
    for n in 1..=4 {
        let partitions = generate_all_partitions(n);
        let hasse = HasseDiagram::from_lattice(&partitions).unwrap();
        let mut edges: Vec<(usize, usize)> = (0..hasse.len())
            .flat_map(|a| hasse.covers(a).iter().map(move |&b| (a, b)))
            .collect();
        edges.sort_unstable();
        let mut expected = naive_covers(n);
        expected.sort_unstable();
        assert_eq!(edges, expected, "n={n}");
    }
}

#[test]
fn edge_count_for_four_states() {
    let hasse = HasseDiagram::from_lattice(&generate_all_partitions(4)).unwrap();
    assert_eq!(hasse.len(), 15);
    assert_eq!(hasse.edge_count(), 31);
}

#[test]
fn ancestors_are_all_strict_refinements() {
    let partitions = generate_all_partitions(5);
    let hasse = HasseDiagram::from_lattice(&partitions).unwrap();
    for (idx, partition) in partitions.iter().enumerate() {
        let mut ancestors = hasse.ancestors(idx);
        ancestors.sort_unstable();
        let expected: Vec<usize> = partitions
            .iter()
            .enumerate()
            .filter(|(other, candidate)| *other != idx && is_refinement(candidate, partition))
            .map(|(other, _)| other)
            .collect();
        assert_eq!(ancestors, expected, "{partition}");
    }
    let micro = hasse.index_of(&ce_core::Partition::microscale(5)).unwrap();
    assert!(hasse.ancestors(micro).is_empty());
}

#[test]
fn fine_to_coarse_respects_order() {
    let hasse = HasseDiagram::from_lattice(&generate_all_partitions(5)).unwrap();
    let order = hasse.fine_to_coarse();
    let mut position = vec![0; order.len()];
    for (pos, &node) in order.iter().enumerate() {
        position[node] = pos;
    }
    for node in 0..hasse.len() {
        for &finer in hasse.covered(node) {
            assert!(position[finer] < position[node]);
        }
    }
}

#[test]
fn incomplete_lattice_is_rejected() {
    let mut partitions = generate_all_partitions(3);
    partitions.retain(|p| !p.is_macroscale());
    let err = HasseDiagram::from_lattice(&partitions).unwrap_err();
    assert_eq!(err.code(), "hasse-missing-cover");
}
