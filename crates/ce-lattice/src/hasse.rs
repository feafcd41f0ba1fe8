use std::collections::{HashMap, VecDeque};

use ce_core::errors::{CeError, ErrorInfo};
use ce_core::Partition;
use itertools::Itertools;

/// Covering relation of a complete partition lattice.
///
/// Nodes are indexed by their position in the slice the diagram was built
/// from. An edge `a -> b` means `b` is obtained from `a` by merging exactly
/// two blocks, which is precisely the transitively reduced refinement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasseDiagram {
    nodes: Vec<Partition>,
    index: HashMap<Partition, usize>,
    coarser: Vec<Vec<usize>>,
    finer: Vec<Vec<usize>>,
}

impl HasseDiagram {
    /// Builds the diagram over a complete lattice such as the output of
    /// [`generate_all_partitions`](crate::generate_all_partitions).
    ///
    /// Fails when a pairwise merge of some node is missing from `partitions`.
    pub fn from_lattice(partitions: &[Partition]) -> Result<Self, CeError> {
        let nodes = partitions.to_vec();
        let index: HashMap<Partition, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, partition)| (partition.clone(), idx))
            .collect();
        let mut coarser = vec![Vec::new(); nodes.len()];
        let mut finer = vec![Vec::new(); nodes.len()];

        for (from, partition) in nodes.iter().enumerate() {
            for (i, j) in (0..partition.len()).tuple_combinations() {
                let merged = partition.merge(i, j)?;
                let Some(&to) = index.get(&merged) else {
                    return Err(CeError::Lattice(
                        ErrorInfo::new("hasse-missing-cover", "lattice is not closed under merges")
                            .with_context("partition", partition)
                            .with_context("missing", &merged),
                    ));
                };
                coarser[from].push(to);
                finer[to].push(from);
            }
        }

        Ok(Self {
            nodes,
            index,
            coarser,
            finer,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of covering edges.
    pub fn edge_count(&self) -> usize {
        self.coarser.iter().map(Vec::len).sum()
    }

    /// Nodes in construction order.
    pub fn nodes(&self) -> &[Partition] {
        &self.nodes
    }

    /// Node index of `partition`, if present.
    pub fn index_of(&self, partition: &Partition) -> Option<usize> {
        self.index.get(partition).copied()
    }

    /// Partitions directly covering `node` (one merge coarser).
    pub fn covers(&self, node: usize) -> &[usize] {
        &self.coarser[node]
    }

    /// Partitions directly covered by `node` (one split finer).
    pub fn covered(&self, node: usize) -> &[usize] {
        &self.finer[node]
    }

    /// Every node strictly finer than `node`, in breadth-first order.
    pub fn ancestors(&self, node: usize) -> Vec<usize> {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([node]);
        let mut out = Vec::new();
        seen[node] = true;
        while let Some(current) = queue.pop_front() {
            for &next in &self.finer[current] {
                if !seen[next] {
                    seen[next] = true;
                    out.push(next);
                    queue.push_back(next);
                }
            }
        }
        out
    }

    /// Node indices ordered from finest to coarsest (by descending block count,
    /// ties in construction order). Every node appears after all of its
    /// ancestors.
    pub fn fine_to_coarse(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&idx| std::cmp::Reverse(self.nodes[idx].len()));
        order
    }
}
