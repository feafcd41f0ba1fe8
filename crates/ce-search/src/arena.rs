use std::collections::HashMap;

use ce_core::Partition;
use serde::{Deserialize, Serialize};

/// Stable key assigned to a partition the first time a search observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionId(usize);

impl PartitionId {
    /// Returns the raw dense index of the identifier.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense store of scored partitions keyed by [`PartitionId`].
///
/// Ids are handed out in observation order. Recording a partition that is
/// already present keeps its first score.
#[derive(Debug, Clone, Default)]
pub struct ScoreArena {
    partitions: Vec<Partition>,
    scores: Vec<f64>,
    index: HashMap<Partition, PartitionId>,
}

impl ScoreArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `partition` with causal power `cp` unless already present.
    pub fn record(&mut self, partition: Partition, cp: f64) -> PartitionId {
        if let Some(&id) = self.index.get(&partition) {
            return id;
        }
        let id = PartitionId(self.partitions.len());
        self.index.insert(partition.clone(), id);
        self.partitions.push(partition);
        self.scores.push(cp);
        id
    }

    /// Identifier of `partition`, if recorded.
    pub fn id_of(&self, partition: &Partition) -> Option<PartitionId> {
        self.index.get(partition).copied()
    }

    /// Partition stored under `id`.
    pub fn partition(&self, id: PartitionId) -> &Partition {
        &self.partitions[id.index()]
    }

    /// Causal power stored under `id`.
    pub fn cp(&self, id: PartitionId) -> f64 {
        self.scores[id.index()]
    }

    /// Number of distinct partitions recorded.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Iterates over `(id, partition, cp)` in observation order.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionId, &Partition, f64)> + '_ {
        self.partitions
            .iter()
            .zip(&self.scores)
            .enumerate()
            .map(|(idx, (partition, &cp))| (PartitionId(idx), partition, cp))
    }

    /// Gain of every recorded partition over its best strict refinement in the arena.
    ///
    /// The baseline of a partition is the maximum CP among the *other* recorded
    /// partitions that refine it, or `0.0` when none is recorded. Indexed by
    /// [`PartitionId::index`].
    pub fn strict_ancestor_gains(&self) -> Vec<f64> {
        let mut by_size: Vec<usize> = (0..self.partitions.len()).collect();
        by_size.sort_by_key(|&idx| std::cmp::Reverse(self.partitions[idx].len()));

        let mut gains = Vec::with_capacity(self.partitions.len());
        for (idx, partition) in self.partitions.iter().enumerate() {
            let mut baseline: Option<f64> = None;
            for &other in &by_size {
                // Only partitions with more blocks can strictly refine this one.
                if self.partitions[other].len() <= partition.len() {
                    break;
                }
                if other == idx {
                    continue;
                }
                if self.partitions[other].refines(partition) {
                    let cp = self.scores[other];
                    baseline = Some(baseline.map_or(cp, |best| best.max(cp)));
                }
            }
            gains.push(self.scores[idx] - baseline.unwrap_or(0.0));
        }
        gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(blocks: &[&[usize]]) -> Partition {
        Partition::from_blocks(blocks.iter().map(|b| b.to_vec()).collect()).unwrap()
    }

    #[test]
    fn first_score_wins() {
        let mut arena = ScoreArena::new();
        let a = arena.record(p(&[&[0], &[1]]), 0.5);
        let again = arena.record(p(&[&[1], &[0]]), 0.9);
        assert_eq!(a, again);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.cp(a), 0.5);
    }

    #[test]
    fn gains_exclude_self_and_unrelated() {
        let mut arena = ScoreArena::new();
        let micro = arena.record(Partition::microscale(3), 0.4);
        let left = arena.record(p(&[&[0, 1], &[2]]), 0.9);
        let right = arena.record(p(&[&[0], &[1, 2]]), 0.2);
        let top = arena.record(Partition::macroscale(3), 0.0);
        let gains = arena.strict_ancestor_gains();
        assert!((gains[micro.index()] - 0.4).abs() < 1e-12);
        assert!((gains[left.index()] - 0.5).abs() < 1e-12);
        assert!((gains[right.index()] + 0.2).abs() < 1e-12);
        assert!((gains[top.index()] + 0.9).abs() < 1e-12);
    }

    #[test]
    fn ids_are_dense_observation_indices() {
        let mut arena = ScoreArena::new();
        let ids: Vec<PartitionId> = [
            Partition::microscale(3),
            p(&[&[0, 1], &[2]]),
            p(&[&[0, 2], &[1]]),
            Partition::macroscale(3),
        ]
        .into_iter()
        .map(|partition| arena.record(partition, 0.0))
        .collect();
        for (expected, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), expected);
            assert_eq!(arena.id_of(arena.partition(*id)), Some(*id));
        }
        let listed: Vec<usize> = arena.iter().map(|(id, _, _)| id.index()).collect();
        assert_eq!(listed, (0..ids.len()).collect::<Vec<_>>());
    }

    #[test]
    fn lone_partition_has_zero_baseline() {
        let mut arena = ScoreArena::new();
        let only = arena.record(p(&[&[0, 1], &[2]]), 0.3);
        assert_eq!(arena.strict_ancestor_gains()[only.index()], 0.3);
    }
}
