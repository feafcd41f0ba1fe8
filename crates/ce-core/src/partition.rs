//! Canonical set partitions of microstate indices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CeError, ErrorInfo};

/// Set partition of `{0, …, n-1}` into disjoint non-empty blocks.
///
/// The representation is canonical: indices are sorted inside every block and
/// blocks are ordered by their minimum element. Equality, ordering and hashing
/// therefore coincide with equality of the underlying grouping. Values are
/// immutable; [`Partition::merge`] returns a new partition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")]
pub struct Partition {
    blocks: Vec<Vec<usize>>,
    n: usize,
}

impl Partition {
    /// Canonicalises and validates the supplied blocks.
    ///
    /// The ground set is inferred as `0..total`, where `total` is the number of
    /// indices across all blocks; every index in that range must appear exactly
    /// once.
    pub fn from_blocks(blocks: Vec<Vec<usize>>) -> Result<Self, CeError> {
        let n: usize = blocks.iter().map(Vec::len).sum();
        let mut seen = vec![false; n];
        let mut canonical = Vec::with_capacity(blocks.len());
        for (idx, mut block) in blocks.into_iter().enumerate() {
            if block.is_empty() {
                return Err(CeError::Partition(
                    ErrorInfo::new("partition-empty-block", "blocks must be non-empty")
                        .with_context("block", idx),
                ));
            }
            for &state in &block {
                if state >= n {
                    return Err(CeError::Partition(
                        ErrorInfo::new("partition-cover", "index outside the ground set")
                            .with_context("state", state)
                            .with_context("n", n),
                    ));
                }
                if seen[state] {
                    return Err(CeError::Partition(
                        ErrorInfo::new("partition-cover", "index appears in more than one block")
                            .with_context("state", state),
                    ));
                }
                seen[state] = true;
            }
            block.sort_unstable();
            canonical.push(block);
        }
        canonical.sort_unstable_by_key(|block| block[0]);
        Ok(Self {
            blocks: canonical,
            n,
        })
    }

    /// Partition with `n` singleton blocks.
    pub fn microscale(n: usize) -> Self {
        Self {
            blocks: (0..n).map(|state| vec![state]).collect(),
            n,
        }
    }

    /// Partition with a single block holding every state. Empty for `n == 0`.
    pub fn macroscale(n: usize) -> Self {
        let blocks = if n == 0 {
            Vec::new()
        } else {
            vec![(0..n).collect()]
        };
        Self { blocks, n }
    }

    /// The unique partition of the empty set.
    pub fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            n: 0,
        }
    }

    /// Size of the ground set.
    pub fn num_states(&self) -> usize {
        self.n
    }

    /// Number of blocks (macrostates).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` for the partition of the empty set.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in canonical order.
    pub fn blocks(&self) -> &[Vec<usize>] {
        &self.blocks
    }

    /// Returns `true` when every block is a singleton.
    pub fn is_microscale(&self) -> bool {
        self.blocks.len() == self.n
    }

    /// Returns `true` when a single block holds every state.
    pub fn is_macroscale(&self) -> bool {
        self.blocks.len() == 1
    }

    /// Maps each state to the canonical index of the block containing it.
    pub fn block_index_map(&self) -> Vec<usize> {
        let mut lookup = vec![0usize; self.n];
        for (block_idx, block) in self.blocks.iter().enumerate() {
            for &state in block {
                lookup[state] = block_idx;
            }
        }
        lookup
    }

    /// Merges blocks `i` and `j` (canonical indices) into one block.
    pub fn merge(&self, i: usize, j: usize) -> Result<Self, CeError> {
        let k = self.blocks.len();
        if i == j || i >= k || j >= k {
            return Err(CeError::Partition(
                ErrorInfo::new("partition-merge", "merge requires two distinct block indices")
                    .with_context("i", i)
                    .with_context("j", j)
                    .with_context("blocks", k),
            ));
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let mut merged = Vec::with_capacity(self.blocks[lo].len() + self.blocks[hi].len());
        merged.extend_from_slice(&self.blocks[lo]);
        merged.extend_from_slice(&self.blocks[hi]);
        merged.sort_unstable();

        // The merged block keeps the minimum of block `lo`, so its position is unchanged.
        let mut blocks = Vec::with_capacity(k - 1);
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx == lo {
                blocks.push(std::mem::take(&mut merged));
            } else if idx != hi {
                blocks.push(block.clone());
            }
        }
        Ok(Self { blocks, n: self.n })
    }

    /// Returns `true` when `self` refines `other` (every block of `self` lies
    /// inside one block of `other`). Reflexive.
    pub fn refines(&self, other: &Partition) -> bool {
        is_refinement(self, other)
    }
}

/// Decides whether `finer` refines `coarser`.
///
/// Partitions over different ground sets never refine each other.
pub fn is_refinement(finer: &Partition, coarser: &Partition) -> bool {
    if finer.n != coarser.n || finer.blocks.len() < coarser.blocks.len() {
        return false;
    }
    let lookup = coarser.block_index_map();
    finer.blocks.iter().all(|block| {
        let target = lookup[block[0]];
        block[1..].iter().all(|&state| lookup[state] == target)
    })
}

impl TryFrom<Vec<Vec<usize>>> for Partition {
    type Error = CeError;

    fn try_from(blocks: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        Self::from_blocks(blocks)
    }
}

impl From<Partition> for Vec<Vec<usize>> {
    fn from(partition: Partition) -> Self {
        partition.blocks
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "(")?;
            for (pos, state) in block.iter().enumerate() {
                if pos > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{state}")?;
            }
            write!(f, ")")?;
        }
        write!(f, ")")
    }
}
