use crate::{AlignError, Result};
use itertools::Itertools;

/// Partial injective mapping from graph-1 vertices to graph-2 vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    targets: Vec<Option<usize>>,
    /// used_g2[v] = some graph-1 vertex maps to v
    used_g2: Vec<bool>,
}

impl Assignment {
    /// Every graph-1 vertex starts unassigned.
    pub fn new(g1_len: usize, g2_len: usize) -> Self {
        Assignment {
            targets: vec![None; g1_len],
            used_g2: vec![false; g2_len],
        }
    }

    pub fn g1_len(&self) -> usize {
        self.targets.len()
    }

    pub fn g2_len(&self) -> usize {
        self.used_g2.len()
    }

    /// Number of pairs a complete assignment holds.
    pub fn capacity(&self) -> usize {
        self.g1_len().min(self.g2_len())
    }

    /// Records `u -> v`. Fails without changing anything unless both vertices
    /// are currently free.
    pub fn assign(&mut self, u: usize, v: usize) -> Result<()> {
        if u >= self.g1_len() {
            return Err(AlignError::VertexOutOfBounds {
                vertex: u,
                len: self.g1_len(),
            });
        }
        if v >= self.g2_len() {
            return Err(AlignError::VertexOutOfBounds {
                vertex: v,
                len: self.g2_len(),
            });
        }
        if self.targets[u].is_some() {
            return Err(AlignError::AlreadyAssigned { vertex: u });
        }
        if self.used_g2[v] {
            return Err(AlignError::TargetInUse { vertex: v });
        }

        self.targets[u] = Some(v);
        self.used_g2[v] = true;
        Ok(())
    }

    pub fn get(&self, u: usize) -> Option<usize> {
        self.targets.get(u).copied().flatten()
    }

    pub fn is_assigned(&self, u: usize) -> bool {
        self.get(u).is_some()
    }

    pub fn is_target_used(&self, v: usize) -> bool {
        self.used_g2.get(v).copied().unwrap_or(false)
    }

    pub fn assigned_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.assigned_count() == self.capacity()
    }

    /// Assigned pairs `(u, v)` in graph-1 order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(u, t)| t.map(|v| (u, v)))
    }

    pub fn unassigned_g1(&self) -> impl Iterator<Item = usize> + '_ {
        self.targets.iter().positions(Option::is_none)
    }

    pub fn unused_g2(&self) -> impl Iterator<Item = usize> + '_ {
        self.used_g2.iter().positions(|used| !used)
    }

    /// True if no two graph-1 vertices share a target.
    pub fn is_injective(&self) -> bool {
        self.pairs().map(|(_, v)| v).all_unique()
    }

    /// `-1` marks an unassigned vertex.
    pub fn to_sentinel_vec(&self) -> Vec<i64> {
        self.targets
            .iter()
            .map(|t| t.map_or(-1, |v| v as i64))
            .collect()
    }
}
