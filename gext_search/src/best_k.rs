//! Bounded best-k result set.
//!
//! Keeps the k cheapest distinct complete assignments seen so far, ordered
//! by cost. Duplicate detection is a linear scan over the kept entries:
//! O(k * n) per insertion, which is fine for the intended small k (<= 10 or
//! so); revisit if k ever grows large.

use crate::assignment::Assignment;

/// The k cheapest distinct assignments, cheapest first.
#[derive(Clone, Debug)]
pub struct BestK {
    k: usize,
    entries: Vec<(u64, Assignment)>,
}

impl BestK {
    /// Empty set retaining up to `k` results (at least 1).
    #[must_use]
    pub fn new(k: usize) -> Self {
        let k = k.max(1);
        Self {
            k,
            entries: Vec::with_capacity(k),
        }
    }

    /// Whether k results are already held.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.k
    }

    /// Number of results held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no results are held yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cost of the cheapest held result.
    #[must_use]
    pub fn best_cost(&self) -> Option<u64> {
        self.entries.first().map(|(c, _)| *c)
    }

    /// Pruning bound: the k-th best cost, defined only once the set is
    /// full. Candidates with cost (or f) at or above this cannot improve
    /// the set.
    #[must_use]
    pub fn bound(&self) -> Option<u64> {
        self.is_full().then(|| self.entries[self.k - 1].0)
    }

    /// Offer a finished assignment. Returns whether it was kept.
    ///
    /// Duplicates of an already-held assignment are rejected regardless of
    /// cost; once full, candidates at or above the bound are rejected and
    /// the worst entry is evicted for anything cheaper.
    pub fn insert(&mut self, cost: u64, assignment: Assignment) -> bool {
        if let Some(bound) = self.bound()
            && cost >= bound
        {
            return false;
        }
        if self.entries.iter().any(|(_, held)| *held == assignment) {
            return false;
        }

        // Insert after any equal-cost entries to keep discovery order
        // stable among ties.
        let pos = self.entries.partition_point(|(c, _)| *c <= cost);
        self.entries.insert(pos, (cost, assignment));
        self.entries.truncate(self.k);
        true
    }

    /// Fold another set into this one (used to merge per-branch results
    /// from parallel expansion).
    pub fn merge(&mut self, other: Self) {
        for (cost, assignment) in other.entries {
            self.insert(cost, assignment);
        }
    }

    /// Consume into the cost-ordered assignment list.
    #[must_use]
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.entries.into_iter().map(|(_, a)| a).collect()
    }

    /// Consume into the cost-ordered `(cost, assignment)` list.
    #[must_use]
    pub fn into_entries(self) -> Vec<(u64, Assignment)> {
        self.entries
    }

    /// Cost-ordered view of the held `(cost, assignment)` pairs.
    #[must_use]
    pub fn entries(&self) -> &[(u64, Assignment)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(size: u32, image: &[u32]) -> Assignment {
        let mut a = Assignment::new(image.len() as u32, size);
        for (u, &v) in image.iter().enumerate() {
            a.set(u as u32, v);
        }
        a
    }

    #[test]
    fn keeps_cheapest_k() {
        let mut best = BestK::new(2);
        assert!(best.insert(5, assignment(4, &[0, 1])));
        assert!(best.insert(3, assignment(4, &[1, 2])));
        assert!(best.insert(4, assignment(4, &[2, 3])));
        let costs: Vec<u64> = best.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(costs, vec![3, 4]);
    }

    #[test]
    fn rejects_at_bound_when_full() {
        let mut best = BestK::new(2);
        best.insert(3, assignment(4, &[0, 1]));
        best.insert(4, assignment(4, &[1, 2]));
        assert!(!best.insert(4, assignment(4, &[2, 3])));
        assert_eq!(best.bound(), Some(4));
    }

    #[test]
    fn accepts_ties_while_not_full() {
        let mut best = BestK::new(3);
        best.insert(4, assignment(4, &[0, 1]));
        assert!(best.insert(4, assignment(4, &[1, 2])));
        assert_eq!(best.len(), 2);
    }

    #[test]
    fn rejects_duplicates() {
        let mut best = BestK::new(3);
        assert!(best.insert(2, assignment(4, &[0, 1])));
        assert!(!best.insert(2, assignment(4, &[0, 1])));
        assert_eq!(best.len(), 1);
    }

    #[test]
    fn merge_combines_and_rebounds() {
        let mut lhs = BestK::new(2);
        lhs.insert(5, assignment(4, &[0, 1]));
        let mut rhs = BestK::new(2);
        rhs.insert(1, assignment(4, &[1, 2]));
        rhs.insert(3, assignment(4, &[2, 3]));
        lhs.merge(rhs);
        let costs: Vec<u64> = lhs.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(costs, vec![1, 3]);
    }
}
