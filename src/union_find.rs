use std::collections::TryReserveError;

/// Union-Find (Disjoint Sets) over partner ids `1..=n`, tracking the largest id per set
#[derive(Debug, Clone)]
pub struct MaxUnionFind {
    /// Index 0 is unused so partner ids index directly
    parent: Vec<usize>,
    max_in_component: Vec<usize>,
}

impl MaxUnionFind {
    /// Create a new MaxUnionFind with nodes `1..=n`, each its own component
    pub fn new(n: usize) -> Self {
        let parent: Vec<usize> = (0..=n).collect();
        let max_in_component = parent.clone();
        MaxUnionFind {
            parent,
            max_in_component,
        }
    }

    /// Same as [`MaxUnionFind::new`], but reports allocation failure
    pub fn try_new(n: usize) -> Result<Self, TryReserveError> {
        let mut parent = vec![0];
        parent.try_reserve_exact(n)?;
        parent.extend(1..=n);

        let mut max_in_component = Vec::new();
        max_in_component.try_reserve_exact(parent.len())?;
        max_in_component.extend_from_slice(&parent);

        Ok(MaxUnionFind {
            parent,
            max_in_component,
        })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.parent.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the root of element x with path compression
    ///
    /// Unions never balance by rank, so chains can get as long as `n`; the
    /// walk is iterative for that reason.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing a and b; the root of a survives
    ///
    /// Returns false if they were already in the same set.
    pub fn unite(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        self.parent[root_b] = root_a;
        self.max_in_component[root_a] =
            self.max_in_component[root_a].max(self.max_in_component[root_b]);
        true
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Largest id in the set containing x
    pub fn largest_in_component(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.max_in_component[root]
    }

    /// Largest id of every set, ordered by ascending root id
    pub fn largest_per_component(&self) -> Vec<usize> {
        (1..self.parent.len())
            .filter(|&i| self.parent[i] == i)
            .map(|i| self.max_in_component[i])
            .collect()
    }

    /// Number of disjoint sets
    pub fn num_components(&self) -> usize {
        (1..self.parent.len())
            .filter(|&i| self.parent[i] == i)
            .count()
    }

    /// Get all sets as sorted groups of ids, ordered by their smallest member
    pub fn components(&mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root = vec![usize::MAX; self.parent.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 1..self.parent.len() {
            let root = self.find(i);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_of_root[root]].push(i);
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_on_creation() {
        let uf = MaxUnionFind::new(4);
        assert_eq!(uf.len(), 4);
        assert_eq!(uf.num_components(), 4);
        assert_eq!(uf.largest_per_component(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty() {
        let mut uf = MaxUnionFind::new(0);
        assert!(uf.is_empty());
        assert!(uf.largest_per_component().is_empty());
        assert!(uf.components().is_empty());
    }

    #[test]
    fn test_try_new() {
        let uf = MaxUnionFind::try_new(3).unwrap();
        assert_eq!(uf.largest_per_component(), vec![1, 2, 3]);
        assert!(MaxUnionFind::try_new(usize::MAX).is_err());
        assert!(MaxUnionFind::try_new(usize::MAX / 2).is_err());
    }

    #[test]
    fn test_unite_tracks_max() {
        let mut uf = MaxUnionFind::new(6);
        assert!(uf.unite(2, 5));
        assert!(uf.unite(1, 2));
        assert_eq!(uf.largest_in_component(1), 5);
        assert_eq!(uf.largest_in_component(5), 5);
        assert_eq!(uf.largest_in_component(3), 3);
        // Root of the first argument survives
        assert_eq!(uf.find(5), 1);
        assert_eq!(uf.largest_per_component(), vec![5, 3, 4, 6]);
    }

    #[test]
    fn test_repeat_and_self_loop_are_noops() {
        let mut uf = MaxUnionFind::new(3);
        assert!(uf.unite(1, 3));
        assert!(!uf.unite(3, 1));
        assert!(!uf.unite(2, 2));
        assert_eq!(uf.num_components(), 2);
        assert!(uf.connected(1, 3));
        assert!(!uf.connected(1, 2));
    }

    #[test]
    fn test_long_chain_compresses() {
        let n = 200_000;
        let mut uf = MaxUnionFind::new(n);
        for i in 1..n {
            uf.unite(i + 1, i);
        }
        assert_eq!(uf.find(1), n);
        assert_eq!(uf.parent[1], n);
        assert_eq!(uf.largest_per_component(), vec![n]);
    }

    #[test]
    fn test_components_grouping() {
        let mut uf = MaxUnionFind::new(5);
        uf.unite(4, 1);
        uf.unite(5, 3);
        assert_eq!(uf.components(), vec![vec![1, 4], vec![2], vec![3, 5]]);
    }
}
