//! Validation and debugging utilities for AvlTreeMap.
//!
//! This module contains invariant checking, structural dumps, and the
//! helpers tests use to inspect the tree.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use crate::allocator::NodeAllocator;
use crate::compact_arena::{CompactArena, CompactArenaStats};
use crate::compare::Comparator;
use crate::error::{AvlResult, AvlTreeError};
use crate::node::height;
use crate::types::{AvlTreeMap, Height, Node, NodeId, NULL_NODE};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    C: Comparator<K>,
    A: NodeAllocator<Node<K, V>>,
{
    /// Check if the tree maintains all AVL invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies key ordering under the comparator, parent back links, cached
    /// heights, the balance condition, and that the entry count agrees with
    /// both the reachable nodes and the allocator.
    pub fn check_invariants_detailed(&self) -> AvlResult<()> {
        if (self.root == NULL_NODE) != (self.len == 0) {
            return Err(AvlTreeError::corrupted_tree(
                "Root",
                &format!("root is {} but len is {}", describe(self.root), self.len),
            ));
        }
        if self.root != NULL_NODE && self.nodes.get(self.root).map(|n| n.parent) != Some(NULL_NODE) {
            return Err(AvlTreeError::corrupted_tree("Root", "root has a parent link"));
        }

        let mut visited = 0;
        self.check_subtree(self.root, NULL_NODE, None, None, &mut visited)?;

        if visited != self.len {
            return Err(AvlTreeError::data_integrity(
                "Size check",
                &format!("{} reachable nodes but len is {}", visited, self.len),
            ));
        }
        if self.nodes.allocated_count() != self.len {
            return Err(AvlTreeError::data_integrity(
                "Allocator consistency check",
                &format!(
                    "{} nodes allocated but len is {}",
                    self.nodes.allocated_count(),
                    self.len
                ),
            ));
        }

        self.check_iteration_order()
    }

    /// Alias for check_invariants, used throughout the tests.
    pub fn validate(&self) -> bool {
        match self.check_invariants_detailed() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("AVL tree failed validation: {}", e);
                false
            }
        }
    }

    /// Check if tree is in a valid state for operations
    pub fn validate_for_operation(&self, operation: &str) -> AvlResult<()> {
        self.check_invariants_detailed()
            .map_err(|e| AvlTreeError::data_integrity(operation, &e.to_string()))
    }

    /// Recursively check the subtree at `id`, returning its computed height.
    ///
    /// `lower` and `upper` are exclusive key bounds inherited from ancestors.
    fn check_subtree(
        &self,
        id: NodeId,
        parent: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        visited: &mut usize,
    ) -> AvlResult<Height> {
        if id == NULL_NODE {
            return Ok(0);
        }

        // More nodes than the allocator holds means a cycle
        *visited += 1;
        if *visited > self.nodes.allocated_count() {
            return Err(AvlTreeError::corrupted_tree(
                "Structure",
                &format!("node {} reached more than once", id),
            ));
        }

        let node = self.nodes.get(id).ok_or_else(|| {
            AvlTreeError::corrupted_tree("Link", &format!("node {} is not allocated", id))
        })?;

        if node.parent != parent {
            return Err(AvlTreeError::corrupted_tree(
                "Parent link",
                &format!(
                    "node {} points at {} instead of {}",
                    id,
                    describe(node.parent),
                    describe(parent)
                ),
            ));
        }
        if let Some(lower) = lower {
            if self.comparator.compare(lower, &node.key) != Ordering::Less {
                return Err(AvlTreeError::corrupted_tree(
                    "Ordering",
                    &format!("node {} is not above its lower bound", id),
                ));
            }
        }
        if let Some(upper) = upper {
            if self.comparator.compare(&node.key, upper) != Ordering::Less {
                return Err(AvlTreeError::corrupted_tree(
                    "Ordering",
                    &format!("node {} is not below its upper bound", id),
                ));
            }
        }

        let left = self.check_subtree(node.left, id, lower, Some(&node.key), visited)?;
        let right = self.check_subtree(node.right, id, Some(&node.key), upper, visited)?;

        let computed = 1 + left.max(right);
        if node.height != computed {
            return Err(AvlTreeError::data_integrity(
                "Height check",
                &format!("node {} caches {} but has height {}", id, node.height, computed),
            ));
        }
        if (left - right).abs() > 1 {
            return Err(AvlTreeError::corrupted_tree(
                "Balance",
                &format!("node {} has balance factor {}", id, left - right),
            ));
        }

        Ok(computed)
    }

    /// Check that the iterator yields exactly `len` strictly ascending keys.
    fn check_iteration_order(&self) -> AvlResult<()> {
        let keys: Vec<&K> = self.keys().collect();

        for i in 1..keys.len() {
            if !self.comparator.less(keys[i - 1], keys[i]) {
                return Err(AvlTreeError::data_integrity(
                    "Iteration",
                    &format!("unsorted keys at index {}", i),
                ));
            }
        }

        if keys.len() != self.len {
            return Err(AvlTreeError::data_integrity(
                "Iteration",
                &format!("iterator returned {} keys but tree has {} items", keys.len(), self.len),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    /// Height of the tree: 0 when empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        height(&self.nodes, self.root) as usize
    }

    /// Render the tree sideways, one node per line, right subtree on top.
    ///
    /// Each line shows the key, the cached height, and the balance factor.
    pub fn structure(&self) -> String
    where
        K: fmt::Debug,
    {
        let mut out = String::new();
        self.render(self.root, 0, &mut out);
        out
    }

    /// Prints the tree structure for debugging.
    pub fn print_tree(&self)
    where
        K: fmt::Debug,
    {
        println!("Tree structure ({} entries, height {}):", self.len, self.height());
        print!("{}", self.structure());
    }

    fn render(&self, id: NodeId, depth: usize, out: &mut String)
    where
        K: fmt::Debug,
    {
        if id == NULL_NODE {
            return;
        }
        let node = &self.nodes[id];
        self.render(node.right, depth + 1, out);
        let balance = height(&self.nodes, node.left) - height(&self.nodes, node.right);
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}{:?} [h={}, bf={}]",
            "    ".repeat(depth),
            node.key,
            node.height,
            balance
        );
        self.render(node.left, depth + 1, out);
    }
}

impl<K, V, C> AvlTreeMap<K, V, C, CompactArena<Node<K, V>>> {
    /// Usage statistics of the default node arena.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.nodes.stats()
    }
}

fn describe(id: NodeId) -> String {
    if id == NULL_NODE {
        "null".to_string()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> AvlTreeMap<i32, ()> {
        keys.into_iter().map(|k| (k, ())).collect()
    }

    #[test]
    fn test_valid_trees_pass() {
        assert!(tree_of([]).validate());
        assert!(tree_of([1]).validate());
        assert!(tree_of((0..500).rev()).validate());
        assert!(tree_of((0..500).map(|i| (i * 7919) % 500)).check_invariants());
    }

    #[test]
    fn test_detects_stale_height() {
        let mut tree = tree_of(1..=7);
        let root = tree.root;
        tree.nodes[root].height = 9;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(matches!(err, AvlTreeError::DataIntegrityError(_)));
        assert!(!tree.validate());
    }

    #[test]
    fn test_detects_misordered_keys() {
        let mut tree = tree_of(1..=7);
        let root = tree.root;
        let left = tree.nodes[root].left;
        tree.nodes[left].key = 100;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(matches!(err, AvlTreeError::CorruptedTree(_)));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = tree_of(1..=3);
        let root = tree.root;
        let right = tree.nodes[root].right;
        tree.nodes[right].parent = NULL_NODE;
        assert!(tree.validate_for_operation("erase").is_err());
    }

    #[test]
    fn test_detects_len_mismatch() {
        let mut tree = tree_of(1..=3);
        tree.len = 4;
        assert!(!tree.validate());
    }

    #[test]
    fn test_height_and_structure() {
        let tree = tree_of(1..=3);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.structure(), "    3 [h=1, bf=0]\n2 [h=2, bf=0]\n    1 [h=1, bf=0]\n");
        assert_eq!(tree_of([]).height(), 0);
        assert_eq!(tree_of([]).structure(), "");
    }

    #[test]
    fn test_arena_stats_track_erasures() {
        let mut tree = tree_of(0..10);
        tree.erase(&3);
        tree.erase(&4);
        let stats = tree.arena_stats();
        assert_eq!(stats.allocated_count, 8);
        assert_eq!(stats.free_count, 2);
    }
}
