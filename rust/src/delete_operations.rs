//! DELETE operations for AvlTreeMap.
//!
//! Deletion descends recursively to the target, unlinks it, and rebalances
//! every ancestor while unwinding. A node with two children is replaced by
//! its in-order successor node, which is detached from the right subtree and
//! relinked in place; no surviving node is moved to a new slot, so every
//! position except the erased one stays valid.
//!
//! Deletion never allocates a node, so none of these operations can fail on
//! allocator exhaustion.

use std::cmp::Ordering;

use crate::allocator::NodeAllocator;
use crate::compare::Comparator;
use crate::error::CursorResult;
use crate::node::{maximum, minimum, successor};
use crate::types::{AvlTreeMap, Node, NodeId, Position, Removed, NULL_NODE};

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    C: Comparator<K>,
    A: NodeAllocator<Node<K, V>>,
{
    /// Remove a key, returning its value if it was present.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove a key, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.remove_matching(&|tree: &Self, id: NodeId| {
            tree.comparator.compare(key, &tree.nodes[id].key)
        })
    }

    /// Remove a key, returning how many entries were removed (0 or 1).
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Remove the entry at `position` and return the position of the entry
    /// that followed it, or the end position if it was the largest.
    ///
    /// Erasing at the end position is a no-op returning the end position.
    /// A position whose entry is already gone is rejected.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree: AvlTreeMap<_, _> = (1..=3).map(|k| (k, k * 10)).collect();
    /// let two = tree.find(&2).position();
    /// let next = tree.erase_at(two).unwrap();
    /// assert_eq!(tree.cursor_at(next).unwrap().key(), Ok(&3));
    /// assert!(tree.erase_at(two).is_err());
    /// ```
    pub fn erase_at(&mut self, position: Position) -> CursorResult<Position> {
        let target = self.resolve(position)?;
        if target == NULL_NODE {
            return Ok(Position::END);
        }

        // The successor node survives the erase in its own slot
        let next = successor(&self.nodes, target);
        self.remove_node(target);
        Ok(self.position_of(next))
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = minimum(&self.nodes, self.root);
        if first == NULL_NODE {
            return None;
        }
        self.remove_node(first)
    }

    /// Remove and return the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = maximum(&self.nodes, self.root);
        if last == NULL_NODE {
            return None;
        }
        self.remove_node(last)
    }

    /// Remove a node known to be in the tree.
    fn remove_node(&mut self, target: NodeId) -> Option<(K, V)> {
        self.remove_matching(&|tree: &Self, id: NodeId| {
            if id == target {
                Ordering::Equal
            } else {
                tree.comparator.compare(&tree.nodes[target].key, &tree.nodes[id].key)
            }
        })
    }

    /// Remove the node for which `locate` reports `Equal`, steering the
    /// descent with the orderings it reports elsewhere.
    fn remove_matching<F>(&mut self, locate: &F) -> Option<(K, V)>
    where
        F: Fn(&Self, NodeId) -> Ordering,
    {
        let removed = self.remove_recursive(self.root, locate);
        self.set_root(removed.subtree);
        if removed.entry.is_some() {
            self.len -= 1;
        }
        removed.entry
    }

    fn remove_recursive<F>(&mut self, id: NodeId, locate: &F) -> Removed<K, V>
    where
        F: Fn(&Self, NodeId) -> Ordering,
    {
        if id == NULL_NODE {
            return Removed {
                subtree: NULL_NODE,
                entry: None,
            };
        }

        let entry = match locate(&*self, id) {
            Ordering::Less => {
                let left = self.nodes[id].left;
                let removed = self.remove_recursive(left, locate);
                self.set_left(id, removed.subtree);
                removed.entry
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                let removed = self.remove_recursive(right, locate);
                self.set_right(id, removed.subtree);
                removed.entry
            }
            Ordering::Equal => return self.unlink(id),
        };

        // Nothing below changed shape, so there is nothing to rebalance
        if entry.is_none() {
            return Removed { subtree: id, entry };
        }
        Removed {
            subtree: self.rebalance(id),
            entry,
        }
    }

    /// Detach `id` from the tree, destroy it, and return what takes its place.
    fn unlink(&mut self, id: NodeId) -> Removed<K, V> {
        let Node {
            left,
            right,
            parent,
            ..
        } = self.nodes[id];

        let subtree = if left == NULL_NODE || right == NULL_NODE {
            // Zero or one child: splice the child into our place
            let child = if left == NULL_NODE { right } else { left };
            if child != NULL_NODE {
                self.nodes[child].parent = parent;
            }
            child
        } else {
            let (rest, heir) = self.detach_minimum(right);
            self.set_left(heir, left);
            self.set_right(heir, rest);
            self.nodes[heir].parent = parent;
            self.rebalance(heir)
        };

        let entry = self.nodes.deallocate(id).map(|node| (node.key, node.value));
        Removed { subtree, entry }
    }

    /// Detach the minimum of the subtree at `id` without destroying it.
    ///
    /// Returns the rebalanced remainder of the subtree and the detached node.
    fn detach_minimum(&mut self, id: NodeId) -> (NodeId, NodeId) {
        let left = self.nodes[id].left;
        if left == NULL_NODE {
            let right = self.nodes[id].right;
            if right != NULL_NODE {
                self.nodes[right].parent = self.nodes[id].parent;
            }
            return (right, id);
        }

        let (rest, min) = self.detach_minimum(left);
        self.set_left(id, rest);
        (self.rebalance(id), min)
    }
}

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    /// Destroy every entry. O(n).
    pub fn clear(&mut self) {
        if self.len > 0 {
            log::debug!("clearing AVL tree of {} nodes", self.len);
        }
        self.nodes.clear();
        self.root = NULL_NODE;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> AvlTreeMap<i32, i32> {
        keys.into_iter().map(|k| (k, k * 10)).collect()
    }

    #[test]
    fn test_erase_leaf_single_child_and_two_children() {
        let mut tree = tree_of([50, 30, 70, 20, 40, 60, 80, 10]);

        // Leaf
        assert_eq!(tree.erase(&80), 1);
        assert!(tree.validate());
        // Single child (20 has only 10)
        assert_eq!(tree.erase(&20), 1);
        assert!(tree.validate());
        // Two children at the root
        assert_eq!(tree.remove(&50), Some(500));
        assert!(tree.validate());

        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![10, 30, 40, 60, 70]);
        assert_eq!(tree.erase(&50), 0);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_two_child_erase_keeps_successor_position() {
        let mut tree = tree_of(1..=15);
        let root_key = tree.nodes[tree.root].key;
        let heir = tree.find(&(root_key + 1)).position();

        tree.erase(&root_key);
        assert!(tree.validate());
        assert_eq!(tree.cursor_at(heir).unwrap().key(), Ok(&(root_key + 1)));
    }

    #[test]
    fn test_erase_at_returns_following_entry() {
        let mut tree = tree_of(1..=5);
        let last = tree.find(&5).position();
        assert!(tree.erase_at(last).unwrap().is_end());
        assert!(tree.erase_at(Position::END).unwrap().is_end());

        let mut position = tree.begin().position();
        let mut erased = 0;
        while !position.is_end() {
            position = tree.erase_at(position).unwrap();
            erased += 1;
            assert!(tree.validate());
        }
        assert_eq!(erased, 4);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_pop_first_and_last() {
        let mut tree = tree_of([3, 1, 2]);
        assert_eq!(tree.pop_first(), Some((1, 10)));
        assert_eq!(tree.pop_last(), Some((3, 30)));
        assert_eq!(tree.pop_last(), Some((2, 20)));
        assert_eq!(tree.pop_first(), None);
        assert!(tree.validate());
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut tree = tree_of(0..100);
        let stale = tree.find(&42).position();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.validate());
        assert!(tree.cursor_at(stale).is_err());

        tree.insert(42, 0);
        assert!(tree.cursor_at(stale).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_erase_everything_in_mixed_order() {
        let keys: Vec<i32> = (0..200).map(|i| (i * 37) % 200).collect();
        let mut tree = tree_of(keys.iter().copied());
        for (n, k) in keys.iter().rev().enumerate() {
            assert_eq!(tree.erase(k), 1);
            assert_eq!(tree.len(), 199 - n);
            assert!(tree.validate());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.allocator().len(), 0);
    }
}
