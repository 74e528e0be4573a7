//! GET operations for AvlTreeMap.
//!
//! This module contains the read-only lookups: key search, checked access,
//! and the extreme entries.

use std::cmp::Ordering;

use crate::allocator::NodeAllocator;
use crate::compare::Comparator;
use crate::cursor::Cursor;
use crate::error::{AvlTreeError, KeyResult};
use crate::node::{maximum, minimum};
use crate::types::{AvlTreeMap, Node, NodeId, NULL_NODE};

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    C: Comparator<K>,
    A: NodeAllocator<Node<K, V>>,
{
    /// Locate the node holding `key`, or `NULL_NODE`.
    pub(crate) fn find_node(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current];
            current = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return current,
            };
        }
        NULL_NODE
    }

    /// Return a cursor at `key`, or the end cursor if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.find(&1).value().unwrap(), &"one");
    /// assert!(tree.find(&2).is_end());
    /// assert!(tree.find(&2) == tree.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, C, A> {
        Cursor::new(self, self.find_node(key))
    }

    /// Get a reference to the value associated with a key.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Get the stored key and its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = self.nodes.get(self.find_node(key))?;
        Some((&node.key, &node.value))
    }

    /// Get a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_node(key);
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// Check if key exists in the map.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key) != NULL_NODE
    }

    /// Same as [`contains_key`](Self::contains_key).
    pub fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    /// Get value for a key, returning an error if the key doesn't exist.
    ///
    /// ```
    /// use avltree::{AvlTreeMap, AvlTreeError};
    ///
    /// let mut tree = AvlTreeMap::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.at(&1), Ok(&"one"));
    /// assert_eq!(tree.at(&99), Err(AvlTreeError::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> KeyResult<&V> {
        self.get(key).ok_or(AvlTreeError::KeyNotFound)
    }

    /// Mutable counterpart of [`at`](Self::at).
    pub fn at_mut(&mut self, key: &K) -> KeyResult<&mut V> {
        self.get_mut(key).ok_or(AvlTreeError::KeyNotFound)
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = self.nodes.get(minimum(&self.nodes, self.root))?;
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let node = self.nodes.get(maximum(&self.nodes, self.root))?;
        Some((&node.key, &node.value))
    }
}
