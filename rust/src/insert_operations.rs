//! INSERT operations for AvlTreeMap.
//!
//! Insertion descends recursively from the root, allocates the new node at
//! the empty slot it reaches, and rebalances every ancestor while unwinding.
//! Inserting a key that is already present overwrites its value in place.

use std::cmp::Ordering;

use crate::allocator::NodeAllocator;
use crate::compare::Comparator;
use crate::error::{AvlResultExt, ModifyResult};
use crate::types::{AvlTreeMap, Node, NodeId, Position, NULL_NODE};

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    C: Comparator<K>,
    A: NodeAllocator<Node<K, V>>,
{
    /// Insert a key-value pair.
    ///
    /// Returns the position of the entry and whether it is new. If the key
    /// was already present its value is overwritten, the map does not grow,
    /// and `false` is returned.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide a node. Use
    /// [`try_insert`](Self::try_insert) to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new();
    /// assert!(tree.insert(1, "one").1);
    /// assert!(!tree.insert(1, "ONE").1);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        match self.try_insert(key, value) {
            Ok(result) => result,
            Err(e) => panic!("AvlTreeMap::insert: {}", e),
        }
    }

    /// Insert a key-value pair, reporting allocator exhaustion.
    ///
    /// On error the map is exactly as it was before the call.
    pub fn try_insert(&mut self, key: K, value: V) -> ModifyResult<(Position, bool)> {
        let mut touched = (NULL_NODE, false);
        let root = self
            .insert_recursive(self.root, NULL_NODE, key, value, &mut touched)
            .with_operation("insert")?;
        self.set_root(root);

        let (id, inserted) = touched;
        if inserted {
            self.len += 1;
        }
        Ok((self.position_of(id), inserted))
    }

    /// Return the value for `key`, inserting `V::default()` first if the key
    /// is absent.
    ///
    /// # Panics
    ///
    /// Panics if a node has to be allocated and the allocator refuses.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut counts = AvlTreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        match self.try_get_or_insert_default(key) {
            Ok(value) => value,
            Err(e) => panic!("AvlTreeMap::get_or_insert_default: {}", e),
        }
    }

    /// Fallible form of [`get_or_insert_default`](Self::get_or_insert_default).
    pub fn try_get_or_insert_default(&mut self, key: K) -> ModifyResult<&mut V>
    where
        V: Default,
    {
        let mut id = self.find_node(&key);
        if id == NULL_NODE {
            let (position, _) = self.try_insert(key, V::default())?;
            id = position.id;
        }
        Ok(&mut self.nodes[id].value)
    }

    /// Insert below `id`, returning the new root of that subtree.
    ///
    /// `touched` receives the node holding the key and whether it was
    /// created. Nothing is relinked before the allocation succeeds, so an
    /// error leaves the subtree untouched.
    fn insert_recursive(
        &mut self,
        id: NodeId,
        parent: NodeId,
        key: K,
        value: V,
        touched: &mut (NodeId, bool),
    ) -> ModifyResult<NodeId> {
        if id == NULL_NODE {
            let created = self.nodes.allocate(Node::new(key, value, parent))?;
            *touched = (created, true);
            return Ok(created);
        }

        match self.comparator.compare(&key, &self.nodes[id].key) {
            Ordering::Less => {
                let left = self.nodes[id].left;
                let subtree = self.insert_recursive(left, id, key, value, touched)?;
                self.set_left(id, subtree);
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                let subtree = self.insert_recursive(right, id, key, value, touched)?;
                self.set_right(id, subtree);
            }
            Ordering::Equal => {
                self.nodes[id].value = value;
                *touched = (id, false);
                return Ok(id);
            }
        }

        Ok(self.rebalance(id))
    }
}

impl<K, V, C, A> Extend<(K, V)> for AvlTreeMap<K, V, C, A>
where
    C: Comparator<K>,
    A: NodeAllocator<Node<K, V>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = AvlTreeMap::new();
        tree.extend(iter);
        tree
    }
}
