//! Iterator implementations for AvlTreeMap.
//!
//! Shared iterators step through the tree with the successor and predecessor
//! links, one end each, and stop when the two ends have handed out `len`
//! entries between them. Mutable and owning iterators collect the in-order
//! node sequence once up front.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::allocator::NodeAllocator;
use crate::compact_arena::CompactArena;
use crate::node::{maximum, minimum, predecessor, successor};
use crate::types::{AvlTreeMap, Node, NodeId, NULL_NODE};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in key order.
pub struct Iter<'a, K, V, A = CompactArena<Node<K, V>>> {
    nodes: &'a A,
    front: NodeId,
    back: NodeId,
    remaining: usize,
    _marker: PhantomData<&'a Node<K, V>>,
}

/// Iterator over keys in order.
pub struct Keys<'a, K, V, A = CompactArena<Node<K, V>>> {
    items: Iter<'a, K, V, A>,
}

/// Iterator over values in key order.
pub struct Values<'a, K, V, A = CompactArena<Node<K, V>>> {
    items: Iter<'a, K, V, A>,
}

/// Iterator over keys and mutable values in key order.
pub struct IterMut<'a, K, V> {
    entries: std::vec::IntoIter<&'a mut Node<K, V>>,
}

/// Iterator over mutable values in key order.
pub struct ValuesMut<'a, K, V> {
    items: IterMut<'a, K, V>,
}

/// Owning iterator over key-value pairs in key order.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

// ============================================================================
// MAP ITERATOR METHODS
// ============================================================================

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    /// Returns an iterator over all entries in ascending key order.
    /// Call `.rev()` on it for descending order.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter {
            nodes: &self.nodes,
            front: minimum(&self.nodes, self.root),
            back: maximum(&self.nodes, self.root),
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over all keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, A> {
        Keys { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> Values<'_, K, V, A> {
        Values { items: self.iter() }
    }

    /// Returns an iterator with mutable access to every value.
    ///
    /// Unlike [`iter`](Self::iter) this is not lazy: the call walks the whole
    /// tree once and builds an O(n) table of node borrows (one entry per
    /// arena slot) before the first item is yielded.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree: AvlTreeMap<_, _> = (1..=3).map(|k| (k, k)).collect();
    /// for (k, v) in tree.iter_mut() {
    ///     *v *= k * 10;
    /// }
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), [10, 40, 90]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.in_order_ids();

        // Hand out each node's mutable borrow exactly once, by slot index
        let mut slots: Vec<Option<&mut Node<K, V>>> = Vec::new();
        for (id, node) in self.nodes.occupied_mut() {
            let index = id as usize;
            if slots.len() <= index {
                slots.resize_with(index + 1, || None);
            }
            slots[index] = Some(node);
        }

        let entries: Vec<&mut Node<K, V>> = order
            .into_iter()
            .filter_map(|id| slots.get_mut(id as usize).and_then(Option::take))
            .collect();
        IterMut {
            entries: entries.into_iter(),
        }
    }

    /// Returns an iterator over mutable values in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            items: self.iter_mut(),
        }
    }

    /// Node ids in ascending key order.
    pub(crate) fn in_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut current = minimum(&self.nodes, self.root);
        while current != NULL_NODE {
            ids.push(current);
            current = successor(&self.nodes, current);
        }
        ids
    }
}

// ============================================================================
// ITER IMPLEMENTATION
// ============================================================================

impl<'a, K, V, A> Iterator for Iter<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a A = self.nodes;
        let node = &nodes[self.front];
        self.remaining -= 1;
        self.front = successor(nodes, self.front);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Iter<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a A = self.nodes;
        let node = &nodes[self.back];
        self.remaining -= 1;
        self.back = predecessor(nodes, self.back);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V, A> ExactSizeIterator for Iter<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

impl<'a, K, V, A> FusedIterator for Iter<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

impl<'a, K, V, A> Clone for Iter<'a, K, V, A> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

// ============================================================================
// KEYS / VALUES IMPLEMENTATION
// ============================================================================

impl<'a, K, V, A> Iterator for Keys<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Keys<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V, A> ExactSizeIterator for Keys<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

impl<'a, K, V, A> FusedIterator for Keys<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

impl<'a, K, V, A> Iterator for Values<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V, A> DoubleEndedIterator for Values<'a, K, V, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V, A> ExactSizeIterator for Values<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

impl<'a, K, V, A> FusedIterator for Values<'a, K, V, A> where A: NodeAllocator<Node<K, V>> {}

// ============================================================================
// ITERMUT / VALUESMUT IMPLEMENTATION
// ============================================================================

fn split_entry<K, V>(node: &mut Node<K, V>) -> (&K, &mut V) {
    let Node { key, value, .. } = node;
    (&*key, value)
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(split_entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back().map(split_entry)
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}

// ============================================================================
// INTOITER IMPLEMENTATION
// ============================================================================

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C, A> IntoIterator for AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let order = self.in_order_ids();
        let mut nodes = self.nodes;
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|id| nodes.deallocate(id))
            .map(|node| (node.key, node.value))
            .collect();
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Iter<'a, K, V, A> {
        self.iter()
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a mut AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

// ============================================================================
// MAP-LEVEL TRAITS BUILT ON ITERATION
// ============================================================================

impl<K, V, C, A> fmt::Debug for AvlTreeMap<K, V, C, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: NodeAllocator<Node<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, A> PartialEq for AvlTreeMap<K, V, C, A>
where
    K: PartialEq,
    V: PartialEq,
    A: NodeAllocator<Node<K, V>>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C, A> Eq for AvlTreeMap<K, V, C, A>
where
    K: Eq,
    V: Eq,
    A: NodeAllocator<Node<K, V>>,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvlTreeMap<i32, &'static str> {
        [
            (5, "five"),
            (3, "three"),
            (7, "seven"),
            (1, "one"),
            (4, "four"),
            (6, "six"),
            (8, "eight"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_forward_and_reverse() {
        let tree = sample();
        let forward: Vec<i32> = tree.keys().copied().collect();
        let reverse: Vec<i32> = tree.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(forward, vec![1, 3, 4, 5, 6, 7, 8]);
        assert_eq!(reverse, vec![8, 7, 6, 5, 4, 3, 1]);
        assert_eq!(tree.iter().len(), 7);
    }

    #[test]
    fn test_double_ended_meet_in_middle() {
        let tree = sample();
        let mut iter = tree.keys();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&8));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.len(), 3);
        let rest: Vec<_> = iter.copied().collect();
        assert_eq!(rest, vec![4, 5, 6]);
    }

    #[test]
    fn test_empty_iteration() {
        let tree: AvlTreeMap<u8, u8> = AvlTreeMap::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
    }

    #[test]
    fn test_iter_mut_after_churn() {
        let mut tree: AvlTreeMap<i32, i32> = (0..64).map(|k| (k, 0)).collect();
        for k in (0..64).step_by(3) {
            tree.erase(&k);
        }
        for (k, v) in &mut tree {
            *v = *k;
        }
        assert!(tree.iter().all(|(k, v)| k == v));
        for v in tree.values_mut().rev().take(1) {
            *v = -1;
        }
        assert_eq!(tree.last(), Some((&62, &-1)));
    }

    #[test]
    fn test_into_iter_is_sorted() {
        let tree = sample();
        let owned: Vec<(i32, &str)> = tree.into_iter().collect();
        assert_eq!(owned.first(), Some(&(1, "one")));
        assert_eq!(owned.last(), Some(&(8, "eight")));
        assert_eq!(owned.len(), 7);
    }

    #[test]
    fn test_debug_and_eq() {
        let tree: AvlTreeMap<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1: 'a', 2: 'b'}");
        let same: AvlTreeMap<i32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
        assert_eq!(tree, same);
        let mut different = same.clone();
        different.insert(2, 'c');
        assert_ne!(tree, different);
    }
}
