//! Construction, copying and whole-map exchange for AvlTreeMap.
//!
//! The comparator and allocator are injected here and never change for the
//! life of the map, except through [`AvlTreeMap::swap`] which exchanges them
//! together with the trees.

use std::marker::PhantomData;

use crate::allocator::NodeAllocator;
use crate::compact_arena::CompactArena;
use crate::compare::NaturalOrder;
use crate::error::InitResult;
use crate::types::{AvlTreeMap, Node, NodeId, NULL_NODE};

impl<K, V> AvlTreeMap<K, V> {
    /// Create an empty map ordered by `K: Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let tree = AvlTreeMap::<i32, String>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator_and_allocator(NaturalOrder, CompactArena::new())
    }

    /// Create an empty map whose arena has room for `capacity` nodes
    /// before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator_and_allocator(NaturalOrder, CompactArena::with_capacity(capacity))
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Create an empty map ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_allocator(comparator, CompactArena::new())
    }
}

impl<K, V, A> AvlTreeMap<K, V, NaturalOrder, A> {
    /// Create an empty map that stores its nodes in `allocator`.
    ///
    /// ```
    /// use avltree::{AvlTreeMap, CompactArena};
    ///
    /// let mut tree = AvlTreeMap::with_allocator(CompactArena::with_limit(1));
    /// assert!(tree.try_insert(1, "one").is_ok());
    /// assert!(tree.try_insert(2, "two").is_err());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_allocator(allocator: A) -> Self {
        Self::with_comparator_and_allocator(NaturalOrder, allocator)
    }
}

impl<K, V, C, A> AvlTreeMap<K, V, C, A> {
    /// Create an empty map from both collaborators.
    pub fn with_comparator_and_allocator(comparator: C, allocator: A) -> Self {
        Self {
            root: NULL_NODE,
            len: 0,
            comparator,
            nodes: allocator,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator holding this map's nodes.
    pub fn allocator(&self) -> &A {
        &self.nodes
    }

    /// Exchange the contents, comparators and allocators of two maps in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    /// Move the contents out into a new map, leaving this one empty with the
    /// same comparator and allocator configuration.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut source: AvlTreeMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// let moved = source.take();
    /// assert_eq!(moved.len(), 2);
    /// assert!(source.is_empty());
    /// ```
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        let empty = Self::with_comparator_and_allocator(self.comparator.clone(), self.nodes.fresh());
        std::mem::replace(self, empty)
    }
}

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Clone,
    A: NodeAllocator<Node<K, V>>,
{
    /// Deep-copy the map into a fresh allocator.
    ///
    /// The copy has the same shape as the original, node for node, with new
    /// node identities. If the allocator runs out part way, the partial copy
    /// is dropped and the error is returned; the original is never touched.
    pub fn try_clone(&self) -> InitResult<Self> {
        let mut nodes = self.nodes.fresh();
        let root = copy_tree(&self.nodes, &mut nodes, self.root, NULL_NODE)?;
        log::debug!("copied AVL tree of {} nodes", self.len);

        Ok(Self {
            root,
            len: self.len,
            comparator: self.comparator.clone(),
            nodes,
            _marker: PhantomData,
        })
    }
}

/// Recursively allocate a copy of the subtree at `id` under `parent`.
///
/// Heights are carried over rather than recomputed; they are already correct
/// in any tree that satisfies the class invariants.
fn copy_tree<K, V, A>(source: &A, target: &mut A, id: NodeId, parent: NodeId) -> InitResult<NodeId>
where
    K: Clone,
    V: Clone,
    A: NodeAllocator<Node<K, V>>,
{
    if id == NULL_NODE {
        return Ok(NULL_NODE);
    }

    let original = &source[id];
    let copy = target.allocate(Node {
        key: original.key.clone(),
        value: original.value.clone(),
        left: NULL_NODE,
        right: NULL_NODE,
        parent,
        height: original.height,
    })?;

    let left = copy_tree(source, target, original.left, copy)?;
    let right = copy_tree(source, target, original.right, copy)?;
    target[copy].left = left;
    target[copy].right = right;
    Ok(copy)
}

impl<K, V, C, A> Clone for AvlTreeMap<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Clone,
    A: NodeAllocator<Node<K, V>>,
{
    /// # Panics
    ///
    /// Panics if the allocator cannot hold the copy. Use
    /// [`AvlTreeMap::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(e) => panic!("failed to clone AvlTreeMap: {}", e),
        }
    }
}

impl<K, V, C, A> Default for AvlTreeMap<K, V, C, A>
where
    C: Default,
    A: Default,
{
    fn default() -> Self {
        Self::with_comparator_and_allocator(C::default(), A::default())
    }
}
