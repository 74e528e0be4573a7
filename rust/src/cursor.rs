//! Bidirectional cursors over an AvlTreeMap.
//!
//! A [`Cursor`] borrows the map and points either at one entry or at the
//! end. It moves with the in-order successor and predecessor links, so no
//! ancestor stack is kept. Stepping back from the end lands on the largest
//! entry, which is why the cursor carries the map and not only a node.
//!
//! A [`Position`] is the detached form of a cursor, used to hold on to an
//! entry across mutations of the map.

use std::fmt;

use crate::allocator::NodeAllocator;
use crate::compact_arena::CompactArena;
use crate::compare::NaturalOrder;
use crate::error::{AvlTreeError, CursorResult};
use crate::node::{maximum, minimum, predecessor, successor};
use crate::types::{AvlTreeMap, Node, NodeId, Position, NULL_NODE};

/// A read-only cursor into an [`AvlTreeMap`].
///
/// ```
/// use avltree::AvlTreeMap;
///
/// let tree: AvlTreeMap<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
/// let mut cursor = tree.end();
/// cursor.move_prev().unwrap();
/// assert_eq!(cursor.key_value().unwrap(), (&2, &"b"));
/// cursor.move_prev().unwrap();
/// assert!(cursor == tree.begin());
/// assert!(cursor.move_prev().is_err());
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder, A = CompactArena<Node<K, V>>> {
    tree: &'a AvlTreeMap<K, V, C, A>,
    current: NodeId,
}

impl<'a, K, V, C, A> Cursor<'a, K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    pub(crate) fn new(tree: &'a AvlTreeMap<K, V, C, A>, current: NodeId) -> Self {
        Self { tree, current }
    }

    /// Returns true if the cursor is past the last entry.
    pub fn is_end(&self) -> bool {
        self.current == NULL_NODE
    }

    /// The key under the cursor.
    pub fn key(&self) -> CursorResult<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    /// The value under the cursor.
    pub fn value(&self) -> CursorResult<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The entry under the cursor; fails at the end.
    pub fn key_value(&self) -> CursorResult<(&'a K, &'a V)> {
        let tree = self.tree;
        match tree.nodes.get(self.current) {
            Some(node) => Ok((&node.key, &node.value)),
            None => Err(AvlTreeError::invalid_iterator(
                "dereference",
                "cursor is at end",
            )),
        }
    }

    /// Advance to the in-order successor, which is the end after the
    /// largest entry. Fails if the cursor is already at the end.
    pub fn move_next(&mut self) -> CursorResult<()> {
        if self.is_end() {
            return Err(AvlTreeError::invalid_iterator(
                "increment",
                "cursor is at end",
            ));
        }
        self.current = successor(&self.tree.nodes, self.current);
        Ok(())
    }

    /// Step back to the in-order predecessor.
    ///
    /// From the end this moves to the largest entry. Fails, without moving,
    /// on an empty map or when the cursor is at the smallest entry.
    pub fn move_prev(&mut self) -> CursorResult<()> {
        if self.is_end() {
            if self.tree.root == NULL_NODE {
                return Err(AvlTreeError::invalid_iterator(
                    "decrement",
                    "end cursor of an empty map",
                ));
            }
            self.current = maximum(&self.tree.nodes, self.tree.root);
            return Ok(());
        }

        let previous = predecessor(&self.tree.nodes, self.current);
        if previous == NULL_NODE {
            return Err(AvlTreeError::invalid_iterator(
                "decrement",
                "cursor is at the first entry",
            ));
        }
        self.current = previous;
        Ok(())
    }

    /// Detach the cursor from its borrow of the map.
    pub fn position(&self) -> Position {
        self.tree.position_of(self.current)
    }
}

impl<'a, K, V, C, A> Clone for Cursor<'a, K, V, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, C, A> Copy for Cursor<'a, K, V, C, A> {}

impl<'a, K, V, C, A> PartialEq for Cursor<'a, K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<'a, K, V, C, A> Eq for Cursor<'a, K, V, C, A> {}

impl<'a, K, V, C, A> fmt::Debug for Cursor<'a, K, V, C, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: NodeAllocator<Node<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key_value() {
            Ok((k, v)) => f.debug_tuple("Cursor").field(k).field(v).finish(),
            Err(_) => f.write_str("Cursor(end)"),
        }
    }
}

// ============================================================================
// MAP-SIDE CURSOR METHODS
// ============================================================================

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    /// Cursor at the smallest entry, or the end cursor if the map is empty.
    pub fn begin(&self) -> Cursor<'_, K, V, C, A> {
        Cursor::new(self, minimum(&self.nodes, self.root))
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, K, V, C, A> {
        Cursor::new(self, NULL_NODE)
    }

    /// Reattach a position to this map.
    ///
    /// Fails if the entry the position named has been erased.
    pub fn cursor_at(&self, position: Position) -> CursorResult<Cursor<'_, K, V, C, A>> {
        let id = self.resolve(position)?;
        Ok(Cursor::new(self, id))
    }

    /// Mutable access to the value at `position`.
    ///
    /// ```
    /// use avltree::AvlTreeMap;
    ///
    /// let mut tree = AvlTreeMap::new();
    /// let (position, _) = tree.insert("k", 1);
    /// *tree.value_at_mut(position).unwrap() = 5;
    /// assert_eq!(tree.get(&"k"), Some(&5));
    /// ```
    pub fn value_at_mut(&mut self, position: Position) -> CursorResult<&mut V> {
        let id = self.resolve(position)?;
        match self.nodes.get_mut(id) {
            Some(node) => Ok(&mut node.value),
            None => Err(AvlTreeError::invalid_iterator(
                "dereference",
                "position is at end",
            )),
        }
    }

    /// Position of a live node, or `Position::END` for `NULL_NODE`.
    pub(crate) fn position_of(&self, id: NodeId) -> Position {
        match self.nodes.generation(id) {
            Some(generation) => Position {
                id,
                generation,
                epoch: self.nodes.epoch(),
            },
            None => Position::END,
        }
    }

    /// Turn a position back into a node id, rejecting stale positions and
    /// positions from other allocators.
    pub(crate) fn resolve(&self, position: Position) -> CursorResult<NodeId> {
        if position.is_end() {
            return Ok(NULL_NODE);
        }
        if position.epoch != self.nodes.epoch() {
            return Err(AvlTreeError::invalid_iterator(
                "use position",
                "it was issued by another map",
            ));
        }
        match self.nodes.generation(position.id) {
            Some(generation) if generation == position.generation => Ok(position.id),
            _ => Err(AvlTreeError::invalid_iterator(
                "use position",
                "its entry has been erased",
            )),
        }
    }
}
