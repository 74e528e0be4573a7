//! Core types and data structures for AvlTreeMap.
//!
//! This module contains the map itself, the node layout, and the handle types
//! shared by the rest of the implementation.

use std::marker::PhantomData;

use crate::compact_arena::CompactArena;
use crate::compare::NaturalOrder;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Marks an absent child, the missing parent of the root, and the end position.
pub const NULL_NODE: NodeId = u32::MAX;

/// Subtree height; an absent subtree has height 0 and a leaf height 1.
pub type Height = i32;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Ordered map backed by an AVL tree.
///
/// Every node keeps the heights of its two subtrees within one of each other,
/// so the tree height stays logarithmic in the number of entries and every
/// single-key operation costs O(log n) in the worst case.
///
/// # Type Parameters
///
/// * `K` - Key type, ordered by the comparator `C`
/// * `V` - Value type
/// * `C` - Total order over keys, [`NaturalOrder`] by default
/// * `A` - Node allocator, [`CompactArena`] by default
///
/// # Examples
///
/// ```
/// use avltree::AvlTreeMap;
///
/// let mut tree = AvlTreeMap::new();
/// tree.insert(5, "five");
/// tree.insert(3, "three");
/// tree.insert(7, "seven");
///
/// assert_eq!(tree.get(&3), Some(&"three"));
/// assert_eq!(tree.len(), 3);
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [3, 5, 7]);
/// let reversed: Vec<_> = tree.keys().rev().copied().collect();
/// assert_eq!(reversed, [7, 5, 3]);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n)
/// - **Lookup**: O(log n)
/// - **Deletion**: O(log n)
/// - **Iteration**: O(n) for a full pass, O(log n) worst case per step
/// - **Clone**: O(n)
/// - **Swap**: O(1)
pub struct AvlTreeMap<K, V, C = NaturalOrder, A = CompactArena<Node<K, V>>> {
    /// The root node, `NULL_NODE` when the map is empty.
    pub(crate) root: NodeId,
    /// Number of nodes reachable from the root.
    pub(crate) len: usize,
    /// Key ordering.
    pub(crate) comparator: C,
    /// Owns every node of the tree.
    pub(crate) nodes: A,
    pub(crate) _marker: PhantomData<fn() -> (K, V)>,
}

/// A single tree vertex.
///
/// Children are owned through the allocator; `parent` is a navigation-only
/// back link and is `NULL_NODE` for the root.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    /// Height of the subtree rooted here.
    pub(crate) height: Height,
}

impl<K, V> Node<K, V> {
    /// A detached leaf.
    pub(crate) fn new(key: K, value: V, parent: NodeId) -> Self {
        Self {
            key,
            value,
            left: NULL_NODE,
            right: NULL_NODE,
            parent,
            height: 1,
        }
    }
}

// ============================================================================
// POSITIONS
// ============================================================================

/// A detached reference to one entry of a map, or to its end.
///
/// A position does not borrow the map, so it can be kept across mutations.
/// It stays valid until the entry it names is erased; after that every
/// operation taking it reports [`AvlTreeError::InvalidIterator`]. Positions
/// are bound to the allocator that issued them, so a position taken from one
/// map is also rejected by its clones and by the empty map `take` leaves.
///
/// [`AvlTreeError::InvalidIterator`]: crate::AvlTreeError::InvalidIterator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) id: NodeId,
    pub(crate) generation: u32,
    /// Epoch of the allocator that issued the position.
    pub(crate) epoch: u32,
}

impl Position {
    /// The past-the-end position shared by every map.
    pub const END: Position = Position {
        id: NULL_NODE,
        generation: 0,
        epoch: 0,
    };

    /// Returns true if this is the end position.
    pub fn is_end(&self) -> bool {
        self.id == NULL_NODE
    }
}

/// Outcome of erasing a key from a subtree.
pub(crate) struct Removed<K, V> {
    /// New root of the subtree after rebalancing.
    pub(crate) subtree: NodeId,
    /// The detached node's payload, if the key was present.
    pub(crate) entry: Option<(K, V)>,
}
