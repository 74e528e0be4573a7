//! AVL tree implementation in Rust with an ordered-map API.
//!
//! This crate provides a self-balancing binary search tree with a map-like
//! interface, pluggable key ordering and node allocation, and bidirectional
//! cursors that survive unrelated insertions and removals.
//!
//! ```
//! use avltree::{AvlTreeMap, ReverseOrder};
//!
//! let mut tree = AvlTreeMap::with_comparator(ReverseOrder);
//! for k in [2, 9, 4] {
//!     tree.insert(k, k * k);
//! }
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [9, 4, 2]);
//! assert_eq!(tree.at(&4), Ok(&16));
//! assert!(tree.at(&5).unwrap_err().is_key_not_found());
//! ```

#[macro_use]
mod macros;

mod allocator;
mod compact_arena;
mod compare;
mod error;
mod types;
mod node;
mod construction;
mod rebalance;
mod get_operations;
mod insert_operations;
mod delete_operations;
mod cursor;
mod iteration;
mod validation;

pub use allocator::NodeAllocator;
pub use compact_arena::{CompactArena, CompactArenaStats};
pub use compare::{Comparator, FnComparator, NaturalOrder, ReverseOrder};
pub use cursor::Cursor;
pub use error::{
    AvlResult, AvlResultExt, AvlTreeError, CursorResult, InitResult, KeyResult, ModifyResult,
};
pub use iteration::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use types::{AvlTreeMap, Height, Node, NodeId, Position, NULL_NODE};
