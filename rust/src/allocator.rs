//! Node allocator capability consumed by AvlTreeMap.
//!
//! The tree never creates or frees a node by itself. Every node enters the
//! tree through [`NodeAllocator::allocate`] and leaves it through
//! [`NodeAllocator::deallocate`]; links between nodes are plain [`NodeId`]
//! handles resolved by indexing the allocator.

use std::ops::{Index, IndexMut};

use crate::error::AvlResult;
use crate::types::NodeId;

/// Storage strategy for tree nodes.
///
/// `allocate` receives a fully constructed item, so a failed allocation never
/// leaves a half-built node behind, and the caller links the returned id only
/// after it has been handed out.
///
/// Indexing with an id that is not currently allocated is a bug in the caller
/// and panics, the same way slice indexing does.
pub trait NodeAllocator<T>: Index<NodeId, Output = T> + IndexMut<NodeId> {
    /// Store `item` and return its handle.
    fn allocate(&mut self, item: T) -> AvlResult<NodeId>;

    /// Release the slot behind `id` and return the item it held.
    fn deallocate(&mut self, id: NodeId) -> Option<T>;

    /// Checked shared access.
    fn get(&self, id: NodeId) -> Option<&T>;

    /// Checked mutable access.
    fn get_mut(&mut self, id: NodeId) -> Option<&mut T>;

    /// Generation of the live item at `id`, `None` when the slot is free.
    ///
    /// Generations change whenever a slot is released, which lets a stored
    /// handle tell its own node apart from a later node reusing the slot.
    fn generation(&self, id: NodeId) -> Option<u32>;

    /// Identifies this allocator among all live allocators.
    ///
    /// Generations only distinguish items within one allocator; positions also
    /// record the epoch so they are rejected by any other allocator. `fresh`
    /// must hand out a new epoch.
    fn epoch(&self) -> u32;

    /// Number of live items.
    fn allocated_count(&self) -> usize;

    /// Release every item at once.
    fn clear(&mut self);

    /// An empty allocator configured like this one.
    fn fresh(&self) -> Self
    where
        Self: Sized;

    /// Every live item with its id, each visited exactly once.
    fn occupied_mut<'a>(&'a mut self) -> impl Iterator<Item = (NodeId, &'a mut T)>
    where
        T: 'a;
}
