//! Compact arena used as the default node allocator.
//! Freed slots go on a free list and are reused before the storage grows.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::allocator::NodeAllocator;
use crate::error::{AvlResult, AvlTreeError};
use crate::types::{NodeId, NULL_NODE};

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Source of arena epochs; 0 is never handed out.
static NEXT_EPOCH: AtomicU32 = AtomicU32::new(1);

fn next_epoch() -> u32 {
    loop {
        let epoch = NEXT_EPOCH.fetch_add(1, Ordering::Relaxed);
        if epoch != 0 {
            return epoch;
        }
    }
}

/// Arena allocator with slot reuse and generation tracking.
#[derive(Debug)]
pub struct CompactArena<T> {
    storage: Vec<Option<T>>,
    /// Bumped every time the matching slot is released
    generations: Vec<u32>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    allocated: usize,
    /// Maximum number of live items, if any
    limit: Option<usize>,
    /// Distinguishes this arena's positions from every other arena's
    epoch: u32,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            allocated: 0,
            limit: None,
            epoch: next_epoch(),
        }
    }

    /// Create a new compact arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Create an arena that refuses to hold more than `limit` live items.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    /// The configured item limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated
    }

    /// Check if the arena holds no items
    pub fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// Get the number of free slots waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.allocated;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    fn slot_index(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        usize::try_from(id).ok().filter(|&index| index < self.storage.len())
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeAllocator<T> for CompactArena<T> {
    #[inline]
    fn allocate(&mut self, item: T) -> AvlResult<NodeId> {
        if let Some(limit) = self.limit {
            if self.allocated >= limit {
                log::warn!("node arena exhausted at {} live nodes", limit);
                return Err(AvlTreeError::allocation_error(
                    "node",
                    &format!("arena limit of {} nodes reached", limit),
                ));
            }
        }

        let index = match self.free_list.pop() {
            Some(free_index) => {
                self.storage[free_index] = Some(item);
                free_index
            }
            None => {
                let index = self.storage.len();
                // NULL_NODE is reserved, so the last usable id is NULL_NODE - 1
                if NodeId::try_from(index).map_or(true, |id| id == NULL_NODE) {
                    return Err(AvlTreeError::allocation_error(
                        "node",
                        "node id space exhausted",
                    ));
                }
                self.storage.push(Some(item));
                self.generations.push(0);
                index
            }
        };

        self.allocated += 1;
        Ok(index as NodeId)
    }

    #[inline]
    fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = self.slot_index(id)?;
        let item = self.storage[index].take()?;

        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_list.push(index);
        self.allocated -= 1;
        Some(item)
    }

    #[inline]
    fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.slot_index(id)?;
        self.storage[index].as_ref()
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.slot_index(id)?;
        self.storage[index].as_mut()
    }

    fn generation(&self, id: NodeId) -> Option<u32> {
        let index = self.slot_index(id)?;
        self.storage[index].as_ref().map(|_| self.generations[index])
    }

    fn epoch(&self) -> u32 {
        self.epoch
    }

    fn allocated_count(&self) -> usize {
        self.allocated
    }

    fn clear(&mut self) {
        // Generations survive a clear so positions taken before it stay stale
        for (index, slot) in self.storage.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.generations[index] = self.generations[index].wrapping_add(1);
            }
        }
        self.free_list.clear();
        self.free_list.extend((0..self.storage.len()).rev());
        self.allocated = 0;
    }

    fn fresh(&self) -> Self {
        Self {
            limit: self.limit,
            ..Self::new()
        }
    }

    fn occupied_mut<'a>(&'a mut self) -> impl Iterator<Item = (NodeId, &'a mut T)>
    where
        T: 'a,
    {
        self.storage
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|item| (index as NodeId, item)))
    }
}

impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("node {} is not allocated", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_reuse_slot() {
        let mut arena = CompactArena::new();
        let a = arena.allocate("a").unwrap();
        let b = arena.allocate("b").unwrap();
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[a], "a");

        let gen_before = arena.generation(a).unwrap();
        assert_eq!(arena.deallocate(a), Some("a"));
        assert_eq!(arena.generation(a), None);
        assert_eq!(arena.free_count(), 1);

        // The freed slot is handed out again with a new generation
        let c = arena.allocate("c").unwrap();
        assert_eq!(c, a);
        assert_ne!(arena.generation(c), Some(gen_before));
        assert_eq!(arena[b], "b");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_deallocate_twice_is_none() {
        let mut arena = CompactArena::new();
        let a = arena.allocate(1).unwrap();
        assert_eq!(arena.deallocate(a), Some(1));
        assert_eq!(arena.deallocate(a), None);
        assert_eq!(arena.deallocate(NULL_NODE), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut arena = CompactArena::with_limit(2);
        arena.allocate(1).unwrap();
        let second = arena.allocate(2).unwrap();
        let err = arena.allocate(3).unwrap_err();
        assert!(err.is_allocation_error());

        arena.deallocate(second);
        assert!(arena.allocate(4).is_ok());
        assert_eq!(arena.fresh().limit(), Some(2));
    }

    #[test]
    fn test_clear_invalidates_generations() {
        let mut arena = CompactArena::new();
        let a = arena.allocate(10).unwrap();
        let gen = arena.generation(a);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.generation(a), None);
        let b = arena.allocate(11).unwrap();
        assert_eq!(b, a);
        assert_ne!(arena.generation(b), gen);
    }

    #[test]
    fn test_occupied_mut_skips_free_slots() {
        let mut arena = CompactArena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.allocate(i).unwrap()).collect();
        arena.deallocate(ids[1]);
        for (_, item) in arena.occupied_mut() {
            *item *= 10;
        }
        let mut seen: Vec<_> = arena.occupied_mut().map(|(id, item)| (id, *item)).collect();
        seen.sort();
        assert_eq!(seen, vec![(ids[0], 0), (ids[2], 20), (ids[3], 30)]);
    }

    #[test]
    fn test_stats() {
        let mut arena = CompactArena::with_capacity(8);
        let a = arena.allocate(1).unwrap();
        arena.allocate(2).unwrap();
        arena.deallocate(a);
        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 1);
        assert_eq!(stats.free_count, 1);
        assert!(stats.total_capacity >= 8);
        assert!((stats.fragmentation - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fresh_arena_gets_new_epoch() {
        let arena: CompactArena<u8> = CompactArena::with_limit(4);
        let fresh = arena.fresh();
        assert_ne!(arena.epoch(), fresh.epoch());
        assert_ne!(arena.epoch(), CompactArena::<u8>::new().epoch());
        assert_ne!(fresh.epoch(), 0);
    }

    #[test]
    #[should_panic(expected = "not allocated")]
    fn test_index_freed_slot_panics() {
        let mut arena = CompactArena::new();
        let a = arena.allocate(1).unwrap();
        arena.deallocate(a);
        let _ = arena[a];
    }
}
