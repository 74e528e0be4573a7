//! End-to-end behavior of the public map API.

use avltree::{AvlTreeError, AvlTreeMap, CompactArena, FnComparator, ReverseOrder};

fn numbered() -> AvlTreeMap<i32, &'static str> {
    let mut tree = AvlTreeMap::new();
    for (k, v) in [
        (5, "five"),
        (3, "three"),
        (7, "seven"),
        (1, "one"),
        (4, "four"),
        (6, "six"),
        (8, "eight"),
    ] {
        tree.insert(k, v);
    }
    tree
}

#[test]
fn test_forward_and_reverse_iteration() {
    let tree = numbered();
    let forward: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(forward, vec![1, 3, 4, 5, 6, 7, 8]);

    let mut reverse = Vec::new();
    let mut cursor = tree.end();
    while cursor.move_prev().is_ok() {
        reverse.push(*cursor.key().unwrap());
    }
    assert_eq!(reverse, vec![8, 7, 6, 5, 4, 3, 1]);
}

#[test]
fn test_ascending_inserts_are_balanced() {
    let mut tree = AvlTreeMap::new();
    for k in 0..100 {
        tree.insert(k, k);
    }
    assert!(tree.validate());
    assert_eq!(tree.len(), 100);
    assert!((7..=8).contains(&tree.height()), "height {}", tree.height());
}

#[test]
fn test_erase_even_keys() {
    let mut tree: AvlTreeMap<i32, ()> = (1..=10).map(|k| (k, ())).collect();
    for k in (2..=10).step_by(2) {
        assert_eq!(tree.erase(&k), 1);
    }
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
    assert!(tree.validate());
}

#[test]
fn test_at_missing_key() {
    let tree = numbered();
    assert_eq!(tree.at(&99), Err(AvlTreeError::KeyNotFound));
    assert_eq!(tree.at(&4), Ok(&"four"));
}

#[test]
fn test_copy_is_structurally_independent() {
    let mut original: AvlTreeMap<i32, String> =
        (1..=3).map(|k| (k, k.to_string())).collect();
    let copy = original.clone();
    original.erase(&2);
    assert_eq!(copy.len(), 3);
    assert_eq!(original.len(), 2);
    assert_eq!(copy.get(&2).map(String::as_str), Some("2"));
    assert!(copy.validate());
    assert!(original.validate());
}

#[test]
fn test_duplicate_insert_overwrites() {
    let mut tree = AvlTreeMap::new();
    assert!(tree.insert(1, "one").1);
    let size = tree.len();
    assert!(!tree.insert(1, "ONE").1);
    assert_eq!(tree.len(), size);
    assert_eq!(tree.get(&1), Some(&"ONE"));
}

#[test]
fn test_round_trip_to_empty() {
    let keys: Vec<u32> = (0..500).map(|i| (i * 173) % 500).collect();
    let mut tree = AvlTreeMap::new();
    for &k in &keys {
        tree.insert(k, ());
    }
    for k in keys.iter().step_by(2).chain(keys.iter().skip(1).step_by(2)) {
        assert_eq!(tree.erase(k), 1);
    }
    assert!(tree.is_empty());
    assert!(tree.begin() == tree.end());
    assert!(tree.validate());
}

#[test]
fn test_cursor_walk_erasing_every_other_entry() {
    let mut tree: AvlTreeMap<i32, i32> = (0..20).map(|k| (k, k)).collect();
    let mut position = tree.begin().position();
    let mut keep = true;
    while !position.is_end() {
        position = if keep {
            let mut cursor = tree.cursor_at(position).unwrap();
            cursor.move_next().unwrap();
            cursor.position()
        } else {
            tree.erase_at(position).unwrap()
        };
        keep = !keep;
    }
    assert_eq!(
        tree.keys().copied().collect::<Vec<_>>(),
        (0..20).step_by(2).collect::<Vec<_>>()
    );
    assert!(tree.validate());
}

#[test]
fn test_custom_orderings() {
    let mut reversed = AvlTreeMap::with_comparator(ReverseOrder);
    reversed.extend((1..=5).map(|k| (k, ())));
    assert_eq!(reversed.keys().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    assert!(reversed.validate());

    // Keys equal under the ordering share one entry
    let mut folded = AvlTreeMap::with_comparator(FnComparator(|a: &String, b: &String| {
        a.to_lowercase() < b.to_lowercase()
    }));
    folded.insert("Apple".to_string(), 1);
    assert!(!folded.insert("APPLE".to_string(), 2).1);
    assert_eq!(folded.len(), 1);
    assert_eq!(folded.get(&"apple".to_string()), Some(&2));
}

#[test]
fn test_bounded_allocator_reports_exhaustion() {
    let mut tree = AvlTreeMap::with_allocator(CompactArena::with_limit(3));
    for k in 0..3 {
        tree.try_insert(k, k).unwrap();
    }
    let err = tree.try_insert(3, 3).unwrap_err();
    assert!(err.is_allocation_error());
    assert_eq!(tree.len(), 3);
    assert!(tree.validate());

    // Freed slots are usable again
    tree.erase(&0);
    assert!(tree.try_insert(3, 3).is_ok());
    assert!(tree.try_clone().is_ok());
}

#[test]
fn test_swap_and_take() {
    let mut a: AvlTreeMap<i32, i32> = (0..3).map(|k| (k, k)).collect();
    let mut b: AvlTreeMap<i32, i32> = AvlTreeMap::new();
    a.swap(&mut b);
    assert!(a.is_empty());
    assert_eq!(b.len(), 3);

    let taken = b.take();
    assert!(b.is_empty());
    assert_eq!(taken.len(), 3);
    assert!(taken.validate());
}
