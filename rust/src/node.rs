//! Local navigation helpers for tree nodes.
//!
//! Nodes live in an allocator and refer to each other by [`NodeId`], so these
//! helpers take the allocator alongside the id they start from. They only
//! read links; none of them allocates or restructures.

use crate::allocator::NodeAllocator;
use crate::types::{Height, Node, NodeId, NULL_NODE};

navigation!(minimum, successor, left, right);
navigation!(maximum, predecessor, right, left);

/// Cached height of the subtree at `id`, 0 for an absent subtree.
#[inline]
pub(crate) fn height<K, V, A>(nodes: &A, id: NodeId) -> Height
where
    A: NodeAllocator<Node<K, V>>,
{
    if id == NULL_NODE {
        0
    } else {
        nodes[id].height
    }
}

/// Recompute the cached height of `id` from its children.
#[inline]
pub(crate) fn update_height<K, V, A>(nodes: &mut A, id: NodeId)
where
    A: NodeAllocator<Node<K, V>>,
{
    let left = height(nodes, nodes[id].left);
    let right = height(nodes, nodes[id].right);
    nodes[id].height = 1 + left.max(right);
}

/// `height(left) - height(right)`; positive means left-heavy.
#[inline]
pub(crate) fn balance_factor<K, V, A>(nodes: &A, id: NodeId) -> Height
where
    A: NodeAllocator<Node<K, V>>,
{
    if id == NULL_NODE {
        return 0;
    }
    height(nodes, nodes[id].left) - height(nodes, nodes[id].right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact_arena::CompactArena;

    /// Hand-built tree:
    ///
    /// ```text
    ///        4
    ///      /   \
    ///     2     6
    ///    / \     \
    ///   1   3     7
    /// ```
    fn sample() -> (CompactArena<Node<i32, ()>>, NodeId) {
        let mut nodes = CompactArena::new();
        let ids: Vec<NodeId> = [4, 2, 6, 1, 3, 7]
            .iter()
            .map(|&k| nodes.allocate(Node::new(k, (), NULL_NODE)).unwrap())
            .collect();
        let (n4, n2, n6, n1, n3, n7) = (ids[0], ids[1], ids[2], ids[3], ids[4], ids[5]);

        let mut link = |parent: NodeId, left: NodeId, right: NodeId| {
            nodes[parent].left = left;
            nodes[parent].right = right;
            for child in [left, right] {
                if child != NULL_NODE {
                    nodes[child].parent = parent;
                }
            }
        };
        link(n2, n1, n3);
        link(n6, NULL_NODE, n7);
        link(n4, n2, n6);

        for id in [n1, n3, n7, n2, n6, n4] {
            update_height(&mut nodes, id);
        }
        (nodes, n4)
    }

    fn key_of(nodes: &CompactArena<Node<i32, ()>>, id: NodeId) -> Option<i32> {
        nodes.get(id).map(|n| n.key)
    }

    #[test]
    fn test_extremes() {
        let (nodes, root) = sample();
        assert_eq!(key_of(&nodes, minimum(&nodes, root)), Some(1));
        assert_eq!(key_of(&nodes, maximum(&nodes, root)), Some(7));
        assert_eq!(minimum(&nodes, NULL_NODE), NULL_NODE);
    }

    #[test]
    fn test_successor_walks_in_order() {
        let (nodes, root) = sample();
        let mut keys = Vec::new();
        let mut id = minimum(&nodes, root);
        while id != NULL_NODE {
            keys.push(nodes[id].key);
            id = successor(&nodes, id);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn test_predecessor_walks_in_reverse() {
        let (nodes, root) = sample();
        let mut keys = Vec::new();
        let mut id = maximum(&nodes, root);
        while id != NULL_NODE {
            keys.push(nodes[id].key);
            id = predecessor(&nodes, id);
        }
        assert_eq!(keys, vec![7, 6, 4, 3, 2, 1]);
    }

    #[test]
    fn test_heights_and_balance() {
        let (nodes, root) = sample();
        assert_eq!(height(&nodes, root), 3);
        assert_eq!(balance_factor(&nodes, root), 0);
        let six = nodes[root].right;
        assert_eq!(balance_factor(&nodes, six), -1);
        let seven = nodes[six].right;
        assert_eq!((nodes[seven].left, nodes[seven].right), (NULL_NODE, NULL_NODE));
    }
}
