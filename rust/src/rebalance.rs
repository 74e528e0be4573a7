//! AVL rotations and the rebalance step applied on the way back up from
//! every insertion and deletion.

use crate::allocator::NodeAllocator;
use crate::node::{balance_factor, update_height};
use crate::types::{AvlTreeMap, Node, NodeId, NULL_NODE};

impl<K, V, C, A> AvlTreeMap<K, V, C, A>
where
    A: NodeAllocator<Node<K, V>>,
{
    rotations!(left, left, right);
    rotations!(right, right, left);

    /// Refresh the height of `id` and restore its balance.
    ///
    /// Returns the root of the subtree after any rotation. The returned node
    /// inherits the parent link of `id`; the caller stores it in the parent's
    /// child slot (or in `root`).
    pub(crate) fn rebalance(&mut self, id: NodeId) -> NodeId {
        if id == NULL_NODE {
            return NULL_NODE;
        }

        update_height(&mut self.nodes, id);
        let balance = balance_factor(&self.nodes, id);

        if balance > 1 {
            if balance_factor(&self.nodes, self.nodes[id].left) >= 0 {
                self.rotate_right(id)
            } else {
                self.rotate_left_right(id)
            }
        } else if balance < -1 {
            if balance_factor(&self.nodes, self.nodes[id].right) <= 0 {
                self.rotate_left(id)
            } else {
                self.rotate_right_left(id)
            }
        } else {
            id
        }
    }

    /// Store `child` as the left child of `id`, fixing its back link.
    pub(crate) fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id].left = child;
        if child != NULL_NODE {
            self.nodes[child].parent = id;
        }
    }

    /// Store `child` as the right child of `id`, fixing its back link.
    pub(crate) fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id].right = child;
        if child != NULL_NODE {
            self.nodes[child].parent = id;
        }
    }

    /// Install `id` as the root.
    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = id;
        if id != NULL_NODE {
            self.nodes[id].parent = NULL_NODE;
        }
    }
}
