//! Code generation for the left/right symmetric parts of the tree.
//!
//! Each macro is written once for one side and instantiated twice with the
//! child links swapped, so the mirrored halves cannot drift apart.

/// Generates a subtree extremum function and the in-order step built on it.
///
/// `$near` is the link followed to reach the extremum, `$far` the link the
/// step descends into first. `navigation!(minimum, successor, left, right)`
/// yields `minimum` (follow `left`) and `successor` (right subtree minimum,
/// or the first ancestor reached from its `left` side).
macro_rules! navigation {
    ($extremum:ident, $step:ident, $near:ident, $far:ident) => {
        pub(crate) fn $extremum<K, V, A>(nodes: &A, mut id: NodeId) -> NodeId
        where
            A: NodeAllocator<Node<K, V>>,
        {
            if id == NULL_NODE {
                return NULL_NODE;
            }
            loop {
                let next = nodes[id].$near;
                if next == NULL_NODE {
                    return id;
                }
                id = next;
            }
        }

        pub(crate) fn $step<K, V, A>(nodes: &A, id: NodeId) -> NodeId
        where
            A: NodeAllocator<Node<K, V>>,
        {
            let far = nodes[id].$far;
            if far != NULL_NODE {
                return $extremum(nodes, far);
            }

            let mut child = id;
            let mut parent = nodes[id].parent;
            while parent != NULL_NODE && nodes[parent].$far == child {
                child = parent;
                parent = nodes[parent].parent;
            }
            parent
        }
    };
}

/// Generates `rotate_<dir>` and the double rotation ending in it.
///
/// A rotation toward `$dir` lifts the `$far` child into the subtree root and
/// returns it. The caller stores the returned id in the parent's child slot.
macro_rules! rotations {
    ($dir:ident, $near:ident, $far:ident) => {
        paste::paste! {
            pub(crate) fn [<rotate_ $dir>](&mut self, id: NodeId) -> NodeId {
                let pivot = self.nodes[id].$far;
                let inner = self.nodes[pivot].$near;

                self.nodes[id].$far = inner;
                if inner != NULL_NODE {
                    self.nodes[inner].parent = id;
                }

                self.nodes[pivot].parent = self.nodes[id].parent;
                self.nodes[pivot].$near = id;
                self.nodes[id].parent = pivot;

                // The old root is now a child of the pivot, so it goes first
                update_height(&mut self.nodes, id);
                update_height(&mut self.nodes, pivot);
                pivot
            }

            pub(crate) fn [<rotate_ $far _ $dir>](&mut self, id: NodeId) -> NodeId {
                let child = self.nodes[id].$far;
                let lifted = self.[<rotate_ $far>](child);
                self.nodes[id].$far = lifted;
                self.[<rotate_ $dir>](id)
            }
        }
    };
}
