use num_traits::{PrimInt, Unsigned};

use crate::error::VoxprocError;

/// One union-find node per voxel.
///
/// The parent link stores `index + 1` with zero meaning root, so a freshly
/// allocated forest is all zero bytes and can be created in one bulk-zeroed
/// block. The label a component receives in the second labeling pass is
/// cached on the root; with a u32 link, u16 rank and a label no wider than
/// u32, the node stays within 16 bytes, which matters at one node per voxel.
#[derive(Clone, Copy)]
struct Node<U> {
    parent_plus_one: u32,
    rank: u16,
    has_label: bool,
    label: U,
}

/// A union-find forest with path compression and union by rank.
pub(crate) struct Forest<U> {
    nodes: Vec<Node<U>>,
}

impl<U: PrimInt + Unsigned> Forest<U> {
    /// Allocate `len` root nodes in one zeroed block.
    ///
    /// # Errors
    ///
    /// Returns [`VoxprocError::VolumeTooLarge`] when `len` exceeds what the
    /// u32 parent links can address.
    pub(crate) fn new(len: usize) -> Result<Self, VoxprocError> {
        if len >= u32::MAX as usize {
            return Err(VoxprocError::VolumeTooLarge(len));
        }
        Ok(Self {
            nodes: vec![
                Node {
                    parent_plus_one: 0,
                    rank: 0,
                    has_label: false,
                    label: U::zero(),
                };
                len
            ],
        })
    }

    /// Root of `index`'s tree, re-pointing every node on the walked path
    /// directly at the root.
    pub(crate) fn find(&mut self, index: u32) -> u32 {
        let mut root = index;
        loop {
            let parent = self.nodes[root as usize].parent_plus_one;
            if parent == 0 {
                break;
            }
            root = parent - 1;
        }

        let mut cursor = index;
        while cursor != root {
            let next = self.nodes[cursor as usize].parent_plus_one - 1;
            self.nodes[cursor as usize].parent_plus_one = root + 1;
            cursor = next;
        }

        root
    }

    /// Merge the trees containing `x` and `y`.
    ///
    /// The lower-rank root attaches under the higher-rank root; on equal
    /// ranks of distinct roots, `y`'s root attaches under `x`'s root and the
    /// surviving rank increments.
    ///
    /// # Errors
    ///
    /// Returns [`VoxprocError::GraphOverflow`] when the surviving rank sits
    /// at its numeric ceiling and would have to increment.
    pub(crate) fn unite(&mut self, x: u32, y: u32) -> Result<(), VoxprocError> {
        let x_root = self.find(x);
        let y_root = self.find(y);

        let x_rank = self.nodes[x_root as usize].rank;
        let y_rank = self.nodes[y_root as usize].rank;

        if x_rank > y_rank {
            self.nodes[y_root as usize].parent_plus_one = x_root + 1;
        } else if x_rank < y_rank {
            self.nodes[x_root as usize].parent_plus_one = y_root + 1;
        } else if x_root != y_root {
            self.nodes[y_root as usize].parent_plus_one = x_root + 1;
            if x_rank == u16::MAX {
                return Err(VoxprocError::GraphOverflow);
            }
            self.nodes[x_root as usize].rank = x_rank + 1;
        }

        Ok(())
    }

    /// The label cached on `index`, if one has been assigned.
    pub(crate) fn label(&self, index: u32) -> Option<U> {
        let node = &self.nodes[index as usize];
        node.has_label.then_some(node.label)
    }

    /// Cache `label` on `index` (expected to be a root).
    pub(crate) fn set_label(&mut self, index: u32, label: U) {
        let node = &mut self.nodes[index as usize];
        node.label = label;
        node.has_label = true;
    }
}
