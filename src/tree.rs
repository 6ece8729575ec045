//! Arena-based storage for node descriptors.
//!
//! The Tree holds the descriptors of the current render pass using a
//! sparse-set architecture with generational indices.
//!
//! ## Key Features
//!
//! - **Generational Indices**: VNodeId contains index + generation, so a
//!   descriptor id from an earlier render pass never resolves to a descriptor
//!   that later reused the same slot.
//!
//! - **Dense Storage**: Descriptors stored contiguously for cache-friendly
//!   iteration.
//!
//! - **Sparse Map**: O(1) lookup from VNodeId to dense array index.
//!
//! - **Swap-Remove**: O(1) removal without creating holes in dense storage.

use crate::vnode::VNode;

/// Unique identifier for a descriptor in the tree.
///
/// Uses a generational index design:
/// - `index`: Position in the sparse array (reusable after removal)
/// - `generation`: Version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VNodeId {
    index: u32,
    generation: u32,
}

impl VNodeId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Id carried by descriptors that were never inserted into a tree.
    /// Uses max values to make it obvious if accidentally used.
    pub fn placeholder() -> Self {
        Self {
            index: u32::MAX,
            generation: u32::MAX,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.index == u32::MAX && self.generation == u32::MAX
    }
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node {
    vnode: VNode,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

/// Descriptor storage for one renderer.
pub struct Tree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    /// Last generation handed out per sparse slot, kept across removals
    generations: Vec<u32>,
    free_indices: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            generations: Vec::new(),
            free_indices: Vec::new(),
        }
    }

    /// Store a descriptor and return its id.
    ///
    /// The descriptor's own `id` is overwritten with the allocated one.
    /// Parent-child relationships are set separately via `set_parent`.
    pub fn insert(&mut self, mut vnode: VNode) -> VNodeId {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            let generation = self.generations[idx as usize].wrapping_add(1);
            self.generations[idx as usize] = generation;
            (idx, generation)
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            self.generations.push(0);
            (idx, 0)
        };

        let id = VNodeId::new(sparse_index, generation);
        vnode.id = id;

        let dense_index = self.dense.len();
        self.dense.push(Node {
            vnode,
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        id
    }

    /// Remove a single descriptor and return it.
    ///
    /// Also removes it from its parent's children list. Children are left in
    /// place; use [`remove_subtree`](Self::remove_subtree) to drop them too.
    pub fn remove(&mut self, id: VNodeId) -> Option<VNode> {
        let dense_index = self.get_dense_index(id)?;

        if let Some(parent_id) = self.dense[dense_index].vnode.parent {
            if let Some(parent_dense) = self.get_dense_index(parent_id) {
                self.dense[parent_dense].vnode.children.retain(|&c| c != id);
            }
        }

        let last_dense_index = self.dense.len() - 1;
        let removed = self.dense.swap_remove(dense_index);

        // Fix up the moved node's sparse entry
        if dense_index != last_dense_index {
            let moved_sparse_idx = self.dense[dense_index].sparse_index;
            if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                entry.dense_index = dense_index;
            }
        }

        self.sparse[id.index as usize] = None;
        self.free_indices.push(id.index);

        Some(removed.vnode)
    }

    /// Remove a descriptor and all of its descendants.
    ///
    /// Returns the removed descriptors in pre-order.
    pub fn remove_subtree(&mut self, id: VNodeId) -> Vec<VNode> {
        let ids = self.descendants(id);
        let mut removed = Vec::with_capacity(ids.len());
        for node_id in ids {
            if let Some(vnode) = self.remove(node_id) {
                removed.push(vnode);
            }
        }
        removed
    }

    fn get_dense_index(&self, id: VNodeId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation)
            .map(|e| e.dense_index)
    }

    pub fn get(&self, id: VNodeId) -> Option<&VNode> {
        self.get_dense_index(id).map(|idx| &self.dense[idx].vnode)
    }

    pub fn contains(&self, id: VNodeId) -> bool {
        self.get_dense_index(id).is_some()
    }

    /// Set the parent of a descriptor and append it to the parent's children.
    pub fn set_parent(&mut self, child_id: VNodeId, parent_id: VNodeId) {
        if let Some(child_dense) = self.get_dense_index(child_id) {
            self.dense[child_dense].vnode.parent = Some(parent_id);
        }

        if let Some(parent_dense) = self.get_dense_index(parent_id) {
            let children = &mut self.dense[parent_dense].vnode.children;
            if !children.contains(&child_id) {
                children.push(child_id);
            }
        }
    }

    pub fn parent(&self, id: VNodeId) -> Option<VNodeId> {
        self.get(id).and_then(|vnode| vnode.parent)
    }

    pub fn children(&self, id: VNodeId) -> Vec<VNodeId> {
        self.get(id)
            .map(|vnode| vnode.children.clone())
            .unwrap_or_default()
    }

    /// The descriptor and all of its descendants, in pre-order.
    pub fn descendants(&self, id: VNodeId) -> Vec<VNodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(vnode) = self.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(vnode.children.iter().rev().copied());
        }
        out
    }

    /// Number of ancestors between the descriptor and its root.
    pub fn depth(&self, id: VNodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    pub fn node_count(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
