use crate::vnode::VNode;

/// Whether the descriptor is the entry node of a top-level render.
///
/// Only the descriptor the renderer installs directly into a container has
/// no parent. This is purely structural, so a root whose component renders
/// nothing is still a root.
pub fn is_root(vnode: &VNode) -> bool {
    vnode.parent().is_none() && vnode.container().is_some()
}
