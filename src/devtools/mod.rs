//! Runtime introspection for the devtools inspector.
//!
//! Three pieces, applied to the descriptors a [`Renderer`](crate::render::Renderer)
//! commits:
//!
//! - [`is_root`] flags the entry node of each top-level render
//! - [`resolve_instance`] maps a descriptor to a stable [`InstanceHandle`]
//! - [`classify`] reports the component kind of a descriptor or element
//!
//! The free functions here use thread-local default state. [`Devtools`]
//! bundles the same operations with state it owns.

pub mod kind;
pub mod registry;
pub mod roots;
pub mod session;
pub mod string_table;

pub use kind::{classify, display_name, inner_kind, ElementKind};
pub use registry::{
    clear_state, lookup_instance, resolve_instance, InstanceHandle, InstanceRegistry,
};
pub use roots::is_root;
pub use session::{Devtools, DevtoolsConfig, InspectedNode, KindFilter};
pub use string_table::{clear_string_table, intern_string, string_by_id, StringTable};

/// Reset all thread-local devtools state.
///
/// Clears the instance registry and the string table together. Call it at a
/// session boundary, such as an inspector reconnect or between tests.
pub fn reset_devtools() {
    clear_state();
    clear_string_table();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Props;
    use crate::element::h;
    use crate::render::Renderer;

    #[test]
    fn test_reset_devtools_clears_both_caches() {
        let mut renderer = Renderer::new();
        let container = renderer.create_container();
        renderer.render(h("div", Props::new(), Vec::new()), container).unwrap();
        let root = renderer.root_vnode(container).unwrap();

        let handle = resolve_instance(root).unwrap();
        let name = intern_string(&display_name(root.component()));
        assert_eq!(lookup_instance(root), Some(handle));

        reset_devtools();
        assert_eq!(lookup_instance(root), None);
        assert_eq!(string_by_id(name), None);
    }
}
