pub mod component;
pub mod devtools;
pub mod element;
pub mod error;
pub mod instance;
pub mod render;
pub mod tree;
pub mod vnode;

pub use error::{DevtoolsError, Result};

pub mod prelude {
    pub use crate::component::{
        class_component, forward_ref, function_component, memo, ComponentClass,
        ComponentInstance, ComponentType, Props,
    };
    pub use crate::devtools::{
        classify, clear_state, clear_string_table, display_name, inner_kind, is_root,
        reset_devtools, resolve_instance, Devtools, DevtoolsConfig, ElementKind, InspectedNode,
        InstanceHandle, KindFilter,
    };
    pub use crate::element::{component, fragment, h, text, Element};
    pub use crate::render::{ContainerId, Renderer};
    pub use crate::tree::{Tree, VNodeId};
    pub use crate::vnode::{Describe, VNode};
    pub use crate::{DevtoolsError, Result};
}
