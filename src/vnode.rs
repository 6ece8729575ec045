//! Node descriptors.
//!
//! A [`VNode`] is the committed snapshot of one tree position for a single
//! render pass. The engine replaces every descriptor on each pass, but keeps
//! the [`InstanceId`] of a position alive while the same component occupies it.

use crate::component::{ComponentType, Props};
use crate::element::Element;
use crate::instance::InstanceId;
use crate::render::ContainerId;
use crate::tree::VNodeId;

#[derive(Debug, Clone)]
pub struct VNode {
    pub(crate) id: VNodeId,
    pub(crate) component: ComponentType,
    pub(crate) props: Props,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<VNodeId>,
    pub(crate) children: Vec<VNodeId>,
    pub(crate) instance: Option<InstanceId>,
    /// Set only on the entry node installed by a top-level render.
    pub(crate) container: Option<ContainerId>,
}

impl VNode {
    /// A detached descriptor with no parent, children or Backing Instance.
    pub fn detached(component: ComponentType, props: Props) -> Self {
        Self {
            id: VNodeId::placeholder(),
            component,
            props,
            text: None,
            parent: None,
            children: Vec::new(),
            instance: None,
            container: None,
        }
    }

    pub fn id(&self) -> VNodeId {
        self.id
    }

    pub fn component(&self) -> &ComponentType {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<VNodeId> {
        self.parent
    }

    pub fn children(&self) -> &[VNodeId] {
        &self.children
    }

    /// The engine's Backing Instance, `None` for descriptors that were never committed.
    pub fn instance(&self) -> Option<InstanceId> {
        self.instance
    }

    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }
}

/// Anything that carries a component reference.
pub trait Describe {
    fn component_type(&self) -> &ComponentType;
}

impl Describe for ComponentType {
    fn component_type(&self) -> &ComponentType {
        self
    }
}

impl Describe for Element {
    fn component_type(&self) -> &ComponentType {
        &self.component
    }
}

impl Describe for VNode {
    fn component_type(&self) -> &ComponentType {
        &self.component
    }
}
