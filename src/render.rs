//! Reference rendering engine.
//!
//! A small reconciler that turns [`Element`]s into committed [`VNode`]
//! descriptors. Each call to [`Renderer::render`] replaces every descriptor of
//! the container, but reuses the Backing Instance of any position whose
//! component did not change, which is exactly the contract the devtools layer
//! relies on for stable identities.
//!
//! Reconciliation is positional: the n-th child of the new pass is matched
//! against the n-th child of the previous pass.

use std::collections::HashSet;

use crate::component::ComponentType;
use crate::element::{fragment, Element};
use crate::error::{DevtoolsError, Result};
use crate::instance::{InstanceArena, InstanceId};
use crate::tree::{Tree, VNodeId};
use crate::vnode::VNode;

/// A render target, the equivalent of a DOM container element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContainerId(usize);

pub struct Renderer {
    tree: Tree,
    instances: InstanceArena,
    /// Root descriptor currently installed in each container
    containers: Vec<Option<VNodeId>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            instances: InstanceArena::new(),
            containers: Vec::new(),
        }
    }

    pub fn create_container(&mut self) -> ContainerId {
        self.containers.push(None);
        ContainerId(self.containers.len() - 1)
    }

    /// Render `element` into `container`, replacing the previous pass.
    ///
    /// The element is wrapped in a `Fragment` root descriptor owned by the
    /// container. Returns the id of that root descriptor.
    pub fn render(&mut self, element: Element, container: ContainerId) -> Result<VNodeId> {
        let old_root = *self
            .containers
            .get(container.0)
            .ok_or(DevtoolsError::UnknownContainer(container))?;

        let mut reused = HashSet::new();
        let root = self.diff(
            fragment(vec![element]),
            old_root,
            None,
            Some(container),
            &mut reused,
        );

        if let Some(old_root) = old_root {
            self.teardown(old_root, &reused);
        }
        self.containers[container.0] = Some(root);

        log::debug!(
            "Rendered into {:?}: {} descriptors, {} live instances ({} reused)",
            container,
            self.tree.node_count(),
            self.instances.live_count(),
            reused.len()
        );

        Ok(root)
    }

    /// Remove everything rendered into `container` and release its instances.
    pub fn unmount(&mut self, container: ContainerId) -> Result<()> {
        let slot = self
            .containers
            .get_mut(container.0)
            .ok_or(DevtoolsError::UnknownContainer(container))?;
        if let Some(root) = slot.take() {
            self.teardown(root, &HashSet::new());
            log::debug!("Unmounted {:?}", container);
        }
        Ok(())
    }

    pub fn root(&self, container: ContainerId) -> Option<VNodeId> {
        self.containers.get(container.0).copied().flatten()
    }

    pub fn root_vnode(&self, container: ContainerId) -> Option<&VNode> {
        self.root(container).and_then(|id| self.tree.get(id))
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn instances(&self) -> &InstanceArena {
        &self.instances
    }

    fn diff(
        &mut self,
        element: Element,
        old: Option<VNodeId>,
        parent: Option<VNodeId>,
        container: Option<ContainerId>,
        reused: &mut HashSet<InstanceId>,
    ) -> VNodeId {
        let Element {
            component,
            props,
            children,
            text,
        } = element;

        let (old_instance, old_children) = match old.and_then(|id| self.tree.get(id)) {
            Some(prev) if prev.component == component => (prev.instance, prev.children.clone()),
            _ => (None, Vec::new()),
        };

        let instance = match old_instance {
            Some(id) if self.instances.contains(id) => {
                reused.insert(id);
                id
            }
            _ => {
                let state = match &component {
                    ComponentType::Class(class) => Some(class.construct(&props)),
                    _ => None,
                };
                self.instances.allocate(state)
            }
        };

        let rendered: Vec<Element> = match &component {
            ComponentType::Function(def) => def.render(&props).into_iter().collect(),
            ComponentType::Class(_) => self
                .instances
                .with_state_mut(instance, |state| state.render(&props))
                .flatten()
                .into_iter()
                .collect(),
            ComponentType::Memo(wrapper) | ComponentType::ForwardRef(wrapper) => {
                vec![Element::new(wrapper.inner().clone(), props.clone(), children)]
            }
            ComponentType::Host(_) | ComponentType::Fragment => children,
            ComponentType::Text => Vec::new(),
        };

        let id = self.tree.insert(VNode {
            id: VNodeId::placeholder(),
            component,
            props,
            text,
            parent: None,
            children: Vec::new(),
            instance: Some(instance),
            container,
        });
        if let Some(parent) = parent {
            self.tree.set_parent(id, parent);
        }

        for (index, child) in rendered.into_iter().enumerate() {
            self.diff(child, old_children.get(index).copied(), Some(id), None, reused);
        }

        id
    }

    /// Drop the descriptors of a previous pass and release every instance the
    /// new pass did not take over.
    fn teardown(&mut self, root: VNodeId, reused: &HashSet<InstanceId>) {
        for vnode in self.tree.remove_subtree(root) {
            if let Some(instance) = vnode.instance {
                if !reused.contains(&instance) {
                    self.instances.release(instance);
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
