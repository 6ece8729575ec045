//! Devtools session.
//!
//! A [`Devtools`] value owns its own instance registry and string table, so
//! independent sessions (one per inspector connection, one per test) never
//! share identities. The thread-local functions in [`crate::devtools`] are
//! the process-default equivalent.

use bitflags::bitflags;

use crate::devtools::kind::{classify, display_name, ElementKind};
use crate::devtools::registry::{InstanceHandle, InstanceRegistry};
use crate::devtools::roots::is_root;
use crate::devtools::string_table::StringTable;
use crate::error::{DevtoolsError, Result};
use crate::tree::{Tree, VNodeId};
use crate::vnode::{Describe, VNode};

bitflags! {
    /// Component kinds reported by [`Devtools::collect`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct KindFilter: u8 {
        const FUNCTION       = 0b000_0001;
        const CLASS          = 0b000_0010;
        const HOST_COMPONENT = 0b000_0100;
        const MEMO           = 0b000_1000;
        const FORWARD_REF    = 0b001_0000;
        const FRAGMENT       = 0b010_0000;
        const HOST_TEXT      = 0b100_0000;
    }
}

impl KindFilter {
    pub fn from_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Function => KindFilter::FUNCTION,
            ElementKind::Class => KindFilter::CLASS,
            ElementKind::HostComponent => KindFilter::HOST_COMPONENT,
            ElementKind::Memo => KindFilter::MEMO,
            ElementKind::ForwardRef => KindFilter::FORWARD_REF,
            ElementKind::Fragment => KindFilter::FRAGMENT,
            ElementKind::HostText => KindFilter::HOST_TEXT,
        }
    }

    pub fn includes(self, kind: ElementKind) -> bool {
        self.contains(Self::from_kind(kind))
    }
}

#[derive(Debug, Clone)]
pub struct DevtoolsConfig {
    /// Kinds reported by `collect`. Roots are always reported.
    pub filter: KindFilter,
    /// Intern display names in the session's string table. When off, every
    /// inspected node reports name id 0.
    pub intern_names: bool,
}

impl Default for DevtoolsConfig {
    fn default() -> Self {
        Self {
            filter: KindFilter::all().difference(KindFilter::HOST_TEXT),
            intern_names: true,
        }
    }
}

/// What the inspector learns about one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectedNode {
    pub handle: InstanceHandle,
    pub parent: Option<InstanceHandle>,
    pub kind: ElementKind,
    pub is_root: bool,
    /// Display name id in the session's string table
    pub name: u32,
    pub depth: usize,
}

pub struct Devtools {
    config: DevtoolsConfig,
    registry: InstanceRegistry,
    strings: StringTable,
}

impl Devtools {
    pub fn new() -> Self {
        Self::with_config(DevtoolsConfig::default())
    }

    pub fn with_config(config: DevtoolsConfig) -> Self {
        Self {
            config,
            registry: InstanceRegistry::new(),
            strings: StringTable::new(),
        }
    }

    pub fn filter(mut self, filter: KindFilter) -> Self {
        self.config.filter = filter;
        self
    }

    pub fn intern_names(mut self, intern_names: bool) -> Self {
        self.config.intern_names = intern_names;
        self
    }

    pub fn config(&self) -> &DevtoolsConfig {
        &self.config
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    pub fn string_table(&self) -> &StringTable {
        &self.strings
    }

    pub fn resolve(&mut self, vnode: &VNode) -> Result<InstanceHandle> {
        self.registry.resolve(vnode)
    }

    pub fn is_root(&self, vnode: &VNode) -> bool {
        is_root(vnode)
    }

    pub fn classify(&self, target: &impl Describe) -> ElementKind {
        classify(target)
    }

    /// Inspect a single descriptor.
    ///
    /// `parent` and `depth` describe the unfiltered tree. A parent that has
    /// no Backing Instance is reported as `None`.
    pub fn inspect(&mut self, tree: &Tree, id: VNodeId) -> Result<InspectedNode> {
        let vnode = tree.get(id).ok_or(DevtoolsError::UnknownNode(id))?;
        let handle = self.registry.resolve(vnode)?;
        let parent = match tree
            .parent(id)
            .and_then(|parent| tree.get(parent))
            .filter(|parent| parent.instance().is_some())
        {
            Some(parent) => Some(self.registry.resolve(parent)?),
            None => None,
        };

        Ok(InspectedNode {
            handle,
            parent,
            kind: classify(vnode),
            is_root: is_root(vnode),
            name: self.name_id(vnode),
            depth: tree.depth(id),
        })
    }

    /// Inspect `root` and its descendants in pre-order.
    ///
    /// Descriptors whose kind is excluded by the filter are skipped and their
    /// children are reported under the nearest reported ancestor, with
    /// `depth` counted in reported nodes. Descriptors without a Backing
    /// Instance are skipped the same way.
    pub fn collect(&mut self, tree: &Tree, root: VNodeId) -> Result<Vec<InspectedNode>> {
        if !tree.contains(root) {
            return Err(DevtoolsError::UnknownNode(root));
        }

        let mut nodes = Vec::new();
        let mut stack: Vec<(VNodeId, Option<InstanceHandle>, usize)> = vec![(root, None, 0)];

        while let Some((id, parent, depth)) = stack.pop() {
            let Some(vnode) = tree.get(id) else {
                continue;
            };

            let kind = classify(vnode);
            let node_is_root = is_root(vnode);
            let reported = vnode.instance().is_some()
                && (node_is_root || self.config.filter.includes(kind));

            let (child_parent, child_depth) = if reported {
                let handle = self.registry.resolve(vnode)?;
                nodes.push(InspectedNode {
                    handle,
                    parent,
                    kind,
                    is_root: node_is_root,
                    name: self.name_id(vnode),
                    depth,
                });
                (Some(handle), depth + 1)
            } else {
                (parent, depth)
            };

            for &child in vnode.children().iter().rev() {
                stack.push((child, child_parent, child_depth));
            }
        }

        log::debug!("Collected {} of {} descriptors", nodes.len(), tree.descendants(root).len());
        Ok(nodes)
    }

    /// Clear the registry and the string table together.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.strings.clear();
    }

    fn name_id(&mut self, vnode: &VNode) -> u32 {
        if self.config.intern_names {
            self.strings.intern(&display_name(vnode.component()))
        } else {
            0
        }
    }
}

impl Default for Devtools {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{function_component, memo, ComponentType, Props};
    use crate::element::{component, h, text};
    use crate::instance::InstanceArena;
    use crate::render::Renderer;

    fn sample(renderer: &mut Renderer) -> VNodeId {
        let item = function_component("Item", |props| {
            Some(h(
                "li",
                Props::new(),
                vec![text(props.get("label").unwrap_or_default().to_string())],
            ))
        });
        let list = h(
            "ul",
            Props::new(),
            vec![
                component(item.clone(), Props::new().with("label", "a")),
                component(memo(item), Props::new().with("label", "b")),
            ],
        );
        let container = renderer.create_container();
        renderer.render(list, container).unwrap()
    }

    #[test]
    fn test_inspect_root() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new();

        let node = devtools.inspect(renderer.tree(), root).unwrap();
        assert!(node.is_root);
        assert_eq!(node.parent, None);
        assert_eq!(node.kind, ElementKind::Fragment);
        assert_eq!(node.depth, 0);
        assert_eq!(devtools.string_table().get(node.name), Some("Fragment"));
    }

    #[test]
    fn test_inspect_child_reports_parent_handle() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new();

        let ul = renderer.tree().children(root)[0];
        let node = devtools.inspect(renderer.tree(), ul).unwrap();
        let root_node = devtools.inspect(renderer.tree(), root).unwrap();

        assert!(!node.is_root);
        assert_eq!(node.kind, ElementKind::HostComponent);
        assert_eq!(node.parent, Some(root_node.handle));
        assert_eq!(node.depth, 1);
    }

    #[test]
    fn test_inspect_parent_without_instance() {
        let mut arena = InstanceArena::new();
        let mut tree = Tree::new();
        let parent = tree.insert(VNode::detached(ComponentType::host("div"), Props::new()));
        let mut child = VNode::detached(ComponentType::host("span"), Props::new());
        child.instance = Some(arena.allocate(None));
        let child = tree.insert(child);
        tree.set_parent(child, parent);
        let mut devtools = Devtools::new();

        let node = devtools.inspect(&tree, child).unwrap();
        assert_eq!(node.parent, None);
        assert_eq!(node.depth, 1);

        let collected = devtools.collect(&tree, parent).unwrap();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].handle, node.handle);
        assert_eq!(collected[0].parent, None);
    }

    #[test]
    fn test_collect_two_engines_in_one_session() {
        let mut first = Renderer::new();
        let mut second = Renderer::new();
        let first_root = sample(&mut first);
        let second_root = sample(&mut second);
        let mut devtools = Devtools::new();

        let a = devtools.collect(first.tree(), first_root).unwrap();
        let b = devtools.collect(second.tree(), second_root).unwrap();
        assert_eq!(a.len(), b.len());
        for node in &a {
            assert!(b.iter().all(|other| other.handle != node.handle));
        }
        assert_eq!(devtools.registry().len(), a.len() + b.len());
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = DevtoolsConfig {
            filter: KindFilter::MEMO,
            intern_names: false,
        };
        let copy = config.clone();
        assert_eq!(copy.filter, KindFilter::MEMO);
        assert!(!Devtools::with_config(copy).config().intern_names);
        assert!(format!("{config:?}").contains("MEMO"));
    }

    #[test]
    fn test_collect_default_filter_hides_text() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new();

        let nodes = devtools.collect(renderer.tree(), root).unwrap();
        let kinds: Vec<ElementKind> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Fragment,
                ElementKind::HostComponent, // ul
                ElementKind::Function,      // Item a
                ElementKind::HostComponent, // li
                ElementKind::Memo,          // Memo(Item)
                ElementKind::Function,      // Item b
                ElementKind::HostComponent, // li
            ]
        );
        let names: Vec<&str> = nodes
            .iter()
            .filter_map(|n| devtools.string_table().get(n.name))
            .collect();
        assert_eq!(names[4], "Memo(Item)");
    }

    #[test]
    fn test_collect_reparents_filtered_nodes() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new().filter(KindFilter::FUNCTION | KindFilter::MEMO);

        let nodes = devtools.collect(renderer.tree(), root).unwrap();
        let kinds: Vec<ElementKind> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Fragment,
                ElementKind::Function,
                ElementKind::Memo,
                ElementKind::Function,
            ]
        );

        let root_handle = nodes[0].handle;
        // `ul` is hidden, so both items hang off the root
        assert_eq!(nodes[1].parent, Some(root_handle));
        assert_eq!(nodes[1].depth, 1);
        assert_eq!(nodes[2].parent, Some(root_handle));
        assert_eq!(nodes[3].parent, Some(nodes[2].handle));
        assert_eq!(nodes[3].depth, 2);
    }

    #[test]
    fn test_collect_unknown_node() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let container = renderer.create_container();
        let stale = renderer.render(text("a"), container).unwrap();
        renderer.render(text("b"), container).unwrap();
        let mut devtools = Devtools::new();

        assert!(devtools.collect(renderer.tree(), root).is_ok());
        assert!(matches!(
            devtools.collect(renderer.tree(), stale),
            Err(DevtoolsError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_names_not_interned_when_disabled() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new().intern_names(false);

        let nodes = devtools.collect(renderer.tree(), root).unwrap();
        assert!(nodes.iter().all(|n| n.name == 0));
        assert!(devtools.string_table().is_empty());
    }

    #[test]
    fn test_handles_stable_across_collections() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new();

        let first = devtools.collect(renderer.tree(), root).unwrap();
        let second = devtools.collect(renderer.tree(), root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_clears_both_caches() {
        let mut renderer = Renderer::new();
        let root = sample(&mut renderer);
        let mut devtools = Devtools::new();
        devtools.collect(renderer.tree(), root).unwrap();
        assert!(!devtools.registry().is_empty());
        assert!(!devtools.string_table().is_empty());

        devtools.reset();
        assert!(devtools.registry().is_empty());
        assert!(devtools.string_table().is_empty());
    }
}
