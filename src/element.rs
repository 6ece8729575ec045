//! Elements: the un-rendered tree built by user code.
//!
//! An [`Element`] only describes what should be rendered. It has no position
//! in a tree and no Backing Instance until a [`Renderer`](crate::render::Renderer)
//! commits it into a [`VNode`](crate::vnode::VNode).

use crate::component::{ComponentType, Props};

#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) component: ComponentType,
    pub(crate) props: Props,
    pub(crate) children: Vec<Element>,
    pub(crate) text: Option<String>,
}

impl Element {
    pub fn new(component: ComponentType, props: Props, children: Vec<Element>) -> Self {
        Self {
            component,
            props,
            children,
            text: None,
        }
    }

    pub fn component(&self) -> &ComponentType {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Create an element for a host tag.
pub fn h(tag: &str, props: Props, children: Vec<Element>) -> Element {
    Element::new(ComponentType::host(tag), props, children)
}

/// Create an element for any component reference with no children.
pub fn component(component: ComponentType, props: Props) -> Element {
    Element::new(component, props, Vec::new())
}

/// Create a text node.
pub fn text(content: impl Into<String>) -> Element {
    Element {
        component: ComponentType::Text,
        props: Props::default(),
        children: Vec::new(),
        text: Some(content.into()),
    }
}

/// Group children without adding a host element.
pub fn fragment(children: Vec<Element>) -> Element {
    Element::new(ComponentType::Fragment, Props::default(), children)
}
