//! Component references.
//!
//! A [`ComponentType`] is what an element or descriptor points at: a plain
//! function, a stateful class, a built-in host tag, or one of the two wrapper
//! kinds (memo, forward-ref) that delegate to an inner component.
//!
//! Equality is identity-based. Two function references are the same component
//! only if they share the same `Rc` definition, which is how the reconciler
//! decides whether a Backing Instance can be reused across renders.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::element::Element;

/// String props passed to a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    values: BTreeMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type RenderFn = dyn Fn(&Props) -> Option<Element>;

/// A stateless component: a named render function.
pub struct FunctionComponent {
    name: String,
    render: Box<RenderFn>,
}

impl FunctionComponent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, props: &Props) -> Option<Element> {
        (self.render)(props)
    }
}

impl fmt::Debug for FunctionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionComponent")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Create a function component reference.
///
/// ```ignore
/// let greeting = function_component("Greeting", |props| {
///     Some(h("span", props.clone(), vec![text("hello")]))
/// });
/// ```
pub fn function_component<F>(name: impl Into<String>, render: F) -> ComponentType
where
    F: Fn(&Props) -> Option<Element> + 'static,
{
    ComponentType::Function(Rc::new(FunctionComponent {
        name: name.into(),
        render: Box::new(render),
    }))
}

/// A constructable component type.
///
/// The engine calls [`construct`](ComponentClass::construct) once per Backing
/// Instance and keeps the returned state alive for as long as the instance is
/// reused.
pub trait ComponentClass {
    fn name(&self) -> &str;

    fn construct(&self, props: &Props) -> Box<dyn ComponentInstance>;
}

/// Per-instance state of a class component. `render` is the capability that
/// distinguishes a class from a plain function.
pub trait ComponentInstance {
    fn render(&mut self, props: &Props) -> Option<Element>;
}

/// Create a class component reference from a class definition.
pub fn class_component<C: ComponentClass + 'static>(class: C) -> ComponentType {
    ComponentType::Class(Rc::new(class))
}

/// Inner component of a memo or forward-ref wrapper.
#[derive(Debug)]
pub struct Wrapper {
    inner: ComponentType,
    display_name: Option<String>,
}

impl Wrapper {
    pub fn inner(&self) -> &ComponentType {
        &self.inner
    }

    /// Explicit display name, if one was set with [`ComponentType::with_display_name`].
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Wrap a component so the engine may skip re-rendering it when props are unchanged.
pub fn memo(inner: ComponentType) -> ComponentType {
    ComponentType::Memo(Rc::new(Wrapper {
        inner,
        display_name: None,
    }))
}

/// Wrap a component so a `ref` is passed through to the inner component.
pub fn forward_ref(inner: ComponentType) -> ComponentType {
    ComponentType::ForwardRef(Rc::new(Wrapper {
        inner,
        display_name: None,
    }))
}

/// A component reference.
#[derive(Clone)]
pub enum ComponentType {
    Function(Rc<FunctionComponent>),
    Class(Rc<dyn ComponentClass>),
    /// Built-in element identified by its tag name.
    Host(Rc<str>),
    Text,
    Fragment,
    Memo(Rc<Wrapper>),
    ForwardRef(Rc<Wrapper>),
}

impl ComponentType {
    pub fn host(tag: &str) -> Self {
        ComponentType::Host(Rc::from(tag))
    }

    /// The wrapped component for memo and forward-ref references.
    pub fn inner(&self) -> Option<&ComponentType> {
        match self {
            ComponentType::Memo(wrapper) | ComponentType::ForwardRef(wrapper) => {
                Some(wrapper.inner())
            }
            _ => None,
        }
    }

    /// Return a new wrapper with an explicit display name.
    ///
    /// The result is a distinct component: it does not compare equal to
    /// `self`. Non-wrapper references are returned unchanged.
    pub fn with_display_name(self, name: impl Into<String>) -> Self {
        match self {
            ComponentType::Memo(wrapper) => ComponentType::Memo(Rc::new(Wrapper {
                inner: wrapper.inner.clone(),
                display_name: Some(name.into()),
            })),
            ComponentType::ForwardRef(wrapper) => ComponentType::ForwardRef(Rc::new(Wrapper {
                inner: wrapper.inner.clone(),
                display_name: Some(name.into()),
            })),
            other => other,
        }
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ComponentType::Function(a), ComponentType::Function(b)) => Rc::ptr_eq(a, b),
            (ComponentType::Class(a), ComponentType::Class(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (ComponentType::Host(a), ComponentType::Host(b)) => a == b,
            (ComponentType::Text, ComponentType::Text) => true,
            (ComponentType::Fragment, ComponentType::Fragment) => true,
            (ComponentType::Memo(a), ComponentType::Memo(b)) => Rc::ptr_eq(a, b),
            (ComponentType::ForwardRef(a), ComponentType::ForwardRef(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::Function(def) => write!(f, "Function({})", def.name()),
            ComponentType::Class(class) => write!(f, "Class({})", class.name()),
            ComponentType::Host(tag) => write!(f, "Host({tag})"),
            ComponentType::Text => f.write_str("Text"),
            ComponentType::Fragment => f.write_str("Fragment"),
            ComponentType::Memo(wrapper) => write!(f, "Memo({:?})", wrapper.inner()),
            ComponentType::ForwardRef(wrapper) => write!(f, "ForwardRef({:?})", wrapper.inner()),
        }
    }
}
