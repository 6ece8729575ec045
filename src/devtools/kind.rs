//! Component kind classification.
//!
//! Wrapper tags are checked first: a memo or forward-ref reference is
//! reported as the wrapper kind no matter what it wraps. Use [`inner_kind`]
//! to see through the wrappers.

use std::fmt;

use crate::component::ComponentType;
use crate::vnode::Describe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Function,
    Class,
    HostComponent,
    Memo,
    ForwardRef,
    Fragment,
    HostText,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Function => "Function",
            ElementKind::Class => "Class",
            ElementKind::HostComponent => "HostComponent",
            ElementKind::Memo => "Memo",
            ElementKind::ForwardRef => "ForwardRef",
            ElementKind::Fragment => "Fragment",
            ElementKind::HostText => "HostText",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify the outermost component reference.
pub fn classify(target: &impl Describe) -> ElementKind {
    kind_of(target.component_type())
}

/// Classify the innermost component, unwrapping every memo and forward-ref layer.
pub fn inner_kind(target: &impl Describe) -> ElementKind {
    let mut component = target.component_type();
    while let Some(inner) = component.inner() {
        component = inner;
    }
    kind_of(component)
}

fn kind_of(component: &ComponentType) -> ElementKind {
    match component {
        ComponentType::Memo(_) => ElementKind::Memo,
        ComponentType::ForwardRef(_) => ElementKind::ForwardRef,
        ComponentType::Host(_) => ElementKind::HostComponent,
        ComponentType::Class(_) => ElementKind::Class,
        ComponentType::Function(_) => ElementKind::Function,
        ComponentType::Fragment => ElementKind::Fragment,
        ComponentType::Text => ElementKind::HostText,
    }
}

/// Human readable name of a component reference.
///
/// Wrappers without an explicit display name are shown as `Memo(Inner)` or
/// `ForwardRef(Inner)`.
pub fn display_name(component: &ComponentType) -> String {
    match component {
        ComponentType::Function(def) => def.name().to_string(),
        ComponentType::Class(class) => class.name().to_string(),
        ComponentType::Host(tag) => tag.to_string(),
        ComponentType::Text => "#text".to_string(),
        ComponentType::Fragment => "Fragment".to_string(),
        ComponentType::Memo(wrapper) => match wrapper.display_name() {
            Some(name) => name.to_string(),
            None => format!("Memo({})", display_name(wrapper.inner())),
        },
        ComponentType::ForwardRef(wrapper) => match wrapper.display_name() {
            Some(name) => name.to_string(),
            None => format!("ForwardRef({})", display_name(wrapper.inner())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{
        class_component, forward_ref, function_component, memo, ComponentClass,
        ComponentInstance, Props,
    };
    use crate::element::{component, fragment, h, text, Element};

    struct Foo;

    struct FooState;

    impl ComponentClass for Foo {
        fn name(&self) -> &str {
            "Foo"
        }

        fn construct(&self, _props: &Props) -> Box<dyn ComponentInstance> {
            Box::new(FooState)
        }
    }

    impl ComponentInstance for FooState {
        fn render(&mut self, _props: &Props) -> Option<Element> {
            Some(h("div", Props::new(), Vec::new()))
        }
    }

    fn foo_fn() -> ComponentType {
        function_component("Foo", |_| Some(h("div", Props::new(), Vec::new())))
    }

    #[test]
    fn test_function() {
        assert_eq!(classify(&component(foo_fn(), Props::new())), ElementKind::Function);
    }

    #[test]
    fn test_class() {
        assert_eq!(
            classify(&component(class_component(Foo), Props::new())),
            ElementKind::Class
        );
    }

    #[test]
    fn test_host() {
        assert_eq!(classify(&h("div", Props::new(), Vec::new())), ElementKind::HostComponent);
    }

    #[test]
    fn test_memo_is_not_unwrapped() {
        let bar = memo(foo_fn());
        assert_eq!(classify(&component(bar.clone(), Props::new())), ElementKind::Memo);
        assert_eq!(inner_kind(&bar), ElementKind::Function);
    }

    #[test]
    fn test_forward_ref_is_not_unwrapped() {
        let bar = forward_ref(foo_fn());
        assert_eq!(classify(&component(bar.clone(), Props::new())), ElementKind::ForwardRef);
        assert_eq!(inner_kind(&bar), ElementKind::Function);
    }

    #[test]
    fn test_same_function_under_both_wrappers() {
        let foo = foo_fn();
        assert_eq!(classify(&memo(foo.clone())), ElementKind::Memo);
        assert_eq!(classify(&forward_ref(foo.clone())), ElementKind::ForwardRef);
        assert_eq!(classify(&foo), ElementKind::Function);
    }

    #[test]
    fn test_nested_wrappers() {
        let wrapped = memo(forward_ref(class_component(Foo)));
        assert_eq!(classify(&wrapped), ElementKind::Memo);
        assert_eq!(inner_kind(&wrapped), ElementKind::Class);
        assert_eq!(display_name(&wrapped), "Memo(ForwardRef(Foo))");
    }

    #[test]
    fn test_extension_kinds() {
        assert_eq!(classify(&text("x")), ElementKind::HostText);
        assert_eq!(classify(&fragment(Vec::new())), ElementKind::Fragment);
        assert_eq!(inner_kind(&text("x")), ElementKind::HostText);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name(&foo_fn()), "Foo");
        assert_eq!(display_name(&ComponentType::host("div")), "div");
        assert_eq!(display_name(&ComponentType::Text), "#text");
        assert_eq!(display_name(&forward_ref(foo_fn())), "ForwardRef(Foo)");
        assert_eq!(
            display_name(&memo(foo_fn()).with_display_name("Cached")),
            "Cached"
        );
        assert_eq!(ElementKind::ForwardRef.to_string(), "ForwardRef");
    }
}
