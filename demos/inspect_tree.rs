//! Render a small tree twice and print what the inspector would see.
//!
//! Run with `RUST_LOG=debug` to see handle allocation.

use vtree_devtools::prelude::*;

struct Counter;

struct CounterState {
    renders: u32,
}

impl ComponentClass for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn construct(&self, _props: &Props) -> Box<dyn ComponentInstance> {
        Box::new(CounterState { renders: 0 })
    }
}

impl ComponentInstance for CounterState {
    fn render(&mut self, _props: &Props) -> Option<Element> {
        self.renders += 1;
        Some(h(
            "span",
            Props::new(),
            vec![text(format!("rendered {} times", self.renders))],
        ))
    }
}

fn main() {
    env_logger::init();

    let title = function_component("Title", |props| {
        Some(h(
            "h1",
            Props::new(),
            vec![text(props.get("text").unwrap_or_default().to_string())],
        ))
    });
    let counter = memo(class_component(Counter));

    let mut renderer = Renderer::new();
    let container = renderer.create_container();
    let mut devtools = Devtools::new();

    for pass in ["first", "second"] {
        let view = h(
            "main",
            Props::new(),
            vec![
                component(title.clone(), Props::new().with("text", pass)),
                component(counter.clone(), Props::new()),
            ],
        );
        let root = match renderer.render(view, container) {
            Ok(root) => root,
            Err(err) => {
                log::error!("Render failed: {err}");
                return;
            }
        };

        let nodes = match devtools.collect(renderer.tree(), root) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::error!("Inspection failed: {err}");
                return;
            }
        };

        println!("{pass} pass:");
        for node in nodes {
            let name = devtools.string_table().get(node.name).unwrap_or("?");
            println!(
                "{:indent$}#{} {} ({}){}",
                "",
                node.handle.get(),
                name,
                node.kind,
                if node.is_root { " [root]" } else { "" },
                indent = node.depth * 2
            );
        }
    }
}
