//! Logging and debugging facilities for Trellis.
//!
//! Trellis instruments itself with the `tracing` crate. Every event carries an
//! explicit target from [`targets`], so applications can filter per subsystem:
//!
//! ```text
//! RUST_LOG=trellis::combo_box=debug,trellis_core::signal=trace
//! ```
//!
//! Nothing is printed unless the application installs a subscriber.
//!
//! [`ObjectTreeDebug`] renders the object hierarchy, which is handy for
//! checking that a transient popup was attached to, and later removed from,
//! its owner.

use std::fmt::{self, Write as _};

use crate::object::{global_registry, ObjectId, ObjectResult, SharedObjectRegistry};

/// Span names used throughout Trellis.
pub mod span_names {
    /// Event dispatch through the widget tree.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Painting a frame.
    pub const PAINT: &str = "trellis::paint";
    /// Signal emission.
    pub const SIGNAL: &str = "trellis::signal";
}

/// `target:` strings, for `RUST_LOG` style filters.
pub mod targets {
    pub const CORE: &str = "trellis_core";
    pub const SIGNAL: &str = "trellis_core::signal";
    pub const PROPERTY: &str = "trellis_core::property";
    /// Object model target.
    pub const OBJECT: &str = "trellis_core::object";
    /// Performance spans.
    pub const PERF: &str = "trellis::perf";
    /// Renderer bookkeeping.
    pub const RECORDING: &str = "trellis_render::recording";
    /// Pointer routing and grabs in the widget tree.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// winit touch conversion.
    pub const TOUCH: &str = "trellis::touch";
    /// Combo box popups and selection.
    pub const COMBO_BOX: &str = "trellis::combo_box";
    pub const CONFIG: &str = "trellis::config";
}

/// Branch glyphs used by [`ObjectTreeDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// `|`, `+--` and `` `-- ``.
    Ascii,
    /// Box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// (vertical, tee, corner) connectors.
    fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        }
    }
}

/// What [`ObjectTreeDebug`] prints per node.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Append `[id]` after the name.
    pub show_ids: bool,
    /// Append the short type name in parentheses.
    pub show_types: bool,
    /// Deepest level printed; the root is level 0.
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Renders the object hierarchy held by the global registry.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every root object and its descendants.
    pub fn format_all(&self) -> ObjectResult<String> {
        let registry = global_registry()?;
        let roots = registry.root_objects();

        let mut output = String::new();
        let _ = writeln!(output, "Object Tree ({} total objects):", registry.object_count());
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.write_node(registry, root, &mut Vec::new(), &mut output)?;
        }
        Ok(output)
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let registry = global_registry()?;
        let mut output = String::new();
        self.write_node(registry, root, &mut Vec::new(), &mut output)?;
        Ok(output)
    }

    /// `open` holds, for each ancestor level, whether more siblings follow.
    fn write_node(
        &self,
        registry: &SharedObjectRegistry,
        id: ObjectId,
        open: &mut Vec<bool>,
        output: &mut String,
    ) -> ObjectResult<()> {
        if self.options.max_depth.is_some_and(|max| open.len() > max) {
            return Ok(());
        }

        let (vertical, tee, corner) = self.options.style.glyphs();
        if let Some((last_level, ancestors)) = open.split_last() {
            for &more in ancestors {
                output.push_str(if more { vertical } else { " " });
                output.push_str("   ");
            }
            output.push_str(if *last_level { tee } else { corner });
            output.push(' ');
        }

        let name = registry.object_name(id)?;
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });
        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if self.options.show_types {
            let type_name = registry.type_name(id)?;
            let short = type_name.rsplit("::").next().unwrap_or(type_name);
            let _ = write!(output, " ({})", short);
        }
        output.push('\n');

        let children = registry.children(id)?;
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            open.push(i + 1 < count);
            let result = self.write_node(registry, child, open, output);
            open.pop();
            result?;
        }
        Ok(())
    }
}

impl fmt::Display for ObjectTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_all() {
            Ok(output) => f.write_str(&output),
            Err(e) => write!(f, "Error formatting object tree: {}", e),
        }
    }
}

/// Keeps an `info` span on [`targets::PERF`] entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: "trellis::perf", "perf", operation);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{init_global_registry, Object, ObjectBase};

    struct Node {
        base: ObjectBase,
    }

    impl Node {
        fn new(name: &str) -> Self {
            let node = Self {
                base: ObjectBase::new::<Self>(),
            };
            node.base.set_name(name);
            node
        }
    }

    impl Object for Node {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_format_all_has_header() {
        setup();
        let output = ObjectTreeDebug::new().format_all().unwrap();
        assert!(output.starts_with("Object Tree"));
    }

    #[test]
    fn test_format_hierarchy() {
        setup();
        let combo = Node::new("combo");
        let popup = Node::new("popup");
        let first = Node::new("a");
        let second = Node::new("b");
        popup.base.set_parent(Some(combo.object_id())).unwrap();
        first.base.set_parent(Some(popup.object_id())).unwrap();
        second.base.set_parent(Some(popup.object_id())).unwrap();

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let output = ObjectTreeDebug::with_options(options)
            .format_subtree(combo.object_id())
            .unwrap();
        assert_eq!(output, "combo\n`-- popup\n    +-- a\n    `-- b\n");
    }

    #[test]
    fn test_max_depth_and_types() {
        setup();
        let root = Node::new("root");
        let child = Node::new("child");
        child.base.set_parent(Some(root.object_id())).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(0),
            show_ids: false,
            ..Default::default()
        };
        let output = ObjectTreeDebug::with_options(options)
            .format_subtree(root.object_id())
            .unwrap();
        assert_eq!(output, "root (Node)\n");
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
