//! Logging and debugging facilities.
//!
//! All crates in the workspace log through `tracing` with the targets listed
//! in [`targets`]. Nothing installs a subscriber; applications do that:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("anilist_net::transport=debug")
//!     .init();
//! ```
//!
//! [`SelectionTreeDebug`] renders a selection tree one field per line,
//! which is easier to read than the single-line wire form when a default
//! selection looks wrong.

use std::fmt::{self, Write as _};

use crate::selection::Selection;

/// Target names for log filtering.
pub mod targets {
    /// Default-selection derivation (cycle omissions).
    pub const SELECTION: &str = "anilist_core::selection";
    /// HTTP transport: requests, statuses, rate limits.
    pub const TRANSPORT: &str = "anilist_net::transport";
    /// High-level client operations and authentication.
    pub const CLIENT: &str = "anilist::client";
}

/// Branch characters used by [`SelectionTreeDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    Ascii,
    #[default]
    Unicode,
}

/// Multi-line renderer for selection trees.
#[derive(Debug, Clone, Default)]
pub struct SelectionTreeDebug {
    style: TreeStyle,
    show_arguments: bool,
    max_depth: Option<usize>,
}

impl SelectionTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn show_arguments(mut self, show: bool) -> Self {
        self.show_arguments = show;
        self
    }

    /// Stop descending below `depth` (roots are depth 0).
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Render `selections` as an indented tree.
    pub fn format(&self, selections: &[Selection]) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_level(selections, 0, "", &mut output);
        output
    }

    fn write_level(
        &self,
        selections: &[Selection],
        depth: usize,
        prefix: &str,
        output: &mut String,
    ) -> fmt::Result {
        if self.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let (branch, last, pipe) = match self.style {
            TreeStyle::Ascii => ("|-- ", "`-- ", "|   "),
            TreeStyle::Unicode => ("├── ", "└── ", "│   "),
        };

        let count = selections.len();
        for (i, selection) in selections.iter().enumerate() {
            let is_last = i + 1 == count;
            output.push_str(prefix);
            if depth > 0 {
                output.push_str(if is_last { last } else { branch });
            }
            output.push_str(selection.name());
            if self.show_arguments && !selection.argument_list().is_empty() {
                output.push('(');
                for (j, argument) in selection.argument_list().iter().enumerate() {
                    if j > 0 {
                        output.push_str(", ");
                    }
                    write!(output, "{argument}")?;
                }
                output.push(')');
            }
            output.push('\n');

            let child_prefix = if depth == 0 {
                prefix.to_owned()
            } else if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}{pipe}")
            };
            self.write_level(selection.children(), depth + 1, &child_prefix, output)?;
        }
        Ok(())
    }
}
