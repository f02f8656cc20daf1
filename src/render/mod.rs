//! Read-only renderers over the node model.
//!
//! - [`signature`]: the canonical textual form of a declared type
//! - [`debug`]: a traceable, non-canonical rendering of any subtree
//!
//! Both are pure functions from node to text; neither mutates the tree.

use serde::{Deserialize, Serialize};

pub mod debug;
pub mod signature;

pub use debug::Printer;
pub use signature::{signature, type_name_signature};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// What follows each statement inside a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSeparator {
    /// `"; "` after every statement, keeping blocks on one line.
    #[default]
    Inline,
    /// A newline after every statement.
    Newline,
}

impl BlockSeparator {
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockSeparator::Inline => "; ",
            BlockSeparator::Newline => "\n",
        }
    }
}

/// Options for the debug printer.
///
/// # Examples
///
/// ```rust
/// use actus::render::{BlockSeparator, RenderConfig};
/// let config = RenderConfig::newline();
/// assert_eq!(config.block_separator, BlockSeparator::Newline);
/// assert_eq!(RenderConfig::default().block_separator.as_str(), "; ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub block_separator: BlockSeparator,
}

impl RenderConfig {
    /// Newline-separated blocks.
    pub fn newline() -> Self {
        Self::default().with_separator(BlockSeparator::Newline)
    }

    #[must_use]
    pub fn with_separator(mut self, block_separator: BlockSeparator) -> Self {
        self.block_separator = block_separator;
        self
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Joins rendered items with `sep`. An empty list renders as the empty string.
///
/// # Examples
///
/// ```rust
/// use actus::render::join;
/// assert_eq!(join(["a", "b", "c"], ", "), "a, b, c");
/// assert_eq!(join(Vec::<String>::new(), ", "), "");
/// ```
pub fn join<I, S>(items: I, sep: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Renders each item followed by `terminator`, including the last one.
pub(crate) fn terminate_each<I, S>(items: I, terminator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for item in items {
        out.push_str(item.as_ref());
        out.push_str(terminator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_single_item_has_no_separator() {
        assert_eq!(join(["only"], "; "), "only");
    }

    #[test]
    fn test_terminate_each() {
        assert_eq!(terminate_each(["a", "b"], "; "), "a; b; ");
        assert_eq!(terminate_each(Vec::<&str>::new(), "; "), "");
    }

    #[test]
    fn test_config_reads_snake_case_separator() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "block_separator": "newline" }"#).unwrap();
        assert_eq!(config, RenderConfig::newline());
        let defaulted: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, RenderConfig::default());
    }
}
