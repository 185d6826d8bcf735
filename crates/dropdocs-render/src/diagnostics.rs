//! Problems found while rendering a page.
//!
//! None of these stop rendering: the offending node is skipped and its
//! siblings render as usual.

use std::fmt;

/// What went wrong with a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    #[error("Malformed '{tag}' component: {message}")]
    MalformedComponent { tag: String, message: String },

    #[error("Icon not found: {0}")]
    UnknownIcon(String),

    #[error("Icon component has no name")]
    MissingIconName,

    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),
}

/// A problem and where in the page it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path to the node, e.g. `install.components[2].children[0]`
    pub location: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.location, self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_location_and_kind() {
        let diagnostic = Diagnostic {
            location: "install.components[0]".to_string(),
            kind: DiagnosticKind::UnknownComponent("carousel".to_string()),
        };

        assert_eq!(
            diagnostic.to_string(),
            "install.components[0]: Unknown component type: carousel"
        );
    }

    #[test]
    fn omits_empty_location() {
        let diagnostic = Diagnostic {
            location: String::new(),
            kind: DiagnosticKind::DuplicateSectionId("intro".to_string()),
        };

        assert_eq!(diagnostic.to_string(), "Duplicate section id: intro");
    }
}
