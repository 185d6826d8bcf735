//! Documentation tree interpreter.
//!
//! This crate turns a [`DocumentationPage`](dropdocs_schema::DocumentationPage)
//! into a render tree, resolving icons against an injected registry and
//! publishing the page's table of contents while the page is mounted.

mod components;
pub mod diagnostics;
pub mod icons;
pub mod markup;
pub mod renderer;
pub mod toc;

pub use components::list_marker;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use icons::{Glyph, IconRegistry, STANDARD_ICONS};
pub use markup::{escape_html, Element, Node};
pub use renderer::{MountedPage, PageRenderer, RenderedPage};
pub use toc::{table_of_contents, TocChannel, TocItem, TocSubscriber, SECTION_LEVEL};
