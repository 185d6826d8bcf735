//! Declarative documentation page model.
//!
//! This crate defines the page/section/component tree that documentation files
//! are written in, decodes it leniently from JSON or YAML, and loads a site's
//! pages into a library keyed by slug.

pub mod component;
pub mod lenient;
pub mod library;
pub mod page;
pub mod site;

pub use component::{
    ActionButton, ApiEndpoints, Badge, Button, CallToAction, Card, CardVariant, CodeBlock,
    Component, ComponentKind, Div, DownloadSection, Endpoint, Feature, FeatureGrid, Grid,
    GridColumns, Header, HttpMethod, Icon, List, Row, Stat, StatsGrid, Step, StepList, Text,
    TextVariant, Tip, TipGrid, TipTone,
};
pub use library::{is_valid_slug, LoadError, PageFormat, PageLibrary, PageMetadata, ParseError};
pub use page::{DocumentationPage, Section};
pub use site::{DownloadLinks, NavCategory, PageMeta, DEFAULT_PAGE_ICON};
