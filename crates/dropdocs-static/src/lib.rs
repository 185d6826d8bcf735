//! Static site generator for dropdocs documentation.
//!
//! Renders every page in a docs directory into a static HTML site with
//! navigation, per-page tables of contents, a search index and a sitemap.

pub mod assets;
pub mod builder;
pub mod navigation;
pub mod templates;

pub use assets::{AssetPipeline, LUCIDE_SCRIPT};
pub use builder::{BuildConfig, BuildError, BuildResult, PageOutput, StaticBuilder};
pub use navigation::{
    build_navigation, mark_active, page_url, NavItem, NavSection, DEFAULT_CATEGORY,
};
pub use templates::{meta_description, Context, TemplateEngine};
