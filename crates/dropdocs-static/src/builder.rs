//! Static site builder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use dropdocs_render::{
    escape_html, Diagnostic, IconRegistry, PageRenderer, RenderedPage, TocChannel, TocItem,
};
use dropdocs_schema::{
    DocumentationPage, DownloadLinks, LoadError, NavCategory, PageLibrary, PageMeta,
};

use crate::assets::AssetPipeline;
use crate::navigation::{build_navigation, mark_active, page_url, NavSection};
use crate::templates::{meta_description, Context, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Absolute origin used in the sitemap, e.g. `https://docs.example.com`
    pub site_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Sidebar categories
    pub nav: Vec<NavCategory>,

    /// Per-page sidebar icon and badge
    pub pages: BTreeMap<String, PageMeta>,

    /// Store links for download banners
    pub downloads: DownloadLinks,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            site_url: String::new(),
            title: "Documentation".to_string(),
            styles: vec![],
            nav: vec![],
            pages: BTreeMap::new(),
            downloads: DownloadLinks::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of diagnostics reported while rendering
    pub diagnostics: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to read file: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// HTML for one documentation page.
#[derive(Debug)]
pub struct PageOutput {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: PageRenderer,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let renderer = PageRenderer::new(IconRegistry::standard())
            .with_download_links(config.downloads.clone());

        Self {
            config,
            renderer,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Load every page in the docs directory.
    pub fn load_library(&self) -> Result<PageLibrary, BuildError> {
        Ok(PageLibrary::load_dir(&self.config.docs_dir)?)
    }

    /// Sidebar navigation for `library`.
    pub fn navigation(&self, library: &PageLibrary) -> Vec<NavSection> {
        build_navigation(
            library,
            &self.config.nav,
            &self.config.pages,
            self.renderer.icons(),
            &self.config.base_url,
        )
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let library = self.load_library()?;
        if library.is_empty() {
            tracing::warn!(
                "No documentation pages found in {}",
                self.config.docs_dir.display()
            );
        }

        let nav = self.navigation(&library);
        let pages: Vec<(&str, &DocumentationPage)> = library.iter().collect();

        // Render pages in parallel
        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|(slug, page)| self.build_page(slug, page, &nav))
            .collect();

        let mut total_pages = 0;
        let mut total_diagnostics = 0;

        for result in results {
            total_diagnostics += result?;
            total_pages += 1;
        }

        self.write_index(&nav)?;
        self.write_not_found(&library, &nav)?;
        self.generate_assets()?;
        self.generate_search_index(&library)?;
        self.generate_sitemap(&library)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: total_pages,
            diagnostics: total_diagnostics,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Build a single page, returning its diagnostic count.
    fn build_page(
        &self,
        slug: &str,
        page: &DocumentationPage,
        nav: &[NavSection],
    ) -> Result<usize, BuildError> {
        let _span = tracing::info_span!("page", slug).entered();

        // The sidebar reads the table of contents the page publishes while mounted.
        let channel = TocChannel::new();
        let sidebar = channel.subscribe();
        let mounted = self.renderer.mount(page, &channel);
        let toc = sidebar.borrow().clone();

        let output = self.render_document(slug, page, mounted.rendered(), &toc, nav, &[])?;
        drop(mounted);

        let output_path = self
            .config
            .output_dir
            .join("docs")
            .join(slug)
            .join("index.html");
        write_file(&output_path, &output.html)?;

        Ok(output.diagnostics.len())
    }

    /// Wrap a rendered page in the site shell.
    pub fn render_document(
        &self,
        slug: &str,
        page: &DocumentationPage,
        rendered: &RenderedPage,
        toc: &[TocItem],
        nav: &[NavSection],
        scripts: &[String],
    ) -> Result<PageOutput, BuildError> {
        let context = Context {
            title: page.title.clone(),
            description: meta_description(&page.title, page.description.as_deref()),
            canonical: page_url(&self.config.base_url, slug),
            content: rendered.to_html(),
            nav: mark_active(nav, slug),
            toc: toc.to_vec(),
            scripts: scripts.to_vec(),
            ..self.base_context()
        };

        let html = self.render("doc.html", &context)?;

        Ok(PageOutput {
            html,
            diagnostics: rendered.diagnostics.clone(),
        })
    }

    /// The docs landing page.
    pub fn render_index(
        &self,
        nav: &[NavSection],
        scripts: &[String],
    ) -> Result<String, BuildError> {
        let context = Context {
            title: self.config.title.clone(),
            description: format!("Guides and references for {}.", self.config.title),
            canonical: format!("{}docs/", self.config.base_url),
            nav: nav.to_vec(),
            scripts: scripts.to_vec(),
            ..self.base_context()
        };

        self.render("index.html", &context)
    }

    /// The "page not found" page, listing what is available.
    pub fn render_not_found(
        &self,
        library: &PageLibrary,
        nav: &[NavSection],
        requested: Option<&str>,
        scripts: &[String],
    ) -> Result<String, BuildError> {
        let context = Context {
            title: "Page not found".to_string(),
            description: "The requested documentation page does not exist.".to_string(),
            nav: nav.to_vec(),
            requested: requested.map(str::to_owned),
            available: library.metadata(),
            scripts: scripts.to_vec(),
            ..self.base_context()
        };

        self.render("not_found.html", &context)
    }

    fn base_context(&self) -> Context {
        Context {
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            styles: self.style_urls(),
            ..Default::default()
        }
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, BuildError> {
        self.templates
            .render_page(template, context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))
    }

    /// URLs of the configured stylesheets once copied into `assets/`.
    fn style_urls(&self) -> Vec<String> {
        self.config
            .styles
            .iter()
            .map(|s| format!("{}assets/{}", self.config.base_url, style_file_name(s)))
            .collect()
    }

    fn write_index(&self, nav: &[NavSection]) -> Result<(), BuildError> {
        let html = self.render_index(nav, &[])?;
        write_file(
            &self.config.output_dir.join("docs").join("index.html"),
            &html,
        )
    }

    fn write_not_found(&self, library: &PageLibrary, nav: &[NavSection]) -> Result<(), BuildError> {
        let html = self.render_not_found(library, nav, None, &[])?;
        write_file(&self.config.output_dir.join("404.html"), &html)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), &css)?;
        write_file(&assets_dir.join("main.js"), &AssetPipeline::generate_js())?;

        // Copy configured stylesheets
        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                write_file(&assets_dir.join(style_file_name(style_path)), &content)?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, library: &PageLibrary) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = library
            .iter()
            .map(|(slug, page)| {
                let sections: Vec<&str> =
                    page.sections.iter().map(|s| s.title.as_str()).collect();

                serde_json::json!({
                    "slug": slug,
                    "title": page.title,
                    "description": page.description.clone().unwrap_or_default(),
                    "url": page_url(&self.config.base_url, slug),
                    "sections": sections,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        write_file(&self.config.output_dir.join("search-index.json"), &json)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, library: &PageLibrary) -> Result<(), BuildError> {
        let origin = self.config.site_url.trim_end_matches('/');

        let urls: Vec<String> = std::iter::once(format!("{}docs/", self.config.base_url))
            .chain(
                library
                    .slugs()
                    .into_iter()
                    .map(|slug| page_url(&self.config.base_url, slug)),
            )
            .map(|url| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    escape_html(&format!("{}{}", origin, url))
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml",
            origin, self.config.base_url
        );
        write_file(&self.config.output_dir.join("robots.txt"), &robots)
    }
}

fn style_file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }

    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}
