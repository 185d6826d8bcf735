//! Page library: every documentation page of a site, keyed by slug.
//!
//! Pages live as one file per page in the docs directory. The file stem is
//! the slug (`docs/wallet.json` -> `wallet`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::page::DocumentationPage;

/// Source format of a page file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Json,
    Yaml,
}

impl PageFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Navigation metadata for a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

/// All loaded pages.
#[derive(Debug, Clone, Default)]
pub struct PageLibrary {
    pages: BTreeMap<String, DocumentationPage>,
}

/// Errors that can occur while loading pages.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Docs directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse page: {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: ParseError,
    },
}

/// Why a page document could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PageLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every page file under `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        if !dir.exists() {
            return Err(LoadError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut library = Self::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let Some(format) = PageFormat::from_extension(ext) else {
                continue;
            };

            let slug = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            if !is_valid_slug(&slug) {
                tracing::warn!("Skipping {}: invalid page slug '{}'", path.display(), slug);
                continue;
            }

            let source = fs::read_to_string(path).map_err(|e| LoadError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let page = Self::parse(&source, format).map_err(|source| LoadError::ParseError {
                path: path.display().to_string(),
                source,
            })?;

            if library.pages.contains_key(&slug) {
                tracing::warn!(
                    "Duplicate page slug '{}', replacing with {}",
                    slug,
                    path.display()
                );
            }

            library.insert(slug, page);
        }

        tracing::debug!("Loaded {} pages from {}", library.len(), dir.display());

        Ok(library)
    }

    /// Parse a single page document.
    pub fn parse(source: &str, format: PageFormat) -> Result<DocumentationPage, ParseError> {
        Ok(match format {
            PageFormat::Json => serde_json::from_str(source)?,
            PageFormat::Yaml => serde_yaml::from_str(source)?,
        })
    }

    /// Add or replace a page.
    pub fn insert(&mut self, slug: impl Into<String>, page: DocumentationPage) {
        self.pages.insert(slug.into(), page);
    }

    /// Look up a page by slug.
    pub fn get(&self, slug: &str) -> Option<&DocumentationPage> {
        self.pages.get(slug)
    }

    /// All slugs, sorted.
    pub fn slugs(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    /// Title and description of every page, sorted by slug.
    pub fn metadata(&self) -> Vec<PageMetadata> {
        self.pages
            .iter()
            .map(|(slug, page)| PageMetadata {
                slug: slug.clone(),
                title: page.title.clone(),
                description: page.description.clone(),
            })
            .collect()
    }

    /// Iterate over `(slug, page)` pairs in slug order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentationPage)> {
        self.pages.iter().map(|(slug, page)| (slug.as_str(), page))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Check that a slug is lowercase words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"))
        .is_match(slug)
}
