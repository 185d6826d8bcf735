//! `docs.toml` configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use dropdocs_schema::{DownloadLinks, NavCategory, PageMeta};
use dropdocs_static::BuildConfig;

/// Configuration file structure (docs.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Sidebar categories in display order
    #[serde(default)]
    pub nav: Vec<NavCategory>,
    /// Per-page icon and badge, keyed by slug
    #[serde(default)]
    pub pages: BTreeMap<String, PageMeta>,
    #[serde(default)]
    pub downloads: DownloadLinks,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin used for absolute sitemap URLs
    #[serde(default)]
    pub site_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Option<Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            site_url: String::new(),
            styles: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}
fn default_port() -> u16 {
    7777
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl ConfigFile {
    /// Site settings for the builder and the dev server.
    pub fn build_config(&self) -> BuildConfig {
        let mut base_url = self.docs.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        BuildConfig {
            docs_dir: PathBuf::from(&self.docs.dir),
            output_dir: PathBuf::from(&self.docs.output),
            minify: self.build.minify,
            base_url,
            site_url: self.docs.site_url.clone(),
            title: self.docs.title.clone(),
            styles: self.docs.styles.clone().unwrap_or_default(),
            nav: self.nav.clone(),
            pages: self.pages.clone(),
            downloads: self.downloads.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }

    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}
