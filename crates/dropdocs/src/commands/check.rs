//! Eager validation of every page and of the site configuration.

use std::path::Path;

use anyhow::Result;
use dropdocs_render::PageRenderer;
use dropdocs_schema::PageLibrary;
use dropdocs_static::{BuildConfig, StaticBuilder};

use crate::config::load_config;

/// Problems found by a check run.
#[derive(Debug, Default)]
pub struct Report {
    pub pages: usize,
    pub diagnostics: usize,
    pub config_problems: Vec<String>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics == 0 && self.config_problems.is_empty()
    }
}

/// Render every page, counting diagnostics, and cross-check the
/// configuration against the library.
pub fn check_site(library: &PageLibrary, renderer: &PageRenderer, config: &BuildConfig) -> Report {
    let mut report = Report {
        pages: library.len(),
        ..Default::default()
    };

    for (slug, page) in library.iter() {
        let _span = tracing::info_span!("page", slug).entered();
        // Each diagnostic is logged by the renderer as it is found
        report.diagnostics += renderer.render_page(page).diagnostics.len();
    }

    for category in &config.nav {
        for slug in &category.pages {
            if library.get(slug).is_none() {
                report.config_problems.push(format!(
                    "nav category '{}' lists unknown page '{}'",
                    category.title, slug
                ));
            }
        }
    }

    for (slug, meta) in &config.pages {
        if library.get(slug).is_none() {
            report
                .config_problems
                .push(format!("[pages.{}] has no matching page", slug));
        }
        if let Some(icon) = &meta.icon {
            if !renderer.icons().contains(icon) {
                report
                    .config_problems
                    .push(format!("[pages.{}] uses unknown icon '{}'", slug, icon));
            }
        }
    }

    report
}

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?.build_config();
    let builder = StaticBuilder::new(config.clone());
    let library = builder.load_library()?;

    let report = check_site(&library, builder.renderer(), &config);

    for problem in &report.config_problems {
        tracing::warn!("{}", problem);
    }

    if !report.is_clean() {
        anyhow::bail!(
            "{} diagnostics and {} configuration problems in {} pages",
            report.diagnostics,
            report.config_problems.len(),
            report.pages
        );
    }

    tracing::info!("Checked {} pages, no problems found", report.pages);

    Ok(())
}
