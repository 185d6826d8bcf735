//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dropdocs_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let mut config = load_config(config_path)?.build_config();
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} diagnostics in {}ms",
        result.pages,
        result.diagnostics,
        result.duration_ms
    );

    if result.diagnostics > 0 {
        tracing::warn!("Run 'dropdocs check' for details");
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
