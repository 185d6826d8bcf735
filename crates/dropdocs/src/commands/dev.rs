//! Development server command.

use std::path::Path;

use anyhow::Result;
use dropdocs_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let file_config = load_config(config_path)?;
    let port = port.unwrap_or(file_config.server.port);

    tracing::info!("Starting development server on port {}", port);

    let mut site = file_config.build_config();
    // Pages are served from the root in development
    site.base_url = "/".to_string();
    site.minify = false;

    let config = DevServerConfig {
        site,
        port,
        host: file_config.server.host,
        open,
    };

    DevServer::new(config).start().await?;

    Ok(())
}
