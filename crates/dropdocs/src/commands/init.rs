//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing dropdocs...");

    let docs_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("docs");

    scaffold(config_path, &docs_dir, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'dropdocs dev' to start the development server.");

    Ok(())
}

/// Write the config and sample pages. Existing files are kept unless
/// `overwrite` is set.
fn scaffold(config_path: &Path, docs_dir: &Path, overwrite: bool) -> Result<()> {
    if docs_dir.exists() && !overwrite {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            docs_dir.display()
        );
        return Ok(());
    }

    fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;

    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (docs_dir.join("wallet.json"), DEFAULT_WALLET_PAGE),
        (docs_dir.join("xrpl-injection-api.yaml"), DEFAULT_API_PAGE),
    ];

    for (path, contents) in files {
        if path.exists() && !overwrite {
            continue;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# dropdocs configuration

[docs]
# Source directory for documentation pages (.json, .yaml)
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

[build]
# Enable CSS minification
minify = true

[server]
port = 7777

[[nav]]
title = "Getting Started"
description = "Install the wallet and create your first account."
pages = ["wallet"]

[[nav]]
title = "Developer Resources"
description = "Integrate the wallet into your dApp."
pages = ["xrpl-injection-api"]

[pages.wallet]
icon = "Download"
badge = "Essential"

[pages.xrpl-injection-api]
icon = "Code"
badge = "Technical"

[downloads]
# app_store = "https://apps.apple.com/..."
# play_store = "https://play.google.com/store/apps/details?id=..."
# chrome_web_store = "https://chromewebstore.google.com/detail/..."
"#;

const DEFAULT_WALLET_PAGE: &str = r#"{
  "title": "Wallet",
  "description": "Install the wallet, create an account and keep your keys safe.",
  "sections": [
    {
      "type": "section",
      "id": "overview",
      "title": "Overview",
      "components": [
        {
          "type": "feature-grid",
          "features": [
            { "icon": "Shield", "title": "Self-custody", "description": "Your keys never leave your device." },
            { "icon": "Zap", "title": "Fast", "description": "Transactions settle in seconds." }
          ]
        }
      ]
    },
    {
      "type": "section",
      "id": "install",
      "title": "Install",
      "components": [
        {
          "type": "step-list",
          "steps": [
            { "step": 1, "title": "Download", "description": "Get the app from your store." },
            { "step": 2, "title": "Create a wallet", "description": "Choose a strong passcode.", "details": "Write down your recovery phrase and store it offline." }
          ]
        },
        { "type": "download-section", "title": "Get the app", "description": "Available on mobile and desktop." }
      ]
    },
    {
      "type": "section",
      "id": "security",
      "title": "Security tips",
      "components": [
        {
          "type": "tip-grid",
          "tips": [
            { "icon": "AlertTriangle", "title": "Never share your phrase", "description": "Support will never ask for it.", "type": "warning" },
            { "icon": "Info", "title": "Use a hardware backup", "description": "Keep a copy somewhere safe.", "type": "info" }
          ]
        },
        { "type": "list", "items": ["Enable biometrics", "Lock the app when idle"] }
      ]
    }
  ]
}
"#;

const DEFAULT_API_PAGE: &str = r#"title: Injection API
description: Talk to the wallet from your web application.
sections:
  - type: section
    id: connect
    title: Connect
    components:
      - type: text
        variant: body
        text: The extension injects a provider object into every page.
      - type: code-block
        title: Request a connection
        language: javascript
        code: |
          const address = await window.xrpl.connect();
  - type: section
    id: methods
    title: Methods
    components:
      - type: api-endpoints
        endpoints:
          - method: GET
            endpoint: getAddress()
            description: Returns the connected account address.
          - method: POST
            endpoint: signTransaction(tx)
            description: Prompts the user to sign a transaction.
            params: "tx: Transaction"
      - type: call-to-action
        title: Ready to build?
        description: Read the full reference or try the demo.
        buttons:
          - text: Open the demo
            icon: ExternalLink
            href: https://example.com/demo
            showArrow: true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use dropdocs_schema::PageLibrary;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_loadable_pages() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("docs.toml");
        let docs = temp.path().join("docs");

        scaffold(&config, &docs, false).unwrap();

        assert!(config.exists());
        let library = PageLibrary::load_dir(&docs).unwrap();
        assert_eq!(library.slugs(), vec!["wallet", "xrpl-injection-api"]);
        assert_eq!(library.get("wallet").unwrap().sections.len(), 3);
    }

    #[test]
    fn keeps_existing_docs_without_yes() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("docs.toml");
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();

        scaffold(&config, &docs, false).unwrap();

        assert!(!config.exists());
        assert!(!docs.join("wallet.json").exists());
    }

    #[test]
    fn default_config_parses() {
        let config: crate::config::ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.pages["wallet"].icon.as_deref(), Some("Download"));
    }
}
