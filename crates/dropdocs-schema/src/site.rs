//! Site-level settings shared by the builder, the dev server and the renderer.

use serde::{Deserialize, Serialize};

/// A group of pages in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NavCategory {
    /// Category heading
    pub title: String,

    /// Short blurb shown on the docs landing page
    #[serde(default)]
    pub description: Option<String>,

    /// Page slugs in display order
    #[serde(default)]
    pub pages: Vec<String>,
}

/// Per-page sidebar decoration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageMeta {
    /// Icon name from the icon registry
    #[serde(default)]
    pub icon: Option<String>,

    /// Short label such as "Essential" or "Technical"
    #[serde(default)]
    pub badge: Option<String>,
}

/// Icon shown for pages without a configured one.
pub const DEFAULT_PAGE_ICON: &str = "BookOpen";

/// Download targets used by `download-section` components.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DownloadLinks {
    #[serde(default)]
    pub app_store: Option<String>,

    #[serde(default)]
    pub play_store: Option<String>,

    #[serde(default)]
    pub chrome_web_store: Option<String>,

    /// Looping background video behind the banner
    #[serde(default)]
    pub background_video: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_download_links() {
        let links: DownloadLinks =
            serde_json::from_str(r#"{ "app_store": "https://apps.apple.com/app/x" }"#).unwrap();

        assert_eq!(
            links.app_store.as_deref(),
            Some("https://apps.apple.com/app/x")
        );
        assert_eq!(links.play_store, None);
    }

    #[test]
    fn nav_category_pages_default_to_empty() {
        let category: NavCategory = serde_json::from_str(r#"{ "title": "Guides" }"#).unwrap();

        assert!(category.pages.is_empty());
        assert_eq!(category.description, None);
    }
}
