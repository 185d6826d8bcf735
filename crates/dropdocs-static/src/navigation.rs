//! Sidebar navigation built from the configured page categories.

use std::collections::BTreeMap;

use serde::Serialize;

use dropdocs_render::{Glyph, IconRegistry};
use dropdocs_schema::{NavCategory, PageLibrary, PageMeta, DEFAULT_PAGE_ICON};

/// Heading of the implicit category used when none are configured.
pub const DEFAULT_CATEGORY: &str = "Documentation";

/// A navigation item.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Page slug
    pub slug: String,
    /// Display title
    pub title: String,
    /// Page description
    pub description: Option<String>,
    /// URL path
    pub path: String,
    /// Lucide icon id
    pub icon: String,
    /// Optional badge label
    pub badge: Option<String>,
    /// Whether this is the active page
    pub active: bool,
}

/// A titled group of navigation items.
#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub title: String,
    pub description: Option<String>,
    pub items: Vec<NavItem>,
}

/// URL of a documentation page.
pub fn page_url(base_url: &str, slug: &str) -> String {
    format!("{}docs/{}/", base_url, slug)
}

/// Build navigation sections from configured categories.
///
/// Without categories every page is listed under a single
/// [`DEFAULT_CATEGORY`] section. Slugs that are not in the library are
/// skipped.
pub fn build_navigation(
    library: &PageLibrary,
    categories: &[NavCategory],
    meta: &BTreeMap<String, PageMeta>,
    icons: &IconRegistry,
    base_url: &str,
) -> Vec<NavSection> {
    let fallback;
    let categories = if categories.is_empty() {
        fallback = [NavCategory {
            title: DEFAULT_CATEGORY.to_string(),
            description: None,
            pages: library.slugs().into_iter().map(str::to_owned).collect(),
        }];
        &fallback[..]
    } else {
        categories
    };

    categories
        .iter()
        .map(|category| NavSection {
            title: category.title.clone(),
            description: category.description.clone(),
            items: category
                .pages
                .iter()
                .filter_map(|slug| {
                    let Some(page) = library.get(slug) else {
                        tracing::warn!(
                            "Navigation category '{}' lists unknown page '{}'",
                            category.title,
                            slug
                        );
                        return None;
                    };

                    let page_meta = meta.get(slug).cloned().unwrap_or_default();

                    Some(NavItem {
                        slug: slug.clone(),
                        title: page.title.clone(),
                        description: page.description.clone(),
                        path: page_url(base_url, slug),
                        icon: page_icon(icons, slug, page_meta.icon.as_deref()),
                        badge: page_meta.badge,
                        active: false,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Copy of `nav` with the item for `slug` marked active.
pub fn mark_active(nav: &[NavSection], slug: &str) -> Vec<NavSection> {
    nav.iter()
        .cloned()
        .map(|mut section| {
            for item in &mut section.items {
                item.active = item.slug == slug;
            }
            section
        })
        .collect()
}

fn page_icon(icons: &IconRegistry, slug: &str, configured: Option<&str>) -> String {
    if let Some(name) = configured {
        if let Some(glyph) = icons.get(name) {
            return glyph.lucide.clone();
        }
        tracing::warn!("Unknown icon '{}' for page '{}'", name, slug);
    }

    icons
        .get(DEFAULT_PAGE_ICON)
        .cloned()
        .unwrap_or_else(|| Glyph::from_name(DEFAULT_PAGE_ICON))
        .lucide
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdocs_schema::{DocumentationPage, PageFormat};

    fn library() -> PageLibrary {
        let mut library = PageLibrary::new();
        for (slug, title) in [
            ("wallet", "Wallet"),
            ("dropfi-extension", "Extension"),
            ("xrpl-injection-api", "Injection API"),
        ] {
            let page: DocumentationPage =
                PageLibrary::parse(&format!(r#"{{ "title": "{}" }}"#, title), PageFormat::Json)
                    .unwrap();
            library.insert(slug, page);
        }
        library
    }

    #[test]
    fn defaults_to_single_category() {
        let nav = build_navigation(
            &library(),
            &[],
            &BTreeMap::new(),
            &IconRegistry::standard(),
            "/",
        );

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].title, DEFAULT_CATEGORY);
        assert_eq!(nav[0].items.len(), 3);
        assert_eq!(nav[0].items[0].path, "/docs/dropfi-extension/");
        assert_eq!(nav[0].items[0].icon, "book-open");
    }

    #[test]
    fn follows_configured_categories() {
        let categories = vec![
            NavCategory {
                title: "Getting Started".to_string(),
                description: Some("Essentials".to_string()),
                pages: vec!["wallet".to_string(), "missing".to_string()],
            },
            NavCategory {
                title: "Developer Resources".to_string(),
                description: None,
                pages: vec!["xrpl-injection-api".to_string()],
            },
        ];

        let mut meta = BTreeMap::new();
        meta.insert(
            "wallet".to_string(),
            PageMeta {
                icon: Some("Download".to_string()),
                badge: Some("Essential".to_string()),
            },
        );
        meta.insert(
            "xrpl-injection-api".to_string(),
            PageMeta {
                icon: Some("NotAnIcon".to_string()),
                badge: None,
            },
        );

        let nav = build_navigation(
            &library(),
            &categories,
            &meta,
            &IconRegistry::standard(),
            "/help/",
        );

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].items.len(), 1);
        assert_eq!(nav[0].items[0].icon, "download");
        assert_eq!(nav[0].items[0].badge.as_deref(), Some("Essential"));
        assert_eq!(nav[0].items[0].path, "/help/docs/wallet/");
        assert_eq!(nav[1].items[0].icon, "book-open");
    }

    #[test]
    fn marks_only_the_current_page_active() {
        let nav = build_navigation(
            &library(),
            &[],
            &BTreeMap::new(),
            &IconRegistry::standard(),
            "/",
        );

        let active = mark_active(&nav, "wallet");
        let flags: Vec<bool> = active[0].items.iter().map(|i| i.active).collect();

        assert_eq!(flags, vec![false, false, true]);
        assert!(nav[0].items.iter().all(|i| !i.active));
    }
}
