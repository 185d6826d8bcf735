//! Icon registry for looking up glyphs by name.
//!
//! Documents refer to icons by PascalCase name (`"CheckCircle"`). The registry
//! maps those names to glyphs; the page shell's icon script swaps each glyph
//! placeholder for the matching SVG.

use std::collections::HashMap;

use crate::markup::{Element, Node};

/// Icon names available to every site.
pub const STANDARD_ICONS: &[&str] = &[
    "Download",
    "ArrowUpRight",
    "Sparkles",
    "Shield",
    "CheckCircle",
    "AlertTriangle",
    "Info",
    "ArrowRight",
    "ExternalLink",
    "Clock",
    "DollarSign",
    "Percent",
    "TrendingUp",
    "Zap",
    "Code",
    "FileText",
    "Database",
    "Palette",
    "Calculator",
    "PieChart",
    "Star",
    "Users",
    "Target",
    "Rocket",
    "BookOpen",
    "Monitor",
    "Smartphone",
    "Globe",
];

/// A renderable icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Lucide icon id (kebab-case)
    pub lucide: String,
}

impl Glyph {
    pub fn new(lucide: impl Into<String>) -> Self {
        Self {
            lucide: lucide.into(),
        }
    }

    /// Glyph for a PascalCase icon name.
    pub fn from_name(name: &str) -> Self {
        Self::new(kebab_case(name))
    }

    /// Render the glyph placeholder with extra classes.
    pub fn render(&self, class: &str) -> Node {
        Element::new("i")
            .class("icon")
            .class(class)
            .attr("data-lucide", self.lucide.as_str())
            .attr("aria-hidden", "true")
            .into()
    }
}

/// A closed mapping from icon name to glyph.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: HashMap<String, Glyph>,
}

impl IconRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every name in [`STANDARD_ICONS`].
    pub fn standard() -> Self {
        STANDARD_ICONS
            .iter()
            .fold(Self::new(), |registry, name| {
                registry.with_icon(*name, Glyph::from_name(name))
            })
    }

    /// Add or replace an icon.
    pub fn with_icon(mut self, name: impl Into<String>, glyph: Glyph) -> Self {
        self.icons.insert(name.into(), glyph);
        self
    }

    /// Look up an icon by exact name.
    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.icons.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// `ArrowUpRight` -> `arrow-up-right`.
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_every_icon() {
        let registry = IconRegistry::standard();

        assert_eq!(registry.len(), STANDARD_ICONS.len());
        assert!(registry.contains("CheckCircle"));
        assert!(registry.contains("Globe"));
    }

    #[test]
    fn lookup_is_exact() {
        let registry = IconRegistry::standard();

        assert!(registry.get("download").is_none());
        assert!(registry.get("NonexistentIcon").is_none());
        assert_eq!(registry.get("Download").unwrap().lucide, "download");
    }

    #[test]
    fn converts_names_to_lucide_ids() {
        assert_eq!(kebab_case("ArrowUpRight"), "arrow-up-right");
        assert_eq!(kebab_case("PieChart"), "pie-chart");
        assert_eq!(kebab_case("Info"), "info");
    }

    #[test]
    fn custom_icons_extend_registry() {
        let registry = IconRegistry::new().with_icon("Wallet", Glyph::new("wallet"));

        assert_eq!(registry.names(), vec!["Wallet"]);
    }

    #[test]
    fn renders_placeholder() {
        let html = Glyph::from_name("CheckCircle").render("marker").to_html();

        assert_eq!(
            html,
            r#"<i class="icon marker" data-lucide="check-circle" aria-hidden="true"></i>"#
        );
    }
}
