//! Documentation pages and sections.

use serde::Deserialize;

use crate::component::Component;
use crate::lenient;

/// A documentation page: a title, an optional description and its sections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentationPage {
    /// Page title (required)
    pub title: String,

    /// Short summary, used as subtitle and for SEO
    #[serde(default)]
    pub description: Option<String>,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A titled, anchorable group of components.
///
/// Section ids double as scroll anchors, so they must be unique within a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub id: String,

    pub title: String,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub components: Vec<Component>,
}

impl DocumentationPage {
    /// Section ids that appear more than once, in first-repeat order.
    pub fn duplicate_section_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();

        for section in &self.sections {
            if !seen.insert(section.id.as_str()) && !duplicates.contains(&section.id.as_str()) {
                duplicates.push(section.id.as_str());
            }
        }

        duplicates
    }
}
