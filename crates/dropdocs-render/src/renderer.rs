//! Documentation tree interpreter.

use std::sync::Arc;

use dropdocs_schema::{Component, DocumentationPage, DownloadLinks, Header};

use crate::components::Pass;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::icons::IconRegistry;
use crate::markup::{Element, Node};
use crate::toc::{table_of_contents, TocChannel, TocItem};

/// Result of rendering a page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Page header followed by one block per section
    pub body: Node,

    /// Table of contents entries (one per section)
    pub toc: Vec<TocItem>,

    /// Problems found while rendering, in document order
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedPage {
    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}

/// Renders documentation pages.
///
/// The renderer is a pure function of its inputs: the icon registry and
/// download links are injected at construction time.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    icons: Arc<IconRegistry>,
    downloads: DownloadLinks,
}

impl PageRenderer {
    /// Create a renderer using the given icon registry.
    pub fn new(icons: IconRegistry) -> Self {
        Self {
            icons: Arc::new(icons),
            downloads: DownloadLinks::default(),
        }
    }

    /// Set the store links used by `download-section` components.
    pub fn with_download_links(mut self, downloads: DownloadLinks) -> Self {
        self.downloads = downloads;
        self
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    pub fn download_links(&self) -> &DownloadLinks {
        &self.downloads
    }

    /// Render a full page.
    pub fn render_page(&self, page: &DocumentationPage) -> RenderedPage {
        let mut pass = Pass::new(self);

        for id in page.duplicate_section_ids() {
            pass.report(DiagnosticKind::DuplicateSectionId(id.to_string()));
        }

        let header = pass.header(&Header {
            title: Some(page.title.clone()),
            subtitle: page.description.clone(),
            icon: None,
        });

        let sections: Vec<Node> = page
            .sections
            .iter()
            .map(|section| pass.section(section))
            .collect();

        let body = Element::new("div")
            .class("doc-page")
            .child(header)
            .children(sections)
            .into();

        RenderedPage {
            body,
            toc: table_of_contents(page),
            diagnostics: pass.diagnostics,
        }
    }

    /// Render a single component. Unknown or malformed components render as
    /// an empty node and log a warning.
    pub fn render_component(&self, component: &Component) -> Node {
        Pass::new(self).component(component)
    }

    /// Render `page` and publish its table of contents on `channel`.
    ///
    /// The entries stay published until the returned [`MountedPage`] is
    /// unmounted or dropped.
    pub fn mount(&self, page: &DocumentationPage, channel: &TocChannel) -> MountedPage {
        let rendered = self.render_page(page);
        channel.publish(rendered.toc.clone());

        MountedPage {
            renderer: self.clone(),
            channel: channel.clone(),
            rendered,
            mounted: true,
        }
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(IconRegistry::standard())
    }
}

/// A page currently on display.
///
/// Owns the page's table-of-contents publication: entries are published on
/// mount, re-published when the sections change and cleared on unmount.
#[derive(Debug)]
pub struct MountedPage {
    renderer: PageRenderer,
    channel: TocChannel,
    rendered: RenderedPage,
    mounted: bool,
}

impl MountedPage {
    pub fn rendered(&self) -> &RenderedPage {
        &self.rendered
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Re-render with a new value of the page. Returns whether the table of
    /// contents changed and was re-published.
    pub fn update(&mut self, page: &DocumentationPage) -> bool {
        self.rendered = self.renderer.render_page(page);

        if !self.mounted {
            return false;
        }

        self.channel.publish(self.rendered.toc.clone())
    }

    /// Clear the published table of contents. Only the first call has an
    /// effect.
    pub fn unmount(&mut self) {
        if std::mem::replace(&mut self.mounted, false) {
            self.channel.clear();
        }
    }
}

impl Drop for MountedPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::SECTION_LEVEL;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(value: serde_json::Value) -> DocumentationPage {
        serde_json::from_value(value).unwrap()
    }

    fn wallet_page() -> DocumentationPage {
        page(json!({
            "title": "Wallet",
            "sections": [{
                "type": "section",
                "id": "install",
                "title": "Install",
                "components": [
                    { "type": "text", "text": "Download the app", "variant": "body" }
                ]
            }]
        }))
    }

    #[test]
    fn renders_wallet_scenario() {
        let renderer = PageRenderer::default();
        let rendered = renderer.render_page(&wallet_page());

        assert_eq!(
            rendered.toc,
            vec![TocItem {
                id: "install".to_string(),
                title: "Install".to_string(),
                level: 2,
            }]
        );

        let body_text = rendered.body.find_by_class("doc-text--body");
        assert_eq!(body_text.len(), 1);
        assert_eq!(body_text[0].text_content(), "Download the app");
        assert!(rendered.diagnostics.is_empty());
    }

    #[test]
    fn toc_matches_sections_in_order() {
        let rendered = PageRenderer::default().render_page(&page(json!({
            "title": "Extension",
            "sections": [
                { "id": "overview", "title": "Overview" },
                { "id": "install", "title": "Install" },
                { "id": "connect", "title": "Connect a dApp" }
            ]
        })));

        let ids: Vec<&str> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "install", "connect"]);
        assert!(rendered.toc.iter().all(|t| t.level == SECTION_LEVEL));

        let anchors: Vec<&str> = rendered
            .body
            .find_by_class("doc-section__title")
            .iter()
            .filter_map(|h| h.attr_value("id"))
            .collect();
        assert_eq!(anchors, ids);
    }

    #[test]
    fn empty_page_renders_header_only() {
        let rendered = PageRenderer::default().render_page(&page(json!({
            "title": "Empty",
            "description": "Nothing yet"
        })));

        assert!(rendered.toc.is_empty());
        assert!(rendered.body.find_by_class("doc-section").is_empty());
        assert_eq!(
            rendered.body.find_by_class("doc-header__title")[0].text_content(),
            "Empty"
        );
        assert_eq!(
            rendered.body.find_by_class("doc-header__subtitle")[0].text_content(),
            "Nothing yet"
        );
    }

    #[test]
    fn unknown_components_do_not_stop_the_page() {
        let rendered = PageRenderer::default().render_page(&page(json!({
            "title": "Mixed",
            "sections": [{
                "id": "a",
                "title": "A",
                "components": [
                    { "type": "hologram" },
                    { "type": "badge", "text": "After" }
                ]
            }]
        })));

        assert_eq!(rendered.diagnostics.len(), 1);
        assert_eq!(rendered.diagnostics[0].location, "a.components[0]");
        assert_eq!(
            rendered.body.find_by_class("doc-badge")[0].text_content(),
            "After"
        );
    }

    #[test]
    fn reports_duplicate_section_ids() {
        let rendered = PageRenderer::default().render_page(&page(json!({
            "title": "Dupes",
            "sections": [
                { "id": "a", "title": "A" },
                { "id": "a", "title": "A2" }
            ]
        })));

        assert_eq!(
            rendered.diagnostics[0].kind,
            DiagnosticKind::DuplicateSectionId("a".to_string())
        );
        assert_eq!(rendered.toc.len(), 2);
    }

    #[test]
    fn rendering_is_stable() {
        let renderer = PageRenderer::default();
        let page = wallet_page();

        assert_eq!(renderer.render_page(&page), renderer.render_page(&page));
        assert_eq!(
            renderer.render_page(&page).to_html(),
            renderer.render_page(&page).to_html()
        );
    }

    #[test]
    fn render_component_handles_unknown_type() {
        let renderer = PageRenderer::default();
        let node = renderer.render_component(&Component::from_value(json!({ "type": "nope" })));

        assert!(node.is_empty());
    }

    #[test]
    fn mount_publishes_and_unmount_clears() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();
        let sidebar = channel.subscribe();

        let mut mounted = renderer.mount(&wallet_page(), &channel);
        assert_eq!(sidebar.borrow().len(), 1);
        assert_eq!(sidebar.borrow()[0].id, "install");

        mounted.unmount();
        assert!(sidebar.borrow().is_empty());
        assert!(!mounted.is_mounted());
    }

    #[test]
    fn unmount_twice_is_a_no_op() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();
        let mut sidebar = channel.subscribe();

        let mut mounted = renderer.mount(&wallet_page(), &channel);
        mounted.unmount();
        sidebar.borrow_and_update();

        mounted.unmount();
        drop(mounted);

        assert!(!sidebar.has_changed().unwrap());
        assert!(channel.current().is_empty());
    }

    #[test]
    fn drop_clears_toc() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();

        {
            let _mounted = renderer.mount(&wallet_page(), &channel);
            assert_eq!(channel.current().len(), 1);
        }

        assert!(channel.current().is_empty());
    }

    #[test]
    fn update_with_same_sections_does_not_republish() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();
        let mut sidebar = channel.subscribe();
        let page = wallet_page();

        let mut mounted = renderer.mount(&page, &channel);
        let first = mounted.rendered().clone();
        sidebar.borrow_and_update();

        assert!(!mounted.update(&page));
        assert!(!sidebar.has_changed().unwrap());
        assert_eq!(mounted.rendered(), &first);
    }

    #[test]
    fn update_with_new_sections_republishes() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();
        let mut mounted = renderer.mount(&wallet_page(), &channel);

        let mut changed = wallet_page();
        changed.sections[0].title = "Installation".to_string();

        assert!(mounted.update(&changed));
        assert_eq!(channel.current()[0].title, "Installation");
    }

    #[test]
    fn navigation_replaces_toc() {
        let renderer = PageRenderer::default();
        let channel = TocChannel::new();

        let first = renderer.mount(&wallet_page(), &channel);
        drop(first);

        let second_page = page(json!({
            "title": "API",
            "sections": [{ "id": "methods", "title": "Methods" }]
        }));
        let _second = renderer.mount(&second_page, &channel);

        assert_eq!(channel.current()[0].id, "methods");
        assert_eq!(channel.current().len(), 1);
    }
}
