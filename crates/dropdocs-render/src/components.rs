//! Per-type rendering rules.
//!
//! A [`Pass`] walks one page (or one detached component), tracking the path to
//! the current node so diagnostics can say where a problem is.

use dropdocs_schema::{
    ActionButton, ApiEndpoints, Badge, Button, CallToAction, Card, CodeBlock, Component,
    ComponentKind, DownloadSection, FeatureGrid, Grid, Header, HttpMethod, List, Row, Section,
    StatsGrid, StepList, Text, TipGrid, TipTone,
};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::icons::Glyph;
use crate::markup::{Element, Node};
use crate::renderer::PageRenderer;

const DEFAULT_GAP: i64 = 6;
const MAX_GAP: i64 = 12;

const BUTTON_VARIANTS: &[&str] = &[
    "default",
    "secondary",
    "outline",
    "ghost",
    "link",
    "destructive",
];

pub(crate) struct Pass<'r> {
    renderer: &'r PageRenderer,
    path: Vec<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'r> Pass<'r> {
    pub(crate) fn new(renderer: &'r PageRenderer) -> Self {
        Self {
            renderer,
            path: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            location: self.path.join("."),
            kind,
        };
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Render a section: anchored heading followed by its components.
    pub(crate) fn section(&mut self, section: &Section) -> Node {
        self.path.push(section.id.clone());
        let components = self.each("components", &section.components);
        self.path.pop();

        Element::new("section")
            .class("doc-section")
            .child(
                Element::new("h2")
                    .class("doc-section__title")
                    .attr("id", section.id.as_str())
                    .text(section.title.as_str()),
            )
            .children(components)
            .into()
    }

    /// Render a list of sibling components. A failing node never affects the
    /// nodes around it.
    fn each(&mut self, field: &str, components: &[Component]) -> Vec<Node> {
        components
            .iter()
            .enumerate()
            .map(|(index, component)| {
                self.path.push(format!("{}[{}]", field, index));
                let node = self.component(component);
                self.path.pop();
                node
            })
            .collect()
    }

    /// Dispatch on the component type.
    pub(crate) fn component(&mut self, component: &Component) -> Node {
        let node = match &component.kind {
            ComponentKind::Header(header) => self.header(header).into(),
            ComponentKind::Row(row) => self.row(row).into(),
            ComponentKind::Grid(grid) => self.grid(grid).into(),
            ComponentKind::Card(card) => self.card(card).into(),
            ComponentKind::FeatureGrid(grid) => self.feature_grid(grid).into(),
            ComponentKind::StepList(list) => self.step_list(list).into(),
            ComponentKind::TipGrid(grid) => self.tip_grid(grid).into(),
            ComponentKind::StatsGrid(grid) => self.stats_grid(grid).into(),
            ComponentKind::CodeBlock(block) => self.code_block(block).into(),
            ComponentKind::ApiEndpoints(endpoints) => self.api_endpoints(endpoints).into(),
            ComponentKind::CallToAction(cta) => self.call_to_action(cta).into(),
            ComponentKind::DownloadSection(section) => self.download_section(section).into(),
            ComponentKind::Badge(badge) => self.badge(badge).into(),
            ComponentKind::Button(button) => self.button(button).into(),
            ComponentKind::Text(text) => self.text(text).into(),
            ComponentKind::Divider => Element::new("hr").class("doc-divider").into(),
            ComponentKind::List(list) => self.list(list).into(),
            ComponentKind::Div(div) => Element::new("div")
                .children(self.each("children", &div.children))
                .into(),
            ComponentKind::Icon(icon) => self.standalone_icon(icon.name.as_deref()),
            ComponentKind::Unknown { tag } => {
                self.report(DiagnosticKind::UnknownComponent(tag.clone()));
                Node::empty()
            }
            ComponentKind::Malformed { tag, message } => {
                self.report(DiagnosticKind::MalformedComponent {
                    tag: tag.clone(),
                    message: message.clone(),
                });
                Node::empty()
            }
        };

        decorate(node, component)
    }

    /// Glyph for an icon name, if the registry knows it.
    fn glyph(&self, name: Option<&str>) -> Option<&'r Glyph> {
        let name = name?;
        let glyph = self.renderer.icons().get(name);
        if glyph.is_none() {
            tracing::debug!("Omitting unknown icon '{}'", name);
        }
        glyph
    }

    fn icon(&self, name: Option<&str>, class: &str) -> Node {
        self.glyph(name)
            .map(|g| g.render(class))
            .unwrap_or_else(Node::empty)
    }

    fn standalone_icon(&mut self, name: Option<&str>) -> Node {
        let Some(name) = name else {
            self.report(DiagnosticKind::MissingIconName);
            return Node::empty();
        };

        match self.renderer.icons().get(name) {
            Some(glyph) => glyph.render("doc-icon"),
            None => {
                self.report(DiagnosticKind::UnknownIcon(name.to_string()));
                Node::empty()
            }
        }
    }

    pub(crate) fn header(&self, header: &Header) -> Element {
        Element::new("header")
            .class("doc-header")
            .child(
                Element::new("div")
                    .class("doc-header__title-row")
                    .child(self.icon(header.icon.as_deref(), "doc-header__icon"))
                    .child(
                        Element::new("h1")
                            .class("doc-header__title")
                            .text(header.title.clone().unwrap_or_default()),
                    ),
            )
            .child(optional_text(
                "p",
                "doc-header__subtitle",
                header.subtitle.as_deref(),
            ))
    }

    fn row(&mut self, row: &Row) -> Element {
        Element::new("div")
            .class("doc-row")
            .class(gap_class(row.gap))
            .children(self.each("children", &row.children))
    }

    fn grid(&mut self, grid: &Grid) -> Element {
        Element::new("div")
            .class("doc-grid")
            .class(format!("doc-grid--cols-{}", grid.columns().count()))
            .class(gap_class(grid.gap))
            .children(self.each("children", &grid.children))
    }

    fn card(&mut self, card: &Card) -> Element {
        Element::new("div")
            .class("doc-card")
            .class(format!("doc-card--{}", card.variant().as_str()))
            .children(self.each("children", &card.children))
    }

    fn feature_grid(&self, grid: &FeatureGrid) -> Element {
        Element::new("div")
            .class("doc-feature-grid")
            .children(grid.features.iter().map(|feature| {
                Element::new("div")
                    .class("doc-card doc-feature")
                    .child(
                        Element::new("div")
                            .class("doc-feature__icon")
                            .class_opt(feature.color.as_deref())
                            .child(self.icon(feature.icon.as_deref(), "")),
                    )
                    .child(
                        Element::new("div")
                            .child(optional_text(
                                "h3",
                                "doc-feature__title",
                                feature.title.as_deref(),
                            ))
                            .child(optional_text(
                                "p",
                                "doc-feature__description",
                                feature.description.as_deref(),
                            )),
                    )
                    .into()
            }))
    }

    fn step_list(&self, list: &StepList) -> Element {
        Element::new("ol")
            .class("doc-steps")
            .children(list.steps.iter().map(|step| {
                Element::new("li")
                    .class("doc-card doc-step")
                    .child(
                        Element::new("div")
                            .class("doc-step__number")
                            .text(step.step.clone().unwrap_or_default()),
                    )
                    .child(
                        Element::new("div")
                            .class("doc-step__body")
                            .child(optional_text("h3", "doc-step__title", step.title.as_deref()))
                            .child(optional_text(
                                "p",
                                "doc-step__description",
                                step.description.as_deref(),
                            ))
                            .child(optional_text(
                                "p",
                                "doc-step__details",
                                step.details.as_deref(),
                            )),
                    )
                    .into()
            }))
    }

    fn tip_grid(&self, grid: &TipGrid) -> Element {
        Element::new("div")
            .class("doc-tip-grid")
            .children(grid.tips.iter().map(|tip| {
                let tone = match tip.tone() {
                    TipTone::Warning => "doc-tip--warning",
                    TipTone::Info => "doc-tip--info",
                };

                Element::new("div")
                    .class("doc-card doc-tip")
                    .class(tone)
                    .child(
                        Element::new("div")
                            .class("doc-tip__icon")
                            .child(self.icon(tip.icon.as_deref(), "")),
                    )
                    .child(
                        Element::new("div")
                            .child(optional_text("h3", "doc-tip__title", tip.title.as_deref()))
                            .child(optional_text(
                                "p",
                                "doc-tip__description",
                                tip.description.as_deref(),
                            )),
                    )
                    .into()
            }))
    }

    fn stats_grid(&self, grid: &StatsGrid) -> Element {
        Element::new("div")
            .class("doc-stats-grid")
            .children(grid.stats.iter().map(|stat| {
                Element::new("div")
                    .class("doc-card doc-stat")
                    .child(
                        Element::new("div")
                            .class("doc-stat__icon")
                            .class_opt(stat.color.as_deref())
                            .child(self.icon(stat.icon.as_deref(), "")),
                    )
                    .child(optional_text("div", "doc-stat__value", stat.value.as_deref()))
                    .child(optional_text("p", "doc-stat__label", stat.label.as_deref()))
                    .into()
            }))
    }

    fn code_block(&self, block: &CodeBlock) -> Element {
        let title = block.title.as_deref().map(|title| {
            Element::new("h3")
                .class("doc-code-block__title")
                .child(Glyph::new("file-text").render("doc-code-block__glyph"))
                .text(title)
        });

        let mut code = Element::new("code").text(block.code.clone().unwrap_or_default());
        if let Some(language) = &block.language {
            code = code.attr("data-language", language.as_str());
        }

        Element::new("div")
            .class("doc-card doc-code-block")
            .child(title.map(Node::from).unwrap_or_else(Node::empty))
            .child(Element::new("pre").class("doc-code-block__pre").child(code))
    }

    fn api_endpoints(&self, endpoints: &ApiEndpoints) -> Element {
        Element::new("div")
            .class("doc-card doc-endpoints")
            .children(endpoints.endpoints.iter().map(|endpoint| {
                let method_class = match endpoint.method() {
                    HttpMethod::Get => "doc-method--get",
                    HttpMethod::Post => "doc-method--post",
                    HttpMethod::Put => "doc-method--put",
                    HttpMethod::Other => "",
                };

                Element::new("div")
                    .class("doc-endpoint")
                    .child(
                        Element::new("div")
                            .class("doc-endpoint__head")
                            .child(
                                Element::new("span")
                                    .class("doc-badge doc-badge--secondary doc-method")
                                    .class(method_class)
                                    .text(endpoint.method.clone().unwrap_or_default()),
                            )
                            .child(optional_text(
                                "code",
                                "doc-endpoint__path",
                                endpoint.endpoint.as_deref(),
                            )),
                    )
                    .child(optional_text(
                        "p",
                        "doc-endpoint__description",
                        endpoint.description.as_deref(),
                    ))
                    .child(optional_text(
                        "p",
                        "doc-endpoint__params",
                        endpoint
                            .params
                            .as_deref()
                            .map(|p| format!("Parameters: {}", p))
                            .as_deref(),
                    ))
                    .into()
            }))
    }

    fn call_to_action(&self, cta: &CallToAction) -> Element {
        Element::new("div")
            .class("doc-card doc-cta")
            .child(optional_text("h3", "doc-cta__title", cta.title.as_deref()))
            .child(optional_text(
                "p",
                "doc-cta__description",
                cta.description.as_deref(),
            ))
            .child(
                Element::new("div")
                    .class("doc-cta__buttons")
                    .children(cta.buttons.iter().map(|b| self.action_button(b).into())),
            )
    }

    fn action_button(&self, button: &ActionButton) -> Element {
        let mut element = self
            .button_shell(
                button.text.as_deref(),
                button.variant.as_deref(),
                button.icon.as_deref(),
                button.href.as_deref(),
            )
            .class_opt(button.class_name.as_deref());

        if button.show_arrow {
            element = element.child(Glyph::new("arrow-right").render("doc-button__arrow"));
        }

        element
    }

    fn button(&self, button: &Button) -> Element {
        self.button_shell(
            button.text.as_deref(),
            button.variant.as_deref(),
            button.icon.as_deref(),
            button.href.as_deref(),
        )
    }

    /// `<a>` when there is a link target, `<button>` otherwise. An icon that
    /// is not in the registry is left out.
    fn button_shell(
        &self,
        text: Option<&str>,
        variant: Option<&str>,
        icon: Option<&str>,
        href: Option<&str>,
    ) -> Element {
        let variant = variant
            .filter(|v| BUTTON_VARIANTS.contains(v))
            .unwrap_or("default");

        let element = match href {
            Some(href) => Element::new("a").attr("href", href),
            None => Element::new("button").attr("type", "button"),
        };

        element
            .class("doc-button")
            .class(format!("doc-button--{}", variant))
            .child(self.icon(icon, "doc-button__icon"))
            .text(text.unwrap_or_default())
    }

    fn download_section(&self, section: &DownloadSection) -> Element {
        let links = self.renderer.download_links();

        let video = links.background_video.as_deref().map(|src| {
            Element::new("video")
                .class("doc-download__video")
                .flag("autoplay")
                .flag("loop")
                .flag("muted")
                .flag("playsinline")
                .attr("src", src)
                .attr("aria-label", "Abstract glowing background")
        });

        let stores = [
            (
                links.app_store.as_deref(),
                "app-store",
                "smartphone",
                "Download on the App Store",
            ),
            (
                links.play_store.as_deref(),
                "play-store",
                "smartphone",
                "Get it on Google Play",
            ),
            (
                links.chrome_web_store.as_deref(),
                "chrome",
                "globe",
                "Get it from Chrome Web Store",
            ),
        ];

        let badges = stores.into_iter().filter_map(|(href, key, glyph, label)| {
            href.map(|href| {
                Element::new("a")
                    .class("doc-store-badge")
                    .class(format!("doc-store-badge--{}", key))
                    .attr("href", href)
                    .attr("aria-label", label)
                    .child(Glyph::new(glyph).render("doc-store-badge__icon"))
                    .text(label)
                    .into()
            })
        });

        Element::new("section")
            .class("doc-download")
            .child(video.map(Node::from).unwrap_or_else(Node::empty))
            .child(Element::new("div").class("doc-download__overlay"))
            .child(
                Element::new("div")
                    .class("doc-download__content")
                    .child(optional_text(
                        "h2",
                        "doc-download__title",
                        section.title.as_deref(),
                    ))
                    .child(optional_text(
                        "p",
                        "doc-download__description",
                        section.description.as_deref(),
                    ))
                    .child(
                        Element::new("div")
                            .class("doc-download__stores")
                            .children(badges),
                    ),
            )
    }

    fn badge(&self, badge: &Badge) -> Element {
        Element::new("span")
            .class("doc-badge doc-badge--secondary")
            .text(badge.text.clone().unwrap_or_default())
    }

    fn text(&self, text: &Text) -> Element {
        Element::new("div")
            .class("doc-text")
            .class(format!("doc-text--{}", text.variant().as_str()))
            .text(text.text.clone().unwrap_or_default())
    }

    fn list(&self, list: &List) -> Element {
        Element::new("ul")
            .class("doc-list")
            .children(list.items.iter().map(|item| {
                Element::new("li")
                    .class("doc-list__item")
                    .child(list_marker())
                    .child(Element::new("span").text(item.as_str()))
                    .into()
            }))
    }
}

/// The check-mark glyph in front of every list entry.
pub fn list_marker() -> Node {
    Glyph::new("check-circle").render("doc-list__marker")
}

/// Apply the node's `id` and `className` to its root element.
fn decorate(node: Node, component: &Component) -> Node {
    match node {
        Node::Element(mut element) => {
            if let Some(id) = &component.id {
                element = element.attr("id", id.as_str());
            }
            element.class_opt(component.class_name.as_deref()).into()
        }
        other => other,
    }
}

fn optional_text(tag: &'static str, class: &str, text: Option<&str>) -> Node {
    match text {
        Some(text) => Element::new(tag).class(class).text(text).into(),
        None => Node::empty(),
    }
}

fn gap_class(gap: Option<i64>) -> String {
    let gap = gap
        .filter(|g| (0..=MAX_GAP).contains(g))
        .unwrap_or(DEFAULT_GAP);
    format!("doc-gap-{}", gap)
}
