//! Documentation components.
//!
//! A component is one node of a page's declarative tree. The set of node types
//! is closed on the Rust side, but documents may contain types this version
//! does not know about: those decode to [`ComponentKind::Unknown`] instead of
//! failing, so the rest of the page still loads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::lenient;

/// A single node in a documentation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Optional anchor id
    pub id: Option<String>,

    /// Optional extra CSS classes
    pub class_name: Option<String>,

    /// Type-specific content
    pub kind: ComponentKind,
}

/// Type-specific content of a component, keyed by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Header(Header),
    Row(Row),
    Grid(Grid),
    Card(Card),
    FeatureGrid(FeatureGrid),
    StepList(StepList),
    TipGrid(TipGrid),
    StatsGrid(StatsGrid),
    CodeBlock(CodeBlock),
    ApiEndpoints(ApiEndpoints),
    CallToAction(CallToAction),
    DownloadSection(DownloadSection),
    Badge(Badge),
    Button(Button),
    Text(Text),
    Divider,
    List(List),
    Div(Div),
    Icon(Icon),

    /// A `type` this version does not recognize
    Unknown { tag: String },

    /// A node whose fields could not be decoded
    Malformed { tag: String, message: String },
}

impl Component {
    /// Decode a component from a JSON value. Never fails.
    pub fn from_value(value: Value) -> Self {
        let id = value.get("id").and_then(lenient::scalar_text);
        let class_name = value.get("className").and_then(lenient::scalar_text);

        Self {
            id,
            class_name,
            kind: ComponentKind::from_value(value),
        }
    }

    /// The `type` tag this component was decoded from.
    pub fn tag(&self) -> &str {
        self.kind.tag()
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl ComponentKind {
    fn from_value(value: Value) -> Self {
        let Some(tag) = value.get("type").and_then(Value::as_str).map(str::to_owned) else {
            let message = if value.is_object() {
                "missing `type` field".to_string()
            } else {
                format!("expected an object, found {}", json_kind(&value))
            };
            return Self::Malformed {
                tag: String::new(),
                message,
            };
        };

        let decoded = match tag.as_str() {
            "header" => decode(value).map(Self::Header),
            "row" => decode(value).map(Self::Row),
            "grid" => decode(value).map(Self::Grid),
            "card" => decode(value).map(Self::Card),
            "feature-grid" => decode(value).map(Self::FeatureGrid),
            "step-list" => decode(value).map(Self::StepList),
            "tip-grid" => decode(value).map(Self::TipGrid),
            "stats-grid" => decode(value).map(Self::StatsGrid),
            "code-block" => decode(value).map(Self::CodeBlock),
            "api-endpoints" => decode(value).map(Self::ApiEndpoints),
            "call-to-action" => decode(value).map(Self::CallToAction),
            "download-section" => decode(value).map(Self::DownloadSection),
            "badge" => decode(value).map(Self::Badge),
            "button" => decode(value).map(Self::Button),
            "text" => decode(value).map(Self::Text),
            "divider" => Ok(Self::Divider),
            "list" => decode(value).map(Self::List),
            "div" => decode(value).map(Self::Div),
            "icon" => decode(value).map(Self::Icon),
            _ => Ok(Self::Unknown { tag: tag.clone() }),
        };

        decoded.unwrap_or_else(|e| Self::Malformed {
            tag,
            message: e.to_string(),
        })
    }

    /// The `type` tag of this kind.
    pub fn tag(&self) -> &str {
        match self {
            Self::Header(_) => "header",
            Self::Row(_) => "row",
            Self::Grid(_) => "grid",
            Self::Card(_) => "card",
            Self::FeatureGrid(_) => "feature-grid",
            Self::StepList(_) => "step-list",
            Self::TipGrid(_) => "tip-grid",
            Self::StatsGrid(_) => "stats-grid",
            Self::CodeBlock(_) => "code-block",
            Self::ApiEndpoints(_) => "api-endpoints",
            Self::CallToAction(_) => "call-to-action",
            Self::DownloadSection(_) => "download-section",
            Self::Badge(_) => "badge",
            Self::Button(_) => "button",
            Self::Text(_) => "text",
            Self::Divider => "divider",
            Self::List(_) => "list",
            Self::Div(_) => "div",
            Self::Icon(_) => "icon",
            Self::Unknown { tag } | Self::Malformed { tag, .. } => tag,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Page or block heading with an optional subtitle and icon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
}

/// Vertical stack of children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Row {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub children: Vec<Component>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub gap: Option<i64>,
}

/// Responsive grid of children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Grid {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub children: Vec<Component>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub cols: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub gap: Option<i64>,
}

impl Grid {
    pub fn columns(&self) -> GridColumns {
        GridColumns::from_cols(self.cols)
    }
}

/// Column layout of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridColumns {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl GridColumns {
    /// Map a `cols` value to a layout. Anything outside 1-4 is a single column.
    pub fn from_cols(cols: Option<i64>) -> Self {
        match cols {
            Some(2) => Self::Two,
            Some(3) => Self::Three,
            Some(4) => Self::Four,
            _ => Self::One,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

/// Bordered container with a visual variant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub children: Vec<Component>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub variant: Option<String>,
}

impl Card {
    pub fn variant(&self) -> CardVariant {
        CardVariant::from_name(self.variant.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Default,
    Highlighted,
    Success,
    Warning,
}

impl CardVariant {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("highlighted") => Self::Highlighted,
            Some("success") => Self::Success,
            Some("warning") => Self::Warning,
            _ => Self::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Highlighted => "highlighted",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

/// Grid of feature cards.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureGrid {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
}

/// Numbered walkthrough.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StepList {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient::text")]
    pub step: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub details: Option<String>,
}

/// Grid of tips and warnings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TipGrid {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Tip {
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::selector")]
    pub kind: Option<String>,
}

impl Tip {
    pub fn tone(&self) -> TipTone {
        match self.kind.as_deref() {
            Some("warning") => TipTone::Warning,
            _ => TipTone::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipTone {
    Info,
    Warning,
}

/// Grid of headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsGrid {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stat {
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
}

/// Verbatim code sample. `language` is carried but not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodeBlock {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub language: Option<String>,
}

/// Reference list of HTTP/API endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiEndpoints {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Endpoint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub endpoint: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub params: Option<String>,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        HttpMethod::from_name(self.method.as_deref())
    }
}

/// Method badge style for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Other,
}

impl HttpMethod {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("GET") => Self::Get,
            Some("POST") => Self::Post,
            Some("PUT") => Self::Put,
            _ => Self::Other,
        }
    }
}

/// Highlighted prompt with action buttons.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CallToAction {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub buttons: Vec<ActionButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionButton {
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub href: Option<String>,
    #[serde(default, rename = "showArrow", deserialize_with = "lenient::flag")]
    pub show_arrow: bool,
    #[serde(default, rename = "className", deserialize_with = "lenient::text")]
    pub class_name: Option<String>,
}

/// App download banner with store badges.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DownloadSection {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Badge {
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Button {
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub href: Option<String>,
}

/// Block of text in one of the typographic styles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Text {
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::selector")]
    pub variant: Option<String>,
}

impl Text {
    pub fn variant(&self) -> TextVariant {
        TextVariant::from_name(self.variant.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVariant {
    H1,
    H2,
    H3,
    H4,
    #[default]
    Body,
    Small,
    Caption,
}

impl TextVariant {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("h1") => Self::H1,
            Some("h2") => Self::H2,
            Some("h3") => Self::H3,
            Some("h4") => Self::H4,
            Some("small") => Self::Small,
            Some("caption") => Self::Caption,
            _ => Self::Body,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::Body => "body",
            Self::Small => "small",
            Self::Caption => "caption",
        }
    }
}

/// Checklist of short strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct List {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub items: Vec<String>,
}

/// Plain container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Div {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub children: Vec<Component>,
}

/// Standalone icon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Icon {
    #[serde(default, deserialize_with = "lenient::selector")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_known_component() {
        let component = Component::from_value(json!({
            "type": "text",
            "id": "intro",
            "className": "mt-4",
            "text": "Download the app",
            "variant": "body"
        }));

        assert_eq!(component.id.as_deref(), Some("intro"));
        assert_eq!(component.class_name.as_deref(), Some("mt-4"));
        assert_eq!(
            component.kind,
            ComponentKind::Text(Text {
                text: Some("Download the app".to_string()),
                variant: Some("body".to_string()),
            })
        );
    }

    #[test]
    fn unknown_type_is_preserved() {
        let component = Component::from_value(json!({ "type": "carousel", "slides": [] }));

        assert_eq!(
            component.kind,
            ComponentKind::Unknown {
                tag: "carousel".to_string()
            }
        );
        assert_eq!(component.tag(), "carousel");
    }

    #[test]
    fn missing_type_is_malformed() {
        let component = Component::from_value(json!({ "text": "orphan" }));
        assert!(matches!(component.kind, ComponentKind::Malformed { .. }));

        let component = Component::from_value(json!("just a string"));
        match component.kind {
            ComponentKind::Malformed { message, .. } => {
                assert!(message.contains("a string"));
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn nested_children_decode_independently() {
        let component = Component::from_value(json!({
            "type": "row",
            "children": [
                { "type": "mystery" },
                { "type": "divider" },
                42
            ]
        }));

        let ComponentKind::Row(row) = component.kind else {
            panic!("expected row");
        };

        assert_eq!(row.children.len(), 3);
        assert_eq!(row.children[0].tag(), "mystery");
        assert_eq!(row.children[1].kind, ComponentKind::Divider);
        assert!(matches!(
            row.children[2].kind,
            ComponentKind::Malformed { .. }
        ));
    }

    #[test]
    fn grid_columns_fall_back_to_one() {
        assert_eq!(GridColumns::from_cols(Some(1)), GridColumns::One);
        assert_eq!(GridColumns::from_cols(Some(2)), GridColumns::Two);
        assert_eq!(GridColumns::from_cols(Some(3)), GridColumns::Three);
        assert_eq!(GridColumns::from_cols(Some(4)), GridColumns::Four);
        assert_eq!(GridColumns::from_cols(Some(0)), GridColumns::One);
        assert_eq!(GridColumns::from_cols(Some(5)), GridColumns::One);
        assert_eq!(GridColumns::from_cols(None), GridColumns::One);

        let grid = Component::from_value(json!({ "type": "grid", "cols": "wide" }));
        let ComponentKind::Grid(grid) = grid.kind else {
            panic!("expected grid");
        };
        assert_eq!(grid.columns(), GridColumns::One);
    }

    #[test]
    fn selectors_fall_back_to_defaults() {
        assert_eq!(CardVariant::from_name(Some("loud")), CardVariant::Default);
        assert_eq!(CardVariant::from_name(Some("success")), CardVariant::Success);
        assert_eq!(TextVariant::from_name(Some("h5")), TextVariant::Body);
        assert_eq!(TextVariant::from_name(Some("caption")), TextVariant::Caption);
        assert_eq!(HttpMethod::from_name(Some("DELETE")), HttpMethod::Other);
    }

    #[test]
    fn call_to_action_buttons_decode() {
        let component = Component::from_value(json!({
            "type": "call-to-action",
            "title": "Ready?",
            "buttons": [
                { "text": "Install", "icon": "Download", "showArrow": true },
                { "text": "Docs", "variant": "outline" }
            ]
        }));

        let ComponentKind::CallToAction(cta) = component.kind else {
            panic!("expected call-to-action");
        };

        assert_eq!(cta.buttons.len(), 2);
        assert!(cta.buttons[0].show_arrow);
        assert_eq!(cta.buttons[1].variant.as_deref(), Some("outline"));
    }

    #[test]
    fn step_numbers_accept_integers() {
        let component = Component::from_value(json!({
            "type": "step-list",
            "steps": [{ "step": 1, "title": "Install" }]
        }));

        let ComponentKind::StepList(list) = component.kind else {
            panic!("expected step-list");
        };

        assert_eq!(list.steps[0].step.as_deref(), Some("1"));
    }
}
