//! Template engine for rendering documentation pages.

use minijinja::{context, Environment};

use dropdocs_render::TocItem;
use dropdocs_schema::PageMetadata;

use crate::assets::LUCIDE_SCRIPT;
use crate::navigation::NavSection;

/// Context for rendering a page template.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Meta description
    pub description: String,
    /// Canonical URL path of the page
    pub canonical: String,
    /// Rendered content HTML
    pub content: String,
    /// Sidebar navigation
    pub nav: Vec<NavSection>,
    /// Table of contents
    pub toc: Vec<TocItem>,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    /// Extra script URLs loaded after the runtime
    pub scripts: Vec<String>,
    /// Slug that failed to resolve (404 page)
    pub requested: Option<String>,
    /// Pages offered as alternatives (404 page)
    pub available: Vec<PageMetadata>,
}

/// Meta description for a page, falling back to a sentence built from the
/// title.
pub fn meta_description(title: &str, description: Option<&str>) -> String {
    match description {
        Some(description) if !description.trim().is_empty() => description.to_string(),
        _ => format!("Learn about {}.", title.to_lowercase()),
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_global("lucide_script", LUCIDE_SCRIPT);

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("nav.html", NAV_TEMPLATE),
            ("toc.html", TOC_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
            ("not_found.html", NOT_FOUND_TEMPLATE),
        ] {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("Failed to add {} template: {}", name, e));
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            canonical => &context.canonical,
            content => &context.content,
            nav => &context.nav,
            toc => &context.toc,
            base_url => &context.base_url,
            styles => &context.styles,
            scripts => &context.scripts,
            requested => &context.requested,
            available => &context.available,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <meta name="description" content="{{ description }}">
  {% if canonical %}<link rel="canonical" href="{{ canonical }}">
  {% endif %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
    {% block aside %}{% endblock %}
  </div>
  <script src="{{ lucide_script }}"></script>
  <script src="{{ base_url }}assets/main.js"></script>
  {% for script in scripts %}<script src="{{ script }}"></script>
  {% endfor %}
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}docs/" class="nav-logo">{{ site_title }}</a>
</div>
{% for section in nav %}
<div class="nav-category">
  <button type="button" class="nav-category__toggle" aria-expanded="true">{{ section.title }}</button>
  <ul class="nav-list">
  {% for item in section.items %}
    <li class="nav-item{% if item.active %} active{% endif %}">
      <a href="{{ item.path }}"{% if item.active %} aria-current="page"{% endif %}>
        <i class="nav-icon" data-lucide="{{ item.icon }}" aria-hidden="true"></i>
        <span>{{ item.title }}</span>
        {% if item.badge %}<span class="nav-badge nav-badge--{{ item.badge | lower }}">{{ item.badge }}</span>{% endif %}
      </a>
    </li>
  {% endfor %}
  </ul>
</div>
{% endfor %}"##;

const TOC_TEMPLATE: &str = r##"<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  {{ content | safe }}
</article>
{% endblock %}

{% block aside %}
{% if toc %}{% include "toc.html" %}{% endif %}
{% endblock %}"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="docs-index">
  <header class="doc-header">
    <h1 class="doc-header__title">{{ title }}</h1>
    <p class="doc-header__subtitle">{{ description }}</p>
  </header>
  <div class="docs-index__categories">
  {% for section in nav %}
    <section class="docs-index__category">
      <h2>{{ section.title }}</h2>
      {% if section.description %}<p>{{ section.description }}</p>{% endif %}
      <div class="docs-index__pages">
      {% for item in section.items %}
        <a class="docs-index__page" href="{{ item.path }}">
          <i class="nav-icon" data-lucide="{{ item.icon }}" aria-hidden="true"></i>
          <h3>{{ item.title }}</h3>
          {% if item.description %}<p>{{ item.description }}</p>{% endif %}
        </a>
      {% endfor %}
      </div>
    </section>
  {% endfor %}
  </div>
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="not-found">
  <h1 class="doc-header__title">Documentation page not found</h1>
  {% if requested %}<p>No page named <code>{{ requested }}</code>.</p>{% endif %}
  {% if available %}
  <p>Available pages:</p>
  <ul>
  {% for page in available %}
    <li><a href="{{ base_url }}docs/{{ page.slug }}/">{{ page.title }}</a></li>
  {% endfor %}
  </ul>
  {% endif %}
</div>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavItem;

    fn context() -> Context {
        Context {
            title: "Wallet".to_string(),
            site_title: "DropFi Docs".to_string(),
            description: "Install the wallet.".to_string(),
            canonical: "/docs/wallet/".to_string(),
            content: "<div class=\"doc-page\">Hello</div>".to_string(),
            base_url: "/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();
        let html = engine.render_page("doc.html", &context()).unwrap();

        assert!(html.contains("<title>Wallet - DropFi Docs</title>"));
        assert!(html.contains(r#"<meta name="description" content="Install the wallet.">"#));
        assert!(html.contains(r#"<link rel="canonical""#));
        assert!(html.contains("<div class=\"doc-page\">Hello</div>"));
        assert!(html.contains("lucide.min.js"));
        assert!(!html.contains("On this page"));
    }

    #[test]
    fn renders_toc_and_navigation() {
        let engine = TemplateEngine::new();
        let context = Context {
            toc: vec![TocItem {
                id: "install".to_string(),
                title: "Install".to_string(),
                level: 2,
            }],
            nav: vec![NavSection {
                title: "Getting Started".to_string(),
                description: None,
                items: vec![NavItem {
                    slug: "wallet".to_string(),
                    title: "Wallet".to_string(),
                    description: None,
                    path: "/docs/wallet/".to_string(),
                    icon: "download".to_string(),
                    badge: Some("Essential".to_string()),
                    active: true,
                }],
            }],
            ..context()
        };

        let html = engine.render_page("doc.html", &context).unwrap();

        assert!(html.contains("On this page"));
        assert!(html.contains(r##"<a href="#install">Install</a>"##));
        assert!(html.contains("nav-item active"));
        assert!(html.contains(r#"data-lucide="download""#));
        assert!(html.contains("nav-badge--essential"));
    }

    #[test]
    fn escapes_titles() {
        let engine = TemplateEngine::new();
        let context = Context {
            title: "<script>".to_string(),
            ..context()
        };

        let html = engine.render_page("doc.html", &context).unwrap();

        assert!(html.contains("&lt;script&gt; - DropFi Docs"));
    }

    #[test]
    fn not_found_lists_available_pages() {
        let engine = TemplateEngine::new();
        let context = Context {
            requested: Some("walet".to_string()),
            available: vec![PageMetadata {
                slug: "wallet".to_string(),
                title: "Wallet".to_string(),
                description: None,
            }],
            ..context()
        };

        let html = engine.render_page("not_found.html", &context).unwrap();

        assert!(html.contains("<code>walet</code>"));
        assert!(html.contains(r#"docs/wallet/">Wallet</a>"#));
    }

    #[test]
    fn meta_description_falls_back_to_title() {
        assert_eq!(meta_description("Wallet", None), "Learn about wallet.");
        assert_eq!(meta_description("Wallet", Some("  ")), "Learn about wallet.");
        assert_eq!(meta_description("Wallet", Some("Custom")), "Custom");
    }
}
