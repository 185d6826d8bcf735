//! Asset pipeline for CSS and JavaScript processing.

/// Lucide's browser build, which swaps `data-lucide` placeholders for SVGs.
pub const LUCIDE_SCRIPT: &str = "https://unpkg.com/lucide@latest/dist/umd/lucide.min.js";

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        let mut css = DEFAULT_CSS.to_string();
        css.push_str(&gap_utilities());
        css
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// `doc-gap-N` classes on a 0.25rem scale.
fn gap_utilities() -> String {
    (0..=12)
        .map(|n| format!(".doc-gap-{n} {{ gap: {}rem; }}\n", n as f32 * 0.25))
        .collect()
}

const DEFAULT_CSS: &str = r#"/* dropdocs theme */

:root {
  --background: #0b0d12;
  --foreground: #e7e9ee;
  --muted: #141821;
  --muted-foreground: #8b93a7;
  --border: #232a38;
  --primary: #4f8cff;
  --primary-foreground: #ffffff;
  --success: #22c55e;
  --warning: #f59e0b;
  --destructive: #ef4444;
  --radius: 0.75rem;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 880px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans, system-ui, -apple-system, sans-serif);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: inherit;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr var(--toc-width);
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-header {
  margin-bottom: 1.5rem;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.125rem;
  text-decoration: none;
}

.nav-category + .nav-category {
  margin-top: 1.25rem;
}

.nav-category__toggle {
  display: flex;
  width: 100%;
  align-items: center;
  justify-content: space-between;
  background: none;
  border: 0;
  color: var(--muted-foreground);
  font: inherit;
  font-size: 0.75rem;
  font-weight: 600;
  letter-spacing: 0.05em;
  text-transform: uppercase;
  cursor: pointer;
  padding: 0.25rem 0;
}

.nav-category.collapsed .nav-list {
  display: none;
}

.nav-list {
  list-style: none;
  margin-top: 0.5rem;
}

.nav-item a {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  padding: 0.375rem 0.75rem;
  border-radius: 0.375rem;
  color: var(--muted-foreground);
  text-decoration: none;
  font-size: 0.875rem;
}

.nav-item a:hover {
  color: var(--foreground);
  background: var(--border);
}

.nav-item.active a {
  color: var(--primary-foreground);
  background: var(--primary);
}

.nav-icon {
  width: 1rem;
  height: 1rem;
}

.nav-badge {
  margin-left: auto;
  font-size: 0.625rem;
  padding: 0.125rem 0.375rem;
  border-radius: 999px;
  background: var(--border);
}

/* Main */
.main {
  padding: 3rem 2rem;
  max-width: var(--content-max-width);
  width: 100%;
  margin: 0 auto;
}

/* Table of contents */
.toc {
  position: sticky;
  top: 0;
  height: 100vh;
  padding: 3rem 1rem;
  font-size: 0.8125rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-foreground);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc a {
  display: block;
  padding: 0.25rem 0;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc a.active {
  color: var(--primary);
}

/* Page */
.doc-page {
  display: flex;
  flex-direction: column;
  gap: 3rem;
}

.doc-header__title-row {
  display: flex;
  align-items: center;
  gap: 0.75rem;
}

.doc-header__title {
  font-size: 2.25rem;
  font-weight: 700;
  line-height: 1.2;
}

.doc-header__icon {
  width: 2rem;
  height: 2rem;
  color: var(--primary);
}

.doc-header__subtitle {
  margin-top: 0.75rem;
  font-size: 1.125rem;
  color: var(--muted-foreground);
}

.doc-section {
  scroll-margin-top: 2rem;
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

.doc-section__title {
  font-size: 1.5rem;
  font-weight: 600;
  scroll-margin-top: 2rem;
}

/* Layout */
.doc-row {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
}

.doc-grid {
  display: grid;
}

.doc-grid--cols-1 { grid-template-columns: 1fr; }
.doc-grid--cols-2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
.doc-grid--cols-3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
.doc-grid--cols-4 { grid-template-columns: repeat(4, minmax(0, 1fr)); }

@media (max-width: 768px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .sidebar,
  .toc {
    position: static;
    height: auto;
  }

  .doc-grid--cols-2,
  .doc-grid--cols-3,
  .doc-grid--cols-4,
  .doc-feature-grid,
  .doc-tip-grid,
  .doc-stats-grid {
    grid-template-columns: 1fr;
  }
}

/* Card */
.doc-card {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--muted);
  padding: 1.5rem;
}

.doc-card--highlighted { border-color: var(--primary); }
.doc-card--success { border-color: var(--success); }
.doc-card--warning { border-color: var(--warning); }

/* Features, tips, stats */
.doc-feature-grid,
.doc-tip-grid,
.doc-stats-grid {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 1rem;
}

.doc-stats-grid {
  grid-template-columns: repeat(4, minmax(0, 1fr));
}

.doc-feature__icon,
.doc-tip__icon,
.doc-stat__icon {
  width: 1.5rem;
  height: 1.5rem;
  margin-bottom: 0.75rem;
}

.doc-feature__title,
.doc-tip__title {
  font-weight: 600;
}

.doc-feature__description,
.doc-tip__description,
.doc-stat__label {
  color: var(--muted-foreground);
  font-size: 0.875rem;
}

.doc-tip--info { border-left: 3px solid var(--primary); }
.doc-tip--warning { border-left: 3px solid var(--warning); }

.doc-stat__value {
  font-size: 1.75rem;
  font-weight: 700;
}

/* Steps */
.doc-steps {
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

.doc-step__number {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  width: 2rem;
  height: 2rem;
  border-radius: 999px;
  background: var(--primary);
  color: var(--primary-foreground);
  font-weight: 600;
  flex-shrink: 0;
}

.doc-step__body {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.doc-step__title {
  font-weight: 600;
}

.doc-step__description {
  color: var(--muted-foreground);
}

.doc-step__details {
  list-style: none;
  margin-top: 0.5rem;
  font-size: 0.875rem;
}

/* Code */
.doc-code-block__title {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-size: 0.875rem;
  color: var(--muted-foreground);
  margin-bottom: 0.5rem;
}

.doc-code-block__glyph {
  width: 1rem;
  height: 1rem;
}

.doc-code-block__pre {
  background: #05070b;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  font-family: var(--font-mono, ui-monospace, monospace);
  font-size: 0.875rem;
}

/* API endpoints */
.doc-endpoint {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
}

.doc-endpoint + .doc-endpoint {
  margin-top: 1rem;
}

.doc-endpoint__head {
  display: flex;
  align-items: center;
  gap: 0.75rem;
}

.doc-endpoint__path {
  font-family: var(--font-mono, ui-monospace, monospace);
}

.doc-endpoint__description {
  margin-top: 0.5rem;
  color: var(--muted-foreground);
}

.doc-endpoint__params {
  margin-top: 0.5rem;
  font-size: 0.875rem;
}

.doc-method {
  font-size: 0.75rem;
  font-weight: 700;
  padding: 0.125rem 0.5rem;
  border-radius: 0.25rem;
  background: var(--border);
}

.doc-method--get { background: rgba(34, 197, 94, 0.15); color: var(--success); }
.doc-method--post { background: rgba(79, 140, 255, 0.15); color: var(--primary); }
.doc-method--put { background: rgba(245, 158, 11, 0.15); color: var(--warning); }

/* Call to action */
.doc-cta__title {
  font-size: 1.25rem;
  font-weight: 600;
}

.doc-cta__description {
  color: var(--muted-foreground);
  margin-top: 0.5rem;
}

.doc-cta__buttons {
  display: flex;
  flex-wrap: wrap;
  gap: 0.75rem;
  margin-top: 1.25rem;
}

/* Buttons and badges */
.doc-button {
  display: inline-flex;
  align-items: center;
  gap: 0.5rem;
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  border: 1px solid transparent;
  font: inherit;
  font-size: 0.875rem;
  font-weight: 500;
  text-decoration: none;
  cursor: pointer;
}

.doc-button--default { background: var(--primary); color: var(--primary-foreground); }
.doc-button--secondary { background: var(--border); color: var(--foreground); }
.doc-button--outline { background: transparent; border-color: var(--border); color: var(--foreground); }
.doc-button--ghost { background: transparent; color: var(--foreground); }
.doc-button--link { background: transparent; color: var(--primary); text-decoration: underline; }
.doc-button--destructive { background: var(--destructive); color: var(--primary-foreground); }

.doc-button__icon,
.doc-button__arrow {
  width: 1rem;
  height: 1rem;
}

.doc-badge {
  display: inline-flex;
  align-items: center;
  padding: 0.125rem 0.625rem;
  border-radius: 999px;
  font-size: 0.75rem;
  font-weight: 600;
  background: var(--border);
}

/* Text */
.doc-text--h1 { font-size: 2.25rem; font-weight: 700; }
.doc-text--h2 { font-size: 1.5rem; font-weight: 600; }
.doc-text--h3 { font-size: 1.25rem; font-weight: 600; }
.doc-text--h4 { font-size: 1.125rem; font-weight: 600; }
.doc-text--body { font-size: 1rem; }
.doc-text--small { font-size: 0.875rem; }
.doc-text--caption { font-size: 0.75rem; color: var(--muted-foreground); }

.doc-divider {
  border: 0;
  border-top: 1px solid var(--border);
}

.doc-list {
  list-style: none;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}

.doc-list__item {
  display: flex;
  align-items: flex-start;
  gap: 0.5rem;
}

.doc-list__marker {
  width: 1rem;
  height: 1rem;
  margin-top: 0.25rem;
  color: var(--success);
  flex-shrink: 0;
}

/* Download banner */
.doc-download {
  position: relative;
  overflow: hidden;
  border-radius: var(--radius);
  min-height: 16rem;
  display: flex;
  align-items: center;
}

.doc-download__video {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.doc-download__overlay {
  position: absolute;
  inset: 0;
  background: linear-gradient(90deg, rgba(11, 13, 18, 0.9), rgba(11, 13, 18, 0.4));
}

.doc-download__content {
  position: relative;
  padding: 2rem;
}

.doc-download__title {
  font-size: 1.75rem;
  font-weight: 700;
}

.doc-download__description {
  color: var(--muted-foreground);
  margin-top: 0.5rem;
}

.doc-download__stores {
  display: flex;
  flex-wrap: wrap;
  gap: 0.75rem;
  margin-top: 1.5rem;
}

.doc-store-badge {
  display: inline-flex;
  align-items: center;
  gap: 0.5rem;
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  background: #000;
  border: 1px solid var(--border);
  text-decoration: none;
  font-size: 0.875rem;
}

.doc-store-badge__icon {
  width: 1.125rem;
  height: 1.125rem;
}

/* Landing page */
.docs-index__categories {
  display: flex;
  flex-direction: column;
  gap: 2.5rem;
  margin-top: 2.5rem;
}

.docs-index__category h2 {
  font-size: 1.25rem;
  margin-bottom: 0.25rem;
}

.docs-index__category p {
  color: var(--muted-foreground);
}

.docs-index__pages {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 1rem;
  margin-top: 1rem;
}

.docs-index__page {
  display: block;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1.25rem;
  text-decoration: none;
}

.docs-index__page:hover {
  border-color: var(--primary);
}

.not-found ul {
  margin-top: 1rem;
  padding-left: 1.25rem;
}

/* Utilities */
"#;

const DEFAULT_JS: &str = r##"// dropdocs client runtime
(function() {
  function renderIcons() {
    if (window.lucide && typeof window.lucide.createIcons === 'function') {
      window.lucide.createIcons();
    }
  }

  function setupScrollSpy() {
    var links = document.querySelectorAll('.toc a[href^="#"]');
    if (!links.length || !('IntersectionObserver' in window)) return;

    var byId = {};
    links.forEach(function(link) {
      byId[link.getAttribute('href').slice(1)] = link;
    });

    var observer = new IntersectionObserver(function(entries) {
      entries.forEach(function(entry) {
        if (!entry.isIntersecting) return;
        links.forEach(function(link) { link.classList.remove('active'); });
        var link = byId[entry.target.id];
        if (link) link.classList.add('active');
      });
    }, { rootMargin: '-20% 0px -35% 0px' });

    Object.keys(byId).forEach(function(id) {
      var target = document.getElementById(id);
      if (target) observer.observe(target);
    });
  }

  function setupSidebarToggles() {
    document.querySelectorAll('.nav-category__toggle').forEach(function(button) {
      button.addEventListener('click', function() {
        var category = button.closest('.nav-category');
        var collapsed = category.classList.toggle('collapsed');
        button.setAttribute('aria-expanded', String(!collapsed));
      });
    });
  }

  function init() {
    renderIcons();
    setupScrollSpy();
    setupSidebarToggles();
  }

  window.dropdocs = { renderIcons: renderIcons };

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();

        assert!(css.contains(".doc-grid--cols-4"));
        assert!(css.contains(".doc-card--highlighted"));
        assert!(css.contains(".doc-gap-0 { gap: 0rem; }"));
        assert!(css.contains(".doc-gap-12 { gap: 3rem; }"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();

        assert!(js.contains("lucide.createIcons"));
        assert!(js.contains("IntersectionObserver"));
        assert!(js.contains("nav-category__toggle"));
    }

    #[test]
    fn minifies_css() {
        let css = ".doc-row {\n  display: flex;\n  flex-wrap: wrap;\n}";
        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains(".doc-row{"));
    }

    #[test]
    fn generated_css_is_valid() {
        assert!(AssetPipeline::minify_css(&AssetPipeline::generate_css()).is_ok());
    }
}
