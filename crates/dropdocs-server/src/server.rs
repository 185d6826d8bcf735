//! Development server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use dropdocs_render::{MountedPage, TocChannel};
use dropdocs_schema::PageLibrary;
use dropdocs_static::{AssetPipeline, BuildConfig, BuildError, NavSection, StaticBuilder};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, next_message, HmrHub, HmrMessage};

const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site settings shared with the static builder
    pub site: BuildConfig,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            site: BuildConfig {
                minify: false,
                ..Default::default()
            },
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// The page currently shown in a browser.
struct CurrentPage {
    slug: String,
    page: MountedPage,
}

/// Shared server state.
pub struct ServerState {
    builder: StaticBuilder,
    library: PageLibrary,
    nav: Vec<NavSection>,
    hmr: HmrHub,
    toc: TocChannel,
    current: Option<CurrentPage>,
}

type SharedState = Arc<RwLock<ServerState>>;

impl ServerState {
    /// Load the page library for `site`.
    pub fn load(site: BuildConfig) -> Result<Self, ServerError> {
        let builder = StaticBuilder::new(site);
        let library = builder.load_library()?;
        let nav = builder.navigation(&library);

        Ok(Self {
            builder,
            library,
            nav,
            hmr: HmrHub::new(),
            toc: TocChannel::new(),
            current: None,
        })
    }

    pub fn hmr(&self) -> &HmrHub {
        &self.hmr
    }

    pub fn toc(&self) -> &TocChannel {
        &self.toc
    }

    /// Re-read the docs directory. The previous library stays in place when
    /// loading fails.
    fn reload(&mut self) {
        let library = match self.builder.load_library() {
            Ok(library) => library,
            Err(e) => {
                tracing::warn!("Keeping previous pages: {}", e);
                return;
            }
        };

        self.nav = self.builder.navigation(&library);
        self.library = library;

        let still_exists = match &mut self.current {
            Some(current) => match self.library.get(&current.slug) {
                Some(page) => {
                    if current.page.update(page) {
                        tracing::debug!("Table of contents changed for {}", current.slug);
                    }
                    true
                }
                None => false,
            },
            None => true,
        };

        if !still_exists {
            // Dropping the mounted page clears its table of contents
            self.current = None;
        }

        tracing::info!("Reloaded {} pages", self.library.len());
    }

    /// Show `slug`, mounting it unless it is already the current page.
    fn show(&mut self, slug: &str) -> Option<&MountedPage> {
        let page = self.library.get(slug)?;

        let same = self.current.as_ref().is_some_and(|c| c.slug == slug);
        if same {
            if let Some(current) = self.current.as_mut() {
                current.page.update(page);
            }
        } else {
            // Unmount the previous page before the next one publishes
            self.current = None;
            self.current = Some(CurrentPage {
                slug: slug.to_string(),
                page: self.builder.renderer().mount(page, &self.toc),
            });
        }

        self.current.as_ref().map(|c| &c.page)
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let docs_dir = self.config.site.docs_dir.clone();
        let state = Arc::new(RwLock::new(ServerState::load(self.config.site.clone())?));

        // Set up file watcher
        let (watcher, mut rx) = FileWatcher::new(std::slice::from_ref(&docs_dir))
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        spawn_toc_forwarder(&state).await;

        let app = router(state, &docs_dir);

        tracing::info!("Starting dev server at http://{}/docs/", addr);

        if self.config.open {
            let url = format!("http://{}/docs/", addr);
            if let Err(e) = open::that(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the router.
pub fn router(state: SharedState, docs_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/docs/") }))
        .route("/docs", get(index_handler))
        .route("/docs/", get(index_handler))
        .route("/docs/{slug}", get(page_handler))
        .route("/docs/{slug}/", get(page_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route("/__toc", get(toc_handler))
        .route("/__hmr", get(ws_handler))
        .route(HMR_SCRIPT_PATH, get(hmr_script_handler))
        .nest_service("/__source", ServeDir::new(docs_dir))
        .with_state(state)
}

/// Forward table-of-contents changes to connected clients.
async fn spawn_toc_forwarder(state: &SharedState) {
    let (mut rx, hub) = {
        let state = state.read().await;
        (state.toc.subscribe(), state.hmr.clone())
    };

    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let items = rx.borrow_and_update().clone();
            hub.send(HmrMessage::Toc { items });
        }
    });
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let mut state = state.write().await;

    if event.affects_pages() {
        tracing::info!("Page changed: {}", event.path().display());
        state.reload();
    }

    state.hmr.send(HmrMessage::Reload);
}

fn scripts() -> Vec<String> {
    vec![HMR_SCRIPT_PATH.to_string()]
}

fn server_error(e: BuildError) -> Response {
    tracing::error!("{}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

/// Handler for the docs landing page.
async fn index_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;

    match state.builder.render_index(&state.nav, &scripts()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

/// Handler for a documentation page.
async fn page_handler(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    let mut guard = state.write().await;
    let state = &mut *guard;

    if state.show(&slug).is_none() {
        tracing::warn!("Unknown page requested: {}", slug);
        return match state
            .builder
            .render_not_found(&state.library, &state.nav, Some(&slug), &scripts())
        {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => server_error(e),
        };
    }

    let (Some(page), Some(current)) = (state.library.get(&slug), state.current.as_ref()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let toc = state.toc.current();
    match state.builder.render_document(
        &slug,
        page,
        current.page.rendered(),
        &toc,
        &state.nav,
        &scripts(),
    ) {
        Ok(output) => Html(output.html).into_response(),
        Err(e) => server_error(e),
    }
}

async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// The currently published table of contents.
async fn toc_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(state.toc.current())
}

/// Handler for the HMR WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send(socket: &mut WebSocket, msg: &HmrMessage) -> bool {
    let Ok(json) = serde_json::to_string(msg) else {
        return false;
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let (mut rx, items) = {
        let state = state.read().await;
        (state.hmr.subscribe(), state.toc.current())
    };

    if !send(&mut socket, &HmrMessage::Connected).await
        || !send(&mut socket, &HmrMessage::Toc { items }).await
    {
        return;
    }

    // Forward HMR messages to the client
    while let Some(msg) = next_message(&mut rx).await {
        if !send(&mut socket, &msg).await {
            break;
        }
    }
}

/// Handler for the HMR client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script("/__hmr"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn site() -> (TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(
            docs.join("wallet.json"),
            r#"{
              "title": "Wallet",
              "sections": [
                { "id": "install", "title": "Install" },
                { "id": "backup", "title": "Backup" }
              ]
            }"#,
        )
        .unwrap();
        fs::write(
            docs.join("xrpl-injection-api.json"),
            r#"{ "title": "API", "sections": [{ "id": "methods", "title": "Methods" }] }"#,
        )
        .unwrap();

        let config = BuildConfig {
            docs_dir: docs,
            title: "DropFi Docs".to_string(),
            ..Default::default()
        };

        (temp, config)
    }

    fn shared(config: BuildConfig) -> SharedState {
        Arc::new(RwLock::new(ServerState::load(config).unwrap()))
    }

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert!(!server.config.site.minify);
    }

    #[tokio::test]
    async fn renders_known_page_and_publishes_toc() {
        let (_temp, config) = site();
        let state = shared(config);

        let response = page_handler(State(state.clone()), Path("wallet".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body(response).await;
        assert!(html.contains("<title>Wallet - DropFi Docs</title>"));
        assert!(html.contains(r##"<a href="#backup">Backup</a>"##));
        assert!(html.contains("__hmr.js"));

        let toc = state.read().await.toc().current();
        let ids: Vec<&str> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["install", "backup"]);
    }

    #[tokio::test]
    async fn unknown_page_is_404_with_available_pages() {
        let (_temp, config) = site();
        let state = shared(config);

        let response = page_handler(State(state), Path("walet".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body(response).await;
        assert!(html.contains("<code>walet</code>"));
        assert!(html.contains(">Wallet</a>"));
        assert!(html.contains(">API</a>"));
    }

    #[tokio::test]
    async fn navigating_replaces_toc() {
        let (_temp, config) = site();
        let state = shared(config);

        page_handler(State(state.clone()), Path("wallet".to_string())).await;
        page_handler(State(state.clone()), Path("xrpl-injection-api".to_string())).await;

        let toc = state.read().await.toc().current();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "methods");
    }

    #[tokio::test]
    async fn reload_picks_up_changes() {
        let (temp, config) = site();
        let state = shared(config);
        page_handler(State(state.clone()), Path("wallet".to_string())).await;

        fs::write(
            temp.path().join("docs/wallet.json"),
            r#"{ "title": "Wallet", "sections": [{ "id": "install", "title": "Installation" }] }"#,
        )
        .unwrap();
        handle_watch_event(
            &state,
            WatchEvent::PageModified(temp.path().join("docs/wallet.json")),
        )
        .await;

        let toc = state.read().await.toc().current();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Installation");
    }

    #[tokio::test]
    async fn deleting_current_page_clears_toc() {
        let (temp, config) = site();
        let state = shared(config);
        page_handler(State(state.clone()), Path("wallet".to_string())).await;

        fs::remove_file(temp.path().join("docs/wallet.json")).unwrap();
        handle_watch_event(
            &state,
            WatchEvent::Deleted(temp.path().join("docs/wallet.json")),
        )
        .await;

        assert!(state.read().await.toc().current().is_empty());
    }

    #[tokio::test]
    async fn watch_events_broadcast_reload() {
        let (_temp, config) = site();
        let state = shared(config);
        let mut rx = state.read().await.hmr().subscribe();

        handle_watch_event(&state, WatchEvent::Modified("docs/notes.txt".into())).await;

        assert_eq!(rx.try_recv().unwrap(), HmrMessage::Reload);
    }

    #[tokio::test]
    async fn toc_changes_are_forwarded() {
        let (_temp, config) = site();
        let state = shared(config);
        let mut rx = state.read().await.hmr().subscribe();
        spawn_toc_forwarder(&state).await;

        page_handler(State(state.clone()), Path("wallet".to_string())).await;

        let msg = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match msg {
            HmrMessage::Toc { items } => assert_eq!(items.len(), 2),
            other => panic!("Expected Toc message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn index_lists_pages() {
        let (_temp, config) = site();
        let state = shared(config);

        let html = body(index_handler(State(state)).await).await;

        assert!(html.contains("Documentation"));
        assert!(html.contains("<h3>Wallet</h3>"));
    }
}
