//! Development server with live reload for dropdocs.
//!
//! Renders pages on request, watches the docs directory for changes and pushes
//! reloads and table-of-contents updates to connected browsers.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{router, DevServer, DevServerConfig, ServerError, ServerState};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{hmr_client_script, next_message, HmrHub, HmrMessage};
