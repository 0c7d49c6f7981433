//! # Reinhardt Debug Panels
//!
//! Per-request debug panels for Tower/Axum applications.
//!
//! The middleware runs an ordered set of panels around the inner service:
//! every panel observes the request before the handler runs and the response
//! after it. When the response is a `200 OK` HTML document containing
//! `</body>`, the panels are rendered into an overlay (navigation list plus
//! panel bodies) spliced in front of the last closing body tag. Every other
//! response passes through byte-for-byte.
//!
//! ## Built-in panels
//!
//! - `Environment` - request line, headers (credentials masked), metadata
//! - `Response` - status and response headers
//! - `Timer` - start, end, and elapsed time
//! - `Memory` - resident memory before and after the handler
//! - `Parameters` - query parameters and cookies
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, routing::get, response::Html};
//! use reinhardt_debug_panels::{DebugPanelConfig, DebugPanelLayer};
//!
//! async fn index() -> Html<&'static str> {
//!     Html("<html><body>Hello</body></html>")
//! }
//!
//! # fn main() -> Result<(), reinhardt_debug_panels::DebugError> {
//! let config = DebugPanelConfig::enabled().with_panels(["Environment", "Timer"]);
//! let app: Router = Router::new()
//!     .route("/", get(index))
//!     .layer(DebugPanelLayer::new(config)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom panels
//!
//! Implement [`Panel`] for a `Clone` type and either register a constructor
//! on a [`PanelRegistry`] or pass an instance through [`PanelSpec::instance`].
//! Configured panels act as templates: each request works on its own clone,
//! so hooks can keep request state in `self`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Module declarations following Rust 2024 module system (no mod.rs)
pub mod context;
pub mod error;
pub mod middleware;
pub mod panels;
pub mod ui;
pub mod utils;

// Re-export main types
pub use context::{RequestContext, RequestMetadata, ResponseEnvelope};
pub use error::{DebugError, DebugResult, HookPhase};
pub use middleware::{DebugPanelConfig, DebugPanelLayer, DebugPanelService, PanelSpecConfig};
pub use panels::{DEFAULT_PANELS, Panel, PanelRegistry, PanelSpec};
pub use ui::injection::{InjectionOutcome, SkipReason};
pub use ui::render::{FieldValue, render_list_pairs, render_map};

pub use panels::{EnvironmentPanel, MemoryPanel, ParametersPanel, ResponsePanel, TimerPanel};
