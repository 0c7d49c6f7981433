//! Middleware components
//!
//! This module provides Tower/Axum middleware integration for the debug panels.

pub mod config;
pub mod layer;
pub mod service;

pub use config::{DebugPanelConfig, PanelSpecConfig};
pub use layer::DebugPanelLayer;
pub use service::DebugPanelService;
