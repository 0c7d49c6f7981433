//! Error types for debug panel configuration and request processing

use std::fmt;
use thiserror::Error;

/// Result type used throughout the crate
pub type DebugResult<T> = Result<T, DebugError>;

/// Panel lifecycle phase in which a hook failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
	/// Before the inner handler runs
	Request,
	/// After the inner handler produced a response
	Response,
}

impl fmt::Display for HookPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Request => f.write_str("process_request"),
			Self::Response => f.write_str("process_response"),
		}
	}
}

/// Debug panel errors
///
/// Configuration errors (`PanelNotFound`, `InvalidOption`, `InvalidPanel`,
/// `Config`) are raised while building the layer. `PanelHook` is only ever
/// logged; it never reaches the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DebugError {
	/// No panel is registered under the identifier
	#[error("panel not found: {0}")]
	PanelNotFound(String),

	/// A panel rejected an option key or value
	#[error("invalid option '{key}' for panel '{panel}': {reason}")]
	InvalidOption {
		/// Panel base name
		panel: String,
		/// Option key
		key: String,
		/// Why the option was rejected
		reason: String,
	},

	/// A panel instance does not satisfy the panel contract
	#[error("invalid panel: {0}")]
	InvalidPanel(String),

	/// A panel hook returned an error or panicked
	#[error("panel '{panel}' failed during {phase}: {message}")]
	PanelHook {
		/// Panel base name
		panel: String,
		/// Hook that failed
		phase: HookPhase,
		/// Failure description
		message: String,
	},

	/// HTTP body handling error
	#[error("HTTP error: {0}")]
	Http(String),

	/// Configuration could not be parsed
	#[error("configuration error: {0}")]
	Config(String),
}

impl DebugError {
	/// Shorthand for an unrecognized option key
	pub fn unknown_option(panel: impl Into<String>, key: impl Into<String>) -> Self {
		Self::InvalidOption {
			panel: panel.into(),
			key: key.into(),
			reason: "unrecognized option".to_string(),
		}
	}
}

impl From<serde_json::Error> for DebugError {
	fn from(err: serde_json::Error) -> Self {
		Self::Config(err.to_string())
	}
}
