//! Debug panel configuration

use crate::error::DebugResult;
use crate::panels::{DEFAULT_PANELS, PanelSpec};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One panel entry in a serialized configuration
///
/// Accepts either a bare name (`"Timer"`) or an object with ordered option
/// pairs (`{"name": "Timer", "options": [["precision", "2"]]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelSpecConfig {
	/// Panel with default options
	Name(String),
	/// Panel with options applied in order
	WithOptions {
		/// Registered panel identifier
		name: String,
		/// Option key/value pairs
		#[serde(default)]
		options: Vec<(String, String)>,
	},
}

impl From<PanelSpecConfig> for PanelSpec {
	fn from(config: PanelSpecConfig) -> Self {
		match config {
			PanelSpecConfig::Name(name) => PanelSpec::Name(name),
			PanelSpecConfig::WithOptions { name, options } => PanelSpec::WithOptions(name, options),
		}
	}
}

/// Debug panel middleware configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugPanelConfig {
	/// Run panels and inject the overlay (defaults to debug builds only)
	pub enabled: bool,
	/// Client addresses allowed to see the overlay; empty allows everyone
	pub internal_ips: Vec<IpAddr>,
	/// Panels to activate, in display order; `None` uses the defaults
	pub panels: Option<Vec<PanelSpecConfig>>,
}

impl Default for DebugPanelConfig {
	fn default() -> Self {
		Self {
			enabled: cfg!(debug_assertions),
			internal_ips: Vec::new(),
			panels: None,
		}
	}
}

impl DebugPanelConfig {
	/// Enabled configuration with the default panels
	pub fn enabled() -> Self {
		Self {
			enabled: true,
			..Default::default()
		}
	}

	/// Parse a JSON configuration document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_debug_panels::DebugPanelConfig;
	///
	/// let config = DebugPanelConfig::from_json_str(
	///     r#"{"enabled": true, "panels": ["Timer", {"name": "Environment", "options": [["hide_headers", "cookie"]]}]}"#,
	/// ).unwrap();
	/// assert!(config.enabled);
	/// assert_eq!(config.panels.unwrap().len(), 2);
	/// ```
	pub fn from_json_str(json: &str) -> DebugResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Set the panel list
	pub fn with_panels<I>(mut self, panels: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<PanelSpecConfig>,
	{
		self.panels = Some(panels.into_iter().map(Into::into).collect());
		self
	}

	/// Panel specs to resolve, falling back to the defaults
	pub fn panel_specs(&self) -> Vec<PanelSpec> {
		match &self.panels {
			Some(panels) => panels.iter().cloned().map(PanelSpec::from).collect(),
			None => DEFAULT_PANELS.iter().map(|name| PanelSpec::from(*name)).collect(),
		}
	}

	/// Whether a client address may see the overlay
	///
	/// Requests with an unknown address only pass when no restriction is set.
	pub fn allows_client(&self, client: Option<IpAddr>) -> bool {
		if self.internal_ips.is_empty() {
			return true;
		}
		client.is_some_and(|ip| self.internal_ips.contains(&ip))
	}
}

impl From<&str> for PanelSpecConfig {
	fn from(name: &str) -> Self {
		Self::Name(name.to_string())
	}
}

impl From<String> for PanelSpecConfig {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}
