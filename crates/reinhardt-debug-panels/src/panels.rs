//! Debug panel system
//!
//! A panel observes one request/response cycle and renders what it saw.
//! Configured panels are templates: the middleware clones them at the start
//! of every request, so hooks may freely mutate `self` without any state
//! leaking between concurrent requests.

pub mod environment;
pub mod memory;
pub mod parameters;
pub mod registry;
pub mod response;
pub mod timer;

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::{DebugError, DebugResult};
use async_trait::async_trait;
use std::fmt;

pub use environment::EnvironmentPanel;
pub use memory::MemoryPanel;
pub use parameters::ParametersPanel;
pub use registry::{PanelConstructor, PanelRegistry};
pub use response::ResponsePanel;
pub use timer::TimerPanel;

/// Panels activated when the configuration names none
pub const DEFAULT_PANELS: &[&str] = &["Environment", "Response", "Timer", "Memory"];

/// Placeholder shown instead of sensitive values
pub(crate) const REDACTED: &str = "********";

/// Cloning support for boxed panels
///
/// Implemented for every `Panel + Clone`; never implement it by hand.
pub trait PanelClone {
	/// Clone into a fresh boxed panel
	fn clone_box(&self) -> Box<dyn Panel>;
}

impl<T> PanelClone for T
where
	T: Panel + Clone + 'static,
{
	fn clone_box(&self) -> Box<dyn Panel> {
		Box::new(self.clone())
	}
}

impl Clone for Box<dyn Panel> {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

/// Debug panel trait
///
/// All panels must implement this trait. Hooks receive `&mut self`, but the
/// instance they run on is a per-request clone of the configured template.
#[async_trait]
pub trait Panel: PanelClone + Send + Sync {
	/// Registry identifier, e.g. `"Timer"`
	fn base_name(&self) -> &str;

	/// Display name
	fn title(&self) -> String {
		title_from_base_name(self.base_name())
	}

	/// Short status shown in the navigation list
	fn nav_subtitle(&self) -> String {
		String::new()
	}

	/// Apply a configuration option; unknown keys are rejected
	fn set_option(&mut self, key: &str, _value: &str) -> DebugResult<()> {
		Err(DebugError::unknown_option(self.base_name(), key))
	}

	/// Observe the request before the inner handler runs
	async fn process_request(&mut self, _ctx: &RequestContext) -> DebugResult<()> {
		Ok(())
	}

	/// Observe the response after the inner handler ran
	///
	/// May be called without a preceding `process_request`.
	async fn process_response(
		&mut self,
		_response: &ResponseEnvelope,
		_ctx: &RequestContext,
	) -> DebugResult<()> {
		Ok(())
	}

	/// Rendered panel body; `None` shows an inactive nav entry only
	fn content(&self) -> Option<String> {
		None
	}
}

impl fmt::Debug for dyn Panel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Panel")
			.field("base_name", &self.base_name())
			.finish()
	}
}

/// Split a CamelCase base name into words: `"ModuleVersions"` -> `"Module Versions"`
pub fn title_from_base_name(base_name: &str) -> String {
	let mut title = String::with_capacity(base_name.len() + 4);
	let mut prev_lower = false;
	for c in base_name.chars() {
		if c.is_ascii_uppercase() && prev_lower {
			title.push(' ');
		}
		prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
		title.push(c);
	}
	title
}

/// Check that a panel satisfies the contract the middleware relies on
pub fn validate_panel(panel: &dyn Panel) -> DebugResult<()> {
	let name = panel.base_name();
	if name.is_empty() {
		return Err(DebugError::InvalidPanel(
			"panel base name must not be empty".to_string(),
		));
	}
	if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
		return Err(DebugError::InvalidPanel(format!(
			"panel base name '{}' must be ASCII alphanumeric",
			name
		)));
	}
	if panel.title().trim().is_empty() {
		return Err(DebugError::InvalidPanel(format!(
			"panel '{}' has an empty title",
			name
		)));
	}
	Ok(())
}

/// One configured panel
pub enum PanelSpec {
	/// Registered panel with default options
	Name(String),
	/// Registered panel plus ordered option pairs
	WithOptions(String, Vec<(String, String)>),
	/// Caller-built panel used as the template as-is
	Instance(Box<dyn Panel>),
}

impl PanelSpec {
	/// Registered panel with options
	pub fn with_options<K, V>(name: impl Into<String>, options: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self::WithOptions(
			name.into(),
			options
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}

	/// Pre-built panel instance
	pub fn instance<P: Panel + 'static>(panel: P) -> Self {
		Self::Instance(Box::new(panel))
	}
}

impl From<&str> for PanelSpec {
	fn from(name: &str) -> Self {
		Self::Name(name.to_string())
	}
}

impl From<String> for PanelSpec {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}

impl From<Box<dyn Panel>> for PanelSpec {
	fn from(panel: Box<dyn Panel>) -> Self {
		Self::Instance(panel)
	}
}

impl fmt::Debug for PanelSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
			Self::WithOptions(name, options) => f
				.debug_tuple("WithOptions")
				.field(name)
				.field(options)
				.finish(),
			Self::Instance(panel) => f
				.debug_tuple("Instance")
				.field(&panel.base_name())
				.finish(),
		}
	}
}
