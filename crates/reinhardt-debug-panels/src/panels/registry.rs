//! Panel registry
//!
//! Maps panel identifiers to constructors and turns [`PanelSpec`]s into
//! validated panel templates. Resolution happens once, when the layer is
//! built; unknown names and options fail there rather than per request.

use crate::error::{DebugError, DebugResult};
use crate::panels::{
	EnvironmentPanel, MemoryPanel, Panel, PanelSpec, ParametersPanel, ResponsePanel, TimerPanel,
	validate_panel,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor producing a panel with default options
pub type PanelConstructor = Arc<dyn Fn() -> Box<dyn Panel> + Send + Sync>;

/// Identifier to constructor mapping
#[derive(Clone, Default)]
pub struct PanelRegistry {
	constructors: HashMap<String, PanelConstructor>,
}

impl PanelRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry with the built-in panels
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register("Environment", || Box::new(EnvironmentPanel::new()));
		registry.register("Response", || Box::new(ResponsePanel::new()));
		registry.register("Timer", || Box::new(TimerPanel::new()));
		registry.register("Memory", || Box::new(MemoryPanel::new()));
		registry.register("Parameters", || Box::new(ParametersPanel::new()));
		registry
	}

	/// Register a constructor, replacing any previous one with the same name
	pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
	where
		F: Fn() -> Box<dyn Panel> + Send + Sync + 'static,
	{
		self.constructors.insert(name.into(), Arc::new(constructor));
	}

	/// Whether `name` is registered
	pub fn contains(&self, name: &str) -> bool {
		self.constructors.contains_key(name)
	}

	/// Registered identifiers, sorted
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Resolve one spec into a panel template
	pub fn resolve(&self, spec: PanelSpec) -> DebugResult<Box<dyn Panel>> {
		let panel = match spec {
			PanelSpec::Name(name) => self.construct(&name)?,
			PanelSpec::WithOptions(name, options) => {
				let mut panel = self.construct(&name)?;
				for (key, value) in &options {
					panel.set_option(key, value)?;
				}
				panel
			}
			PanelSpec::Instance(panel) => panel,
		};
		validate_panel(panel.as_ref())?;
		Ok(panel)
	}

	/// Resolve specs in order; duplicates yield separate panels
	pub fn resolve_all<I>(&self, specs: I) -> DebugResult<Vec<Box<dyn Panel>>>
	where
		I: IntoIterator,
		I::Item: Into<PanelSpec>,
	{
		specs
			.into_iter()
			.map(|spec| self.resolve(spec.into()))
			.collect()
	}

	fn construct(&self, name: &str) -> DebugResult<Box<dyn Panel>> {
		let constructor = self
			.constructors
			.get(name)
			.ok_or_else(|| DebugError::PanelNotFound(name.to_string()))?;
		Ok(constructor())
	}
}

impl std::fmt::Debug for PanelRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PanelRegistry")
			.field("panels", &self.names())
			.finish()
	}
}
