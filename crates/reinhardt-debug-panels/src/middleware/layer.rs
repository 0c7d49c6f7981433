//! Debug panel Tower layer

use crate::error::DebugResult;
use crate::middleware::{DebugPanelConfig, DebugPanelService};
use crate::panels::{Panel, PanelRegistry, PanelSpec};
use std::sync::Arc;
use tower::Layer;

/// Tower layer for the debug panel middleware
///
/// Panels are resolved once, here; every request then runs on clones of
/// these templates.
#[derive(Clone)]
pub struct DebugPanelLayer {
	config: Arc<DebugPanelConfig>,
	panels: Arc<[Box<dyn Panel>]>,
}

impl DebugPanelLayer {
	/// Create a layer resolving `config.panels` against the built-in panels
	pub fn new(config: DebugPanelConfig) -> DebugResult<Self> {
		Self::with_registry(config, &PanelRegistry::with_builtins())
	}

	/// Create a layer resolving `config.panels` against a custom registry
	pub fn with_registry(config: DebugPanelConfig, registry: &PanelRegistry) -> DebugResult<Self> {
		let specs = config.panel_specs();
		Self::from_specs(config, specs, registry)
	}

	/// Create a layer from explicit panel specs, ignoring `config.panels`
	///
	/// Use this to pass pre-built panel instances.
	pub fn from_specs<I>(
		config: DebugPanelConfig,
		specs: I,
		registry: &PanelRegistry,
	) -> DebugResult<Self>
	where
		I: IntoIterator,
		I::Item: Into<PanelSpec>,
	{
		let panels = registry.resolve_all(specs)?;
		tracing::debug!(
			panels = ?panels.iter().map(|p| p.base_name()).collect::<Vec<_>>(),
			enabled = config.enabled,
			"debug panels configured"
		);
		Ok(Self {
			config: Arc::new(config),
			panels: panels.into(),
		})
	}

	/// Configuration in effect
	pub fn config(&self) -> &DebugPanelConfig {
		&self.config
	}

	/// Base names of the configured panels, in display order
	pub fn panel_names(&self) -> Vec<&str> {
		self.panels.iter().map(|p| p.base_name()).collect()
	}
}

impl<S> Layer<S> for DebugPanelLayer {
	type Service = DebugPanelService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		DebugPanelService {
			inner,
			config: self.config.clone(),
			panels: self.panels.clone(),
		}
	}
}

impl std::fmt::Debug for DebugPanelLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DebugPanelLayer")
			.field("enabled", &self.config.enabled)
			.field("panels", &self.panel_names())
			.finish()
	}
}
