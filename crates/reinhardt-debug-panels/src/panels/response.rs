//! Response status and headers panel

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::DebugResult;
use crate::panels::Panel;
use crate::ui::render::render_list_pairs;
use async_trait::async_trait;

/// Shows the status line and headers produced by the inner handler
#[derive(Debug, Clone, Default)]
pub struct ResponsePanel {
	status: Option<u16>,
	rows: Vec<(String, String)>,
}

impl ResponsePanel {
	/// Create a response panel
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl Panel for ResponsePanel {
	fn base_name(&self) -> &str {
		"Response"
	}

	fn nav_subtitle(&self) -> String {
		self.status.map(|s| s.to_string()).unwrap_or_default()
	}

	async fn process_response(
		&mut self,
		response: &ResponseEnvelope,
		_ctx: &RequestContext,
	) -> DebugResult<()> {
		self.status = Some(response.status.as_u16());
		self.rows.clear();
		self.rows.push(("Status".to_string(), response.status.to_string()));
		for (name, value) in response.headers.iter() {
			self.rows.push((
				name.as_str().to_string(),
				String::from_utf8_lossy(value.as_bytes()).into_owned(),
			));
		}
		Ok(())
	}

	fn content(&self) -> Option<String> {
		if self.rows.is_empty() {
			return None;
		}
		Some(render_list_pairs(
			self.rows.iter().map(|(k, v)| (k.as_str(), v.as_str())),
		))
	}
}
