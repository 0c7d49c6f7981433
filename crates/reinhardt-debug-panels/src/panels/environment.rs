//! Request environment panel

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::{DebugError, DebugResult};
use crate::panels::{Panel, REDACTED};
use crate::ui::render::{FieldValue, render_list_pairs, render_map};
use async_trait::async_trait;

/// Shows the request line, headers, and framework metadata
#[derive(Debug, Clone)]
pub struct EnvironmentPanel {
	/// Lowercased header names whose values are masked
	hidden_headers: Vec<String>,
	snapshot: Option<RequestContext>,
}

impl EnvironmentPanel {
	/// Create an environment panel hiding credentials and cookies
	pub fn new() -> Self {
		Self {
			hidden_headers: vec![
				"authorization".to_string(),
				"cookie".to_string(),
				"proxy-authorization".to_string(),
			],
			snapshot: None,
		}
	}

	/// Replace the list of masked headers
	pub fn hide_headers<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.hidden_headers = names
			.into_iter()
			.map(|n| n.as_ref().trim().to_ascii_lowercase())
			.filter(|n| !n.is_empty())
			.collect();
		self
	}

	fn is_hidden(&self, header: &str) -> bool {
		self.hidden_headers
			.iter()
			.any(|h| h.eq_ignore_ascii_case(header))
	}
}

impl Default for EnvironmentPanel {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Panel for EnvironmentPanel {
	fn base_name(&self) -> &str {
		"Environment"
	}

	fn set_option(&mut self, key: &str, value: &str) -> DebugResult<()> {
		match key {
			"hide_headers" => {
				*self = self.clone().hide_headers(value.split(','));
				Ok(())
			}
			_ => Err(DebugError::unknown_option(self.base_name(), key)),
		}
	}

	async fn process_request(&mut self, ctx: &RequestContext) -> DebugResult<()> {
		self.snapshot = Some(ctx.clone());
		Ok(())
	}

	async fn process_response(
		&mut self,
		_response: &ResponseEnvelope,
		ctx: &RequestContext,
	) -> DebugResult<()> {
		if self.snapshot.is_none() {
			self.snapshot = Some(ctx.clone());
		}
		Ok(())
	}

	fn content(&self) -> Option<String> {
		let ctx = self.snapshot.as_ref()?;

		let summary = render_list_pairs([
			("Method", ctx.method.clone()),
			("Path", ctx.path.clone()),
			("Query", ctx.query.clone().unwrap_or_default()),
			("Version", ctx.version.clone()),
			("Client", ctx.client_ip.clone().unwrap_or_default()),
		]);

		let headers = render_map(ctx.headers.iter().map(|(name, value)| {
			let value = if self.is_hidden(name) {
				FieldValue::text(REDACTED)
			} else {
				FieldValue::text(value.as_str())
			};
			(name.as_str(), value)
		}));

		let mut html = format!("<h4>Request</h4>{}<h4>Headers</h4>{}", summary, headers);
		if !ctx.metadata.is_empty() {
			html.push_str("<h4>Metadata</h4>");
			html.push_str(&render_map(&ctx.metadata));
		}
		Some(html)
	}
}
