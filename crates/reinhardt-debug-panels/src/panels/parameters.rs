//! Query parameter and cookie panel

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::{DebugError, DebugResult};
use crate::panels::{Panel, REDACTED};
use crate::ui::render::{render_list_pairs, render_map};
use async_trait::async_trait;

/// Shows decoded query parameters and request cookies
///
/// Cookie values are masked unless `hide_cookies` is set to `false`.
#[derive(Debug, Clone)]
pub struct ParametersPanel {
	hide_cookies: bool,
	query: Vec<(String, String)>,
	cookies: Vec<(String, String)>,
	observed: bool,
}

impl Default for ParametersPanel {
	fn default() -> Self {
		Self {
			hide_cookies: true,
			query: Vec::new(),
			cookies: Vec::new(),
			observed: false,
		}
	}
}

impl ParametersPanel {
	/// Create a parameters panel with masked cookie values
	pub fn new() -> Self {
		Self::default()
	}

	/// Show or mask cookie values
	pub fn hide_cookies(mut self, hide: bool) -> Self {
		self.hide_cookies = hide;
		self
	}

	fn capture(&mut self, ctx: &RequestContext) {
		self.query = ctx
			.query
			.as_deref()
			.map(parse_query)
			.unwrap_or_default();
		self.cookies = ctx
			.headers
			.iter()
			.filter(|(name, _)| name.eq_ignore_ascii_case("cookie"))
			.flat_map(|(_, value)| parse_cookies(value))
			.collect();
		self.observed = true;
	}
}

/// Decode an `application/x-www-form-urlencoded` query string
///
/// Malformed input yields no parameters.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
	serde_urlencoded::from_str(query).unwrap_or_default()
}

/// Split a Cookie header into name/value pairs
pub fn parse_cookies(header: &str) -> Vec<(String, String)> {
	header
		.split(';')
		.filter_map(|pair| {
			let pair = pair.trim();
			if pair.is_empty() {
				return None;
			}
			let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
			Some((name.trim().to_string(), value.trim().to_string()))
		})
		.collect()
}

#[async_trait]
impl Panel for ParametersPanel {
	fn base_name(&self) -> &str {
		"Parameters"
	}

	fn nav_subtitle(&self) -> String {
		if !self.observed {
			return String::new();
		}
		match self.query.len() {
			1 => "1 parameter".to_string(),
			n => format!("{} parameters", n),
		}
	}

	fn set_option(&mut self, key: &str, value: &str) -> DebugResult<()> {
		match key {
			"hide_cookies" => {
				self.hide_cookies = value.trim().parse().map_err(|_| DebugError::InvalidOption {
					panel: self.base_name().to_string(),
					key: key.to_string(),
					reason: format!("expected true or false, got '{}'", value),
				})?;
				Ok(())
			}
			_ => Err(DebugError::unknown_option(self.base_name(), key)),
		}
	}

	async fn process_request(&mut self, ctx: &RequestContext) -> DebugResult<()> {
		self.capture(ctx);
		Ok(())
	}

	async fn process_response(
		&mut self,
		_response: &ResponseEnvelope,
		ctx: &RequestContext,
	) -> DebugResult<()> {
		if !self.observed {
			self.capture(ctx);
		}
		Ok(())
	}

	fn content(&self) -> Option<String> {
		if self.query.is_empty() && self.cookies.is_empty() {
			return None;
		}

		let mut html = String::new();
		if !self.query.is_empty() {
			html.push_str("<h4>Query</h4>");
			html.push_str(&render_list_pairs(
				self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())),
			));
		}
		if !self.cookies.is_empty() {
			html.push_str("<h4>Cookies</h4>");
			html.push_str(&render_map(self.cookies.iter().map(|(k, v)| {
				let value = if self.hide_cookies { REDACTED } else { v.as_str() };
				(k.as_str(), value)
			})));
		}
		Some(html)
	}
}
