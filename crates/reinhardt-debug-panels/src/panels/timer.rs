//! Request timing panel

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::{DebugError, DebugResult};
use crate::panels::Panel;
use crate::ui::render::render_list_pairs;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f UTC";

/// Wall-clock start, end, and elapsed time of the inner handler
#[derive(Debug, Clone)]
pub struct TimerPanel {
	/// Decimal places of the elapsed seconds
	precision: usize,
	started_at: Option<(DateTime<Utc>, Instant)>,
	finished_at: Option<DateTime<Utc>>,
	elapsed: Option<Duration>,
}

impl TimerPanel {
	/// Create a timer panel with 4 decimal places
	pub fn new() -> Self {
		Self::with_precision(4)
	}

	/// Create a timer panel with custom precision (clamped to 9)
	pub fn with_precision(precision: usize) -> Self {
		Self {
			precision: precision.min(9),
			started_at: None,
			finished_at: None,
			elapsed: None,
		}
	}

	/// Elapsed time of the last observed cycle
	pub fn elapsed(&self) -> Option<Duration> {
		self.elapsed
	}

	fn format_elapsed(&self, elapsed: Duration) -> String {
		format!("{:.*} s", self.precision, elapsed.as_secs_f64())
	}
}

impl Default for TimerPanel {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Panel for TimerPanel {
	fn base_name(&self) -> &str {
		"Timer"
	}

	fn nav_subtitle(&self) -> String {
		self.elapsed
			.map(|elapsed| self.format_elapsed(elapsed))
			.unwrap_or_default()
	}

	fn set_option(&mut self, key: &str, value: &str) -> DebugResult<()> {
		match key {
			"precision" => {
				let precision: usize = value.parse().map_err(|_| DebugError::InvalidOption {
					panel: self.base_name().to_string(),
					key: key.to_string(),
					reason: format!("expected an integer, got '{}'", value),
				})?;
				if precision > 9 {
					return Err(DebugError::InvalidOption {
						panel: self.base_name().to_string(),
						key: key.to_string(),
						reason: "precision must be between 0 and 9".to_string(),
					});
				}
				self.precision = precision;
				Ok(())
			}
			_ => Err(DebugError::unknown_option(self.base_name(), key)),
		}
	}

	async fn process_request(&mut self, ctx: &RequestContext) -> DebugResult<()> {
		// Wall-clock start is when the request entered the middleware
		self.started_at = Some((ctx.timestamp, Instant::now()));
		Ok(())
	}

	async fn process_response(
		&mut self,
		_response: &ResponseEnvelope,
		_ctx: &RequestContext,
	) -> DebugResult<()> {
		self.finished_at = Some(Utc::now());
		self.elapsed = self.started_at.map(|(_, instant)| instant.elapsed());
		Ok(())
	}

	fn content(&self) -> Option<String> {
		let finished_at = self.finished_at?;
		let start = self
			.started_at
			.map(|(at, _)| at.format(TIMESTAMP_FORMAT).to_string())
			.unwrap_or_else(|| "n/a".to_string());
		let elapsed = self
			.elapsed
			.map(|e| self.format_elapsed(e))
			.unwrap_or_else(|| "n/a".to_string());

		Some(render_list_pairs([
			("Start", start),
			("End", finished_at.format(TIMESTAMP_FORMAT).to_string()),
			("Elapsed", elapsed),
		]))
	}
}
