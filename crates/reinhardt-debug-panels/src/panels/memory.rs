//! Process memory panel

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::DebugResult;
use crate::panels::Panel;
use crate::ui::render::render_list_pairs;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Reads the resident memory of the current process
///
/// Keeps one `System` alive so each sample only refreshes this process.
#[derive(Debug)]
pub struct ProcessSampler {
	system: System,
	pid: Option<Pid>,
}

impl ProcessSampler {
	/// Create a sampler for the current process
	pub fn new() -> Self {
		Self {
			system: System::new(),
			pid: sysinfo::get_current_pid().ok(),
		}
	}

	/// Resident memory in KB, if the platform reports it
	pub fn resident_memory_kb(&mut self) -> Option<u64> {
		let pid = self.pid?;
		self.system
			.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
		self.system.process(pid).map(|process| process.memory() / 1024)
	}
}

impl Default for ProcessSampler {
	fn default() -> Self {
		Self::new()
	}
}

/// Resident memory before and after the inner handler
///
/// Per-request clones share the template's sampler.
#[derive(Debug, Clone, Default)]
pub struct MemoryPanel {
	sampler: Arc<Mutex<ProcessSampler>>,
	before: Option<u64>,
	after: Option<u64>,
	observed: bool,
}

impl MemoryPanel {
	/// Create a memory panel
	pub fn new() -> Self {
		Self::default()
	}

	/// Difference in KB between the two samples
	pub fn diff(&self) -> Option<i64> {
		Some(self.after? as i64 - self.before? as i64)
	}

	fn sample(&self) -> Option<u64> {
		self.sampler.lock().resident_memory_kb()
	}
}

fn format_kb(value: Option<u64>) -> String {
	value
		.map(|kb| format!("{} KB", kb))
		.unwrap_or_else(|| "n/a".to_string())
}

#[async_trait]
impl Panel for MemoryPanel {
	fn base_name(&self) -> &str {
		"Memory"
	}

	fn nav_subtitle(&self) -> String {
		self.after.map(|kb| format!("{} KB", kb)).unwrap_or_default()
	}

	async fn process_request(&mut self, _ctx: &RequestContext) -> DebugResult<()> {
		self.before = self.sample();
		Ok(())
	}

	async fn process_response(
		&mut self,
		_response: &ResponseEnvelope,
		_ctx: &RequestContext,
	) -> DebugResult<()> {
		self.after = self.sample();
		self.observed = true;
		Ok(())
	}

	fn content(&self) -> Option<String> {
		if !self.observed {
			return None;
		}
		let diff = self
			.diff()
			.map(|d| format!("{:+} KB", d))
			.unwrap_or_else(|| "n/a".to_string());

		Some(render_list_pairs([
			("Before", format_kb(self.before)),
			("After", format_kb(self.after)),
			("Diff", diff),
		]))
	}
}
