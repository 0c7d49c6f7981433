//! Overlay markup
//!
//! Builds the fragment spliced into HTML responses: inline styles and
//! script, the navigation list, and one container per panel with content.

pub mod injection;
pub mod render;

use crate::panels::Panel;
use crate::utils::html::escape_html;

const OVERLAY_CSS: &str = include_str!("ui/assets/overlay.css");
const OVERLAY_JS: &str = include_str!("ui/assets/overlay.js");

/// A panel's contribution to the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPanel {
	/// DOM id of the panel container
	pub dom_id: String,
	/// Navigation title
	pub title: String,
	/// Short status shown under the title
	pub nav_subtitle: String,
	/// Panel body markup; `None` renders an inactive nav entry only
	pub content: Option<String>,
}

impl RenderedPanel {
	/// Snapshot a panel at position `index` in the configured order
	pub fn from_panel(index: usize, panel: &dyn Panel) -> Self {
		Self {
			dom_id: format!("rdp-panel-{}-{}", index, panel.base_name().to_ascii_lowercase()),
			title: panel.title(),
			nav_subtitle: panel.nav_subtitle(),
			content: panel.content().filter(|c| !c.is_empty()),
		}
	}

	/// Whether the nav entry opens a panel
	pub fn is_active(&self) -> bool {
		self.content.is_some()
	}
}

/// Render the complete overlay fragment
pub fn render_overlay(panels: &[RenderedPanel]) -> String {
	let nav_items: String = panels.iter().map(render_nav_item).collect();
	let bodies: String = panels.iter().filter_map(render_panel_body).collect();

	format!(
		r#"<div id="rdp-overlay"><style>{css}</style><button id="rdp-toggle" type="button">DEBUG</button><ul id="rdp-nav" class="rdp-hidden">{nav}<li class="rdp-close">Close</li></ul><div id="rdp-panels">{bodies}</div><script>{js}</script></div>"#,
		css = OVERLAY_CSS,
		nav = nav_items,
		bodies = bodies,
		js = OVERLAY_JS,
	)
}

fn render_nav_item(panel: &RenderedPanel) -> String {
	let subtitle = if panel.nav_subtitle.is_empty() {
		String::new()
	} else {
		format!("<small>{}</small>", escape_html(&panel.nav_subtitle))
	};

	if panel.is_active() {
		format!(
			r#"<li class="rdp-nav-item rdp-active" data-panel="{}">{}{}</li>"#,
			escape_html(&panel.dom_id),
			escape_html(&panel.title),
			subtitle
		)
	} else {
		format!(
			r#"<li class="rdp-nav-item rdp-inactive">{}{}</li>"#,
			escape_html(&panel.title),
			subtitle
		)
	}
}

fn render_panel_body(panel: &RenderedPanel) -> Option<String> {
	let content = panel.content.as_ref()?;
	Some(format!(
		r#"<div class="rdp-panel" id="{}"><div class="rdp-panel-title"><h3>{}</h3></div><div class="rdp-panel-content">{}</div></div>"#,
		escape_html(&panel.dom_id),
		escape_html(&panel.title),
		content
	))
}
