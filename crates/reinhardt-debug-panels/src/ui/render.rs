//! Key/value markup helpers shared by panels
//!
//! Both helpers escape every value unless it is explicitly marked as
//! pre-escaped with [`FieldValue::Html`].

use crate::utils::html::escape_html;
use std::borrow::Cow;

/// A value rendered into a key/value table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
	/// Plain text, escaped on output
	Text(String),
	/// Trusted markup, emitted verbatim
	Html(String),
}

impl FieldValue {
	/// Plain text value
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// Pre-escaped markup value
	pub fn html(markup: impl Into<String>) -> Self {
		Self::Html(markup.into())
	}

	fn to_markup(&self) -> Cow<'_, str> {
		match self {
			Self::Text(text) => Cow::Owned(escape_html(text)),
			Self::Html(markup) => Cow::Borrowed(markup),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&String> for FieldValue {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

macro_rules! field_value_from_display {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for FieldValue {
				fn from(value: $ty) -> Self {
					Self::Text(value.to_string())
				}
			}
		)*
	};
}

field_value_from_display!(bool, i32, i64, u16, u32, u64, usize, f64);

/// Render pairs as a two-column table, keeping the caller's order
///
/// # Examples
///
/// ```
/// use reinhardt_debug_panels::ui::render::render_list_pairs;
///
/// let html = render_list_pairs([("Start", "1"), ("End", "2")]);
/// assert!(html.find("Start").unwrap() < html.find("End").unwrap());
/// ```
pub fn render_list_pairs<I, K, V>(pairs: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Into<FieldValue>,
{
	let rows: Vec<(String, FieldValue)> = pairs
		.into_iter()
		.map(|(k, v)| (k.as_ref().to_string(), v.into()))
		.collect();
	render_rows(&rows)
}

/// Render a mapping as a two-column table with keys sorted lexicographically
///
/// Entries with equal keys keep their relative input order.
///
/// # Examples
///
/// ```
/// use reinhardt_debug_panels::ui::render::render_map;
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("zeta", "last");
/// map.insert("alpha", "first");
/// let html = render_map(map);
/// assert!(html.find("alpha").unwrap() < html.find("zeta").unwrap());
/// ```
pub fn render_map<I, K, V>(map: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Into<FieldValue>,
{
	let mut rows: Vec<(String, FieldValue)> = map
		.into_iter()
		.map(|(k, v)| (k.as_ref().to_string(), v.into()))
		.collect();
	rows.sort_by(|a, b| a.0.cmp(&b.0));
	render_rows(&rows)
}

fn render_rows(rows: &[(String, FieldValue)]) -> String {
	let body: String = rows
		.iter()
		.enumerate()
		.map(|(idx, (key, value))| {
			format!(
				r#"<tr class="{}"><td class="rdp-key">{}</td><td class="rdp-value">{}</td></tr>"#,
				if idx % 2 == 0 { "rdp-odd" } else { "rdp-even" },
				escape_html(key),
				value.to_markup()
			)
		})
		.collect();

	format!(
		r#"<table class="rdp-table"><thead><tr><th>Key</th><th>Value</th></tr></thead><tbody>{}</tbody></table>"#,
		body
	)
}
