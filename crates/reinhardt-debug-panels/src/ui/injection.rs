//! HTML injection
//!
//! Injection is a byte-level splice before the closing body tag. The
//! document is never parsed; responses without the marker are left alone.

use crate::context::ResponseEnvelope;
use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::StatusCode;
use std::fmt;

/// Closing body tag the overlay is inserted before (case-sensitive)
pub const BODY_CLOSE_MARKER: &[u8] = b"</body>";

/// Media types that receive the overlay
pub const HTML_MEDIA_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Why a response was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// Status other than 200
	Status(StatusCode),
	/// Missing or non-HTML content type
	NotHtml,
	/// Body is content-encoded (e.g. gzip)
	Encoded,
	/// Body has no closing body tag
	MissingBodyMarker,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Status(status) => write!(f, "status {}", status.as_u16()),
			Self::NotHtml => f.write_str("not an HTML response"),
			Self::Encoded => f.write_str("content-encoded body"),
			Self::MissingBodyMarker => f.write_str("no closing body tag"),
		}
	}
}

/// Result of attempting to inject the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionOutcome {
	/// Overlay inserted at the given byte offset
	Injected {
		/// Offset of the closing body tag in the original body
		offset: usize,
	},
	/// Response left unchanged
	Skipped(SkipReason),
}

/// Check status and headers; decides whether the body is worth buffering
pub fn check_candidate(status: StatusCode, headers: &HeaderMap) -> Result<(), SkipReason> {
	if status != StatusCode::OK {
		return Err(SkipReason::Status(status));
	}

	let content_type = headers
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.unwrap_or("");
	if !is_html_content_type(content_type) {
		return Err(SkipReason::NotHtml);
	}

	let encoded = headers
		.get(CONTENT_ENCODING)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|enc| !enc.trim().eq_ignore_ascii_case("identity"));
	if encoded {
		return Err(SkipReason::Encoded);
	}

	Ok(())
}

/// Whether a Content-Type value names an HTML media type
pub fn is_html_content_type(content_type: &str) -> bool {
	let media_type = content_type.split(';').next().unwrap_or("").trim();
	HTML_MEDIA_TYPES
		.iter()
		.any(|html| media_type.eq_ignore_ascii_case(html))
}

/// Offset of the last closing body tag in `body`
pub fn find_injection_point(body: &[u8]) -> Option<usize> {
	if body.len() < BODY_CLOSE_MARKER.len() {
		return None;
	}
	body.windows(BODY_CLOSE_MARKER.len())
		.rposition(|window| window == BODY_CLOSE_MARKER)
}

/// Full eligibility check against a buffered envelope
///
/// Returns the injection offset when the overlay may be inserted.
pub fn check_eligibility(envelope: &ResponseEnvelope) -> Result<usize, SkipReason> {
	check_candidate(envelope.status, &envelope.headers)?;
	envelope
		.body_bytes()
		.and_then(find_injection_point)
		.ok_or(SkipReason::MissingBodyMarker)
}

/// Insert `fragment` at `offset`, leaving every other byte in place
pub fn splice(body: &[u8], offset: usize, fragment: &[u8]) -> Bytes {
	let mut out = BytesMut::with_capacity(body.len() + fragment.len());
	out.extend_from_slice(&body[..offset]);
	out.extend_from_slice(fragment);
	out.extend_from_slice(&body[offset..]);
	out.freeze()
}

/// Replace an existing Content-Length with `len`; absent headers stay absent
pub fn update_content_length(headers: &mut HeaderMap, len: usize) {
	if headers.contains_key(CONTENT_LENGTH) {
		headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
	}
}

/// Splice `fragment` into the envelope body at `offset`
pub fn inject_fragment(
	envelope: &mut ResponseEnvelope,
	offset: usize,
	fragment: &str,
) -> InjectionOutcome {
	let Some(body) = envelope.body.as_ref() else {
		return InjectionOutcome::Skipped(SkipReason::MissingBodyMarker);
	};

	let new_body = splice(body, offset, fragment.as_bytes());
	update_content_length(&mut envelope.headers, new_body.len());
	envelope.body = Some(new_body);

	InjectionOutcome::Injected { offset }
}
