//! Request and response views handed to panels

use axum::extract::ConnectInfo;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::HeaderMap;
use http::request::Parts;
use http::StatusCode;
use std::collections::BTreeMap;
use std::net::SocketAddr;

/// Framework-supplied metadata attached to a request
///
/// Insert this into the request extensions upstream of the debug layer to
/// make arbitrary key/value pairs visible to panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata(pub BTreeMap<String, String>);

impl RequestMetadata {
	/// Create empty metadata
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an entry
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}
}

/// Read-only snapshot of the inbound request
#[derive(Debug, Clone)]
pub struct RequestContext {
	/// HTTP method
	pub method: String,
	/// Request path
	pub path: String,
	/// Raw query string
	pub query: Option<String>,
	/// HTTP version, e.g. `HTTP/1.1`
	pub version: String,
	/// Request headers in the order received
	pub headers: Vec<(String, String)>,
	/// Peer address when the server exposes it
	pub client_ip: Option<String>,
	/// Framework-supplied metadata
	pub metadata: BTreeMap<String, String>,
	/// When the request entered the middleware
	pub timestamp: DateTime<Utc>,
}

impl RequestContext {
	/// Create a context for the given method and path
	pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			method: method.into(),
			path: path.into(),
			query: None,
			version: "HTTP/1.1".to_string(),
			headers: Vec::new(),
			client_ip: None,
			metadata: BTreeMap::new(),
			timestamp: Utc::now(),
		}
	}

	/// Snapshot the parts of an incoming request
	pub fn from_parts(parts: &Parts) -> Self {
		let headers = parts
			.headers
			.iter()
			.map(|(name, value)| {
				(
					name.as_str().to_string(),
					String::from_utf8_lossy(value.as_bytes()).into_owned(),
				)
			})
			.collect();

		let client_ip = parts
			.extensions
			.get::<ConnectInfo<SocketAddr>>()
			.map(|info| info.0.ip().to_string());

		let metadata = parts
			.extensions
			.get::<RequestMetadata>()
			.map(|m| m.0.clone())
			.unwrap_or_default();

		Self {
			method: parts.method.to_string(),
			path: parts.uri.path().to_string(),
			query: parts.uri.query().map(str::to_string),
			version: format!("{:?}", parts.version),
			headers,
			client_ip,
			metadata,
			timestamp: Utc::now(),
		}
	}

	/// Set the query string
	pub fn with_query(mut self, query: impl Into<String>) -> Self {
		self.query = Some(query.into());
		self
	}

	/// Append a header
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Add a metadata entry
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}

	/// First header value with the given name (case-insensitive)
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(n, _)| n.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

/// Response as seen by panels and rewritten by the injector
///
/// `body` is `None` when the response was not a candidate for injection and
/// its body was streamed through without buffering.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
	/// Status code
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Buffered body
	pub body: Option<Bytes>,
}

impl ResponseEnvelope {
	/// Create an envelope with no headers
	pub fn new(status: StatusCode, body: Option<Bytes>) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body,
		}
	}

	/// Buffered body bytes
	pub fn body_bytes(&self) -> Option<&[u8]> {
		self.body.as_deref()
	}
}
