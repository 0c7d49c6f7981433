//! Test data builders for reinhardt-debug-panels tests
//!
//! This module provides fluent builder APIs for requests and canned inner
//! services.

use axum::body::Body;
use axum::extract::ConnectInfo;
use http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;
use tower::util::BoxCloneService;
use tower::{ServiceExt, service_fn};

/// Builder for the response an inner service returns
///
/// # Example
///
/// ```rust,ignore
/// let inner = TestResponse::html("<html><body>Hi</body></html>").into_service();
/// ```
#[derive(Debug, Clone)]
pub struct TestResponse {
	status: StatusCode,
	headers: Vec<(String, String)>,
	body: Vec<u8>,
	delay: Option<Duration>,
}

impl TestResponse {
	/// Create an empty 200 response with no headers
	pub fn new() -> Self {
		Self {
			status: StatusCode::OK,
			headers: Vec::new(),
			body: Vec::new(),
			delay: None,
		}
	}

	/// `200 text/html; charset=utf-8` response with the given body
	pub fn html(body: impl Into<Vec<u8>>) -> Self {
		Self::new()
			.header("content-type", "text/html; charset=utf-8")
			.body(body)
	}

	/// Set the status code
	pub fn status(mut self, status: StatusCode) -> Self {
		self.status = status;
		self
	}

	/// Append a header
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Set the body
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();
		self
	}

	/// Set `Content-Length` to the current body length
	pub fn with_content_length(self) -> Self {
		let len = self.body.len().to_string();
		self.header("content-length", len)
	}

	/// Make the service sleep before responding
	pub fn delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Build the response
	pub fn build(&self) -> Response<Body> {
		let mut response = Response::new(Body::from(self.body.clone()));
		*response.status_mut() = self.status;
		for (name, value) in &self.headers {
			response.headers_mut().append(
				HeaderName::from_bytes(name.as_bytes()).unwrap(),
				HeaderValue::from_str(value).unwrap(),
			);
		}
		response
	}

	/// Inner service answering every request with this response
	pub fn into_service(self) -> BoxCloneService<Request<Body>, Response<Body>, Infallible> {
		service_fn(move |_request: Request<Body>| {
			let template = self.clone();
			async move {
				if let Some(delay) = template.delay {
					tokio::time::sleep(delay).await;
				}
				Ok::<_, Infallible>(template.build())
			}
		})
		.boxed_clone()
	}
}

impl Default for TestResponse {
	fn default() -> Self {
		Self::new()
	}
}

/// Builder for incoming requests
#[derive(Debug, Clone)]
pub struct RequestBuilder {
	method: String,
	uri: String,
	headers: Vec<(String, String)>,
	peer: Option<SocketAddr>,
}

impl RequestBuilder {
	/// `GET /`
	pub fn new() -> Self {
		Self {
			method: "GET".to_string(),
			uri: "/".to_string(),
			headers: Vec::new(),
			peer: None,
		}
	}

	/// `GET {uri}`
	pub fn get(uri: impl Into<String>) -> Self {
		Self::new().uri(uri)
	}

	/// Set the method
	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	/// Set the request target
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	/// Append a header
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Attach a peer address the way axum's `into_make_service_with_connect_info` does
	pub fn peer(mut self, addr: &str) -> Self {
		self.peer = Some(addr.parse().unwrap());
		self
	}

	/// Build the request
	pub fn build(self) -> Request<Body> {
		let mut builder = Request::builder()
			.method(self.method.as_str())
			.uri(self.uri.as_str());
		for (name, value) in &self.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		let mut request = builder.body(Body::empty()).unwrap();
		if let Some(peer) = self.peer {
			request.extensions_mut().insert(ConnectInfo(peer));
		}
		request
	}
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}
