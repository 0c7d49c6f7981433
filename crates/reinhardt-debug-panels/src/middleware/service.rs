//! Debug panel Tower service

use crate::context::{RequestContext, ResponseEnvelope};
use crate::error::{DebugError, DebugResult, HookPhase};
use crate::middleware::DebugPanelConfig;
use crate::panels::Panel;
use crate::ui::injection::{InjectionOutcome, check_candidate, check_eligibility, inject_fragment};
use crate::ui::{RenderedPanel, render_overlay};
use crate::utils::html::escape_html;
use axum::body::Body;
use axum::extract::ConnectInfo;
use futures::FutureExt;
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// Tower service running debug panels around an inner service
#[derive(Clone)]
pub struct DebugPanelService<S> {
	pub(crate) inner: S,
	pub(crate) config: Arc<DebugPanelConfig>,
	pub(crate) panels: Arc<[Box<dyn Panel>]>,
}

impl<S> DebugPanelService<S> {
	/// Configured panel templates, in display order
	pub fn panels(&self) -> &[Box<dyn Panel>] {
		&self.panels
	}

	fn applies_to(&self, request: &Request<Body>) -> bool {
		if !self.config.enabled {
			return false;
		}
		let client = request
			.extensions()
			.get::<ConnectInfo<SocketAddr>>()
			.map(|info| info.0.ip());
		self.config.allows_client(client)
	}
}

impl<S> Service<Request<Body>> for DebugPanelService<S>
where
	S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
	S::Error: Send + 'static,
{
	type Response = Response<Body>;
	type Error = S::Error;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, request: Request<Body>) -> Self::Future {
		// The ready inner service handles this request; a fresh clone stays behind.
		let clone = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, clone);

		if !self.applies_to(&request) {
			tracing::debug!(path = %request.uri().path(), "debug panels skipped for request");
			return Box::pin(inner.call(request));
		}

		let templates = self.panels.clone();

		Box::pin(async move {
			let (parts, body) = request.into_parts();
			let ctx = RequestContext::from_parts(&parts);
			let request = Request::from_parts(parts, body);

			let mut panels: Vec<PanelRun> = templates
				.iter()
				.map(|template| PanelRun {
					panel: template.clone(),
					failure: None,
				})
				.collect();

			for run in panels.iter_mut() {
				let result = guard_hook(run.panel.process_request(&ctx)).await;
				run.record(HookPhase::Request, result);
			}

			let response = inner.call(request).await?;
			let (mut parts, body) = response.into_parts();
			let headers = std::mem::take(&mut parts.headers);

			let (mut envelope, passthrough) = match check_candidate(parts.status, &headers) {
				Ok(()) => match body.collect().await {
					Ok(collected) => (
						ResponseEnvelope {
							status: parts.status,
							headers,
							body: Some(collected.to_bytes()),
						},
						None,
					),
					Err(err) => {
						tracing::error!(
							path = %ctx.path,
							error = %DebugError::Http(err.to_string()),
							"failed to read response body"
						);
						return Ok(body_error_response());
					}
				},
				Err(_) => (
					ResponseEnvelope {
						status: parts.status,
						headers,
						body: None,
					},
					Some(body),
				),
			};

			for run in panels.iter_mut() {
				let result = guard_hook(run.panel.process_response(&envelope, &ctx)).await;
				run.record(HookPhase::Response, result);
			}

			let outcome = match check_eligibility(&envelope) {
				Ok(offset) => {
					let rendered: Vec<RenderedPanel> = panels
						.iter()
						.enumerate()
						.map(|(index, run)| run.render(index))
						.collect();
					inject_fragment(&mut envelope, offset, &render_overlay(&rendered))
				}
				Err(reason) => InjectionOutcome::Skipped(reason),
			};

			match outcome {
				InjectionOutcome::Injected { offset } => {
					tracing::debug!(path = %ctx.path, offset, "debug overlay injected");
				}
				InjectionOutcome::Skipped(reason) => {
					tracing::debug!(path = %ctx.path, %reason, "debug overlay skipped");
				}
			}

			parts.status = envelope.status;
			parts.headers = envelope.headers;
			let body = match envelope.body {
				Some(bytes) => Body::from(bytes),
				None => passthrough.unwrap_or_else(Body::empty),
			};
			Ok::<_, S::Error>(Response::from_parts(parts, body))
		})
	}
}

/// Per-request panel instance and its first hook failure
struct PanelRun {
	panel: Box<dyn Panel>,
	failure: Option<DebugError>,
}

impl PanelRun {
	fn record(&mut self, phase: HookPhase, result: Result<(), String>) {
		let Err(message) = result else {
			return;
		};
		let err = DebugError::PanelHook {
			panel: self.panel.base_name().to_string(),
			phase,
			message,
		};
		tracing::warn!(panel = %self.panel.base_name(), %phase, error = %err, "debug panel hook failed");
		if self.failure.is_none() {
			self.failure = Some(err);
		}
	}

	fn render(&self, index: usize) -> RenderedPanel {
		let rendered = std::panic::catch_unwind(AssertUnwindSafe(|| {
			RenderedPanel::from_panel(index, self.panel.as_ref())
		}));

		match (rendered, &self.failure) {
			(Ok(mut rendered), Some(failure)) => {
				rendered.nav_subtitle = "error".to_string();
				rendered.content = Some(failure_placeholder(&failure.to_string()));
				rendered
			}
			(Ok(rendered), None) => rendered,
			(Err(panic), _) => {
				let message = panic_message(panic.as_ref());
				tracing::warn!(panel_index = index, error = %message, "debug panel failed to render");
				RenderedPanel {
					dom_id: format!("rdp-panel-{}-failed", index),
					title: "Failed panel".to_string(),
					nav_subtitle: "error".to_string(),
					content: Some(failure_placeholder(&format!("panel panicked while rendering: {}", message))),
				}
			}
		}
	}
}

/// Run a hook, converting errors and panics into a message
async fn guard_hook<F>(hook: F) -> Result<(), String>
where
	F: Future<Output = DebugResult<()>>,
{
	match AssertUnwindSafe(hook).catch_unwind().await {
		Ok(Ok(())) => Ok(()),
		Ok(Err(err)) => Err(err.to_string()),
		Err(panic) => Err(format!("panicked: {}", panic_message(panic.as_ref()))),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic".to_string()
	}
}

fn failure_placeholder(message: &str) -> String {
	format!(r#"<p class="rdp-error">{}</p>"#, escape_html(message))
}

fn body_error_response() -> Response<Body> {
	let mut response = Response::new(Body::empty());
	*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
	response
}
