//! The layer mounted on an axum Router

use crate::{RequestBuilder, body_string, enabled_config};
use axum::Router;
use axum::response::{Html, Json};
use axum::routing::get;
use http::StatusCode;
use reinhardt_debug_panels::{DebugPanelConfig, DebugPanelLayer};
use rstest::*;
use tower::ServiceExt;

async fn index() -> Html<&'static str> {
	Html("<!doctype html><html><body><main>Index</main></body></html>")
}

async fn api() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok", "markup": "</body>" }))
}

fn app(config: DebugPanelConfig) -> Router {
	Router::new()
		.route("/", get(index))
		.route("/api", get(api))
		.layer(DebugPanelLayer::new(config.with_panels(["Environment", "Response", "Timer"])).unwrap())
}

#[rstest]
#[tokio::test]
async fn test_html_route_gets_overlay(enabled_config: DebugPanelConfig) {
	let response = app(enabled_config)
		.oneshot(RequestBuilder::get("/?debug=1").build())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_string(response).await;
	assert!(body.starts_with("<!doctype html><html><body><main>Index</main>"));
	assert!(body.ends_with("</body></html>"));
	assert!(body.contains(r#"data-panel="rdp-panel-0-environment""#));
	assert!(body.contains(r#"data-panel="rdp-panel-1-response""#));
	assert!(body.contains(r#"data-panel="rdp-panel-2-timer""#));
	assert!(body.contains("text/html; charset=utf-8"));
}

#[rstest]
#[tokio::test]
async fn test_json_route_is_untouched(enabled_config: DebugPanelConfig) {
	let response = app(enabled_config)
		.oneshot(RequestBuilder::get("/api").build())
		.await
		.unwrap();

	let body = body_string(response).await;
	let value: serde_json::Value = serde_json::from_str(&body).unwrap();
	assert_eq!(value["markup"], "</body>");
	assert!(!body.contains("rdp-overlay"));
}

#[rstest]
#[tokio::test]
async fn test_unmatched_route_is_untouched(enabled_config: DebugPanelConfig) {
	let response = app(enabled_config)
		.oneshot(RequestBuilder::get("/missing").build())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert!(!body_string(response).await.contains("rdp-overlay"));
}
