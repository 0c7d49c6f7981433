//! Which responses receive the overlay, and how the body is rewritten

use crate::{
	MockPanel, RequestBuilder, TestResponse, body_bytes, body_string, enabled_config, html_page,
	layer_with,
};
use http::{StatusCode, header};
use reinhardt_debug_panels::{DebugPanelConfig, PanelSpec};
use rstest::*;

fn mock_layer(config: DebugPanelConfig) -> reinhardt_debug_panels::DebugPanelLayer {
	layer_with(
		config,
		[PanelSpec::instance(
			MockPanel::new("Mock").with_content("<p>mock</p>"),
		)],
	)
}

#[rstest]
#[case(StatusCode::NOT_FOUND)]
#[case(StatusCode::INTERNAL_SERVER_ERROR)]
#[case(StatusCode::FOUND)]
#[case(StatusCode::CREATED)]
#[tokio::test]
async fn test_non_200_html_is_untouched(
	enabled_config: DebugPanelConfig,
	html_page: &'static str,
	#[case] status: StatusCode,
) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::html(html_page).status(status);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(response.status(), status);
	assert_eq!(body_string(response).await, html_page);
}

#[rstest]
#[case("text/plain")]
#[case("application/json")]
#[case("image/png")]
#[tokio::test]
async fn test_non_html_is_untouched(
	enabled_config: DebugPanelConfig,
	html_page: &'static str,
	#[case] content_type: &str,
) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::new()
		.header("content-type", content_type)
		.body(html_page);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(body_string(response).await, html_page);
}

#[rstest]
#[tokio::test]
async fn test_missing_content_type_is_untouched(
	enabled_config: DebugPanelConfig,
	html_page: &'static str,
) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::new().body(html_page);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(body_string(response).await, html_page);
}

#[rstest]
#[tokio::test]
async fn test_missing_marker_is_untouched(enabled_config: DebugPanelConfig) {
	let layer = mock_layer(enabled_config);
	let page = "<html><body><p>never closed</p></html>";
	let inner = TestResponse::html(page).with_content_length();

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(
		response.headers().get(header::CONTENT_LENGTH).unwrap(),
		&page.len().to_string()
	);
	assert_eq!(body_string(response).await, page);
}

#[rstest]
#[tokio::test]
async fn test_encoded_body_is_untouched(enabled_config: DebugPanelConfig, html_page: &'static str) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::html(html_page).header("content-encoding", "gzip");

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(body_string(response).await, html_page);
}

#[rstest]
#[tokio::test]
async fn test_single_fragment_before_last_marker(enabled_config: DebugPanelConfig) {
	let layer = mock_layer(enabled_config);
	let page = "<html><body><pre>&lt;/body&gt; </body> inside</pre></body>\n</html>";
	let inner = TestResponse::html(page);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;
	let body = body_string(response).await;

	assert_eq!(body.matches(r#"<div id="rdp-overlay">"#).count(), 1);
	assert!(body.ends_with("</body>\n</html>"));

	let overlay_start = body.find(r#"<div id="rdp-overlay">"#).unwrap();
	let marker = body.rfind("</body>").unwrap();
	assert!(overlay_start < marker);
	// Everything before the last marker is kept verbatim ahead of the overlay
	let original_prefix = &page[..page.rfind("</body>").unwrap()];
	assert_eq!(&body[..overlay_start], original_prefix);
	assert!(body[overlay_start..marker].ends_with("</div>"));
}

#[rstest]
#[tokio::test]
async fn test_content_length_is_recomputed(enabled_config: DebugPanelConfig) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::html("<html><body>Hi</body></html>").with_content_length();

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;
	let declared: usize = response
		.headers()
		.get(header::CONTENT_LENGTH)
		.unwrap()
		.to_str()
		.unwrap()
		.parse()
		.unwrap();
	let body = body_bytes(response).await;

	assert_eq!(declared, body.len());
	assert!(declared > "<html><body>Hi</body></html>".len());
}

#[rstest]
#[tokio::test]
async fn test_content_length_not_added_when_absent(
	enabled_config: DebugPanelConfig,
	html_page: &'static str,
) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::html(html_page);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert!(response.headers().get(header::CONTENT_LENGTH).is_none());
	assert!(body_string(response).await.contains("rdp-overlay"));
}

#[rstest]
#[tokio::test]
async fn test_json_response_is_byte_identical(enabled_config: DebugPanelConfig) {
	let layer = mock_layer(enabled_config);
	let json = r#"{"html":"<body></body>","ok":true}"#;
	let inner = TestResponse::new()
		.header("content-type", "application/json")
		.body(json)
		.with_content_length();

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get(header::CONTENT_LENGTH).unwrap(),
		&json.len().to_string()
	);
	assert_eq!(body_bytes(response).await.as_ref(), json.as_bytes());
}

#[rstest]
#[tokio::test]
async fn test_xhtml_is_eligible(enabled_config: DebugPanelConfig, html_page: &'static str) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::new()
		.header("content-type", "application/xhtml+xml")
		.body(html_page);

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert!(body_string(response).await.contains("rdp-overlay"));
}

#[rstest]
#[tokio::test]
async fn test_other_headers_are_preserved(
	enabled_config: DebugPanelConfig,
	html_page: &'static str,
) {
	let layer = mock_layer(enabled_config);
	let inner = TestResponse::html(html_page)
		.header("x-custom", "kept")
		.header("set-cookie", "a=1")
		.header("set-cookie", "b=2");

	let response = crate::run_layer(&layer, inner, RequestBuilder::new().build()).await;

	assert_eq!(response.headers().get("x-custom").unwrap(), "kept");
	assert_eq!(response.headers().get_all("set-cookie").iter().count(), 2);
}
