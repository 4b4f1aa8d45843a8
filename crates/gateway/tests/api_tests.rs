use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use whois_lookup_config::CorsConfig;
use whois_lookup_core::{ProviderError, ProviderResponse, WhoisProvider};
use whois_lookup_gateway::{build_router, AppState};

const ALLOWED_ORIGIN: &str = "http://localhost:3000";

struct StubProvider {
    outcome: Result<ProviderResponse, ProviderError>,
    calls: AtomicUsize,
    last_domain: std::sync::Mutex<Option<String>>,
}

impl StubProvider {
    fn returning(body: Value) -> Arc<Self> {
        let response: ProviderResponse =
            serde_json::from_value(body).expect("stub body must deserialize");
        Arc::new(Self {
            outcome: Ok(response),
            calls: AtomicUsize::new(0),
            last_domain: std::sync::Mutex::new(None),
        })
    }

    fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
            last_domain: std::sync::Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisProvider for StubProvider {
    async fn fetch_record(&self, domain: &str) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_domain.lock().unwrap() = Some(domain.to_string());
        self.outcome.clone()
    }
}

struct TestContext {
    provider: Arc<StubProvider>,
    router: Router,
}

impl TestContext {
    fn new(provider: Arc<StubProvider>) -> Self {
        let cors = CorsConfig {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
            allow_credentials: true,
        };
        let router = build_router(AppState::new(provider.clone()), &cors);
        Self { provider, router }
    }

    fn router(&self) -> Router {
        self.router.clone()
    }

    async fn post_whois(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/whois")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn full_record() -> Value {
    json!({
        "WhoisRecord": {
            "domainName": "example.com",
            "registrarName": "Example Registrar",
            "createdDate": "2020-01-05T00:00:00Z",
            "expiresDate": "2030-01-05T00:00:00Z",
            "estimatedDomainAge": 1800,
            "nameServers": { "hostNames": ["ns1.example.com", "ns2.example.com"] },
            "registrant": { "organization": "Acme Inc" },
            "technicalContact": { "organization": "Acme IT" },
            "administrativeContact": { "organization": "Acme Admin" },
            "contactEmail": "contact@acme.test"
        }
    })
}

#[tokio::test]
async fn health_check_reports_status_and_version() {
    let ctx = TestContext::new(StubProvider::returning(full_record()));

    let response = ctx
        .router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));
}

#[tokio::test]
async fn openapi_document_lists_whois_route() {
    let ctx = TestContext::new(StubProvider::returning(full_record()));

    let response = ctx
        .router()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["paths"]["/api/whois"]["post"].is_object());
    assert!(body["paths"]["/health"]["get"].is_object());
}

mod whois_tests {
    use super::*;

    #[tokio::test]
    async fn domain_lookup_returns_domain_summary() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "example.com", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "domainName": "example.com",
                "registrar": "Example Registrar",
                "createdDate": "2020-01-05T00:00:00Z",
                "expiresDate": "2030-01-05T00:00:00Z",
                "estimatedDomainAge": 1800,
                "hostnames": "ns1.example.com, ns2.example.com"
            })
        );
        assert_eq!(ctx.provider.calls(), 1);
    }

    #[tokio::test]
    async fn contact_lookup_returns_contact_summary() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "acme.test", "type": "contact" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "registrant": "Acme Inc",
                "technicalContact": "Acme IT",
                "adminContact": "Acme Admin",
                "contactEmail": "contact@acme.test"
            })
        );
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_trimmed_before_the_provider_call() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let (status, _) = ctx
            .post_whois(json!({ "domain": "  example.com ", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            ctx.provider.last_domain.lock().unwrap().as_deref(),
            Some("example.com")
        );
    }
}

mod error_handling_tests {
    use super::*;

    #[tokio::test]
    async fn invalid_input_never_reaches_the_provider() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        for body in [
            json!({ "type": "domain" }),
            json!({ "domain": "", "type": "domain" }),
            json!({ "domain": "   ", "type": "contact" }),
            json!({ "domain": "example.com" }),
            json!({ "domain": "example.com", "type": "registrar" }),
            json!({}),
        ] {
            let (status, response) = ctx.post_whois(body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(response, json!({ "error": "Invalid domain or type" }));
        }

        assert_eq!(ctx.provider.calls(), 0);
    }

    #[tokio::test]
    async fn unreadable_body_is_invalid_input() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let response = ctx
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/whois")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Invalid domain or type" })
        );

        let response = ctx
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/whois")
                    .body(Body::from("domain=example.com"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ctx.provider.calls(), 0);
    }

    #[tokio::test]
    async fn provider_rejection_message_is_passed_through() {
        let ctx = TestContext::new(StubProvider::returning(json!({
            "ErrorMessage": { "errorCode": "WHOIS_01", "msg": "Domain not found" }
        })));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "nope.test", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Domain not found" }));
    }

    #[tokio::test]
    async fn refused_connection_maps_to_service_unavailable() {
        let ctx = TestContext::new(StubProvider::failing(ProviderError::ConnectionRefused(
            "connection refused".into(),
        )));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "example.com", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            json!({ "error": "Service unavailable. Please try again later." })
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let ctx = TestContext::new(StubProvider::failing(ProviderError::Transport(
            "connection reset".into(),
        )));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "example.com", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": "Network error occurred while connecting to Whois API. Please try again later."
            })
        );
    }

    #[tokio::test]
    async fn malformed_provider_payload_maps_to_generic_failure() {
        let ctx = TestContext::new(StubProvider::returning(json!({
            "WhoisRecord": { "domainName": "acme.test", "nameServers": { "hostNames": [] } }
        })));

        let (status, body) = ctx
            .post_whois(json!({ "domain": "acme.test", "type": "contact" }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch data from Whois API" }));
    }
}

mod cors_tests {
    use super::*;

    #[tokio::test]
    async fn preflight_from_allowed_origin_is_answered() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let response = ctx
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/whois")
                    .header(header::ORIGIN, ALLOWED_ORIGIN)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ALLOWED_ORIGIN
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("GET"));
        assert_eq!(ctx.provider.calls(), 0);
    }

    #[tokio::test]
    async fn allowed_origin_receives_cors_headers_on_lookup() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let response = ctx
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/whois")
                    .header(header::ORIGIN, ALLOWED_ORIGIN)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "domain": "example.com", "type": "domain" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            ALLOWED_ORIGIN
        );
    }

    #[tokio::test]
    async fn disallowed_origin_is_rejected_before_the_handler() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let response = ctx
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/whois")
                    .header(header::ORIGIN, "https://evil.example.org")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "domain": "example.com", "type": "domain" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Not allowed by CORS" })
        );
        assert_eq!(ctx.provider.calls(), 0);
    }

    #[tokio::test]
    async fn requests_without_origin_are_allowed() {
        let ctx = TestContext::new(StubProvider::returning(full_record()));

        let (status, _) = ctx
            .post_whois(json!({ "domain": "example.com", "type": "domain" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ctx.provider.calls(), 1);
    }
}
