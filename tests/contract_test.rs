// Integration tests for the connector base contract, exercised the way the
// orchestration engine drives it: register, mount routes, run cycles,
// serialize for the UI.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use datapipe_connector::{
    Connector, ConnectorBase, ConnectorError, ConnectorOptions, OAuthStrategy, RunStep,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Connector that overrides the full surface: routes, lifecycle, and the
/// generic auth layer.
struct AcmeConnector {
    base: ConnectorBase,
    ready: Arc<AtomicBool>,
    runs_finished: Arc<AtomicUsize>,
}

impl AcmeConnector {
    fn new() -> Self {
        let options: ConnectorOptions =
            serde_json::from_value(json!({ "extraRequiredFields": ["token"] })).unwrap();
        let mut base = ConnectorBase::with_options(options);
        base.set_label("Acme CRM");
        Self {
            base,
            ready: Arc::new(AtomicBool::new(false)),
            runs_finished: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Connector for AcmeConnector {
    fn base(&self) -> &ConnectorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ConnectorBase {
        &mut self.base
    }

    fn register_routes(&self, router: Router) -> Router {
        router
            .route(
                "/api/connectors/acme/oauth/callback",
                get(|| async { Json(json!({ "status": "connected" })) }),
            )
            .route(
                "/api/connectors/acme/probe",
                get(|| async {
                    Err::<Json<Value>, ConnectorError>(ConnectorError::unauthorized())
                }),
            )
    }

    async fn run_started(&self) -> Result<(), ConnectorError> {
        // Asynchronous setup before signaling readiness
        tokio::task::yield_now().await;
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn run_finished(&self) {
        self.runs_finished.fetch_add(1, Ordering::SeqCst);
    }

    async fn auth_callback(
        &self,
        oauth_code: &str,
        pipe_id: &str,
    ) -> Result<Value, ConnectorError> {
        if oauth_code.is_empty() {
            return Err(ConnectorError::unauthorized());
        }
        Ok(json!({ "id": pipe_id, "accessToken": format!("token-for-{oauth_code}") }))
    }
}

/// Connector that keeps every default.
struct BareConnector {
    base: ConnectorBase,
}

#[async_trait]
impl Connector for BareConnector {
    fn base(&self) -> &ConnectorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ConnectorBase {
        &mut self.base
    }
}

struct LabeledStep(&'static str);

impl RunStep for LabeledStep {
    fn label(&self) -> &str {
        self.0
    }
}

#[tokio::test]
async fn test_registration_and_run_cycle() {
    let mut connector = AcmeConnector::new();

    // Orchestrator assigns the ID after registration
    assert_eq!(connector.id(), None);
    connector.set_id("acme".to_string());
    assert_eq!(connector.id(), Some("acme"));

    connector.set_steps(vec![
        Arc::new(LabeledStep("Connect")),
        Arc::new(LabeledStep("Copy records")),
    ]);

    // Two run cycles
    for _ in 0..2 {
        connector.run_started().await.unwrap();
        assert!(connector.ready.load(Ordering::SeqCst));
        connector.run_finished().await;
    }
    assert_eq!(connector.runs_finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_registered_routes_are_served() {
    let connector = AcmeConnector::new();
    let app = connector.register_routes(Router::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/connectors/acme/oauth/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "connected");
}

#[tokio::test]
async fn test_connector_error_response_shape() {
    let connector = AcmeConnector::new();
    let app = connector.register_routes(Router::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/connectors/acme/probe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Not Authorized");
    assert_eq!(json["code"], 401);
}

#[tokio::test]
async fn test_auth_callback_override() {
    let connector = AcmeConnector::new();

    let pipe = connector.auth_callback("abc123", "pipe-7").await.unwrap();
    assert_eq!(pipe["id"], "pipe-7");
    assert_eq!(pipe["accessToken"], "token-for-abc123");

    let err = connector.auth_callback("", "pipe-7").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_defaults_from_orchestrator_view() {
    let connector: Box<dyn Connector> = Box::new(BareConnector {
        base: ConnectorBase::new(),
    });

    // Lifecycle defaults
    connector.run_started().await.unwrap();
    connector.run_finished().await;

    // Auth defaults
    let err = connector.auth_callback("code", "pipe-1").await.unwrap_err();
    assert!(err.is_unauthorized());

    let request = Request::builder().body(Body::empty()).unwrap();
    let err = connector
        .connect_data_source(request, "pipe-1", "https://example.com/login")
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    // Strategy defaults
    assert!(connector.oauth_strategy(&json!({})).is_none());
    assert!(connector.oauth_authorization_params().is_empty());
    let updated = connector
        .oauth_post_processing(&json!({}), &json!({}))
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[test]
fn test_snapshot_wire_shape() {
    let mut connector = AcmeConnector::new();
    connector.set_id("acme".to_string());
    connector.base_mut().set_path("/opt/connectors/acme");
    connector.set_steps(vec![Arc::new(LabeledStep("Copy records"))]);

    let value = serde_json::to_value(connector.snapshot()).unwrap();
    assert_eq!(value["id"], "acme");
    assert_eq!(value["label"], "Acme CRM");
    assert_eq!(value["path"], "/opt/connectors/acme");
    assert_eq!(value["steps"], json!([{ "label": "Copy records" }]));
    assert_eq!(value["options"]["useOAuth"], json!(true));
    assert_eq!(value["options"]["extraRequiredFields"], json!(["token"]));
}

#[test]
fn test_strategy_authorization_url_merges_connector_params() {
    struct OAuthConnector {
        base: ConnectorBase,
    }

    #[async_trait]
    impl Connector for OAuthConnector {
        fn base(&self) -> &ConnectorBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ConnectorBase {
            &mut self.base
        }

        fn oauth_strategy(&self, _pipe: &Value) -> Option<OAuthStrategy> {
            Some(OAuthStrategy {
                auth_url: "https://example.com/oauth/authorize".to_string(),
                token_url: "https://example.com/oauth/token".to_string(),
                client_id: "cid".to_string(),
                client_secret: "secret".to_string(),
                scopes: vec!["read".to_string()],
            })
        }

        fn oauth_authorization_params(&self) -> datapipe_connector::AuthorizationParams {
            let mut params = datapipe_connector::AuthorizationParams::new();
            params.insert("access_type".to_string(), "offline".to_string());
            params
        }
    }

    let connector = OAuthConnector {
        base: ConnectorBase::new(),
    };
    let strategy = connector.oauth_strategy(&json!({})).unwrap();
    let url = strategy.build_authorization_url(
        "state-1",
        "https://pipes.example.com/authCallback",
        &connector.oauth_authorization_params(),
    );

    assert!(url.starts_with("https://example.com/oauth/authorize?"));
    assert!(url.contains("client_id=cid"));
    assert!(url.contains("&access_type=offline"));
}
