use crate::base::{ConnectorBase, ConnectorSnapshot};
use crate::error::ConnectorError;
use crate::oauth::{AuthorizationParams, OAuthStrategy};
use crate::step::RunStep;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Contract every data-source connector implements.
///
/// Concrete connectors embed a [`ConnectorBase`] and expose it through
/// `base`/`base_mut`; everything else has a safe default. The orchestrator
/// drives the lifecycle: `register_routes` once at startup, then repeated
/// cycles of `run_started` → (step execution) → `run_finished`.
///
/// # Authentication
/// Two extension layers exist; a connector uses exactly one:
/// - the generic layer (`auth_callback`, `connect_data_source`) for manual
///   auth flows, or
/// - the strategy layer (`oauth_strategy`, `oauth_authorization_params`,
///   `oauth_post_processing`) for the built-in OAuth flow.
///
/// Non-overridden auth hooks fail with the fixed Unauthorized error
/// (`message = "Not Authorized"`, `code = 401`).
///
/// # Completion contract
/// Every async hook resolves exactly once. The orchestrator awaits
/// `run_started` before progressing a run; no timeout exists at this
/// layer, so a non-resolving override stalls the run indefinitely.
///
/// # Example
/// ```no_run
/// use datapipe_connector::{Connector, ConnectorBase, OAuthStrategy};
/// use async_trait::async_trait;
/// use serde_json::Value;
///
/// struct SalesforceConnector {
///     base: ConnectorBase,
/// }
///
/// impl SalesforceConnector {
///     fn new() -> Self {
///         let mut base = ConnectorBase::new();
///         base.set_label("Salesforce");
///         Self { base }
///     }
/// }
///
/// #[async_trait]
/// impl Connector for SalesforceConnector {
///     fn base(&self) -> &ConnectorBase {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut ConnectorBase {
///         &mut self.base
///     }
///
///     fn oauth_strategy(&self, _pipe: &Value) -> Option<OAuthStrategy> {
///         Some(OAuthStrategy {
///             auth_url: "https://login.salesforce.com/services/oauth2/authorize".to_string(),
///             token_url: "https://login.salesforce.com/services/oauth2/token".to_string(),
///             client_id: "client-id".to_string(),
///             client_secret: "client-secret".to_string(),
///             scopes: vec!["api".to_string(), "refresh_token".to_string()],
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// The embedded per-instance state.
    fn base(&self) -> &ConnectorBase;

    /// Mutable access to the embedded state.
    fn base_mut(&mut self) -> &mut ConnectorBase;

    // ------------------------------------------------------------------
    // Accessors (delegate to the base record)
    // ------------------------------------------------------------------

    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    fn set_id(&mut self, id: String) {
        self.base_mut().set_id(id);
    }

    fn label(&self) -> Option<&str> {
        self.base().label()
    }

    fn set_label(&mut self, label: String) {
        self.base_mut().set_label(label);
    }

    fn option(&self, key: &str) -> Option<Value> {
        self.base().option(key)
    }

    fn set_option(&mut self, key: &str, value: Value) {
        self.base_mut().set_option(key, value);
    }

    fn steps(&self) -> &[Arc<dyn RunStep>] {
        self.base().steps()
    }

    fn set_steps(&mut self, steps: Vec<Arc<dyn RunStep>>) {
        self.base_mut().set_steps(steps);
    }

    /// Plain snapshot of the connector state (`{ id, label, steps,
    /// options, path }`), read live at call time.
    fn snapshot(&self) -> ConnectorSnapshot {
        self.base().snapshot()
    }

    // ------------------------------------------------------------------
    // Lifecycle hooks (invoked by the orchestrator)
    // ------------------------------------------------------------------

    /// Called once during startup so the connector can mount
    /// connector-specific endpoints (OAuth redirect targets and the like).
    /// Default mounts nothing.
    fn register_routes(&self, router: Router) -> Router {
        router
    }

    /// Called when a new execution run begins. The orchestrator awaits
    /// the result before progressing; overrides may perform asynchronous
    /// setup before signaling readiness. Default: immediately ready.
    async fn run_started(&self) -> Result<(), ConnectorError> {
        Ok(())
    }

    /// Called when a run completes. Nothing is consumed from this hook.
    async fn run_finished(&self) {}

    // ------------------------------------------------------------------
    // Generic auth layer (manual flow)
    // ------------------------------------------------------------------

    /// Exchanges an OAuth code for credentials and returns the updated
    /// pipe. Default: the connector does not support this flow.
    async fn auth_callback(
        &self,
        _oauth_code: &str,
        pipe_id: &str,
    ) -> Result<Value, ConnectorError> {
        warn!(
            connector = ?self.id(),
            pipe_id = %pipe_id,
            "auth_callback not implemented by this connector"
        );
        Err(ConnectorError::unauthorized())
    }

    /// Performs the connection handshake for a data source. Request and
    /// response are passed through opaquely. Default: unauthorized.
    async fn connect_data_source(
        &self,
        _request: Request<Body>,
        pipe_id: &str,
        _login_url: &str,
    ) -> Result<Response, ConnectorError> {
        warn!(
            connector = ?self.id(),
            pipe_id = %pipe_id,
            "connect_data_source not implemented by this connector"
        );
        Err(ConnectorError::unauthorized())
    }

    // ------------------------------------------------------------------
    // Strategy auth layer (built-in OAuth flow)
    // ------------------------------------------------------------------

    /// Strategy handed to the authentication collaborator. `None` means
    /// this connector does not use the built-in strategy-based flow.
    fn oauth_strategy(&self, _pipe: &Value) -> Option<OAuthStrategy> {
        None
    }

    /// Extra parameters merged into the authorization request when a
    /// strategy is in use.
    fn oauth_authorization_params(&self) -> AuthorizationParams {
        AuthorizationParams::new()
    }

    /// Invoked after the collaborator's own verification succeeds, to let
    /// the connector extract fields from `info` (tokens and the like) and
    /// attach them to the pipe configuration. `Ok(Some(updated))` is the
    /// only signal on which the orchestrator may persist pipe changes;
    /// the default `Ok(None)` means no modification and no error.
    async fn oauth_post_processing(
        &self,
        _info: &Value,
        _pipe: &Value,
    ) -> Result<Option<Value>, ConnectorError> {
        Ok(None)
    }
}
