//! Datapipe Connector SDK - Base contract for data-source connectors.
//!
//! This crate defines the standard contract that all data-pipe connectors
//! implement. A connector integrates an external data source (Salesforce,
//! Cloudant, Stripe, etc.) with the orchestration engine, which treats
//! every connector uniformly through this seam: identity, options,
//! pipeline-step association, lifecycle notifications, and authentication
//! extension points.
//!
//! # Architecture
//!
//! ```text
//! External data source (Salesforce, Cloudant, etc.)
//!          ↓
//!     OAuth (user authorizes)
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │     Connector (implements trait)         │
//! │  - Embeds ConnectorBase state            │
//! │  - Overrides auth + lifecycle hooks      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │     Orchestration engine (external)      │
//! │  - Registers connectors, assigns IDs     │
//! │  - Drives run_started / run_finished     │
//! │  - Executes pipeline steps               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Core types
//!
//! - [`Connector`] - Trait all connectors implement; every hook has a safe
//!   default
//! - [`ConnectorBase`] - Per-instance state record (id, label, options,
//!   steps, path)
//! - [`ConnectorOptions`] - Option bag with typed known options and an
//!   open extension map
//! - [`OAuthStrategy`] - Strategy sub-contract for the built-in OAuth flow
//! - [`ConnectorError`] - Contract error; the fixed Unauthorized shape
//!   plus connector-defined failures
//! - [`RunStep`] - Capability contract for orchestrator-owned run steps
//!
//! # Creating a connector
//!
//! ```no_run
//! use datapipe_connector::{Connector, ConnectorBase, ConnectorError};
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//!
//! struct CloudantConnector {
//!     base: ConnectorBase,
//! }
//!
//! #[async_trait]
//! impl Connector for CloudantConnector {
//!     fn base(&self) -> &ConnectorBase {
//!         &self.base
//!     }
//!
//!     fn base_mut(&mut self) -> &mut ConnectorBase {
//!         &mut self.base
//!     }
//!
//!     async fn auth_callback(
//!         &self,
//!         oauth_code: &str,
//!         pipe_id: &str,
//!     ) -> Result<Value, ConnectorError> {
//!         // Exchange the code for credentials, attach them to the pipe
//!         Ok(json!({ "id": pipe_id, "accessToken": oauth_code }))
//!     }
//! }
//! ```

pub mod base;
pub mod connector;
pub mod error;
pub mod oauth;
pub mod options;
pub mod step;

// Re-export the public surface
pub use base::{ConnectorBase, ConnectorSnapshot};
pub use connector::Connector;
pub use error::ConnectorError;
pub use oauth::{AuthorizationParams, OAuthStrategy};
pub use options::ConnectorOptions;
pub use step::RunStep;
