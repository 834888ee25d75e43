//! Per-instance connector state.
//!
//! [`ConnectorBase`] is the concrete record every connector embeds: identity,
//! option bag, associated pipeline steps, and the optional install path. It
//! has no behavior of its own beyond accessors and serialization; lifecycle
//! and auth behavior live on the [`Connector`](crate::Connector) trait.

use crate::options::ConnectorOptions;
use crate::step::RunStep;
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Shared state for a single connector instance.
///
/// Created once when the orchestrator registers a connector implementation
/// and mutated through setters for the process lifetime. There is no
/// explicit teardown.
pub struct ConnectorBase {
    id: Option<String>,
    label: Option<String>,
    options: ConnectorOptions,
    steps: Vec<Arc<dyn RunStep>>,
    path: Option<PathBuf>,
}

impl ConnectorBase {
    /// A connector with default options (`useOAuth = true`,
    /// `extraRequiredFields = []`).
    pub fn new() -> Self {
        Self::with_options(ConnectorOptions::default())
    }

    /// A connector with caller-supplied options. Defaults for the known
    /// keys are merged during [`ConnectorOptions`] construction; a
    /// caller-supplied value always wins.
    pub fn with_options(options: ConnectorOptions) -> Self {
        Self {
            id: None,
            label: None,
            options,
            steps: Vec::new(),
            path: None,
        }
    }

    /// Identifier assigned by the orchestrator, or `None` before
    /// registration completes.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Replaces the identifier unconditionally. The orchestrator
    /// guarantees uniqueness; no validation happens here.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(connector_id = %id, "Connector ID assigned");
        self.id = Some(id);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// The option bag.
    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }

    /// Value stored under `key`, or `None` for unknown keys.
    pub fn option(&self, key: &str) -> Option<Value> {
        self.options.get(key)
    }

    /// Inserts or overwrites a single option. The bag itself is never
    /// replaced wholesale after construction.
    pub fn set_option(&mut self, key: &str, value: Value) {
        self.options.set(key, value);
    }

    /// Associated run steps in execution order. The orchestrator owns the
    /// step objects; these are references.
    pub fn steps(&self) -> &[Arc<dyn RunStep>] {
        &self.steps
    }

    /// Replaces the step sequence wholesale.
    pub fn set_steps(&mut self, steps: Vec<Arc<dyn RunStep>>) {
        debug!(step_count = steps.len(), "Connector steps replaced");
        self.steps = steps;
    }

    /// Filesystem location the connector was loaded from, if set.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// A plain snapshot of the current state, read live at call time.
    /// This is the wire shape used whenever the connector is transmitted
    /// to the UI or a persistence layer.
    pub fn snapshot(&self) -> ConnectorSnapshot {
        ConnectorSnapshot {
            id: self.id.clone(),
            label: self.label.clone(),
            steps: self.steps.iter().map(|s| s.describe()).collect(),
            options: self.options.to_value(),
            path: self.path.as_ref().map(|p| p.display().to_string()),
        }
    }
}

impl Default for ConnectorBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConnectorBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorBase")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("options", &self.options)
            .field("step_count", &self.steps.len())
            .field("path", &self.path)
            .finish()
    }
}

impl Serialize for ConnectorBase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.snapshot().serialize(serializer)
    }
}

/// Serialized connector state: `{ id, label, steps, options, path }`.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectorSnapshot {
    pub id: Option<String>,
    pub label: Option<String>,
    pub steps: Vec<Value>,
    pub options: Value,
    pub path: Option<String>,
}
