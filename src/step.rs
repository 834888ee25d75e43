//! Run-step capability contract.
//!
//! Step objects are owned and executed by the orchestrator's step runtime;
//! the base contract only stores the association and hands the references
//! back in execution order.

use serde_json::Value;

/// Capability contract satisfied by pipeline run steps.
pub trait RunStep: Send + Sync {
    /// Human-readable step label shown in the UI.
    fn label(&self) -> &str;

    /// JSON representation used when the owning connector is serialized.
    fn describe(&self) -> Value {
        serde_json::json!({ "label": self.label() })
    }
}
