//! Connector option bag.
//!
//! Two known options get typed fields and defaults; everything else lands
//! in an open extension map so connectors can carry arbitrary keys. The
//! wire key names (`useOAuth`, `extraRequiredFields`) are preserved for
//! serialization and dynamic lookup.
//!
//! # Merge semantics
//! Defaults apply only for known keys the caller did not supply; a
//! caller-supplied value always wins. After construction the bag is never
//! replaced wholesale, only mutated per key via [`ConnectorOptions::set`].

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key for the built-in OAuth flag. Default: `true`.
pub const USE_OAUTH: &str = "useOAuth";

/// Key for additional required configuration fields. Default: empty.
pub const EXTRA_REQUIRED_FIELDS: &str = "extraRequiredFields";

/// Per-connector option bag with typed known options and an open
/// extension map.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorOptions {
    use_oauth: bool,
    extra_required_fields: Vec<String>,
    /// Connector-specific keys. Also holds the raw value when a known key
    /// is set to an off-type value; the raw value wins on read-back.
    extra: Map<String, Value>,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            use_oauth: true,
            extra_required_fields: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl ConnectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from caller-supplied keys, applying defaults for the
    /// known keys that are absent.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            options.set(&key, value);
        }
        options
    }

    /// Whether this connector uses the built-in OAuth flow.
    pub fn use_oauth(&self) -> bool {
        self.use_oauth
    }

    /// Extra configuration fields the connector requires from the user.
    pub fn extra_required_fields(&self) -> &[String] {
        &self.extra_required_fields
    }

    /// Returns the value stored under `key`, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(raw) = self.extra.get(key) {
            return Some(raw.clone());
        }
        match key {
            USE_OAUTH => Some(Value::Bool(self.use_oauth)),
            EXTRA_REQUIRED_FIELDS => Some(Value::Array(
                self.extra_required_fields
                    .iter()
                    .map(|f| Value::String(f.clone()))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Inserts or overwrites a single option.
    ///
    /// Values are not validated; option semantics are connector-specific.
    /// A known key set to an off-type value keeps the raw value, and `get`
    /// returns it verbatim.
    pub fn set(&mut self, key: &str, value: Value) {
        match key {
            USE_OAUTH => {
                if let Value::Bool(flag) = value {
                    self.use_oauth = flag;
                    self.extra.remove(key);
                } else {
                    self.extra.insert(key.to_string(), value);
                }
            }
            EXTRA_REQUIRED_FIELDS => {
                match serde_json::from_value::<Vec<String>>(value.clone()) {
                    Ok(fields) => {
                        self.extra_required_fields = fields;
                        self.extra.remove(key);
                    }
                    Err(_) => {
                        self.extra.insert(key.to_string(), value);
                    }
                }
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// The full bag as a JSON object. Raw off-type values win over the
    /// typed fields, matching `get`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(USE_OAUTH.to_string(), Value::Bool(self.use_oauth));
        map.insert(
            EXTRA_REQUIRED_FIELDS.to_string(),
            Value::Array(
                self.extra_required_fields
                    .iter()
                    .map(|f| Value::String(f.clone()))
                    .collect(),
            ),
        );
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl Serialize for ConnectorOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConnectorOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::deserialize(deserializer)?;
        Ok(Self::from_map(map))
    }
}
