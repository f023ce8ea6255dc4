//! Migrating store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a value found in a legacy store is copied into the main store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteBackMode {
    /// Spawn the copy on the current Tokio runtime and return the read at
    /// once. Without a runtime the copy is awaited inline instead.
    #[default]
    Detached,
    /// Await the copy before the read returns.
    Inline,
    /// Never copy. Reads still fall back to legacy stores.
    Disabled,
}

/// Settings for a [`MigratingStore`](crate::MigratingStore).
///
/// Deserializes from e.g. `{"write_back": "inline", "call_timeout_ms": 5000}`;
/// missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigratingStoreConfig {
    pub write_back: WriteBackMode,

    /// Limit on each individual backend call. `None` waits forever.
    ///
    /// Needs a Tokio runtime with the time driver enabled.
    #[serde(rename = "call_timeout_ms", with = "optional_millis")]
    pub call_timeout: Option<Duration>,
}

impl MigratingStoreConfig {
    pub fn with_write_back(mut self, mode: WriteBackMode) -> Self {
        self.write_back = mode;
        self
    }

    pub fn with_call_timeout(mut self, limit: Duration) -> Self {
        self.call_timeout = Some(limit);
        self
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_detached_without_timeout() {
        let config = MigratingStoreConfig::default();
        assert_eq!(config.write_back, WriteBackMode::Detached);
        assert_eq!(config.call_timeout, None);
    }

    #[test]
    fn deserializes_from_json() {
        let config: MigratingStoreConfig =
            serde_json::from_str(r#"{"write_back": "inline", "call_timeout_ms": 2500}"#).unwrap();
        assert_eq!(
            config,
            MigratingStoreConfig::default()
                .with_write_back(WriteBackMode::Inline)
                .with_call_timeout(Duration::from_millis(2500))
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: MigratingStoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MigratingStoreConfig::default());

        let config: MigratingStoreConfig =
            serde_json::from_str(r#"{"write_back": "disabled"}"#).unwrap();
        assert_eq!(config.write_back, WriteBackMode::Disabled);
        assert_eq!(config.call_timeout, None);
    }

    #[test]
    fn serializes_timeout_as_millis() {
        let config = MigratingStoreConfig::default().with_call_timeout(Duration::from_secs(3));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["call_timeout_ms"], 3000);
        assert_eq!(json["write_back"], "detached");
    }
}
