//! A scripted store that records every call made to it.
//!
//! Each operation is scripted independently: succeed with a value, fail with
//! an `Error::Other` carrying a known message, or never settle. Tests use the
//! failure message to check exactly which store's error reached the caller.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Error, FileStore, LocationConfig};

/// Scripted outcome of one store operation.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Succeed(T),
    /// Fail with `Error::Other` carrying this message.
    Fail(String),
    /// Never settle.
    Hang,
}

impl<T> Scripted<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Scripted::Fail(message.into())
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { filename: String, data: Bytes },
    Delete { filename: String },
    GetData { filename: String },
    GetLocation { filename: String },
}

struct Script {
    create: Scripted<()>,
    delete: Scripted<()>,
    get_data: Scripted<Bytes>,
    delay: Option<Duration>,
}

pub struct RecordingStore {
    name: String,
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingStore {
    /// A store where create and delete succeed and every read fails with
    /// `"{name}: not found"`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let get_data = Scripted::Fail(format!("{}: not found", name));
        Self {
            name,
            script: Mutex::new(Script {
                create: Scripted::Succeed(()),
                delete: Scripted::Succeed(()),
                get_data,
                delay: None,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_create(self, outcome: Scripted<()>) -> Self {
        self.script.lock().unwrap().create = outcome;
        self
    }

    pub fn with_delete(self, outcome: Scripted<()>) -> Self {
        self.script.lock().unwrap().delete = outcome;
        self
    }

    pub fn with_get_data(self, outcome: Scripted<Bytes>) -> Self {
        self.script.lock().unwrap().get_data = outcome;
        self
    }

    /// Sleep this long before settling each async call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.script.lock().unwrap().delay = Some(delay);
        self
    }

    /// Every call made so far, in arrival order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .collect()
    }

    pub fn delete_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Delete { .. }))
            .collect()
    }

    pub fn get_data_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::GetData { .. }))
            .collect()
    }

    /// Poll until at least `count` create calls were recorded.
    ///
    /// Returns false if `limit` elapses first.
    pub async fn wait_for_creates(&self, count: usize, limit: Duration) -> bool {
        let waited = tokio::time::timeout(limit, async {
            while self.create_calls().len() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await;
        waited.is_ok()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn settle<T>(&self, outcome: Scripted<T>) -> Result<T, Error> {
        let delay = self.script.lock().unwrap().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match outcome {
            Scripted::Succeed(value) => Ok(value),
            Scripted::Fail(message) => Err(Error::Other { message }),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl FileStore for RecordingStore {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        self.record(Call::Create {
            filename: filename.to_string(),
            data,
        });
        let outcome = self.script.lock().unwrap().create.clone();
        self.settle(outcome).await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        self.record(Call::Delete {
            filename: filename.to_string(),
        });
        let outcome = self.script.lock().unwrap().delete.clone();
        self.settle(outcome).await
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        self.record(Call::GetData {
            filename: filename.to_string(),
        });
        let outcome = self.script.lock().unwrap().get_data.clone();
        self.settle(outcome).await
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        self.record(Call::GetLocation {
            filename: filename.to_string(),
        });
        format!("{}:{}", self.name, config.file_url(filename))
    }
}

/// Assert `err` is the scripted failure carrying `message`.
pub fn assert_scripted_failure(err: &Error, message: &str) {
    match err {
        Error::Other { message: actual } => assert_eq!(actual, message),
        other => panic!("expected scripted failure '{}', got {:?}", message, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let store = RecordingStore::new("main");

        store
            .create_file("a", Bytes::from_static(b"1"))
            .await
            .unwrap();
        store.delete_file("a").await.unwrap();
        let err = store.get_file_data("a").await.unwrap_err();
        assert_scripted_failure(&err, "main: not found");

        assert_eq!(
            store.calls(),
            vec![
                Call::Create {
                    filename: "a".to_string(),
                    data: Bytes::from_static(b"1"),
                },
                Call::Delete {
                    filename: "a".to_string(),
                },
                Call::GetData {
                    filename: "a".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn scripted_outcomes_are_reusable() {
        let store = RecordingStore::new("legacy")
            .with_get_data(Scripted::Succeed(Bytes::from_static(b"data")))
            .with_delete(Scripted::fail("gone"));

        for _ in 0..2 {
            assert_eq!(
                store.get_file_data("f").await.unwrap(),
                Bytes::from_static(b"data")
            );
            assert_scripted_failure(&store.delete_file("f").await.unwrap_err(), "gone");
        }
        assert_eq!(store.get_data_calls().len(), 2);
        assert_eq!(store.delete_calls().len(), 2);
    }

    #[tokio::test]
    async fn hang_never_settles() {
        let store = RecordingStore::new("slow").with_get_data(Scripted::Hang);
        let result =
            tokio::time::timeout(Duration::from_millis(20), store.get_file_data("f")).await;
        assert!(result.is_err());
    }

    #[test]
    fn location_is_tagged_with_store_name() {
        let store = RecordingStore::new("main");
        let config = LocationConfig::new("http://host", "app");
        assert_eq!(
            store.get_file_location(&config, "f"),
            "main:http://host/files/app/f"
        );
        assert_eq!(store.calls().len(), 1);
    }
}
