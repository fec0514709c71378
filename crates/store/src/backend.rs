use crate::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Key-value storage under the anchor document store.
/// Keys are anchor ids, values are encoded documents.
pub trait DocumentBackend: Send + Sync {
    /// Insert or replace a document.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
    /// Fetch a document by key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Remove a document. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
    /// Remove several documents at once.
    fn batch_delete(&self, keys: &[String]) -> Result<(), StoreError>;
    /// Visit every stored document.
    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
    /// Flush any buffered writes.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Selects and builds a [`DocumentBackend`].
///
/// ```
/// use store::BackendConfig;
///
/// let config = BackendConfig::in_memory();
/// let backend = config.build().unwrap();
/// assert!(backend.get("missing").unwrap().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendConfig {
    /// Persistent redb file at `path`.
    ///
    /// Requires the `backend-redb` feature (enabled by default).
    Redb { path: String },
    /// Process-local map, lost on restart.
    #[default]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn redb<P: Into<String>>(path: P) -> Self {
        BackendConfig::Redb { path: path.into() }
    }

    /// Build the configured backend.
    pub fn build(&self) -> Result<Box<dyn DocumentBackend>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
            BackendConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Box::new(RedbBackend::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(StoreError::backend("redb backend disabled at compile time"))
                }
            }
        }
    }
}

/// In-memory backend using a `RwLock` around a `HashMap`.
#[derive(Default)]
pub struct InMemoryBackend {
    documents: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBackend for InMemoryBackend {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.documents
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self
            .documents
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.documents
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .remove(key);
        Ok(())
    }

    fn batch_delete(&self, keys: &[String]) -> Result<(), StoreError> {
        // One write lock for the whole batch.
        let mut guard = self
            .documents
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        for key in keys {
            guard.remove(key);
        }
        Ok(())
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let guard = self
            .documents
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        for value in guard.values() {
            visitor(value)?;
        }
        Ok(())
    }
}

#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use self::redb::RedbBackend;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_put_get_delete() {
        let backend = InMemoryBackend::new();
        backend.put("a1", b"doc").unwrap();
        assert_eq!(backend.get("a1").unwrap(), Some(b"doc".to_vec()));

        backend.delete("a1").unwrap();
        assert_eq!(backend.get("a1").unwrap(), None);

        // Deleting again is a no-op.
        backend.delete("a1").unwrap();
    }

    #[test]
    fn in_memory_batch_delete_ignores_missing_keys() {
        let backend = InMemoryBackend::new();
        backend.put("a1", b"one").unwrap();
        backend.put("a2", b"two").unwrap();
        backend.put("a3", b"three").unwrap();

        backend
            .batch_delete(&["a1".to_string(), "a3".to_string(), "nope".to_string()])
            .unwrap();

        let mut remaining = Vec::new();
        backend
            .scan(&mut |value| {
                remaining.push(value.to_vec());
                Ok(())
            })
            .unwrap();
        assert_eq!(remaining, vec![b"two".to_vec()]);
    }

    #[test]
    fn default_config_is_in_memory() {
        assert_eq!(BackendConfig::default(), BackendConfig::InMemory);
        assert_eq!(
            BackendConfig::redb("/tmp/anchors.redb"),
            BackendConfig::Redb {
                path: "/tmp/anchors.redb".to_string()
            }
        );
    }
}
