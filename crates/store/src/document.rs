use crate::{
    Anchor, AnchorStore, BackendConfig, DocumentBackend, ServiceResponse, StoreError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const DUPLICATE_ID_MESSAGE: &str =
    "anchor with duplicate ID already exists in database!";
pub(crate) const NOT_FOUND_MESSAGE: &str = "Failed to find anchor";

const PING_KEY: &str = "__anchor_store_ping__";

/// Document persisted per anchor. `seq` records insertion order.
#[derive(Serialize, Deserialize)]
struct StoredAnchor {
    seq: u64,
    anchor: Anchor,
}

struct Inner {
    backend: Box<dyn DocumentBackend>,
    next_seq: AtomicU64,
    /// Serializes the duplicate check and the insert of `create`.
    create_lock: Mutex<()>,
}

/// [`AnchorStore`] over a [`DocumentBackend`].
///
/// Backend calls are blocking, so every operation runs on tokio's blocking
/// pool.
#[derive(Clone)]
pub struct DocumentAnchorStore {
    inner: Arc<Inner>,
}

impl DocumentAnchorStore {
    /// Build the configured backend and open a store on it.
    pub fn open(config: &BackendConfig) -> Result<Self, StoreError> {
        Self::with_backend(config.build()?)
    }

    /// Open a store on an existing backend, resuming the insertion counter
    /// after the highest sequence already stored.
    pub fn with_backend(backend: Box<dyn DocumentBackend>) -> Result<Self, StoreError> {
        let mut next_seq = 0;
        backend.scan(&mut |data| {
            let doc = decode(data)?;
            next_seq = next_seq.max(doc.seq + 1);
            Ok(())
        })?;
        tracing::debug!(next_seq, "anchor store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                backend,
                next_seq: AtomicU64::new(next_seq),
                create_lock: Mutex::new(()),
            }),
        })
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Inner) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner))
            .await
            .map_err(|e| StoreError::Task(format!("store task failed: {e}")))?
    }
}

impl Inner {
    fn load(&self, anchor_id: &str) -> Result<Option<StoredAnchor>, StoreError> {
        match self.backend.get(anchor_id)? {
            Some(data) => Ok(Some(decode(&data)?)),
            None => Ok(None),
        }
    }

    fn create(&self, anchor: Anchor) -> Result<ServiceResponse<Anchor>, StoreError> {
        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| StoreError::backend("poisoned lock"))?;

        if self.backend.get(&anchor.anchor_id)?.is_some() {
            return Ok(ServiceResponse::failure(DUPLICATE_ID_MESSAGE));
        }

        let doc = StoredAnchor {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            anchor,
        };
        let encoded = serde_json::to_vec(&doc)?;
        self.backend.put(&doc.anchor.anchor_id, &encoded)?;
        self.backend.flush()?;
        Ok(ServiceResponse::success(doc.anchor))
    }

    fn by_node(&self, node_id: &str) -> Result<Vec<Anchor>, StoreError> {
        let mut docs = Vec::new();
        self.backend.scan(&mut |data| {
            let doc = decode(data)?;
            if doc.anchor.node_id == node_id {
                docs.push(doc);
            }
            Ok(())
        })?;
        docs.sort_by_key(|doc| doc.seq);
        Ok(docs.into_iter().map(|doc| doc.anchor).collect())
    }
}

fn decode(data: &[u8]) -> Result<StoredAnchor, StoreError> {
    Ok(serde_json::from_slice(data)?)
}

#[async_trait]
impl AnchorStore for DocumentAnchorStore {
    async fn create_anchor(&self, anchor: Anchor) -> Result<ServiceResponse<Anchor>, StoreError> {
        self.run(move |inner| inner.create(anchor)).await
    }

    async fn get_anchor_by_id(
        &self,
        anchor_id: &str,
    ) -> Result<ServiceResponse<Anchor>, StoreError> {
        let anchor_id = anchor_id.to_string();
        self.run(move |inner| {
            Ok(match inner.load(&anchor_id)? {
                Some(doc) => ServiceResponse::success(doc.anchor),
                None => ServiceResponse::failure(NOT_FOUND_MESSAGE),
            })
        })
        .await
    }

    async fn get_anchors_by_id(
        &self,
        anchor_ids: &[String],
    ) -> Result<ServiceResponse<Vec<Anchor>>, StoreError> {
        let anchor_ids = anchor_ids.to_vec();
        self.run(move |inner| {
            let mut anchors = Vec::with_capacity(anchor_ids.len());
            for anchor_id in &anchor_ids {
                if let Some(doc) = inner.load(anchor_id)? {
                    anchors.push(doc.anchor);
                }
            }
            Ok(ServiceResponse::success(anchors))
        })
        .await
    }

    async fn get_anchors_by_node_id(
        &self,
        node_id: &str,
    ) -> Result<ServiceResponse<Vec<Anchor>>, StoreError> {
        let node_id = node_id.to_string();
        self.run(move |inner| Ok(ServiceResponse::success(inner.by_node(&node_id)?)))
            .await
    }

    async fn delete_anchor(&self, anchor_id: &str) -> Result<ServiceResponse<()>, StoreError> {
        let anchor_id = anchor_id.to_string();
        self.run(move |inner| {
            inner.backend.delete(&anchor_id)?;
            inner.backend.flush()?;
            Ok(ServiceResponse::success(()))
        })
        .await
    }

    async fn delete_anchors(
        &self,
        anchor_ids: &[String],
    ) -> Result<ServiceResponse<()>, StoreError> {
        let anchor_ids = anchor_ids.to_vec();
        self.run(move |inner| {
            inner.backend.batch_delete(&anchor_ids)?;
            inner.backend.flush()?;
            Ok(ServiceResponse::success(()))
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.run(|inner| inner.backend.get(PING_KEY).map(|_| ()))
            .await
    }
}
