//! # Anchor Store
//!
//! Data model and persistence for anchors: pinned references attached to a
//! node.
//!
//! - [`Anchor`] and [`Extent`] are the wire types, with [`is_anchor`] as the
//!   shape check applied to untrusted JSON before it reaches a store.
//! - [`ServiceResponse`] is the envelope every store operation returns.
//! - [`AnchorStore`] is the async contract the HTTP layer consumes.
//! - [`DocumentAnchorStore`] implements it on any [`DocumentBackend`]:
//!   an in-memory map for tests or a redb file for deployments.
//!
//! ## Example
//!
//! ```
//! use store::{Anchor, AnchorStore, BackendConfig, DocumentAnchorStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), store::StoreError> {
//! let store = DocumentAnchorStore::open(&BackendConfig::in_memory())?;
//! store.create_anchor(Anchor::new("a1", "n1")).await?;
//!
//! let found = store.get_anchors_by_node_id("n1").await?;
//! assert_eq!(found.payload.unwrap().len(), 1);
//! # Ok(())
//! # }
//! ```

mod anchor;
mod backend;
mod document;
mod response;

pub use anchor::{is_anchor, Anchor, Extent};
#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use backend::{BackendConfig, DocumentBackend, InMemoryBackend};
pub use document::DocumentAnchorStore;
pub use response::ServiceResponse;

use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by a store.
///
/// The display text is the bare message; the HTTP layer forwards it to
/// clients unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
    #[error("{0}")]
    Codec(String),
    #[error("{0}")]
    Task(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

/// Persistence contract for anchors.
///
/// Expected misses (unknown id, duplicate id) come back as failure
/// [`ServiceResponse`]s. `Err` is reserved for faults of the store itself.
#[async_trait]
pub trait AnchorStore: Send + Sync {
    async fn create_anchor(&self, anchor: Anchor) -> Result<ServiceResponse<Anchor>, StoreError>;

    async fn get_anchor_by_id(&self, anchor_id: &str)
        -> Result<ServiceResponse<Anchor>, StoreError>;

    /// Anchors for the ids that exist, in request order.
    async fn get_anchors_by_id(
        &self,
        anchor_ids: &[String],
    ) -> Result<ServiceResponse<Vec<Anchor>>, StoreError>;

    /// Anchors attached to `node_id`, in insertion order.
    async fn get_anchors_by_node_id(
        &self,
        node_id: &str,
    ) -> Result<ServiceResponse<Vec<Anchor>>, StoreError>;

    async fn delete_anchor(&self, anchor_id: &str) -> Result<ServiceResponse<()>, StoreError>;

    async fn delete_anchors(&self, anchor_ids: &[String])
        -> Result<ServiceResponse<()>, StoreError>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
