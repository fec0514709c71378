//! Workspace umbrella crate for the anchor service.
//!
//! Re-exports the anchor model and store contract from `anchor-store` and,
//! with the `server` feature, the HTTP layer from `anchor-server`, so
//! callers depend on a single crate.

pub use store::{
    is_anchor, Anchor, AnchorStore, BackendConfig, DocumentAnchorStore, DocumentBackend, Extent,
    InMemoryBackend, ServiceResponse, StoreError,
};

#[cfg(feature = "embedded")]
pub use store::RedbBackend;

#[cfg(feature = "server")]
pub use server::{
    build_router, start_server, ServerConfig, ServerError, ServerResult, ServerState,
    StorageBackend, StorageConfig,
};
