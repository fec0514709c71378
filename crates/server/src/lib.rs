//! Anchor Server - HTTP REST API for anchor CRUD
//!
//! This crate exposes an anchor store over HTTP. Every anchor route maps to
//! exactly one store call and translates the outcome into a status code:
//!
//! - **Create**: shape-checked before dispatch, 400 `not IAnchor!` otherwise
//! - **Lookups**: by anchor id, by a list of ids, by node id
//! - **Deletes**: single anchor or a list of ids
//! - **Errors**: any store failure answers 500 with the store's message
//!
//! Around them sit liveness/readiness probes, Prometheus metrics, request
//! ids, structured logging and graceful shutdown.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /anchor/create` - body `{ "anchor": Anchor }`
//! - `GET /anchor/{anchorId}` - fetch one anchor
//! - `POST /anchor/getAnchorsById` - body `{ "anchorIds": [..] }`
//! - `GET /anchor/getByNodeId/{nodeId}` - anchors of a node
//! - `DELETE /anchor/{anchorId}` - delete one anchor
//! - `POST /anchor/delete` - body `{ "anchorIds": [..] }`
//! - `GET /`, `GET /health`, `GET /ready`, `GET /metrics`

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::config::{ServerConfig, StorageBackend, StorageConfig};
pub use crate::error::{ServerError, ServerResult};
pub use crate::server::{build_router, start_server};
pub use crate::state::ServerState;
