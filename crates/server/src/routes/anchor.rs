//! Anchor CRUD routes, mounted under `/anchor`.
//!
//! Each route makes exactly one store call. Only `create` validates its
//! input before dispatch; every store failure becomes a 500 carrying the
//! store's message through [`ServerError`].
//!
//! The static segments `create`, `delete` and `getAnchorsById` are also
//! valid anchor ids: `GET` and `DELETE` on them reach the single-anchor
//! lookup and delete with the literal segment as the id.

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use store::{Anchor, ServiceResponse, StoreError};

/// Body of `POST /anchor/getAnchorsById` and `POST /anchor/delete`.
#[derive(Debug, Deserialize)]
pub struct AnchorIdsRequest {
    #[serde(rename = "anchorIds")]
    pub anchor_ids: Vec<String>,
}

/// Routes relative to the `/anchor` prefix.
pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/create", literal_id("create").post(create_anchor))
        .route(
            "/getAnchorsById",
            literal_id("getAnchorsById").post(get_anchors_by_id),
        )
        .route("/getByNodeId/{node_id}", get(get_anchors_by_node_id))
        .route("/delete", literal_id("delete").post(delete_anchors))
        .route("/{anchor_id}", get(get_anchor).delete(delete_anchor))
}

/// `GET`/`DELETE` on a static segment, read as the anchor id `id`.
fn literal_id(id: &'static str) -> MethodRouter<Arc<ServerState>> {
    get(move |State(state): State<Arc<ServerState>>| async move {
        fetch_anchor(&state, id).await
    })
    .delete(move |State(state): State<Arc<ServerState>>| async move {
        remove_anchor(&state, id).await
    })
}

fn store_failed(operation: &'static str, err: StoreError) -> ServerError {
    metrics::counter!("anchor_store_errors_total", "operation" => operation).increment(1);
    tracing::warn!(operation, error = %err, "anchor store call failed");
    ServerError::Store(err)
}

/// POST /anchor/create
///
/// Body: `{ "anchor": Anchor }`. Anything that does not decode to an
/// anchor answers 400 `not IAnchor!`.
pub async fn create_anchor(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<ServiceResponse<Anchor>>> {
    tracing::info!("create anchor");

    let anchor = body
        .ok()
        .and_then(|Json(mut body)| body.get_mut("anchor").map(Value::take))
        .and_then(|value| Anchor::from_value(value).ok())
        .ok_or(ServerError::NotAnchor)?;

    let response = state
        .store
        .create_anchor(anchor)
        .await
        .map_err(|e| store_failed("create_anchor", e))?;
    Ok(Json(response))
}

/// GET /anchor/{anchor_id}
pub async fn get_anchor(
    State(state): State<Arc<ServerState>>,
    Path(anchor_id): Path<String>,
) -> ServerResult<Json<ServiceResponse<Anchor>>> {
    fetch_anchor(&state, &anchor_id).await
}

async fn fetch_anchor(
    state: &ServerState,
    anchor_id: &str,
) -> ServerResult<Json<ServiceResponse<Anchor>>> {
    let response = state
        .store
        .get_anchor_by_id(anchor_id)
        .await
        .map_err(|e| store_failed("get_anchor_by_id", e))?;
    Ok(Json(response))
}

/// POST /anchor/getAnchorsById
///
/// A body that does not decode to `{ "anchorIds": [..] }` answers 500 with
/// the decoder's message, the same way a failing store call does.
pub async fn get_anchors_by_id(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<AnchorIdsRequest>, JsonRejection>,
) -> ServerResult<Json<ServiceResponse<Vec<Anchor>>>> {
    let Json(request) = body?;
    let response = state
        .store
        .get_anchors_by_id(&request.anchor_ids)
        .await
        .map_err(|e| store_failed("get_anchors_by_id", e))?;
    Ok(Json(response))
}

/// GET /anchor/getByNodeId/{node_id}
pub async fn get_anchors_by_node_id(
    State(state): State<Arc<ServerState>>,
    Path(node_id): Path<String>,
) -> ServerResult<Json<ServiceResponse<Vec<Anchor>>>> {
    let response = state
        .store
        .get_anchors_by_node_id(&node_id)
        .await
        .map_err(|e| store_failed("get_anchors_by_node_id", e))?;
    Ok(Json(response))
}

/// DELETE /anchor/{anchor_id}
pub async fn delete_anchor(
    State(state): State<Arc<ServerState>>,
    Path(anchor_id): Path<String>,
) -> ServerResult<Json<ServiceResponse<()>>> {
    remove_anchor(&state, &anchor_id).await
}

async fn remove_anchor(
    state: &ServerState,
    anchor_id: &str,
) -> ServerResult<Json<ServiceResponse<()>>> {
    let response = state
        .store
        .delete_anchor(anchor_id)
        .await
        .map_err(|e| store_failed("delete_anchor", e))?;
    Ok(Json(response))
}

/// POST /anchor/delete
pub async fn delete_anchors(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<AnchorIdsRequest>, JsonRejection>,
) -> ServerResult<Json<ServiceResponse<()>>> {
    let Json(request) = body?;
    let response = state
        .store
        .delete_anchors(&request.anchor_ids)
        .await
        .map_err(|e| store_failed("delete_anchors", e))?;
    Ok(Json(response))
}
