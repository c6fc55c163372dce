//! Client onboarding records kept in the cache
//!
//! Records live in one hash keyed by client id.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use corelib_cache::CacheProvider;
use corelib_core::CommonError;
use corelib_model::{ClientDto, SuccessResponse};

use crate::advice::AppError;

/// Hash holding every onboarded client
pub const CLIENTS_HASH: &str = "clients";

/// Short code raised when a client id is unknown
pub const CLIENT_NOT_FOUND: &str = "B404";

/// Short code raised for malformed client payloads
pub const INVALID_CLIENT: &str = "B400";

/// Short code raised when the cache rejects a write
pub const CACHE_UNAVAILABLE: &str = "S503";

pub fn router(cache: CacheProvider) -> Router {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients/{id}", get(get_client).put(put_client).delete(delete_client))
        .with_state(cache)
}

/// Client id from the path, raised as an invalid request when malformed
fn client_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    let Path(id) = path.map_err(|e| CommonError::business(INVALID_CLIENT).with_source(e))?;
    Ok(id)
}

fn not_found(id: i64) -> AppError {
    CommonError::business(CLIENT_NOT_FOUND)
        .with_message(format!("client {id} not found"))
        .into()
}

async fn put_client(
    State(cache): State<CacheProvider>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ClientDto>, JsonRejection>,
) -> Result<Json<SuccessResponse<ClientDto>>, AppError> {
    let id = client_id(path)?;
    let Json(mut client) = payload.map_err(|e| CommonError::business(INVALID_CLIENT).with_source(e))?;
    client.client_id = Some(id);

    cache
        .put(CLIENTS_HASH, &id.to_string(), &client)
        .await
        .map_err(|e| CommonError::internal(CACHE_UNAVAILABLE).with_source(e))?;

    tracing::info!(client_id = id, "client stored");
    Ok(Json(SuccessResponse::success("200", "Client saved", Some(client))))
}

async fn get_client(
    State(cache): State<CacheProvider>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse<ClientDto>>, AppError> {
    let id = client_id(path)?;
    let client = cache
        .get::<ClientDto>(CLIENTS_HASH, &id.to_string())
        .await
        .ok_or_else(|| not_found(id))?;

    Ok(Json(SuccessResponse::success("200", "Client found", Some(client))))
}

async fn delete_client(
    State(cache): State<CacheProvider>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse<()>>, AppError> {
    let id = client_id(path)?;
    if !cache.delete(CLIENTS_HASH, &id.to_string()).await {
        return Err(not_found(id));
    }

    tracing::info!(client_id = id, "client removed");
    Ok(Json(SuccessResponse::success("200", "Client deleted", None)))
}

/// Every stored client, ordered by id
async fn list_clients(State(cache): State<CacheProvider>) -> Json<SuccessResponse<Vec<ClientDto>>> {
    let mut clients: Vec<_> = cache.get_all::<ClientDto>(CLIENTS_HASH).await.into_values().collect();
    clients.sort_by_key(|client| client.client_id);

    Json(SuccessResponse::success("200", "Clients listed", Some(clients)))
}
