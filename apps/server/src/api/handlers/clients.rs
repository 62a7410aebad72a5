//! Client record handlers

use super::{created, json_body, no_content, ok, CollectionQuery};
use crate::{state::AppState, Result};
use airdesk_records::ClientSearch;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
};

/// List or search clients
///
/// GET /clients
///
/// Any of `q`, `type`, `city`, `state`, `country` switches to search;
/// both forms are paginated.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Response> {
    let page = query.page_request()?;
    let search = ClientSearch {
        q: query.q,
        r#type: query.r#type,
        city: query.city,
        state: query.state,
        country: query.country,
    };

    let result = state
        .with_store(move |store| {
            if search.is_empty() {
                store.clients().list(&page)
            } else {
                store.clients().search(&search, &page)
            }
        })
        .await?;
    Ok(ok(result))
}

/// Create a client
///
/// POST /clients
pub async fn create_client(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let payload = json_body(&body, true)?;
    let client = state
        .with_store(move |store| store.clients().create(&payload))
        .await?;

    let location = format!("{}/clients/{}", state.config.api_prefix(), client.id);
    Ok(created(location, client))
}

/// GET /clients/:id
pub async fn get_client(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let client = state
        .with_store(move |store| store.clients().get(id.as_str()))
        .await?;
    Ok(ok(client))
}

/// PUT /clients/:id
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let patch = json_body(&body, false)?;
    let client = state
        .with_store(move |store| store.clients().update(id.as_str(), &patch))
        .await?;
    Ok(ok(client))
}

/// DELETE /clients/:id
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state
        .with_store(move |store| store.clients().delete(id.as_str()))
        .await?;
    Ok(no_content())
}
