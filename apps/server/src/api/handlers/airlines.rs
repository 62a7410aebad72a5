//! Airline record handlers

use super::{created, json_body, no_content, ok, CollectionQuery};
use crate::{state::AppState, Result};
use airdesk_records::AirlineSearch;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
};

/// List or search airlines
///
/// GET /airlines
///
/// With `q` or `type` the full match set is returned unpaginated;
/// otherwise the collection is paginated.
pub async fn list_airlines(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Response> {
    if query.q.is_some() || query.r#type.is_some() {
        let search = AirlineSearch {
            q: query.q,
            r#type: query.r#type,
            sort: query.sort,
        };
        let listing = state
            .with_store(move |store| store.airlines().search(&search))
            .await?;
        return Ok(ok(listing));
    }

    let page = query.page_request()?;
    let result = state
        .with_store(move |store| store.airlines().list(&page))
        .await?;
    Ok(ok(result))
}

/// Create an airline
///
/// POST /airlines
pub async fn create_airline(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let payload = json_body(&body, true)?;
    let airline = state
        .with_store(move |store| store.airlines().create(&payload))
        .await?;

    let location = format!("{}/airlines/{}", state.config.api_prefix(), airline.id);
    Ok(created(location, airline))
}

/// GET /airlines/:id
pub async fn get_airline(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let airline = state
        .with_store(move |store| store.airlines().get(id.as_str()))
        .await?;
    Ok(ok(airline))
}

/// PUT /airlines/:id
pub async fn update_airline(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let patch = json_body(&body, false)?;
    let airline = state
        .with_store(move |store| store.airlines().update(id.as_str(), &patch))
        .await?;
    Ok(ok(airline))
}

/// DELETE /airlines/:id
pub async fn delete_airline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state
        .with_store(move |store| store.airlines().delete(id.as_str()))
        .await?;
    Ok(no_content())
}
