//! Flight record handlers

use super::{created, json_body, no_content, ok, CollectionQuery};
use crate::{state::AppState, Result};
use airdesk_records::{validation::IdInput, FlightFilters};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
};

/// Path segments of a single flight: `/flights/:client_id/:airline_id/:date`
type FlightPath = Path<(String, String, String)>;

fn id_filter(value: Option<&str>, field: &str) -> crate::Result<Option<i64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(raw.to_id(field)?)),
    }
}

/// Upcoming flights
///
/// GET /flights
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Response> {
    let filters = FlightFilters {
        client_id: id_filter(query.client_id.as_deref(), "client_id")?,
        airline_id: id_filter(query.airline_id.as_deref(), "airline_id")?,
        q: query.q,
    };
    let listing = state
        .with_store(move |store| store.flights().list(&filters))
        .await?;
    Ok(ok(listing))
}

/// Create a flight
///
/// POST /flights
pub async fn create_flight(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let payload = json_body(&body, true)?;
    let flight = state
        .with_store(move |store| store.flights().create(&payload))
        .await?;

    let location = format!(
        "{}/flights/{}/{}/{}",
        state.config.api_prefix(),
        flight.client_id,
        flight.airline_id,
        urlencoding::encode(&flight.date)
    );
    Ok(created(location, flight))
}

/// GET /flights/:client_id/:airline_id/:date
pub async fn get_flight(
    State(state): State<AppState>,
    Path((client_id, airline_id, date)): FlightPath,
) -> Result<Response> {
    let flight = state
        .with_store(move |store| {
            store
                .flights()
                .get(client_id.as_str(), airline_id.as_str(), &date)
        })
        .await?;
    Ok(ok(flight))
}

/// PUT /flights/:client_id/:airline_id/:date
pub async fn update_flight(
    State(state): State<AppState>,
    Path((client_id, airline_id, date)): FlightPath,
    body: Bytes,
) -> Result<Response> {
    let patch = json_body(&body, false)?;
    let flight = state
        .with_store(move |store| {
            store
                .flights()
                .update(client_id.as_str(), airline_id.as_str(), &date, &patch)
        })
        .await?;
    Ok(ok(flight))
}

/// DELETE /flights/:client_id/:airline_id/:date
pub async fn delete_flight(
    State(state): State<AppState>,
    Path((client_id, airline_id, date)): FlightPath,
) -> Result<Response> {
    state
        .with_store(move |store| {
            store
                .flights()
                .delete(client_id.as_str(), airline_id.as_str(), &date)
        })
        .await?;
    Ok(no_content())
}
