use crate::api::handlers::{airlines, clients, flights};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Record routes, mounted under the versioned API prefix.
pub fn record_routes() -> Router<AppState> {
    Router::new()
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        // Airlines
        .route(
            "/airlines",
            get(airlines::list_airlines).post(airlines::create_airline),
        )
        .route(
            "/airlines/:id",
            get(airlines::get_airline)
                .put(airlines::update_airline)
                .delete(airlines::delete_airline),
        )
        // Flights
        .route(
            "/flights",
            get(flights::list_flights).post(flights::create_flight),
        )
        .route(
            "/flights/:client_id/:airline_id/:date",
            get(flights::get_flight)
                .put(flights::update_flight)
                .delete(flights::delete_flight),
        )
}
