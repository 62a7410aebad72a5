use crate::models::{Airline, Client, Flight, FlightKey};
use crate::repository::Repository;
use crate::search::{matches_query, normalize_term, Listing};
use crate::validation::{
    as_object, forbid_identity_change, is_today_or_future, parse_date, required_fields,
    required_text, text_field, validate_int_id, IdInput,
};
use crate::{Error, Result};
use serde_json::{json, Map, Value};

/// Criteria for listing upcoming flights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilters {
    pub q: Option<String>,
    pub client_id: Option<i64>,
    pub airline_id: Option<i64>,
}

pub struct FlightService<'a> {
    flights: &'a mut Repository<Flight>,
    clients: &'a mut Repository<Client>,
    airlines: &'a mut Repository<Airline>,
}

impl<'a> FlightService<'a> {
    pub fn new(
        flights: &'a mut Repository<Flight>,
        clients: &'a mut Repository<Client>,
        airlines: &'a mut Repository<Airline>,
    ) -> Self {
        Self {
            flights,
            clients,
            airlines,
        }
    }

    /// Validate and store a new flight.
    ///
    /// The date is kept exactly as submitted; it only has to parse.
    pub fn create(&mut self, payload: &Value) -> Result<Flight> {
        let payload = as_object(payload)?;
        required_fields(payload, Flight::REQUIRED_FIELDS)?;

        let client_id = validate_int_id(payload.get("client_id"), "client_id")?;
        let airline_id = validate_int_id(payload.get("airline_id"), "airline_id")?;
        let date = required_text(payload, "date")?;
        parse_date(&date)?;

        if !self.clients.exists(&client_id)? {
            return Err(Error::invalid_input("Unknown client_id")
                .with_details(json!({ "client_id": client_id })));
        }
        if !self.airlines.exists(&airline_id)? {
            return Err(Error::invalid_input("Unknown airline_id")
                .with_details(json!({ "airline_id": airline_id })));
        }

        let key = FlightKey {
            client_id,
            airline_id,
            date,
        };
        if self.flights.exists(&key)? {
            return Err(
                Error::invalid_input("Flight already exists for this client/airline/date")
                    .with_details(key_details(&key)),
            );
        }

        let flight = self.flights.insert(Flight {
            client_id,
            airline_id,
            date: key.date,
            start_city: required_text(payload, "start_city")?,
            end_city: required_text(payload, "end_city")?,
        })?;
        tracing::info!(
            client_id = flight.client_id,
            airline_id = flight.airline_id,
            date = %flight.date,
            "Flight created"
        );
        Ok(flight)
    }

    pub fn get(&mut self, client_id: impl IdInput, airline_id: impl IdInput, date: &str) -> Result<Flight> {
        let key = flight_key(client_id, airline_id, date)?;
        self.flights
            .get_by_id(&key)?
            .ok_or_else(|| not_found(&key))
    }

    /// Update the cities of a flight. Key components in the patch must
    /// equal the path values.
    pub fn update(
        &mut self,
        client_id: impl IdInput,
        airline_id: impl IdInput,
        date: &str,
        patch: &Value,
    ) -> Result<Flight> {
        let key = flight_key(client_id, airline_id, date)?;
        let patch = as_object(patch)?;

        forbid_identity_change(key.client_id, patch, "client_id")?;
        forbid_identity_change(key.airline_id, patch, "airline_id")?;
        if let Some(requested) = text_field(patch, "date")? {
            parse_date(&requested)?;
            if requested != key.date {
                return Err(Error::immutable_id(
                    "date in body must match path and cannot change",
                )
                .with_details(json!({ "date": key.date, "requested": requested })));
            }
        }

        if !self.flights.exists(&key)? {
            return Err(not_found(&key));
        }

        let mut changes = Map::new();
        for field in ["start_city", "end_city"] {
            if patch.contains_key(field) {
                changes.insert(field.into(), Value::from(required_text(patch, field)?));
            }
        }

        let flight = self.flights.update(&key, &changes)?;
        tracing::info!(
            client_id = key.client_id,
            airline_id = key.airline_id,
            date = %key.date,
            "Flight updated"
        );
        Ok(flight)
    }

    pub fn delete(&mut self, client_id: impl IdInput, airline_id: impl IdInput, date: &str) -> Result<()> {
        let key = flight_key(client_id, airline_id, date)?;
        if !self.flights.delete(&key)? {
            return Err(not_found(&key));
        }
        tracing::info!(
            client_id = key.client_id,
            airline_id = key.airline_id,
            date = %key.date,
            "Flight deleted"
        );
        Ok(())
    }

    /// Flights dated today or later, ordered by parsed date.
    ///
    /// Flights whose stored date does not parse are left out.
    pub fn list(&mut self, filters: &FlightFilters) -> Result<Listing<Flight>> {
        let q = normalize_term(filters.q.as_deref());

        let mut upcoming: Vec<_> = self
            .flights
            .list_all()?
            .into_iter()
            .filter_map(|flight| {
                let when = parse_date(&flight.date).ok()?;
                is_today_or_future(when).then_some((when, flight))
            })
            .filter(|(_, f)| filters.client_id.map_or(true, |id| f.client_id == id))
            .filter(|(_, f)| filters.airline_id.map_or(true, |id| f.airline_id == id))
            .filter(|(_, f)| {
                q.as_deref()
                    .map_or(true, |q| matches_query(f, Flight::SEARCH_FIELDS, q))
            })
            .collect();

        upcoming.sort_by_key(|(when, _)| *when);
        Ok(Listing::new(
            upcoming.into_iter().map(|(_, flight)| flight).collect(),
        ))
    }
}

/// Validate every key component before any lookup.
fn flight_key(client_id: impl IdInput, airline_id: impl IdInput, date: &str) -> Result<FlightKey> {
    let client_id = client_id.to_id("client_id")?;
    let airline_id = airline_id.to_id("airline_id")?;
    parse_date(date)?;
    Ok(FlightKey {
        client_id,
        airline_id,
        date: date.to_string(),
    })
}

fn key_details(key: &FlightKey) -> Value {
    json!({
        "client_id": key.client_id,
        "airline_id": key.airline_id,
        "date": key.date,
    })
}

fn not_found(key: &FlightKey) -> Error {
    Error::not_found("Flight not found").with_details(key_details(key))
}
