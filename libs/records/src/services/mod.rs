//! Entity services
//!
//! Each service borrows the repositories it needs for one operation, runs
//! the validation pipeline and applies the cross-entity rules.

mod airlines;
mod clients;
mod flights;

pub use airlines::{AirlineSearch, AirlineService};
pub use clients::{ClientSearch, ClientService};
pub use flights::{FlightFilters, FlightService};

use crate::models::Flight;
use crate::repository::Repository;
use crate::validation::{is_today_or_future, parse_date};
use crate::Result;

/// True when a flight matching `references` is dated today or later.
/// Flights with unparseable dates are ignored.
fn has_upcoming_flights(
    flights: &mut Repository<Flight>,
    references: impl Fn(&Flight) -> bool,
) -> Result<bool> {
    Ok(flights.list_all()?.iter().any(|flight| {
        references(flight) && parse_date(&flight.date).is_ok_and(is_today_or_future)
    }))
}
