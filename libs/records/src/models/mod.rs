//! Record types for the three collections

mod airline;
mod client;
mod coerce;
mod flight;

pub use airline::{Airline, AirlineType};
pub use client::{Client, ClientType};
pub use flight::{Flight, FlightKey};
