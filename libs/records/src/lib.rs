//! Record management core for clients, airlines and flights
//!
//! Each collection is a JSON array file inside a data directory, cached in
//! memory by a [`Repository`]. The services in [`services`] validate loosely
//! typed JSON payloads, enforce identity and referential rules, and hand
//! back typed records or an [`Error`] carrying a machine-readable code.
//!
//! ```no_run
//! use airdesk_records::{RecordStore, StoreSettings};
//! use serde_json::json;
//!
//! # fn main() -> airdesk_records::Result<()> {
//! let mut store = RecordStore::open(StoreSettings::new("./data", true))?;
//! store
//!     .airlines()
//!     .create(&json!({ "id": 1, "type": "national", "company_name": "Air One" }))?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;
pub mod storage;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Airline, AirlineType, Client, ClientType, Flight, FlightKey};
pub use repository::{Record, Repository, SortValue};
pub use search::{Listing, Page, PageRequest};
pub use services::{
    AirlineSearch, AirlineService, ClientSearch, ClientService, FlightFilters, FlightService,
};
pub use store::{RecordStore, StoreSettings};
