use super::coerce;
use crate::repository::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite flight identity. `date` is the string exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightKey {
    pub client_id: i64,
    pub airline_id: i64,
    pub date: String,
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.client_id, self.airline_id, self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(deserialize_with = "coerce::id")]
    pub client_id: i64,
    #[serde(deserialize_with = "coerce::id")]
    pub airline_id: i64,
    pub date: String,
    #[serde(deserialize_with = "coerce::text")]
    pub start_city: String,
    #[serde(deserialize_with = "coerce::text")]
    pub end_city: String,
}

impl Flight {
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["client_id", "airline_id", "date", "start_city", "end_city"];
    pub const SEARCH_FIELDS: &'static [&'static str] = &["start_city", "end_city"];
}

impl Record for Flight {
    type Key = FlightKey;
    const FILE_NAME: &'static str = "flights.json";
    const IDENTITY_FIELDS: &'static [&'static str] = &["client_id", "airline_id", "date"];

    fn key(&self) -> FlightKey {
        FlightKey {
            client_id: self.client_id,
            airline_id: self.airline_id,
            date: self.date.clone(),
        }
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "client_id" => Some(self.client_id.to_string()),
            "airline_id" => Some(self.airline_id.to_string()),
            "date" => Some(self.date.clone()),
            "start_city" => Some(self.start_city.clone()),
            "end_city" => Some(self.end_city.clone()),
            _ => None,
        }
    }
}
