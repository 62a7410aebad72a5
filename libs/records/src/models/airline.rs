use super::coerce;
use crate::repository::{Record, SortValue};
use crate::validation::EnumField;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirlineType {
    Charter,
    #[serde(rename = "Low Cost")]
    LowCost,
    National,
    Regional,
}

impl EnumField for AirlineType {
    const VARIANTS: &'static [Self] = &[
        AirlineType::Charter,
        AirlineType::LowCost,
        AirlineType::National,
        AirlineType::Regional,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AirlineType::Charter => "Charter",
            AirlineType::LowCost => "Low Cost",
            AirlineType::National => "National",
            AirlineType::Regional => "Regional",
        }
    }
}

impl fmt::Display for AirlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    #[serde(deserialize_with = "coerce::id")]
    pub id: i64,
    pub r#type: AirlineType,
    #[serde(deserialize_with = "coerce::text")]
    pub company_name: String,
}

impl Airline {
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["id", "type", "company_name"];
    pub const SEARCH_FIELDS: &'static [&'static str] = &["id", "company_name"];
    pub const SORT_FIELDS: &'static [&'static str] = &["id", "company_name", "type"];
    /// Default ordering of search results.
    pub const SEARCH_SORT: &'static str = "company_name";
}

impl Record for Airline {
    type Key = i64;
    const FILE_NAME: &'static str = "airlines.json";
    const IDENTITY_FIELDS: &'static [&'static str] = &["id"];

    fn key(&self) -> i64 {
        self.id
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "type" => Some(self.r#type.as_str().to_string()),
            "company_name" => Some(self.company_name.clone()),
            _ => None,
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => SortValue::Int(self.id),
            _ => SortValue::Text(self.field_text(field).unwrap_or_default().to_lowercase()),
        }
    }
}
