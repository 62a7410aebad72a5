use super::coerce;
use crate::repository::{Record, SortValue};
use crate::validation::EnumField;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    Business,
    Corporate,
    Leisure,
    #[serde(rename = "VIP")]
    Vip,
}

impl EnumField for ClientType {
    const VARIANTS: &'static [Self] = &[
        ClientType::Business,
        ClientType::Corporate,
        ClientType::Leisure,
        ClientType::Vip,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ClientType::Business => "Business",
            ClientType::Corporate => "Corporate",
            ClientType::Leisure => "Leisure",
            ClientType::Vip => "VIP",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client record. Optional fields are omitted from JSON when absent.
///
/// Stored ids may be integer strings and text fields may be numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(deserialize_with = "coerce::id")]
    pub id: i64,
    pub r#type: ClientType,
    #[serde(deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(deserialize_with = "coerce::text")]
    pub address_line1: String,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_line2: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_line3: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "coerce::text")]
    pub country: String,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
}

impl Client {
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["id", "type", "name", "address_line1", "country"];
    pub const REQUIRED_TEXT_FIELDS: &'static [&'static str] =
        &["name", "address_line1", "country"];
    pub const OPTIONAL_TEXT_FIELDS: &'static [&'static str] = &[
        "address_line2",
        "address_line3",
        "city",
        "state",
        "zip_code",
        "phone_number",
    ];
    pub const SEARCH_FIELDS: &'static [&'static str] =
        &["id", "name", "city", "country", "phone_number"];
    pub const SORT_FIELDS: &'static [&'static str] =
        &["id", "name", "city", "state", "country", "type"];
}

impl Record for Client {
    type Key = i64;
    const FILE_NAME: &'static str = "clients.json";
    const IDENTITY_FIELDS: &'static [&'static str] = &["id"];

    fn key(&self) -> i64 {
        self.id
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "type" => Some(self.r#type.as_str().to_string()),
            "name" => Some(self.name.clone()),
            "address_line1" => Some(self.address_line1.clone()),
            "address_line2" => self.address_line2.clone(),
            "address_line3" => self.address_line3.clone(),
            "city" => self.city.clone(),
            "state" => self.state.clone(),
            "zip_code" => self.zip_code.clone(),
            "country" => Some(self.country.clone()),
            "phone_number" => self.phone_number.clone(),
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
