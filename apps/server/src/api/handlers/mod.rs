//! Request handlers

pub mod airlines;
pub mod clients;
pub mod flights;
pub mod health;

use crate::{Error, Result};
use airdesk_records::PageRequest;
use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query string accepted by the collection endpoints. Every value is kept
/// as text so malformed numbers surface as domain errors.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    pub q: Option<String>,
    pub r#type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub client_id: Option<String>,
    pub airline_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
}

impl CollectionQuery {
    pub fn page_request(&self) -> Result<PageRequest> {
        Ok(PageRequest {
            limit: parse_paging(self.limit.as_deref())?,
            offset: parse_paging(self.offset.as_deref())?,
            sort: self.sort.clone(),
        })
    }
}

fn parse_paging(value: Option<&str>) -> Result<Option<i64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::invalid_input("limit/offset must be integers")),
    }
}

/// Decode a JSON request body.
///
/// An empty body is an error when `required`, otherwise it reads as `{}`.
pub fn json_body(body: &Bytes, required: bool) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        if required {
            return Err(Error::invalid_input("Request body must be JSON"));
        }
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| Error::invalid_input("Request body must be JSON"))
}

pub fn ok<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

/// 201 with a `Location` header pointing at the new record.
pub fn created<T: Serialize>(location: String, value: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(value),
    )
        .into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
