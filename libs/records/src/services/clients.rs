use super::has_upcoming_flights;
use crate::models::{Client, ClientType, Flight};
use crate::repository::Repository;
use crate::search::{matches_exact, matches_query, normalize_term, paginate, Page, PageRequest};
use crate::validation::{
    as_object, canonicalize, forbid_identity_change, optional_text, required_fields,
    required_text, validate_int_id, validate_phone, validate_unique_id, validate_zip, EnumField,
    IdInput,
};
use crate::{Error, Result};
use serde_json::{json, Map, Value};

/// Free-text query plus exact filters for client search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSearch {
    pub q: Option<String>,
    pub r#type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl ClientSearch {
    pub fn is_empty(&self) -> bool {
        [&self.q, &self.r#type, &self.city, &self.state, &self.country]
            .iter()
            .all(|v| v.is_none())
    }
}

pub struct ClientService<'a> {
    clients: &'a mut Repository<Client>,
    flights: &'a mut Repository<Flight>,
}

impl<'a> ClientService<'a> {
    pub fn new(clients: &'a mut Repository<Client>, flights: &'a mut Repository<Flight>) -> Self {
        Self { clients, flights }
    }

    /// Validate and store a new client.
    ///
    /// Checks run in a fixed order: required fields, id format, id
    /// uniqueness, type, then the format-constrained optional fields.
    pub fn create(&mut self, payload: &Value) -> Result<Client> {
        let payload = as_object(payload)?;
        required_fields(payload, Client::REQUIRED_FIELDS)?;

        let id = validate_int_id(payload.get("id"), "id")?;
        let existing = self.clients.list_all()?;
        validate_unique_id(existing.iter().map(|c| c.id), id, "id")?;

        let client_type: ClientType = canonicalize(payload.get("type"), "type")?;

        let zip_code = optional_text(payload, "zip_code")?;
        if let Some(zip_code) = &zip_code {
            validate_zip(zip_code)?;
        }
        let phone_number = optional_text(payload, "phone_number")?;
        if let Some(phone_number) = &phone_number {
            validate_phone(phone_number)?;
        }

        let client = Client {
            id,
            r#type: client_type,
            name: required_text(payload, "name")?,
            address_line1: required_text(payload, "address_line1")?,
            address_line2: optional_text(payload, "address_line2")?,
            address_line3: optional_text(payload, "address_line3")?,
            city: optional_text(payload, "city")?,
            state: optional_text(payload, "state")?,
            zip_code,
            country: required_text(payload, "country")?,
            phone_number,
        };

        let client = self.clients.insert(client)?;
        tracing::info!(client_id = client.id, "Client created");
        Ok(client)
    }

    pub fn get(&mut self, id: impl IdInput) -> Result<Client> {
        let id = id.to_id("id")?;
        self.clients
            .get_by_id(&id)?
            .ok_or_else(|| not_found(id))
    }

    /// Apply a partial update. The id may be repeated in the patch but never changed.
    pub fn update(&mut self, id: impl IdInput, patch: &Value) -> Result<Client> {
        let id = id.to_id("id")?;
        let patch = as_object(patch)?;
        forbid_identity_change(id, patch, "id")?;

        if !self.clients.exists(&id)? {
            return Err(not_found(id));
        }

        let changes = normalize_patch(patch)?;
        let client = self.clients.update(&id, &changes)?;
        tracing::info!(client_id = id, fields = changes.len(), "Client updated");
        Ok(client)
    }

    /// Delete a client that no upcoming flight refers to.
    pub fn delete(&mut self, id: impl IdInput) -> Result<()> {
        let id = id.to_id("id")?;

        if has_upcoming_flights(self.flights, |f| f.client_id == id)? {
            return Err(
                Error::invalid_input("Cannot delete client: future or today flights exist")
                    .with_details(json!({ "client_id": id })),
            );
        }

        if !self.clients.delete(&id)? {
            return Err(not_found(id));
        }
        tracing::info!(client_id = id, "Client deleted");
        Ok(())
    }

    /// Filter by free text and exact fields, then sort and paginate.
    pub fn search(&mut self, search: &ClientSearch, page: &PageRequest) -> Result<Page<Client>> {
        let q = normalize_term(search.q.as_deref());
        let filters: Vec<(&str, String)> = [
            ("type", &search.r#type),
            ("city", &search.city),
            ("state", &search.state),
            ("country", &search.country),
        ]
        .into_iter()
        .filter_map(|(field, value)| normalize_term(value.as_deref()).map(|v| (field, v)))
        .collect();

        let matches: Vec<Client> = self
            .clients
            .list_all()?
            .into_iter()
            .filter(|c| {
                q.as_deref()
                    .map_or(true, |q| matches_query(c, Client::SEARCH_FIELDS, q))
            })
            .filter(|c| {
                filters
                    .iter()
                    .all(|(field, expected)| matches_exact(c, field, expected))
            })
            .collect();

        Ok(paginate(matches, page, Client::SORT_FIELDS))
    }

    pub fn list(&mut self, page: &PageRequest) -> Result<Page<Client>> {
        Ok(paginate(self.clients.list_all()?, page, Client::SORT_FIELDS))
    }
}

fn not_found(id: i64) -> Error {
    Error::not_found(format!("Client {id} not found")).with_details(json!({ "id": id }))
}

/// Validate the patch fields and rewrite them into stored form.
///
/// Unknown fields are dropped, blank optional fields become `null` so the
/// repository removes them.
fn normalize_patch(patch: &Map<String, Value>) -> Result<Map<String, Value>> {
    let mut changes = Map::new();

    if patch.contains_key("type") {
        let client_type: ClientType = canonicalize(patch.get("type"), "type")?;
        changes.insert("type".into(), Value::from(client_type.as_str()));
    }

    for field in Client::REQUIRED_TEXT_FIELDS {
        if patch.contains_key(*field) {
            changes.insert((*field).into(), Value::from(required_text(patch, field)?));
        }
    }

    for field in Client::OPTIONAL_TEXT_FIELDS {
        if !patch.contains_key(*field) {
            continue;
        }
        let value = optional_text(patch, field)?;
        match (*field, value.as_deref()) {
            ("zip_code", Some(zip_code)) => validate_zip(zip_code)?,
            ("phone_number", Some(phone_number)) => validate_phone(phone_number)?,
            _ => {}
        }
        changes.insert((*field).into(), value.map_or(Value::Null, Value::from));
    }

    Ok(changes)
}
