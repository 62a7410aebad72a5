use super::has_upcoming_flights;
use crate::models::{Airline, AirlineType, Flight};
use crate::repository::Repository;
use crate::search::{
    matches_exact, matches_query, normalize_term, paginate, resolve_sort, sort_records, Listing,
    Page, PageRequest,
};
use crate::validation::{
    as_object, canonicalize, forbid_identity_change, required_fields, required_text,
    validate_int_id, validate_unique_id, EnumField, IdInput,
};
use crate::{Error, Result};
use serde_json::{json, Map, Value};

/// Airline search criteria. Results are not paginated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirlineSearch {
    pub q: Option<String>,
    pub r#type: Option<String>,
    pub sort: Option<String>,
}

pub struct AirlineService<'a> {
    airlines: &'a mut Repository<Airline>,
    flights: &'a mut Repository<Flight>,
}

impl<'a> AirlineService<'a> {
    pub fn new(airlines: &'a mut Repository<Airline>, flights: &'a mut Repository<Flight>) -> Self {
        Self { airlines, flights }
    }

    pub fn create(&mut self, payload: &Value) -> Result<Airline> {
        let payload = as_object(payload)?;
        required_fields(payload, Airline::REQUIRED_FIELDS)?;

        let id = validate_int_id(payload.get("id"), "id")?;
        let existing = self.airlines.list_all()?;
        validate_unique_id(existing.iter().map(|a| a.id), id, "id")?;

        let airline_type: AirlineType = canonicalize(payload.get("type"), "type")?;

        let airline = self.airlines.insert(Airline {
            id,
            r#type: airline_type,
            company_name: required_text(payload, "company_name")?,
        })?;
        tracing::info!(airline_id = airline.id, "Airline created");
        Ok(airline)
    }

    pub fn get(&mut self, id: impl IdInput) -> Result<Airline> {
        let id = id.to_id("id")?;
        self.airlines
            .get_by_id(&id)?
            .ok_or_else(|| not_found(id))
    }

    pub fn update(&mut self, id: impl IdInput, patch: &Value) -> Result<Airline> {
        let id = id.to_id("id")?;
        let patch = as_object(patch)?;
        forbid_identity_change(id, patch, "id")?;

        if !self.airlines.exists(&id)? {
            return Err(not_found(id));
        }

        let mut changes = Map::new();
        if patch.contains_key("type") {
            let airline_type: AirlineType = canonicalize(patch.get("type"), "type")?;
            changes.insert("type".into(), Value::from(airline_type.as_str()));
        }
        if patch.contains_key("company_name") {
            changes.insert(
                "company_name".into(),
                Value::from(required_text(patch, "company_name")?),
            );
        }

        let airline = self.airlines.update(&id, &changes)?;
        tracing::info!(airline_id = id, fields = changes.len(), "Airline updated");
        Ok(airline)
    }

    /// Delete an airline that no upcoming flight refers to.
    pub fn delete(&mut self, id: impl IdInput) -> Result<()> {
        let id = id.to_id("id")?;

        if has_upcoming_flights(self.flights, |f| f.airline_id == id)? {
            return Err(
                Error::invalid_input("Cannot delete airline: future or today flights exist")
                    .with_details(json!({ "airline_id": id })),
            );
        }

        if !self.airlines.delete(&id)? {
            return Err(not_found(id));
        }
        tracing::info!(airline_id = id, "Airline deleted");
        Ok(())
    }

    /// Every airline matching the criteria, sorted by company name unless
    /// another key is requested.
    pub fn search(&mut self, search: &AirlineSearch) -> Result<Listing<Airline>> {
        let q = normalize_term(search.q.as_deref());
        let airline_type = normalize_term(search.r#type.as_deref());

        let mut matches: Vec<Airline> = self
            .airlines
            .list_all()?
            .into_iter()
            .filter(|a| {
                q.as_deref()
                    .map_or(true, |q| matches_query(a, Airline::SEARCH_FIELDS, q))
            })
            .filter(|a| {
                airline_type
                    .as_deref()
                    .map_or(true, |t| matches_exact(a, "type", t))
            })
            .collect();

        let sort = match search.sort.as_deref() {
            Some(requested) => resolve_sort(Some(requested), Airline::SORT_FIELDS),
            None => Airline::SEARCH_SORT,
        };
        sort_records(&mut matches, sort);
        Ok(Listing::new(matches))
    }

    pub fn list(&mut self, page: &PageRequest) -> Result<Page<Airline>> {
        Ok(paginate(self.airlines.list_all()?, page, Airline::SORT_FIELDS))
    }
}

fn not_found(id: i64) -> Error {
    Error::not_found(format!("Airline {id} not found")).with_details(json!({ "id": id }))
}
