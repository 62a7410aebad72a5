#![allow(dead_code)]

use airdesk_records::{RecordStore, StoreSettings};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A store rooted in its own temporary directory.
pub struct TestStore {
    pub dir: TempDir,
    pub store: RecordStore,
}

pub fn test_store() -> TestStore {
    test_store_with_autosave(true)
}

pub fn test_store_with_autosave(autosave: bool) -> TestStore {
    let dir = TempDir::new().expect("temp dir");
    let store = RecordStore::open(StoreSettings::new(dir.path(), autosave)).expect("open store");
    TestStore { dir, store }
}

pub fn client_payload(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "type": "business",
        "name": name,
        "address_line1": "Calle 1",
        "country": "Costa Rica",
    })
}

pub fn airline_payload(id: i64, company_name: &str) -> Value {
    json!({ "id": id, "type": "national", "company_name": company_name })
}

pub fn flight_payload(client_id: i64, airline_id: i64, date: &str) -> Value {
    json!({
        "client_id": client_id,
        "airline_id": airline_id,
        "date": date,
        "start_city": "San José",
        "end_city": "Lima",
    })
}
