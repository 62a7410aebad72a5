//! Flight endpoints

use crate::support::{
    assert_error_code, assert_status, flight_json, seed_client_and_airline, with_test_app,
    with_test_app_with_config,
};
use airdesk_records::{RecordStore, StoreSettings};
use axum::http::{header, Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_get_update_delete_by_composite_key() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_client_and_airline(&app).await?;

            let (status, headers, body) = app
                .json(
                    Method::POST,
                    "/api/v1/flights",
                    Some(flight_json(1, 1, "2999-01-01T10:30:00")),
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "create flight");
            assert_eq!(
                headers[header::LOCATION],
                "/api/v1/flights/1/1/2999-01-01T10%3A30%3A00"
            );
            assert_eq!(body["date"], "2999-01-01T10:30:00");

            let location = headers[header::LOCATION].to_str()?.to_string();
            let (status, _, body) = app.json(Method::GET, &location, None).await?;
            assert_status(status, StatusCode::OK, "get by location");
            assert_eq!(body["end_city"], "Lima");

            let (status, _, body) = app
                .json(Method::PUT, &location, Some(json!({ "end_city": "Cusco" })))
                .await?;
            assert_status(status, StatusCode::OK, "update flight");
            assert_eq!(body["end_city"], "Cusco");

            let (status, _, body) = app
                .json(Method::PUT, &location, Some(json!({ "airline_id": 2 })))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "key change");
            assert_error_code(&body, "ID_IMMUTABLE");

            let (status, _, _) = app.json(Method::DELETE, &location, None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete flight");

            let (status, _, body) = app.json(Method::GET, &location, None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "deleted flight");
            assert_error_code(&body, "NOT_FOUND");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_rejects_unknown_references_and_duplicates() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_client_and_airline(&app).await?;

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/flights", Some(flight_json(7, 1, "2999-01-01")))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "unknown client");
            assert_eq!(body["error"]["message"], "Unknown client_id");

            app.json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, "2999-01-01")))
                .await?;
            let (status, _, body) = app
                .json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, "2999-01-01")))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "duplicate flight");
            assert_error_code(&body, "INVALID_INPUT");

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, "next week")))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad date");
            assert_error_code(&body, "INVALID_INPUT");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_filters_upcoming_flights() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_client_and_airline(&app).await?;
            for date in ["2999-02-01", "2999-01-01", "2000-01-01"] {
                app.json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, date)))
                    .await?;
            }

            let (status, _, body) = app.json(Method::GET, "/api/v1/flights", None).await?;
            assert_status(status, StatusCode::OK, "list flights");
            assert_eq!(body["count"], 2);
            assert_eq!(body["data"][0]["date"], "2999-01-01");

            let (_, _, body) = app
                .json(Method::GET, "/api/v1/flights?client_id=2&q=lima", None)
                .await?;
            assert_eq!(body["count"], 0);

            let (status, _, body) = app
                .json(Method::GET, "/api/v1/flights?airline_id=zero", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "bad filter");
            assert_error_code(&body, "INVALID_ID");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn path_key_is_validated() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .json(Method::GET, "/api/v1/flights/0/1/2999-01-01", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "bad client id");
            assert_error_code(&body, "INVALID_ID");

            let (status, _, body) = app
                .json(Method::GET, "/api/v1/flights/1/1/yesterday", None)
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad date");
            assert_error_code(&body, "INVALID_INPUT");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn flush_writes_records_when_autosave_is_off() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.storage.autosave = false,
        |app| {
            Box::pin(async move {
                seed_client_and_airline(&app).await?;

                let settings = StoreSettings::new(app.data_dir.path(), true);
                let mut reader = RecordStore::open(settings.clone())?;
                assert!(reader.clients().get(1).is_err());

                app.state.flush()?;
                let mut reader = RecordStore::open(settings)?;
                assert_eq!(reader.clients().get(1)?.name, "Alice");
                Ok(())
            })
        },
    )
    .await
}
