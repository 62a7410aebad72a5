//! Airline endpoints

use crate::support::{
    airline_json, assert_error_code, assert_status, flight_json, seed_client_and_airline,
    with_test_app,
};
use axum::http::{header, Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn duplicate_airline_is_a_conflict() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app
                .json(Method::POST, "/api/v1/airlines", Some(airline_json(1, "Air One")))
                .await?;
            assert_status(status, StatusCode::CREATED, "create airline");
            assert_eq!(headers[header::LOCATION], "/api/v1/airlines/1");
            assert_eq!(body["type"], "National");

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/airlines", Some(airline_json(1, "Air One")))
                .await?;
            assert_status(status, StatusCode::CONFLICT, "duplicate airline");
            assert_error_code(&body, "DUPLICATE_ID");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_type_lists_allowed_values() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .json(
                    Method::POST,
                    "/api/v1/airlines",
                    Some(json!({ "id": 3, "type": "cargo", "company_name": "Box Air" })),
                )
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad type");
            assert_eq!(
                body["error"]["details"]["allowed"],
                json!(["Charter", "Low Cost", "National", "Regional"])
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn search_is_unpaginated_list_is_paginated() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for (id, kind, name) in [
                (1, "low cost", "Cheap Wings"),
                (2, "national", "Flag Carrier"),
                (3, "LOW_COST", "Budget Jet"),
            ] {
                app.json(
                    Method::POST,
                    "/api/v1/airlines",
                    Some(json!({ "id": id, "type": kind, "company_name": name })),
                )
                .await?;
            }

            let (status, _, body) = app
                .json(Method::GET, "/api/v1/airlines?type=low%20cost&limit=1", None)
                .await?;
            assert_status(status, StatusCode::OK, "search");
            assert_eq!(body["count"], 2);
            assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
            assert!(body.get("limit").is_none());

            let (_, _, body) = app.json(Method::GET, "/api/v1/airlines?limit=1", None).await?;
            assert_eq!(body["count"], 3);
            assert_eq!(body["limit"], 1);
            assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_and_guarded_delete() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_client_and_airline(&app).await?;

            let (status, _, body) = app
                .json(
                    Method::PUT,
                    "/api/v1/airlines/1",
                    Some(json!({ "id": "1", "type": "regional" })),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update airline");
            assert_eq!(body["type"], "Regional");
            assert_eq!(body["company_name"], "Air One");

            app.json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, "2999-05-05")))
                .await?;
            let (status, _, body) = app.json(Method::DELETE, "/api/v1/airlines/1", None).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "guarded delete");
            assert_eq!(
                body["error"]["message"],
                "Cannot delete airline: future or today flights exist"
            );

            let (status, _, body) = app.json(Method::DELETE, "/api/v1/airlines/8", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "missing airline");
            assert_error_code(&body, "NOT_FOUND");
            Ok(())
        })
    })
    .await
}
