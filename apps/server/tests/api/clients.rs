//! Client endpoints

use crate::support::{
    assert_error_code, assert_status, client_json, flight_json, seed_client_and_airline,
    with_test_app,
};
use axum::http::{header, Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_returns_location_and_canonical_type() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app
                .json(Method::POST, "/api/v1/clients", Some(client_json(1, "Alice")))
                .await?;
            assert_status(status, StatusCode::CREATED, "create client");
            assert_eq!(headers[header::LOCATION], "/api/v1/clients/1");
            assert_eq!(body["type"], "Business");

            let (status, _, body) = app.json(Method::GET, "/api/v1/clients/1", None).await?;
            assert_status(status, StatusCode::OK, "get client");
            assert_eq!(body["name"], "Alice");
            assert_eq!(body["type"], "Business");
            assert!(body.get("address_line2").is_none());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_errors_map_to_status_codes() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.json(Method::POST, "/api/v1/clients", Some(client_json(1, "Alice")))
                .await?;

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/clients", Some(client_json(1, "Again")))
                .await?;
            assert_status(status, StatusCode::CONFLICT, "duplicate id");
            assert_error_code(&body, "DUPLICATE_ID");

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/clients", Some(client_json(-4, "Neg")))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "negative id");
            assert_error_code(&body, "INVALID_ID");

            let (status, _, body) = app
                .json(Method::POST, "/api/v1/clients", Some(json!({ "id": 2 })))
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "missing fields");
            assert_error_code(&body, "INVALID_INPUT");
            assert_eq!(
                body["error"]["details"]["missing"],
                json!(["type", "name", "address_line1", "country"])
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn post_requires_a_json_body() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for body in [None, Some(b"not json".to_vec())] {
                let (status, _, bytes) = app.request(Method::POST, "/api/v1/clients", body).await?;
                assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad body");
                let body: serde_json::Value = serde_json::from_slice(&bytes)?;
                assert_eq!(body["error"]["message"], "Request body must be JSON");
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_and_identity_rules() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.json(Method::POST, "/api/v1/clients", Some(client_json(1, "Alice")))
                .await?;

            let (status, _, body) = app
                .json(
                    Method::PUT,
                    "/api/v1/clients/1",
                    Some(json!({ "type": "VIP", "phone_number": "+506 2222-3333" })),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update");
            assert_eq!(body["type"], "VIP");
            assert_eq!(body["phone_number"], "+506 2222-3333");

            let (status, _, body) = app
                .json(Method::PUT, "/api/v1/clients/1", Some(json!({ "id": 2 })))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "id change");
            assert_error_code(&body, "ID_IMMUTABLE");

            // An empty PUT body is an empty patch.
            let (status, _, body) = app.request(Method::PUT, "/api/v1/clients/1", None).await?;
            assert_status(status, StatusCode::OK, "empty patch");

            let (status, _, body) = app
                .json(Method::PUT, "/api/v1/clients/77", Some(json!({ "name": "x" })))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "missing client");
            assert_error_code(&body, "NOT_FOUND");

            let (status, _, body) = app.json(Method::GET, "/api/v1/clients/abc", None).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "bad id");
            assert_error_code(&body, "INVALID_ID");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_is_blocked_by_upcoming_flight() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_client_and_airline(&app).await?;
            let (status, _, _) = app
                .json(Method::POST, "/api/v1/flights", Some(flight_json(1, 1, "2999-01-01")))
                .await?;
            assert_status(status, StatusCode::CREATED, "create flight");

            let (status, _, body) = app.json(Method::DELETE, "/api/v1/clients/1", None).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "guarded delete");
            assert_error_code(&body, "INVALID_INPUT");

            let (status, _, _) = app
                .json(Method::DELETE, "/api/v1/flights/1/1/2999-01-01", None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete flight");

            let (status, _, body) = app.json(Method::DELETE, "/api/v1/clients/1", None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete client");
            assert!(body.is_null());

            let (status, _, _) = app.json(Method::GET, "/api/v1/clients/1", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "gone");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_and_search_are_paginated() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for (id, name, city) in [
                (5, "Eva", "Lima"),
                (2, "bob", "Heredia"),
                (9, "Ana", "heredia"),
            ] {
                let mut client = client_json(id, name);
                client["city"] = json!(city);
                app.json(Method::POST, "/api/v1/clients", Some(client)).await?;
            }

            let (status, _, body) = app.json(Method::GET, "/api/v1/clients", None).await?;
            assert_status(status, StatusCode::OK, "list");
            assert_eq!(body["count"], 3);
            assert_eq!(body["limit"], 50);
            assert_eq!(body["offset"], 0);
            assert_eq!(body["sort"], "id");
            assert_eq!(body["data"][0]["id"], 2);

            let (_, _, body) = app
                .json(Method::GET, "/api/v1/clients?sort=name&limit=2&offset=1", None)
                .await?;
            let names: Vec<&str> = body["data"]
                .as_array()
                .unwrap()
                .iter()
                .filter_map(|c| c["name"].as_str())
                .collect();
            assert_eq!(names, vec!["bob", "Eva"]);

            let (_, _, body) = app
                .json(Method::GET, "/api/v1/clients?city=HEREDIA", None)
                .await?;
            assert_eq!(body["count"], 2);

            let (_, _, body) = app
                .json(Method::GET, "/api/v1/clients?offset=10", None)
                .await?;
            assert_eq!(body["count"], 3);
            assert_eq!(body["data"], json!([]));

            let (status, _, body) = app
                .json(Method::GET, "/api/v1/clients?limit=many", None)
                .await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "bad limit");
            assert_error_code(&body, "INVALID_INPUT");
            Ok(())
        })
    })
    .await
}
