//! HTTP-level integration tests for the car resource endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, delete, get, patch_json, post_json, send_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_classic(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/classic-cars", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn mustang() -> serde_json::Value {
    json!({
        "name": "Ford Mustang",
        "year": 1967,
        "cost": "45000 dollars",
        "description": "Fastback",
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_location(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/classic-cars", mustang()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()["location"].to_str().unwrap().to_string();

    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/v1/classic-cars/{id}"));
    assert_eq!(json["data"]["name"], "Ford Mustang");
    assert_eq!(json["data"]["cost"], "45000 dollars");
    assert_eq!(json["data"]["version"], 1);
    assert!(json["data"].get("created_at").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_invalid_fields_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/classic-cars",
        json!({"name": "", "year": 3000, "cost": "-5 dollars"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"], "must be provided");
    assert_eq!(json["fields"]["year"], "must not be in the future");
    assert_eq!(json["fields"]["cost"], "must be a positive integer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_malformed_cost_returns_400(pool: PgPool) {
    for cost in [json!("100 dollar"), json!("100"), json!(100), json!("abc dollars")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/classic-cars",
            json!({"name": "Mini", "year": 1965, "cost": cost}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "cost {cost}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["error"], "invalid cost format", "cost {cost}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = mustang();
    body["version"] = json!(7);
    let response = post_json(app, "/api/v1/classic-cars", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Show / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_returns_record(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/classic-cars/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_with_non_positive_or_missing_id_returns_404(pool: PgPool) {
    for path in ["/api/v1/classic-cars/0", "/api/v1/classic-cars/-5", "/api/v1/classic-cars/4242"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_204_then_404(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let uri = format!("/api/v1/classic-cars/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_applies_present_fields_and_bumps_version(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let uri = format!("/api/v1/classic-cars/{}", created["id"]);

    let app = common::build_test_app(pool);
    let response = patch_json(app, &uri, json!({"cost": "52000 dollars"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cost"], "52000 dollars");
    assert_eq!(json["data"]["name"], "Ford Mustang");
    assert_eq!(json["data"]["description"], "Fastback");
    assert_eq!(json["data"]["version"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_stale_expected_version_returns_409(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let uri = format!("/api/v1/classic-cars/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    let response = send_json(
        app,
        Method::PATCH,
        &uri,
        json!({"year": 1968}),
        &[("x-expected-version", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = send_json(
        app,
        Method::PATCH,
        &uri,
        json!({"year": 1969}),
        &[("x-expected-version", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EDIT_CONFLICT");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["data"]["year"], 1968);
    assert_eq!(json["data"]["version"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_invalid_value_returns_422(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let uri = format!("/api/v1/classic-cars/{}", created["id"]);

    let app = common::build_test_app(pool);
    let response = patch_json(app, &uri, json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["fields"]["name"], "must be provided");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_malformed_cost_returns_400_and_keeps_record(pool: PgPool) {
    let created = create_classic(&pool, mustang()).await;
    let uri = format!("/api/v1/classic-cars/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    let response = patch_json(app, &uri, json!({"name": "Shelby", "cost": "1 euro"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid cost format");

    let app = common::build_test_app(pool);
    assert_eq!(body_json(get(app, &uri).await).await["data"], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_missing_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(app, "/api/v1/remote-cars/77", json!({"name": "Gone"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_page_and_metadata(pool: PgPool) {
    for i in 1..=5 {
        create_classic(
            &pool,
            json!({"name": format!("Car {i}"), "year": 1960 + i, "cost": format!("{} dollars", i * 100)}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/classic-cars?page=2&page_size=2&sort=-year").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let years: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, [1963, 1962]);
    assert_eq!(
        json["metadata"],
        json!({
            "current_page": 2,
            "page_size": 2,
            "first_page": 1,
            "last_page": 3,
            "total_records": 5,
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_of_empty_table_has_empty_metadata(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/remote-cars").await).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["metadata"], json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_rejects_unlisted_sort_and_bad_paging(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/classic-cars?sort=price&page=x&page_size=500").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["fields"]["sort"], "invalid sort value");
    assert_eq!(json["fields"]["page"], "must be an integer value");
    assert_eq!(json["fields"]["page_size"], "must be a maximum of 100");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_name(pool: PgPool) {
    create_classic(&pool, mustang()).await;
    create_classic(
        &pool,
        json!({"name": "Chevrolet Corvette", "year": 1963, "cost": "80000 dollars"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/classic-cars?name=corvette").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Chevrolet Corvette");
    assert_eq!(json["metadata"]["total_records"], 1);
}
