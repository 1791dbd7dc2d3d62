mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};
use std::collections::HashSet;

#[tokio::test]
async fn list_restaurants_returns_compact_rows() {
    let store = seeded_store().await;
    let res = get(&store, "/restaurants").await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    let rows = body.as_array().unwrap();
    for row in rows {
        let keys: HashSet<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, HashSet::from(["id", "name", "address"]));
    }
    let got: HashSet<(i64, String, String)> = rows
        .iter()
        .map(|r| {
            (
                r["id"].as_i64().unwrap(),
                r["name"].as_str().unwrap().to_string(),
                r["address"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected: HashSet<(i64, String, String)> = store
        .list_restaurants()
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.id, r.name, r.address))
        .collect();
    assert_eq!(got, expected);
    assert_eq!(got.len(), 3);
}

#[tokio::test]
async fn read_restaurant_nests_menu_without_cycles() {
    let store = seeded_store().await;
    let res = get(&store, "/restaurants/1").await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Karen's Pizza Shack");
    assert_eq!(body["address"], "address1");
    let menu = body["restaurant_pizzas"].as_array().unwrap();
    assert_eq!(menu.len(), 1);
    let entry = &menu[0];
    assert_eq!(entry["restaurant_id"], 1);
    assert_eq!(entry["price"], 1);
    assert!(entry.get("restaurant").is_none());
    assert_eq!(
        entry["pizza"],
        json!({"id": 1, "name": "Emma", "ingredients": "Dough, Tomato Sauce, Cheese"})
    );
    assert!(entry["pizza"].get("restaurant_pizzas").is_none());
}

#[tokio::test]
async fn read_unknown_restaurant_is_404() {
    let store = seeded_store().await;
    for uri in ["/restaurants/999", "/restaurants/abc", "/restaurants/+1", "/restaurants/-1"] {
        let res = get(&store, uri).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(res.json(), json!({"error": "Restaurant not found"}));
    }
}

#[tokio::test]
async fn delete_restaurant_cascades_to_menu() {
    let store = seeded_store().await;
    let res = delete(&store, "/restaurants/2").await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.raw.is_empty());

    let res = get(&store, "/restaurants/2").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let edges = store.list_restaurant_pizzas().await.unwrap();
    assert!(edges.iter().all(|e| e.restaurant_id != 2));
    assert_eq!(edges.len(), 2);
    // Pizzas are not owned by restaurants.
    assert_eq!(store.list_pizzas().await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_unknown_restaurant_is_404() {
    let store = seeded_store().await;
    let res = delete(&store, "/restaurants/999").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({"error": "Restaurant not found"}));
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn list_pizzas_returns_compact_rows() {
    let store = seeded_store().await;
    let res = get(&store, "/pizzas").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        let keys: HashSet<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, HashSet::from(["id", "name", "ingredients"]));
    }
    let names: HashSet<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, HashSet::from(["Emma", "Geri", "Melanie"]));
}

#[tokio::test]
async fn create_restaurant_pizza_accepts_price_bounds() {
    let store = seeded_store().await;
    for price in [1, 30] {
        let res = post_json(
            &store,
            "/restaurant_pizzas",
            json!({"price": price, "pizza_id": 3, "restaurant_id": 1}),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED, "price {price}");
        let body = res.json();
        assert_eq!(body["price"], price);
        assert_eq!(body["pizza_id"], 3);
        assert_eq!(body["restaurant_id"], 1);
        assert_eq!(
            body["pizza"],
            json!({"id": 3, "name": "Melanie", "ingredients": "Dough, Sauce, Ricotta, Red peppers, Mustard"})
        );
        assert_eq!(
            body["restaurant"],
            json!({"id": 1, "name": "Karen's Pizza Shack", "address": "address1"})
        );
        assert!(body["pizza"].get("restaurant_pizzas").is_none());
        assert!(body["restaurant"].get("restaurant_pizzas").is_none());
    }
    assert_eq!(edge_count(&store).await, 5);
}

#[tokio::test]
async fn create_restaurant_pizza_rejects_out_of_range_price() {
    let store = seeded_store().await;
    for price in [0, 31] {
        let res = post_json(
            &store,
            "/restaurant_pizzas",
            json!({"price": price, "pizza_id": 1, "restaurant_id": 1}),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json(), json!({"errors": ["validation errors"]}));
    }
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn create_restaurant_pizza_requires_all_fields() {
    let store = seeded_store().await;
    let res = post_json(&store, "/restaurant_pizzas", json!({"price": 5, "pizza_id": 1})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({"errors": ["Missing required fields"]}));

    // Presence is checked before range.
    let res = post_json(&store, "/restaurant_pizzas", json!({"price": 100, "restaurant_id": 1})).await;
    assert_eq!(res.json(), json!({"errors": ["Missing required fields"]}));
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn create_restaurant_pizza_rejects_malformed_json() {
    let store = seeded_store().await;
    let res = post_raw(&store, "/restaurant_pizzas", "{\"price\": 5,").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = res.json()["errors"].as_array().unwrap().clone();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_string());
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn create_restaurant_pizza_with_unknown_references_is_404() {
    let store = seeded_store().await;
    let cases = [
        (json!({"price": 5, "pizza_id": 99, "restaurant_id": 1}), "Pizza not found"),
        (json!({"price": 5, "pizza_id": 1, "restaurant_id": 99}), "Restaurant not found"),
        // Pizza is checked first.
        (json!({"price": 5, "pizza_id": 99, "restaurant_id": 99}), "Pizza not found"),
    ];
    for (body, message) in cases {
        let res = post_json(&store, "/restaurant_pizzas", body).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.json(), json!({"errors": [message]}));
    }
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn created_entry_shows_up_on_its_restaurant() {
    let store = seeded_store().await;
    let res = post_json(
        &store,
        "/restaurant_pizzas",
        json!({"price": 12, "pizza_id": 2, "restaurant_id": 3}),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created_id = res.json()["id"].clone();

    let body = get(&store, "/restaurants/3").await.json();
    let menu = body["restaurant_pizzas"].as_array().unwrap();
    let entry = menu
        .iter()
        .find(|e| e["id"] == created_id)
        .expect("new entry listed");
    assert_eq!(entry["price"], 12);
    assert_eq!(entry["pizza"]["name"], "Geri");
}

#[tokio::test]
async fn failed_delete_rolls_back_menu_removal() {
    let store = seeded_store().await;
    sqlx::query(
        "CREATE TRIGGER block_restaurant_delete BEFORE DELETE ON restaurants \
         BEGIN SELECT RAISE(ABORT, 'restaurant delete blocked'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let res = delete(&store, "/restaurants/1").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["error"], "Failed to delete restaurant");
    assert!(body["details"].as_str().unwrap().contains("restaurant delete blocked"));

    // The edge delete ran before the abort and must be undone.
    let edges = store.list_restaurant_pizzas().await.unwrap();
    assert_eq!(edges.len(), 3);
    assert!(edges.iter().any(|e| e.restaurant_id == 1));
    assert_eq!(get(&store, "/restaurants/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn failed_insert_reports_500_and_creates_nothing() {
    let store = seeded_store().await;
    sqlx::query(
        "CREATE TRIGGER block_edge_insert BEFORE INSERT ON restaurant_pizzas \
         BEGIN SELECT RAISE(ABORT, 'edge insert blocked'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let res = post_json(
        &store,
        "/restaurant_pizzas",
        json!({"price": 10, "pizza_id": 1, "restaurant_id": 2}),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["error"], "Failed to create restaurant pizza");
    assert!(body["details"].is_string());
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn common_routes_respond() {
    let store = seeded_store().await;

    let res = get(&store, "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.as_deref().unwrap().starts_with("text/html"));
    assert_eq!(res.text(), "<h1>Code challenge</h1>");

    assert_eq!(get(&store, "/health").await.json(), json!({"status": "ok"}));

    let res = get(&store, "/ready").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["database"], "ok");

    let res = get(&store, "/version").await;
    assert_eq!(res.json()["name"], "pizza-restaurants");

    let doc: Value = get(&store, "/api-docs/openapi.json").await.json();
    assert!(doc["paths"].get("/restaurant_pizzas").is_some());
}

#[tokio::test]
async fn signed_id_does_not_delete() {
    let store = seeded_store().await;
    let res = delete(&store, "/restaurants/+1").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&store, "/restaurants/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn create_restaurant_pizza_rejects_fractional_notation() {
    let store = seeded_store().await;
    let res = post_json(
        &store,
        "/restaurant_pizzas",
        json!({"price": 10.0, "pizza_id": 1, "restaurant_id": 1}),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({"errors": ["validation errors"]}));
    assert_eq!(edge_count(&store).await, 3);
}

#[tokio::test]
async fn ready_reports_degraded_when_store_is_closed() {
    let store = seeded_store().await;
    store.pool().close().await;

    let res = get(&store, "/ready").await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        res.json(),
        json!({"status": "degraded", "database": "unavailable"})
    );
    // Liveness does not touch the store.
    assert_eq!(get(&store, "/health").await.status, StatusCode::OK);
}
