use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn missing_item_returns_404() {
    // ---
    let server = common::TestServer::new().await;

    let response = server
        .client
        .get(server.url("/items/1"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn items_crud_operations() {
    // ---
    let server = common::TestServer::new().await;

    // Create
    let response = server
        .client
        .post(server.url("/items"))
        .json(&json!({"name": "widget", "description": "a test widget"}))
        .send()
        .await
        .expect("Failed to create item");

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["name"], "widget");
    assert_eq!(created["description"], "a test widget");
    let id = created["id"].as_i64().expect("id should be assigned");

    // Fetch it back
    let response = server
        .client
        .get(server.url(&format!("/items/{id}")))
        .send()
        .await
        .expect("Failed to fetch item");

    assert_eq!(response.status(), 200);
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched, created);

    // List includes it
    let response = server
        .client
        .get(server.url("/items"))
        .send()
        .await
        .expect("Failed to list items");

    assert_eq!(response.status(), 200);
    let listed: Value = response.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Delete
    let response = server
        .client
        .delete(server.url(&format!("/items/{id}")))
        .send()
        .await
        .expect("Failed to delete item");

    assert_eq!(response.status(), 204);

    // Deleting again is a 404
    let response = server
        .client
        .delete(server.url(&format!("/items/{id}")))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn create_item_defaults_description() {
    // ---
    let server = common::TestServer::new().await;

    let response = server
        .client
        .post(server.url("/items"))
        .json(&json!({"name": "bare"}))
        .send()
        .await
        .expect("Failed to create item");

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["description"], "");
}
