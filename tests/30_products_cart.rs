mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

const MISSING_ID: &str = "507f1f77bcf86cd799439011";

#[tokio::test]
async fn product_string_numbers_are_parsed() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server
        .post(
            "/products",
            json!({"name": "Lamp", "price": "149.99", "category": "Home", "stock": "15"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], json!("Product created successfully"));
    let id = body["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = server.get(&format!("/products/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], json!(149.99));
    assert_eq!(body["data"]["stock"], json!(15));
    assert_eq!(body["data"]["description"], json!(""));
    assert_eq!(body["data"]["imageUrl"], json!(""));
    Ok(())
}

#[tokio::test]
async fn product_update_and_delete() -> Result<()> {
    let server = common::spawn_server().await?;
    let (_, body) = server
        .post("/products", json!({"name": "Mug", "price": 10, "category": "Kitchen"}))
        .await?;
    let id = body["data"]["_id"].as_str().unwrap_or_default().to_string();
    let path = format!("/products/{}", id);

    let (status, body) = server.put(&path, json!({"price": "12.5", "name": ""})).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["modifiedCount"], json!(1));

    let (_, body) = server.get(&path).await?;
    assert_eq!(body["data"]["price"], json!(12.5));
    assert_eq!(body["data"]["name"], json!("Mug"));

    let (status, body) = server.put(&path, json!({"name": null})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No valid fields to update"));

    let (status, body) = server.delete(&path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Product deleted successfully"));

    let (status, body) = server.delete(&path).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Product not found"));
    Ok(())
}

#[tokio::test]
async fn product_ids_and_required_fields() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server.get("/products/xyz").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid product ID"));

    let (status, _) = server
        .put(&format!("/products/{}", MISSING_ID), json!({"name": "x"}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.post("/products", json!({"name": "NoPrice", "category": "c"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Name, price, and category are required"));
    Ok(())
}

#[tokio::test]
async fn cart_rejects_zero_quantity() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server.post("/cart", json!({"productId": "p1", "quantity": 0})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing productId or quantity"));
    Ok(())
}

#[tokio::test]
async fn cart_is_keyed_by_product_id() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server
        .post("/cart", json!({"productId": "p1", "quantity": 2, "userId": "u1"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["userId"], json!("u1"));
    assert_eq!(body["data"]["_id"].as_str().map(str::len), Some(24));

    let (status, body) = server.put("/cart/p1", json!({"quantity": 5})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], json!(1));

    let (_, body) = server.get("/cart").await?;
    assert_eq!(body["data"][0]["quantity"], json!(5));

    let (status, body) = server.put("/cart/p1", json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing quantity in request body"));

    let (status, body) = server.put("/cart/nope", json!({"quantity": 1})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Item not found in cart"));

    let (status, body) = server.delete("/cart/p1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(1));

    let (status, _) = server.delete("/cart/p1").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cart_update_hits_oldest_matching_row() -> Result<()> {
    let server = common::spawn_server().await?;
    server.post("/cart", json!({"productId": "p1", "quantity": 1, "userId": "a"})).await?;
    server.post("/cart", json!({"productId": "p1", "quantity": 1, "userId": "b"})).await?;

    server.put("/cart/p1", json!({"quantity": 9})).await?;

    let (_, body) = server.get("/cart").await?;
    assert_eq!(body["data"][0]["userId"], json!("a"));
    assert_eq!(body["data"][0]["quantity"], json!(9));
    assert_eq!(body["data"][1]["quantity"], json!(1));
    Ok(())
}
