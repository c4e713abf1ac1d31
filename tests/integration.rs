//! # Integration Tests
//!
//! These tests send HTTP requests to a running storefront server. They need
//! the server up (Postgres backend or `STORE_BACKEND=memory`), so they are
//! ignored by default.
//!
//! ## Running Tests
//!
//! ```bash
//! # 1. Start the server (in another terminal)
//! STORE_BACKEND=memory cargo run
//!
//! # 2. Run tests
//! cargo test --test integration -- --ignored
//! ```

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    fn base_url() -> String {
        std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }

    async fn first_active_flower(client: &reqwest::Client) -> Value {
        let options: Value = client
            .get(format!("{}/customizations", base_url()))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        options["flowers"][0].clone()
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_health() {
        let res = reqwest::get(format!("{}/health", base_url()))
            .await
            .expect("Failed to send request");
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_create_order() {
        let client = reqwest::Client::new();
        let flower = first_active_flower(&client).await;

        let res = client
            .post(format!("{}/orders", base_url()))
            .json(&json!({
                "customerName": "Cliente Teste",
                "customerPhone": "11999990000",
                "totalPrice": flower["price"].as_f64().unwrap() * 2.0,
                "flowers": [
                    {"flowerId": flower["id"], "quantity": 2, "unitPrice": flower["price"]}
                ]
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(res.status(), 201, "Expected 201 Created");

        let body: Value = res.json().await.expect("Failed to parse response");
        assert!(body["id"].is_string(), "Response should contain order ID");
        assert_eq!(body["customerName"].as_str().unwrap(), "Cliente Teste");
        assert_eq!(body["status"].as_str().unwrap(), "pending");

        let order: Value = client
            .get(format!("{}/orders/{}", base_url(), body["id"].as_str().unwrap()))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        assert_eq!(order["flowers"][0]["flowerName"], flower["name"]);
        assert_eq!(order["flowers"][0]["quantity"], 2);
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_create_order_with_unknown_flower() {
        let client = reqwest::Client::new();
        let res = client
            .post(format!("{}/orders", base_url()))
            .json(&json!({
                "customerName": "Cliente Teste",
                "customerPhone": "11999990000",
                "totalPrice": 10,
                "flowers": [{"flowerId": uuid::Uuid::new_v4(), "quantity": 1}]
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(res.status(), 400, "Expected 400 Bad Request");
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_get_order_not_found() {
        let client = reqwest::Client::new();
        let res = client
            .get(format!("{}/orders/{}", base_url(), uuid::Uuid::new_v4()))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(res.status(), 404, "Expected 404 Not Found");
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_quote_selection() {
        let client = reqwest::Client::new();
        let flower = first_active_flower(&client).await;

        let res = client
            .post(format!("{}/customizations/quote", base_url()))
            .json(&json!({"flowers": [{"flowerId": flower["id"], "quantity": 3}]}))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(res.status(), 200);

        let body: Value = res.json().await.expect("Failed to parse response");
        assert_eq!(body["valid"], true);
        assert_eq!(body["totalFlowers"], 3);
        assert!(body["whatsappLink"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/"));
    }

    #[tokio::test]
    #[ignore = "requires a running server"]
    async fn test_settings() {
        let res = reqwest::get(format!("{}/settings", base_url()))
            .await
            .expect("Failed to send request");
        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.expect("Failed to parse response");
        assert!(body["siteName"].is_string());
        assert!(body["whatsappNumber"].is_string());
    }
}
