use std::sync::Arc;

use chrono::NaiveDate;
use pricewise_api::app::services::AppServices;
use pricewise_core::{FixedClock, ProductId, SeasonId};
use pricewise_infra::{InMemoryProductStore, InMemorySeasonStore};
use pricewise_products::{FixedSeasonPicker, Product, Season};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    products: Arc<InMemoryProductStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod over in-memory stores, pinned to 2025-06-15 and
    /// always falling back to season 1, bound to an ephemeral port.
    async fn spawn() -> Self {
        let products = Arc::new(InMemoryProductStore::new());
        let seasons = Arc::new(InMemorySeasonStore::new());
        seasons
            .insert(Season::new(
                SeasonId::new(1),
                "Summer",
                NaiveDate::from_ymd_opt(2025, 6, 1),
                NaiveDate::from_ymd_opt(2025, 8, 31),
                20.0,
            ))
            .unwrap();

        let services = AppServices::in_memory(
            products.clone(),
            seasons,
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())),
            Arc::new(FixedSeasonPicker(SeasonId::new(1))),
        );
        let app = pricewise_api::app::build_app_with_services(Arc::new(services));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            products,
            handle,
        }
    }

    fn add(&self, product: Product) {
        self.products.insert(product).unwrap();
    }

    async fn discount(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let res = reqwest::Client::new()
            .post(format!("{}/product/discount", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn product(&self, id: &str) -> (StatusCode, serde_json::Value) {
        let res = reqwest::get(format!("{}/product/{}", self.base_url, id))
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn summer() -> Season {
    Season::new(
        SeasonId::new(1),
        "Summer",
        NaiveDate::from_ymd_opt(2025, 6, 1),
        NaiveDate::from_ymd_opt(2025, 8, 31),
        20.0,
    )
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn percentage_discount_is_applied_and_persisted() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(1), "Widget", 100.0, 10));

    let (status, body) = srv
        .discount(json!({"productId": 1, "discountType": "PERCENTAGE", "discountValue": 10.0}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"productId": 1, "productName": "Widget", "finalPrice": 90.0}));

    let (status, body) = srv.product("1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalPrice"], 90.0);
}

#[tokio::test]
async fn flat_discount_larger_than_price_clamps_to_zero() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(1), "Widget", 100.0, 10));

    let (status, body) = srv
        .discount(json!({"productId": 1, "discountType": "FLAT", "discountValue": 150}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalPrice"], 0.0);
}

#[tokio::test]
async fn seasonal_discount_stacks_on_base_discount() {
    let srv = TestServer::spawn().await;
    srv.add(
        Product::new(ProductId::new(2), "Gadget", 200.0, 5)
            .with_seasonal_discount_active(true)
            .with_season(summer()),
    );

    let (status, body) = srv
        .discount(json!({
            "productId": 2,
            "discountType": "PERCENTAGE",
            "discountValue": 10,
            "seasonalDiscountActive": true
        }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalPrice"], 144.0);
}

#[tokio::test]
async fn fallback_season_only_affects_later_requests() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(3), "Gizmo", 100.0, 5).with_seasonal_discount_active(true));

    let request = json!({
        "productId": 3,
        "discountType": "FLAT",
        "discountValue": 0,
        "seasonalDiscountActive": true
    });

    let (_, first) = srv.discount(request.clone()).await;
    assert_eq!(first["finalPrice"], 100.0);

    let (_, second) = srv.discount(request).await;
    assert_eq!(second["finalPrice"], 80.0);
}

#[tokio::test]
async fn out_of_stock_is_a_bad_request() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(4), "Sold out", 100.0, 0));

    let (status, body) = srv
        .discount(json!({"productId": 4, "discountType": "FLAT", "discountValue": 5}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Product is out of stock.");
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .discount(json!({"productId": 999, "discountType": "FLAT", "discountValue": 5}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found with ID: 999");

    let (status, _) = srv.product("999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_discount_type_is_rejected() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(1), "Widget", 100.0, 10));

    let (status, body) = srv
        .discount(json!({"productId": 1, "discountType": "BOGO", "discountValue": 5}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_discount_type");

    let (_, stored) = srv.product("1").await;
    assert_eq!(stored["finalPrice"], 100.0);
}

#[tokio::test]
async fn validation_errors_are_keyed_by_field() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.discount(json!({"discountValue": -1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"]["productId"], "Product ID is required");
    assert_eq!(body["errors"]["discountType"], "Discount type is required");
    assert_eq!(body["errors"]["discountValue"], "Discount value must be non-negative");
}

#[tokio::test]
async fn oversized_flat_discount_still_clamps_to_zero() {
    let srv = TestServer::spawn().await;
    srv.add(Product::new(ProductId::new(5), "Widget", 100.0, 10));

    let (status, body) = srv
        .discount(json!({"productId": 5, "discountType": "FLAT", "discountValue": 1e30}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalPrice"], 0.0);
}
