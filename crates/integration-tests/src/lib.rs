//! Integration tests for Steppe Market.
//!
//! Both front-ends run in-process against [`MockApi`], a small in-memory
//! stand-in for the catalog REST API. Every server binds an ephemeral port, so
//! tests run in parallel without setup.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p steppe-market-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use url::Url;

/// Password the mock admin login accepts.
pub const ADMIN_PASSWORD: &str = "admin123";

/// In-memory catalog served by the mock API.
#[derive(Debug, Default)]
pub struct MockData {
    pub categories: Vec<Value>,
    pub products: Vec<Value>,
    next_id: i64,
}

impl MockData {
    /// Seeded with two categories and three products:
    ///
    /// | id | name       | category | stock |
    /// |----|------------|----------|-------|
    /// | 1  | Green tea  | Tea (1)  | 5     |
    /// | 2  | Black tea  | Tea (1)  | 1     |
    /// | 3  | Baursak    | Sweets (2) | 0   |
    #[must_use]
    pub fn seeded() -> Self {
        let tea = json!({"id": 1, "name": "Tea"});
        let sweets = json!({"id": 2, "name": "Sweets"});
        Self {
            products: vec![
                json!({
                    "id": 1, "name": "Green tea", "description": "Loose leaf",
                    "price": 1500.5, "quantity": 5, "category": tea.clone(), "imagePath": null
                }),
                json!({
                    "id": 2, "name": "Black tea", "description": "Assam",
                    "price": 900, "quantity": 1, "category": tea.clone(), "imagePath": ""
                }),
                json!({
                    "id": 3, "name": "Baursak", "description": "Fried dough",
                    "price": 300, "quantity": 0, "category": sweets.clone(),
                    "imagePath": "/uploads/baursak.png"
                }),
            ],
            categories: vec![tea, sweets],
            next_id: 100,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mock catalog shared between the API handlers and the tests.
pub type Shared = Arc<Mutex<MockData>>;

/// A running mock REST API.
pub struct MockApi {
    pub addr: SocketAddr,
    pub data: Shared,
}

impl MockApi {
    /// Start the mock API with the seeded catalog.
    pub async fn spawn() -> Self {
        let data: Shared = Arc::new(Mutex::new(MockData::seeded()));
        let addr = serve(mock_routes().with_state(data.clone())).await;
        Self { addr, data }
    }

    /// API base as the front-ends expect it.
    #[must_use]
    pub fn api_url(&self) -> Url {
        api_url(self.addr)
    }
}

fn api_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/api")).expect("valid mock API URL")
}

fn mock_routes() -> Router<Shared> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(find_product))
        .route("/api/categories", get(list_categories))
        .route("/api/admin/login", post(login))
        .route(
            "/api/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/api/admin/products", get(list_products).post(create_product))
        .route(
            "/api/admin/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/admin/upload", post(upload))
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

fn has_id(item: &Value, id: i64) -> bool {
    item["id"].as_i64() == Some(id)
}

async fn list_products(State(data): State<Shared>) -> Json<Vec<Value>> {
    Json(data.lock().await.products.clone())
}

async fn find_product(State(data): State<Shared>, Path(id): Path<i64>) -> Response {
    let data = data.lock().await;
    match data.products.iter().find(|p| has_id(p, id)) {
        Some(product) => Json(product.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list_categories(State(data): State<Shared>) -> Json<Vec<Value>> {
    Json(data.lock().await.categories.clone())
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"].as_str() == Some(ADMIN_PASSWORD) {
        Json(json!({"success": true, "message": "Login successful"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid password"})),
        )
            .into_response()
    }
}

async fn create_category(State(data): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut data = data.lock().await;
    body["id"] = json!(data.allocate_id());
    data.categories.push(body.clone());
    Json(body)
}

async fn update_category(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut data = data.lock().await;
    body["id"] = json!(id);
    match data.categories.iter_mut().find(|c| has_id(c, id)) {
        Some(category) => {
            *category = body.clone();
            Json(body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_category(State(data): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut data = data.lock().await;
    let before = data.categories.len();
    data.categories.retain(|c| !has_id(c, id));
    if data.categories.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn create_product(State(data): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut data = data.lock().await;
    body["id"] = json!(data.allocate_id());
    data.products.push(body.clone());
    Json(body)
}

async fn update_product(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut data = data.lock().await;
    body["id"] = json!(id);
    match data.products.iter_mut().find(|p| has_id(p, id)) {
        Some(product) => {
            *product = body.clone();
            Json(body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_product(State(data): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut data = data.lock().await;
    let before = data.products.len();
    data.products.retain(|p| !has_id(p, id));
    if data.products.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn upload(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            break;
        }
        if !std::path::Path::new(&filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png") || ext.eq_ignore_ascii_case("jpg"))
        {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Only image files are allowed"})),
            )
                .into_response();
        }
        return Json(json!({"url": format!("/uploads/{filename}"), "filename": filename}))
            .into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Please select a file to upload"})),
    )
        .into_response()
}

/// A running front-end and a cookie-keeping client for it.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second visitor with its own cookie jar.
    #[must_use]
    pub fn new_client(&self) -> reqwest::Client {
        test_client()
    }
}

/// Client that keeps session cookies and does not follow redirects.
#[must_use]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Start the storefront against the given API base.
pub async fn spawn_storefront(api_url: Url) -> TestServer {
    use steppe_market_storefront::{config::StorefrontConfig, state::AppState};

    let config = StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        api_url,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };
    let addr = serve(steppe_market_storefront::app(AppState::new(config))).await;
    TestServer {
        base_url: format!("http://{addr}"),
        client: test_client(),
    }
}

/// Start the admin console against the given API base.
pub async fn spawn_admin(api_url: Url) -> TestServer {
    use steppe_market_admin::{config::AdminConfig, state::AppState};

    let config = AdminConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        api_url,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };
    let addr = serve(steppe_market_admin::app(AppState::new(config))).await;
    TestServer {
        base_url: format!("http://{addr}"),
        client: test_client(),
    }
}

/// API base nothing listens on.
#[must_use]
pub fn unreachable_api_url() -> Url {
    api_url(SocketAddr::from(([127, 0, 0, 1], 9)))
}
