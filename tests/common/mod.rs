use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use climate_api::{Config, Server, test_utils::TestServerBuilder};
use serde_json::Value;
use tower::ServiceExt;

/// Unified test harness over the full router and an in-memory store
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
}

impl TestHarness {
    /// Harness with migrated, empty tables
    pub async fn new() -> Self {
        Self::from_server(TestServerBuilder::new().build().await)
    }

    /// Harness with the shared fixture dataset loaded
    pub async fn with_fixture() -> Self {
        let harness = Self::new().await;
        climate_api::test_utils::seed_fixture(&harness.server.database).await;
        harness
    }

    /// Harness whose store has no schema, so every query fails
    #[allow(dead_code)]
    pub async fn without_schema() -> Self {
        Self::from_server(TestServerBuilder::new().without_migrations().build().await)
    }

    #[allow(dead_code)]
    pub async fn with_config(config: Config) -> Self {
        Self::from_server(TestServerBuilder::new().with_config(config).build().await)
    }

    fn from_server(server: Server) -> Self {
        let app = server.create_app();
        Self { server, app }
    }

    /// Make request using the test app
    pub async fn make_request(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// GET `uri`, returning the status and the raw body
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.make_request(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// GET `uri`, parsing the body as JSON
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}
