pub mod climate;
pub mod docs;
pub mod health;
pub mod home;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use climate::create_climate_routes;
pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use home::create_home_routes;

/// Error body returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error category, e.g. "Database error"
    pub error: String,
    /// Human-readable detail
    pub message: String,
}
