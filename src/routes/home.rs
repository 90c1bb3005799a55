use crate::server::Server;
use axum::{Router, response::Html, routing::get};

const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/&lt;start&gt;",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
];

pub fn create_home_routes() -> Router<Server> {
    Router::new().route("/", get(home))
}

/// List the available API routes
#[utoipa::path(
    get,
    path = "/",
    summary = "Route Index",
    tags = ["Climate"],
    responses(
        (status = 200, description = "HTML list of available routes", content_type = "text/html", body = String)
    )
)]
pub async fn home() -> Html<String> {
    let mut body = String::from("Welcome to the Climate API!<br>Available Routes:<br>");
    for route in ROUTES {
        body.push_str(route);
        body.push_str("<br>");
    }
    Html(body)
}
