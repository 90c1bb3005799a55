use crate::climate::QueryError;
use crate::database::DatabaseError;
use crate::routes::ApiErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    Config(config::ConfigError),
    Database(DatabaseError),
    Query(QueryError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "Configuration error: {}", err),
            AppError::Database(err) => write!(f, "{}", err),
            AppError::Query(err) => write!(f, "{}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Query(err)
    }
}

impl AppError {
    fn status_and_category(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::Database(_) | AppError::Query(QueryError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Query(QueryError::InvalidStoredDate(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Data integrity error")
            }
            AppError::Query(QueryError::Timeout { .. }) => {
                (StatusCode::GATEWAY_TIMEOUT, "Query timed out")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, category) = self.status_and_category();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        }

        let body = Json(ApiErrorResponse {
            error: category.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let config_err = AppError::Config(config::ConfigError::NotFound("test".to_string()));
        assert!(config_err.to_string().contains("Configuration error"));

        let db_err = AppError::Database(DatabaseError::Database("no such table".to_string()));
        assert_eq!(db_err.to_string(), "Database error: no such table");

        let internal_err = AppError::Internal("test message".to_string());
        assert_eq!(internal_err.to_string(), "Internal error: test message");

        let timeout_err = AppError::Query(QueryError::Timeout {
            operation: "tobs",
            seconds: 30,
        });
        assert_eq!(timeout_err.to_string(), "Query 'tobs' exceeded 30s");
    }

    #[test]
    fn test_app_error_from_query_error() {
        let query_err = QueryError::InvalidStoredDate("bad".to_string());
        let app_err: AppError = query_err.into();
        assert!(matches!(
            app_err,
            AppError::Query(QueryError::InvalidStoredDate(_))
        ));
    }

    #[test]
    fn test_app_error_into_response() {
        let store_err: AppError =
            QueryError::Database(DatabaseError::Database("connection refused".to_string())).into();
        assert_eq!(
            store_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let timeout_err: AppError = QueryError::Timeout {
            operation: "stations",
            seconds: 1,
        }
        .into();
        assert_eq!(
            timeout_err.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );

        let integrity_err: AppError = QueryError::InvalidStoredDate("x".to_string()).into();
        assert_eq!(
            integrity_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let internal_err = AppError::Internal("test".to_string());
        assert_eq!(
            internal_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_response_body_format() {
        let err = AppError::Database(DatabaseError::Database("gone".to_string()));
        let response = err.into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Database error");
        assert_eq!(json["message"], "Database error: gone");
    }
}
