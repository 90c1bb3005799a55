use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of one component check
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    pub duration_ms: Option<u64>,
}

impl HealthCheckResult {
    pub fn healthy(details: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            details: Some(details),
            duration_ms: None,
        }
    }

    pub fn unhealthy(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            details: Some(details),
            duration_ms: None,
        }
    }
}

#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// Key under which the result is reported
    fn name(&self) -> &str;

    async fn check(&self) -> HealthCheckResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub checks: BTreeMap<String, HealthCheckResult>,
    pub summary: HealthSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthSummary {
    pub total_checks: usize,
    pub healthy_count: usize,
    pub unhealthy_count: usize,
    pub total_duration_ms: u64,
}

/// Registry of component health checks
pub struct HealthService {
    checkers: RwLock<BTreeMap<String, Arc<dyn HealthChecker>>>,
}

impl HealthService {
    pub fn new() -> Self {
        Self {
            checkers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a checker, replacing any with the same name
    pub async fn register(&self, checker: Arc<dyn HealthChecker>) {
        let name = checker.name().to_string();
        self.checkers.write().await.insert(name, checker);
    }

    /// Run the checks selected by `filter`.
    ///
    /// `None` is a liveness probe and runs nothing; `"all"` runs every
    /// checker; any other value runs the checker of that name, if any.
    /// The overall status is unhealthy as soon as one check is.
    pub async fn check_health(&self, filter: Option<&str>) -> HealthResponse {
        let checkers = self.checkers.read().await;
        let selected = checkers.iter().filter(|(name, _)| match filter {
            None => false,
            Some("all") => true,
            Some(wanted) => name.as_str() == wanted,
        });

        let mut checks = BTreeMap::new();
        let mut total_duration_ms = 0;
        for (name, checker) in selected {
            let started = Instant::now();
            let mut result = checker.check().await;
            let elapsed = started.elapsed().as_millis() as u64;

            total_duration_ms += elapsed;
            result.duration_ms = Some(elapsed);
            checks.insert(name.clone(), result);
        }

        let unhealthy_count = checks
            .values()
            .filter(|r| r.status == HealthStatus::Unhealthy)
            .count();
        let status = if unhealthy_count == 0 {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthResponse {
            status,
            service: "climate-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: HealthSummary {
                total_checks: checks.len(),
                healthy_count: checks.len() - unhealthy_count,
                unhealthy_count,
                total_duration_ms,
            },
            checks,
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedChecker {
        name: &'static str,
        healthy: bool,
    }

    #[async_trait]
    impl HealthChecker for FixedChecker {
        fn name(&self) -> &str {
            self.name
        }

        async fn check(&self) -> HealthCheckResult {
            if self.healthy {
                HealthCheckResult::healthy(json!({"connection": "ok"}))
            } else {
                HealthCheckResult::unhealthy("store unreachable", json!({"connection": "refused"}))
            }
        }
    }

    fn checker(name: &'static str, healthy: bool) -> Arc<dyn HealthChecker> {
        Arc::new(FixedChecker { name, healthy })
    }

    #[tokio::test]
    async fn test_liveness_runs_no_checks() {
        let service = HealthService::new();
        service.register(checker("database", false)).await;

        let response = service.check_health(None).await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.summary.total_checks, 0);
        assert!(response.checks.is_empty());
    }

    #[tokio::test]
    async fn test_one_unhealthy_check_fails_overall() {
        let service = HealthService::new();
        service.register(checker("database", true)).await;
        service.register(checker("replica", false)).await;

        let response = service.check_health(Some("all")).await;
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.summary.healthy_count, 1);
        assert_eq!(response.summary.unhealthy_count, 1);
        assert_eq!(
            response.checks["replica"].message.as_deref(),
            Some("store unreachable")
        );
    }

    #[tokio::test]
    async fn test_named_filter() {
        let service = HealthService::new();
        service.register(checker("database", true)).await;
        service.register(checker("replica", false)).await;

        let response = service.check_health(Some("database")).await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.checks.len(), 1);
        assert!(response.checks["database"].duration_ms.is_some());

        let response = service.check_health(Some("missing")).await;
        assert!(response.checks.is_empty());
    }

    #[tokio::test]
    async fn test_register_replaces_same_name() {
        let service = HealthService::new();
        service.register(checker("database", false)).await;
        service.register(checker("database", true)).await;

        let response = service.check_health(Some("all")).await;
        assert_eq!(response.summary.total_checks, 1);
        assert_eq!(response.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(HealthCheckResult::healthy(json!({}))).unwrap();
        assert_eq!(value["status"], "healthy");
    }
}
