pub mod config;
pub mod middleware;

use crate::{
    climate::ClimateService,
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    metrics,
    routes::{create_climate_routes, create_docs_routes, create_health_routes, create_home_routes},
    server::middleware::request_response_logger,
    shutdown::{ShutdownCoordinator, ShutdownManager},
    utils::request_id::request_id_middleware,
};
use axum::{Router, middleware as axum_middleware};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub climate_service: Arc<ClimateService>,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        if config.metrics.enabled {
            metrics::init_metrics_with_port(config.metrics.port).map_err(|e| {
                error!(
                    "Failed to start metrics server on port {}: {}",
                    config.metrics.port, e
                );
                AppError::Internal(format!("Failed to start metrics server: {}", e))
            })?;
        }

        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();
        let climate_service = Arc::new(ClimateService::new(database.clone(), &config.query));

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        Ok(Self {
            config: Arc::new(config),
            database,
            climate_service,
            health_service,
            shutdown_coordinator: Arc::new(ShutdownCoordinator::new()),
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            info!("Running database migrations");
            self.database.migrate().await.map_err(AppError::Database)?;
        }

        let mut shutdown_manager =
            ShutdownManager::new(Duration::from_secs(self.config.shutdown.timeout_seconds));
        shutdown_manager.register_server_components(self);

        let app = self.create_app();

        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid listen address: {}", e)))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            info!("Graceful shutdown initiated");
        })
        .await;

        if let Err(e) = &result {
            error!("Server error: {}", e);
        } else if !self.shutdown_coordinator.is_shutdown_requested() {
            warn!("Server stopped without a shutdown request");
        }

        // Release the pool on every exit path, including a failed serve
        shutdown_manager.shutdown_all().await;
        info!("Server shutdown complete");

        result.map_err(|e| AppError::Internal(format!("Server error: {}", e)))
    }

    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .merge(create_home_routes())
            .nest("/api/v1.0", create_climate_routes())
            .nest("/api/docs", create_docs_routes())
            .nest("/health", create_health_routes())
            .with_state(self.clone());

        if self.config.metrics.enabled {
            app = app.layer(axum_middleware::from_fn(metrics::metrics_middleware));
        }
        if self.config.logging.log_request {
            app = app.layer(axum_middleware::from_fn(request_response_logger));
        }

        // Outermost, so the logger sees the id
        app.layer(axum_middleware::from_fn(request_id_middleware))
    }
}
