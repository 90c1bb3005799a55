use crate::Config;
use crate::database::{DatabaseManager, DatabaseManagerImpl, DatabaseResult};
use tracing::info;

/// What the configured store currently holds
#[derive(Debug, Clone, PartialEq)]
pub struct StoreReport {
    pub stations: u64,
    pub measurements: u64,
    pub most_recent_date: Option<String>,
}

impl std::fmt::Display for StoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "stations:         {}", self.stations)?;
        writeln!(f, "measurements:     {}", self.measurements)?;
        write!(
            f,
            "most recent date: {}",
            self.most_recent_date.as_deref().unwrap_or("-")
        )
    }
}

pub async fn collect_report(database: &dyn DatabaseManager) -> DatabaseResult<StoreReport> {
    database.health_check().await?;

    let measurements = database.measurements();
    Ok(StoreReport {
        stations: database.stations().count().await?,
        measurements: measurements.count().await?,
        most_recent_date: measurements.most_recent_date().await?,
    })
}

pub async fn handle_check_command(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(url = %config.database.url, "Checking climate store");

    let db_manager = DatabaseManagerImpl::new_from_config(config).await?;
    let report = collect_report(&db_manager).await;
    db_manager.close().await?;

    let report = report?;
    println!("{}", report);
    info!("Store check passed");
    Ok(())
}
