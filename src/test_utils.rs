use crate::{
    config::Config,
    database::{
        DatabaseManager,
        entities::{measurement, station},
    },
    server::Server,
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use std::sync::Arc;

/// Test server builder over an in-memory SQLite store
pub struct TestServerBuilder {
    config: Config,
    run_migrations: bool,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            run_migrations: true,
        }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Leave the schema uncreated, so every query fails
    pub fn without_migrations(mut self) -> Self {
        self.run_migrations = false;
        self
    }

    pub async fn build(self) -> Server {
        let mut config = self.config;

        config.database.url = "sqlite::memory:".to_string();
        // Every in-memory connection is its own database
        config.database.max_connections = 1;
        config.metrics.enabled = false;

        let server = Server::new(config).await.unwrap();

        if self.run_migrations {
            server.database.migrate().await.unwrap();
        }
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a station row
pub async fn seed_station(database: &Arc<dyn DatabaseManager>, code: &str, name: &str) {
    station::ActiveModel {
        id: NotSet,
        station: Set(code.to_string()),
        name: Set(name.to_string()),
        latitude: Set(None),
        longitude: Set(None),
        elevation: Set(None),
    }
    .insert(database.connection())
    .await
    .unwrap();
}

/// Insert a measurement row
pub async fn seed_measurement(
    database: &Arc<dyn DatabaseManager>,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    measurement::ActiveModel {
        id: NotSet,
        station: Set(station.to_string()),
        date: Set(date.to_string()),
        prcp: Set(prcp),
        tobs: Set(tobs),
    }
    .insert(database.connection())
    .await
    .unwrap();
}

/// Three stations with measurements ending on 2017-08-23.
///
/// USC00519281 is the most active station (five rows). Two stations report
/// on 2016-08-23 and three on 2017-08-01, so precipitation keeps one value
/// for each of those dates.
pub async fn seed_fixture(database: &Arc<dyn DatabaseManager>) {
    seed_station(database, "USC00519397", "WAIKIKI 717.2, HI US").await;
    seed_station(database, "USC00519281", "WAIHEE 837.5, HI US").await;
    seed_station(database, "USC00513117", "KANEOHE 838.1, HI US").await;

    let rows: [(&str, &str, Option<f64>, f64); 10] = [
        ("USC00519281", "2016-08-20", Some(0.1), 77.0),
        ("USC00519281", "2016-08-23", Some(1.79), 77.0),
        ("USC00519281", "2017-01-15", Some(0.0), 68.0),
        ("USC00519281", "2017-08-01", None, 76.0),
        ("USC00519281", "2017-08-18", Some(0.06), 79.0),
        ("USC00519397", "2016-08-23", Some(0.0), 81.0),
        ("USC00519397", "2017-08-01", Some(0.02), 80.0),
        ("USC00519397", "2017-08-23", Some(0.0), 81.0),
        ("USC00513117", "2010-01-01", Some(0.08), 65.0),
        ("USC00513117", "2017-08-01", Some(0.5), 77.0),
    ];
    for (station, date, prcp, tobs) in rows {
        seed_measurement(database, station, date, prcp, tobs).await;
    }
}
