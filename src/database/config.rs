use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_database_max_connections")]
    pub max_connections: u32,
    /// Create missing tables on startup. Off by default: the dataset is
    /// provisioned externally and the service only reads it.
    #[serde(default)]
    pub migration_on_startup: bool,
}

fn default_database_url() -> String {
    "sqlite://./Resources/hawaii.sqlite?mode=ro".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_database_max_connections(),
            migration_on_startup: false,
        }
    }
}
