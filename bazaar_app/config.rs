use dotenvy::dotenv;
use std::env;

/// Connection settings for the TiDB/MySQL endpoint, read from the
/// environment (a `.env` file is honored). Every variable has a default
/// matching a local TiDB instance.
pub struct Config {
    pub tidb_host: String,
    pub tidb_port: u16,
    pub tidb_user: String,
    pub tidb_password: String,
    pub tidb_db_name: String,
    pub ca_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let tidb_host = match env::var("TIDB_HOST") {
            Ok(val) => val,
            Err(_) => "127.0.0.1".to_string(),
        };

        let tidb_port = match env::var("TIDB_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(4000),
            Err(_) => 4000,
        };

        let tidb_user = match env::var("TIDB_USER") {
            Ok(val) => val,
            Err(_) => "root".to_string(),
        };

        let tidb_password = env::var("TIDB_PASSWORD").unwrap_or_default();

        let tidb_db_name = match env::var("TIDB_DB_NAME") {
            Ok(val) => val,
            Err(_) => "test".to_string(),
        };

        let ca_path = env::var("CA_PATH").ok().filter(|path| !path.is_empty());

        Self {
            tidb_host,
            tidb_port,
            tidb_user,
            tidb_password,
            tidb_db_name,
            ca_path,
        }
    }
}
