use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};

use bazaar_app::config::Config;
use bazaar_types::errors::DbError;

pub type DbPool = MySqlPool;

/// Opens a connection pool against the configured TiDB/MySQL endpoint.
///
/// When a CA path is configured, the server certificate and identity are
/// verified against that CA.
pub async fn establish_connection_pool(config: &Config) -> Result<DbPool, DbError> {
    let mut options = MySqlConnectOptions::new()
        .host(&config.tidb_host)
        .port(config.tidb_port)
        .username(&config.tidb_user)
        .database(&config.tidb_db_name);

    if !config.tidb_password.is_empty() {
        options = options.password(&config.tidb_password);
    }

    if let Some(ca_path) = &config.ca_path {
        options = options
            .ssl_mode(MySqlSslMode::VerifyIdentity)
            .ssl_ca(ca_path);
    }

    tracing::debug!(
        host = %config.tidb_host,
        port = config.tidb_port,
        database = %config.tidb_db_name,
        "opening connection pool"
    );

    Ok(MySqlPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?)
}
