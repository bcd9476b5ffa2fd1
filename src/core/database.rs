use crate::core::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Connection options derived from the URL, with TLS forced on or off by mode
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let ssl_mode = if config.require_tls {
        PgSslMode::Require
    } else {
        PgSslMode::Disable
    };

    Ok(PgConnectOptions::from_str(&config.url)?.ssl_mode(ssl_mode))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;
    tracing::info!(
        "Connecting to database (tls={})",
        if config.require_tls { "require" } else { "disable" }
    );
    pool_options(config).connect_with(options).await
}

/// Pool that only opens connections on first use
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;
    Ok(pool_options(config).connect_lazy_with(options))
}
