//! Ephemeral Postgres for tests.
//!
//! [`start_database`] hands back a connection string. When
//! `TEST_DATABASE_URL` is set that URL is used as-is; otherwise a `postgres`
//! container is started and kept alive for as long as the returned
//! [`TestDatabase`] lives.

use std::{env, time::Duration};

use sqlx::postgres::PgPoolOptions;
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt, core::IntoContainerPort, runners::AsyncRunner,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";
pub const SCHEMA_NAME_ENV: &str = "TEST_DATABASE_SCHEMA_NAME";
pub const DEFAULT_SCHEMA_NAME: &str = "testSchema";

const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "latest";
const POSTGRES_USER: &str = "postgres";
const POSTGRES_PASSWORD: &str = "postgres";
const POSTGRES_DB: &str = "postgres";
const POSTGRES_PORT: u16 = 5432;

const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(2);
const MAX_WAIT: Duration = Duration::from_secs(20);

pub struct TestDatabase {
    pub url: String,
    pub schema_name: String,
    container: Option<ContainerAsync<GenericImage>>,
}

impl TestDatabase {
    /// Whether this database runs in a container owned by this handle.
    pub fn is_ephemeral(&self) -> bool {
        self.container.is_some()
    }

    /// Removes the container, if one was started. Dropping the handle does
    /// the same without waiting for it.
    pub async fn close(mut self) -> eyre::Result<()> {
        if let Some(container) = self.container.take() {
            let id = container.id().to_string();
            container.rm().await?;
            info!(container = %id, "removed test database");
        }
        Ok(())
    }
}

/// Returns a usable Postgres connection string together with the schema
/// name tests should use.
pub async fn start_database() -> eyre::Result<TestDatabase> {
    let schema_name =
        env::var(SCHEMA_NAME_ENV).unwrap_or_else(|_| DEFAULT_SCHEMA_NAME.to_string());

    if let Ok(url) = env::var(DATABASE_URL_ENV) {
        debug!(schema = %schema_name, "using database from {DATABASE_URL_ENV}");
        return Ok(TestDatabase {
            url,
            schema_name,
            container: None,
        });
    }

    let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_exposed_port(POSTGRES_PORT.tcp())
        .with_env_var("POSTGRES_USER", POSTGRES_USER)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_env_var("POSTGRES_DB", POSTGRES_DB)
        .start()
        .await
        .map_err(|e| eyre::eyre!("failed to start postgres container: {e}"))?;
    let port = container
        .get_host_port_ipv4(POSTGRES_PORT.tcp())
        .await
        .map_err(|e| eyre::eyre!("failed to resolve postgres port: {e}"))?;

    let url = postgres_url("127.0.0.1", port);
    info!(container = %container.id(), port, "started test database");

    // A failed wait drops the container, which removes it.
    wait_until_ready(&url).await?;

    Ok(TestDatabase {
        url,
        schema_name,
        container: Some(container),
    })
}

pub fn postgres_url(host: &str, port: u16) -> String {
    format!(
        "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}?sslmode=disable"
    )
}

/// Delays between connection attempts: doubling from 100ms, capped at 2s.
pub fn backoff_schedule() -> impl Iterator<Item = Duration> {
    std::iter::successors(Some(INITIAL_BACKOFF), |d| Some((*d * 2).min(MAX_BACKOFF)))
}

/// The sleep before the next attempt, clamped to what is left of the 20s
/// budget. `None` once the budget is spent.
fn next_delay(elapsed: Duration, delay: Duration) -> Option<Duration> {
    MAX_WAIT
        .checked_sub(elapsed)
        .filter(|left| !left.is_zero())
        .map(|left| delay.min(left))
}

async fn wait_until_ready(url: &str) -> eyre::Result<()> {
    let started = Instant::now();
    let mut delays = backoff_schedule();

    loop {
        let attempt = MAX_WAIT.saturating_sub(started.elapsed()).min(MAX_BACKOFF);
        let err = match tokio::time::timeout(attempt, ping(url)).await {
            Ok(Ok(())) => {
                debug!(elapsed = ?started.elapsed(), "test database is ready");
                return Ok(());
            }
            Ok(Err(e)) => e,
            Err(_) => eyre::eyre!("connection attempt timed out after {attempt:?}"),
        };

        let Some(delay) = delays
            .next()
            .and_then(|delay| next_delay(started.elapsed(), delay))
        else {
            return Err(err.wrap_err(format!(
                "test database not ready after {:?}",
                started.elapsed()
            )));
        };
        warn!(error = %err, ?delay, "test database not ready yet");
        tokio::time::sleep(delay).await;
    }
}

async fn ping(url: &str) -> eyre::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(MAX_BACKOFF)
        .connect(url)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    pool.close().await;
    Ok(())
}
