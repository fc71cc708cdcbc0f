//! Pokedex - A REPL client for the PokeAPI
//!
//! Memoizes API responses in an in-memory cache whose entries are reaped
//! after a fixed TTL.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Config, PokeApiClient, Session, TtlCache};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the API client around the cache
/// 5. Run the REPL on stdin/stdout until `exit` or EOF
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        base_url = %config.base_url,
        cache_ttl_s = config.cache_ttl,
        reap_interval_ms = config.reap_interval().as_millis() as u64,
        "Configuration loaded"
    );

    let cache = Arc::new(TtlCache::with_reap_interval(
        config.cache_ttl(),
        config.reap_interval(),
    ));
    let client = PokeApiClient::new(&config, cache.clone()).context("building HTTP client")?;
    let mut session = Session::new(client);

    repl::run(&mut session, BufReader::new(io::stdin()), io::stdout())
        .await
        .context("REPL I/O failed")?;

    cache.stop();
    info!("Pokedex closed");
    Ok(())
}
