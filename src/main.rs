use word_frequency::config::{Config, ConfigError, USAGE};
use word_frequency::frequency::request::RequestLimits;
use word_frequency::server::{build_cache, router, spawn_sweeper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // 1. Cache layer:
    let cache = build_cache(&config)?;
    match &config.redis_url {
        Some(url) => tracing::info!("Caching results in Redis at {}", url),
        None => tracing::info!("Caching results in memory"),
    }
    tracing::info!("Cache TTL: {:?}", cache.ranking.ttl());

    // 2. Expiry sweeper (in-memory cache only):
    if let Some(memory) = cache.memory.clone() {
        spawn_sweeper(memory, config.sweep_interval);
    }

    // 3. HTTP Router:
    let limits = RequestLimits::new(config.max_text_bytes);
    let app = router(cache.ranking, limits);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Maximum text size: {} bytes", limits.max_text_bytes);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
