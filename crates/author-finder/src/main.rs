//! Author Finder - Entry Point

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use author_finder::config::EngineEndpoint;
use author_finder::{Config, FinderServer, HttpAggregator};

#[derive(Parser, Debug)]
#[command(name = "author-finder")]
#[command(about = "Person search across academic engines with cached, paginated results")]
#[command(version)]
struct Cli {
    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Search engine as `name=url`; repeat for several engines
    #[arg(long = "engine", value_name = "NAME=URL")]
    engines: Vec<EngineEndpoint>,

    /// TTL of cached queries, in seconds
    #[arg(long)]
    query_ttl_secs: Option<u64>,

    /// TTL of cached author records, in seconds
    #[arg(long)]
    author_ttl_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if !self.engines.is_empty() {
            config.engines = self.engines;
        }
        if let Some(secs) = self.query_ttl_secs {
            config.query_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = self.author_ttl_secs {
            config.author_ttl = Duration::from_secs(secs);
        }
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let port = cli.port;
    let config = cli.apply(Config::from_env()?);

    if config.engines.is_empty() {
        tracing::warn!("No search engines configured; every search will be rejected");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        engines = ?config.engines.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        query_ttl = ?config.query_ttl,
        author_ttl = ?config.author_ttl,
        "Starting author finder"
    );

    let aggregator = HttpAggregator::new(&config)?;
    let server = FinderServer::new(&config, Arc::new(aggregator));

    server.run_http(port).await
}
