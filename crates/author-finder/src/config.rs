//! Configuration for the author finder service.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use url::Url;

/// Default values for the service.
pub mod defaults {
    use std::time::Duration;

    /// TTL of a query-level entry (fingerprint -> AuthorID list).
    pub const QUERY_TTL: Duration = Duration::from_secs(3600);

    /// TTL of an author record entry.
    pub const AUTHOR_TTL: Duration = Duration::from_secs(3600);

    /// Results shown per listing page.
    pub const PER_PAGE: u32 = 10;

    /// Maximum number of cache entries (queries and authors combined).
    pub const CACHE_MAX_SIZE: u64 = 100_000;

    /// Request timeout for a single engine call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay before each engine request.
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

    /// Maximum keepalive connections per engine host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Placeholder image for authors without one.
    pub const DEFAULT_IMAGE: &str = "/static/default.png";

    /// Earliest year selectable in a year range.
    pub const EARLIEST_YEAR: i32 = 1970;

    /// Cookie holding the fingerprint of the latest search.
    pub const SESSION_COOKIE: &str = "latest-search";
}

/// Environment variable names.
pub mod env {
    /// Comma-separated `name=url` engine list.
    pub const ENGINES: &str = "AUTHOR_FINDER_ENGINES";
    /// Query-level entry TTL in seconds.
    pub const QUERY_TTL_SECS: &str = "AUTHOR_FINDER_QUERY_TTL_SECS";
    /// Author entry TTL in seconds.
    pub const AUTHOR_TTL_SECS: &str = "AUTHOR_FINDER_AUTHOR_TTL_SECS";
    /// Results per page.
    pub const PER_PAGE: &str = "AUTHOR_FINDER_PER_PAGE";
}

/// A named search engine and the base URL it is reachable at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEndpoint {
    /// Engine name as selected by the user (e.g. "dblp").
    pub name: String,
    /// Base URL; author searches go to `{base_url}/authors`.
    pub base_url: Url,
}

impl EngineEndpoint {
    /// Create an endpoint from a name and a URL string.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or the URL does not parse.
    pub fn new(name: impl Into<String>, base_url: &str) -> anyhow::Result<Self> {
        let name = name.into().trim().to_string();
        anyhow::ensure!(!name.is_empty(), "engine name cannot be empty");
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid URL for engine '{name}'"))?;
        Ok(Self { name, base_url })
    }

    /// URL of the author search resource.
    #[must_use]
    pub fn authors_url(&self) -> String {
        format!("{}/authors", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl FromStr for EngineEndpoint {
    type Err = anyhow::Error;

    /// Parse `name=url`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, url) = s
            .split_once('=')
            .with_context(|| format!("expected name=url, got '{s}'"))?;
        Self::new(name, url)
    }
}

/// Parse a comma-separated `name=url` list.
///
/// # Errors
///
/// Returns error if any entry is malformed.
pub fn parse_engines(list: &str) -> anyhow::Result<Vec<EngineEndpoint>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(EngineEndpoint::from_str)
        .collect()
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search engines the aggregator can fan out to.
    pub engines: Vec<EngineEndpoint>,

    /// TTL of query-level entries.
    pub query_ttl: Duration,

    /// TTL of author record entries.
    pub author_ttl: Duration,

    /// Results per listing page.
    pub per_page: u32,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay before each engine request.
    pub rate_limit_delay: Duration,

    /// Image shown for authors without one.
    pub default_image: String,
}

impl Config {
    /// Create a configuration with the given engines and default settings.
    #[must_use]
    pub fn new(engines: Vec<EngineEndpoint>) -> Self {
        Self {
            engines,
            query_ttl: defaults::QUERY_TTL,
            author_ttl: defaults::AUTHOR_TTL,
            per_page: defaults::PER_PAGE,
            cache_max_size: defaults::CACHE_MAX_SIZE,
            request_timeout: defaults::REQUEST_TIMEOUT,
            connect_timeout: defaults::CONNECT_TIMEOUT,
            rate_limit_delay: defaults::RATE_LIMIT_DELAY,
            default_image: defaults::DEFAULT_IMAGE.to_string(),
        }
    }

    /// Create a test configuration with two engines served by a mock server.
    ///
    /// Engines `dblp` and `scholar` live at `{base_url}/dblp` and
    /// `{base_url}/scholar`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let engines = ["dblp", "scholar"]
            .iter()
            .filter_map(|name| EngineEndpoint::new(*name, &format!("{base}/{name}")).ok())
            .collect();

        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            cache_max_size: 1_000,
            ..Self::new(engines)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let engines = match std::env::var(env::ENGINES) {
            Ok(list) => parse_engines(&list)?,
            Err(_) => Vec::new(),
        };

        let mut config = Self::new(engines);

        if let Some(secs) = read_u64(env::QUERY_TTL_SECS)? {
            config.query_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = read_u64(env::AUTHOR_TTL_SECS)? {
            config.author_ttl = Duration::from_secs(secs);
        }
        if let Some(per_page) = read_u64(env::PER_PAGE)? {
            anyhow::ensure!(per_page > 0, "{} must be positive", env::PER_PAGE);
            config.per_page = u32::try_from(per_page)
                .with_context(|| format!("{} is too large", env::PER_PAGE))?;
        }

        Ok(config)
    }

    /// Override both TTLs.
    #[must_use]
    pub const fn with_ttls(mut self, query_ttl: Duration, author_ttl: Duration) -> Self {
        self.query_ttl = query_ttl;
        self.author_ttl = author_ttl;
        self
    }

    /// Look up an engine by name.
    #[must_use]
    pub fn engine(&self, name: &str) -> Option<&EngineEndpoint> {
        self.engines.iter().find(|e| e.name == name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn read_u64(var: &str) -> anyhow::Result<Option<u64>> {
    match std::env::var(var) {
        Ok(raw) => {
            let value =
                raw.trim().parse::<u64>().with_context(|| format!("{var} must be an integer"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
