use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which Square deployment the upstream client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    /// Base URL of the Square Connect API for this environment.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://connect.squareupsandbox.com",
            SquareEnvironment::Production => "https://connect.squareup.com",
        }
    }
}

impl std::fmt::Display for SquareEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquareEnvironment::Sandbox => write!(f, "sandbox"),
            SquareEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Bounds for the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub max_entries: u64,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 500,
            ttl: Duration::from_secs(120),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` when `SQUARE_ACCESS_TOKEN` is unset or empty. Upstream calls
    /// fail per request in that case; startup still succeeds.
    pub square_access_token: Option<String>,
    pub square_environment: SquareEnvironment,
    pub square_timeout_secs: u64,
    pub cache: CacheSettings,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "square_access_token",
                &self.square_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("square_environment", &self.square_environment)
            .field("square_timeout_secs", &self.square_timeout_secs)
            .field("cache", &self.cache)
            .finish()
    }
}
