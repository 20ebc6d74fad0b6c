/// Configuration constants for the movie catalog API
pub mod api {
    /// Login endpoint (POST username/password, returns a bearer token)
    pub const AUTH_PATH: &str = "/api/auth";

    /// Movies endpoint, followed by `/{year}/{page}`
    pub const MOVIES_PATH: &str = "/api/movies";

    /// First page index (pages are 1-based)
    pub const FIRST_PAGE: u32 = 1;
}

/// HTTP client tuning
pub mod http {
    use std::time::Duration;

    /// TCP connect timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Whole-request timeout
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Idle connections kept per host (workers of one scan share a host)
    pub const POOL_MAX_IDLE_PER_HOST: usize = 100;
}

/// Worker-pool scan settings
pub mod scan {
    /// Default number of concurrent page workers
    pub const DEFAULT_WORKERS: usize = 100;
}

/// Environment variables read by the CLI
pub mod env {
    /// Catalog server host
    pub const SERVER: &str = "MOVIES_SERVER";

    /// Login username
    pub const USERNAME: &str = "MOVIES_USERNAME";

    /// Login password
    pub const PASSWORD: &str = "MOVIES_PASSWORD";
}

/// Default values for CLI
pub mod defaults {
    /// Default catalog server port
    pub const PORT: u16 = 8080;

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Log level selected by `--verbose`
    pub const VERBOSE_LOG_LEVEL: &str = "debug";
}
