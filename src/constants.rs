/// HTTP constants
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;
pub const HSTS_HEADER: &str = "strict-transport-security";
pub const USER_AGENT: &str = concat!("hstsprobe/", env!("CARGO_PKG_VERSION"));

/// Probe defaults
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONCURRENCY: usize = 1;

/// URL constants
pub const HTTPS_SCHEME: &str = "https";
pub const HTTPS_DEFAULT_PORT: u16 = 443;

/// Reads standard input instead of a file when given as the batch path
pub const STDIN_PATH: &str = "-";
