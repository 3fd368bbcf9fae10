use clap::{Args, Parser, Subcommand};

use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_MS};

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Jsonl,
    Csv,
}

/// CLI arguments structure
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a single address for a Strict-Transport-Security header.
    Check {
        /// Address to check (scheme optional, e.g. "example.com").
        url: String,

        #[command(flatten)]
        probe: ProbeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check every address listed in a file, one per line ("-" reads stdin).
    Batch {
        /// Path to a file with one address per line, or "-" for stdin.
        path: String,

        /// Show the full URL instead of just the host.
        #[arg(long, help_heading = "OUTPUT")]
        full_urls: bool,

        /// Number of probes in flight at once. Output keeps input order.
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY, help_heading = "NETWORK")]
        concurrency: usize,

        #[command(flatten)]
        probe: ProbeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Network and HTTP options shared by every probe.
///
/// Certificate verification is always disabled: the header is reported
/// regardless of whether the server's certificate would be trusted.
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    // NETWORK
    /// Timeout for each request in milliseconds (0 for no timeout).
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS, help_heading = "NETWORK")]
    pub timeout: u64,

    /// Use a proxy for requests (e.g., "http://127.0.0.1:8080").
    #[arg(long, help_heading = "NETWORK")]
    pub proxy: Option<String>,

    // HTTP
    /// Send GET instead of HEAD (for servers that mishandle HEAD).
    #[arg(long, help_heading = "HTTP")]
    pub get: bool,

    /// Follow HTTP redirects and report the header of the final response.
    #[arg(long, help_heading = "HTTP")]
    pub follow_redirect: bool,

    /// Custom headers to add to the request (e.g., "Cookie: a=b").
    #[arg(short = 'H', long, help_heading = "HTTP")]
    pub headers: Vec<String>,
}

/// Output options shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file to save results (instead of stdout).
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,
}
