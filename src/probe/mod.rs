pub mod outcome;
#[cfg(test)]
pub mod test_server;

use reqwest::header::HeaderMap;
use tracing::debug;

use crate::constants::{DEFAULT_TIMEOUT_MS, HTTPS_SCHEME};
use crate::http::{build_probe_client, build_probe_request, hsts_header_value, parse_headers};
use crate::types::ProbeArgs;
use crate::utils::{NormalizedUrl, report};

pub use outcome::{OutcomeKind, ProbeOutcome};

/// HTTP method used for a probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeMethod {
    #[default]
    Head,
    Get,
}

impl ProbeMethod {
    pub fn from_use_get(use_get: bool) -> Self {
        if use_get { ProbeMethod::Get } else { ProbeMethod::Head }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Get => "GET",
        }
    }
}

/// Per-probe settings
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Bound on the whole request/response cycle; 0 disables it.
    pub timeout_ms: u64,
    pub method: ProbeMethod,
    pub follow_redirects: bool,
    pub proxy: Option<String>,
    pub headers: HeaderMap,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            method: ProbeMethod::Head,
            follow_redirects: false,
            proxy: None,
            headers: HeaderMap::new(),
        }
    }
}

impl ProbeOptions {
    pub fn from_args(args: &ProbeArgs) -> Self {
        Self {
            timeout_ms: args.timeout,
            method: ProbeMethod::from_use_get(args.get),
            follow_redirects: args.follow_redirect,
            proxy: args.proxy.clone(),
            headers: parse_headers(&args.headers),
        }
    }
}

/// Probe one URL for a Strict-Transport-Security header.
///
/// TLS certificate verification is disabled for the request, so a server
/// with a self-signed or expired certificate is still inspected. Only use
/// the result to learn what the server sends, never as a statement that
/// the endpoint is trustworthy.
///
/// Network, TLS and timeout faults come back as [`ProbeOutcome::Failed`].
pub async fn probe(url: &NormalizedUrl, options: &ProbeOptions) -> ProbeOutcome {
    debug_assert_eq!(url.scheme(), HTTPS_SCHEME, "probe requires an https URL");

    let client = match build_probe_client(options) {
        Ok(client) => client,
        Err(err) => return ProbeOutcome::failed(format!("{:#}", err)),
    };

    // reqwest hands back 4xx/5xx as ordinary responses, so their headers
    // are inspected like any other.
    let outcome = match build_probe_request(&client, options.method, url).send().await {
        Ok(resp) => {
            debug!(url = %url, status = resp.status().as_u16(), "response received");
            ProbeOutcome::from_header(hsts_header_value(resp.headers()))
        }
        Err(err) => ProbeOutcome::failed(report(&err)),
    };

    debug!(
        url = %url,
        port = url.port(),
        method = options.method.as_str(),
        outcome = outcome.kind().as_str(),
        "probe finished"
    );
    outcome
}
