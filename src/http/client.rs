use anyhow::Result;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;

use crate::constants::{DEFAULT_REDIRECT_LIMIT, USER_AGENT};
use crate::probe::ProbeOptions;

/// Build a single-use HTTP client for one probe.
///
/// Certificate verification is disabled unconditionally. The probe reports
/// what the server sends, so self-signed, expired, or otherwise untrusted
/// certificates must not stop the request.
pub fn build_probe_client(options: &ProbeOptions) -> Result<Client> {
    let redirect_policy = if options.follow_redirects {
        Policy::limited(DEFAULT_REDIRECT_LIMIT)
    } else {
        Policy::none()
    };

    let mut client_builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(redirect_policy)
        .default_headers(options.headers.clone())
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .http1_only();

    // 0 means no timeout
    if options.timeout_ms > 0 {
        client_builder = client_builder.timeout(Duration::from_millis(options.timeout_ms));
    }

    if let Some(proxy_url) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        client_builder = client_builder.proxy(proxy);
    }

    Ok(client_builder.build()?)
}
