use reqwest::{Client, RequestBuilder};

use crate::probe::ProbeMethod;
use crate::utils::NormalizedUrl;

/// Build the probe request. HEAD unless GET was asked for.
pub fn build_probe_request(client: &Client, method: ProbeMethod, url: &NormalizedUrl) -> RequestBuilder {
    let target = url.as_url().clone();
    match method {
        ProbeMethod::Head => client.head(target),
        ProbeMethod::Get => client.get(target),
    }
}
