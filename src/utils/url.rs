use std::fmt;

use url::Url;

use crate::constants::{HTTPS_DEFAULT_PORT, HTTPS_SCHEME};

/// An `https` URL produced by [`normalize`].
///
/// The scheme is always `https`. When the input used another scheme the
/// port was reset to the default, so an explicit `http://host:8080` is
/// probed on 443.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.0.port().unwrap_or(HTTPS_DEFAULT_PORT)
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Normalize a free-form address into an `https` URL.
///
/// Text without a leading `scheme://` is treated as a host. Credentials
/// are dropped. Returns `None` for anything that does not parse as a URL
/// with a host.
pub fn normalize(raw: &str) -> Option<NormalizedUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = if has_scheme_prefix(trimmed) {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{}://{}", HTTPS_SCHEME, trimmed))
    };
    let mut url = parsed.ok()?;

    if url.scheme() != HTTPS_SCHEME {
        url = force_https(url)?;
    }

    url.host_str()?;
    if !url.username().is_empty() || url.password().is_some() {
        url.set_username("").ok()?;
        url.set_password(None).ok()?;
    }
    Some(NormalizedUrl(url))
}

/// True when the text starts with a scheme token followed by `://`.
fn has_scheme_prefix(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Switch to https on the default port, rebuilding URLs whose scheme the
/// parser refuses to change in place (e.g. `foo://host/path`).
fn force_https(mut url: Url) -> Option<Url> {
    if url.set_scheme(HTTPS_SCHEME).is_err() {
        let mut rebuilt = Url::parse(&format!("{}://{}", HTTPS_SCHEME, url.host_str()?)).ok()?;
        rebuilt.set_path(url.path());
        rebuilt.set_query(url.query());
        rebuilt.set_fragment(url.fragment());
        url = rebuilt;
    }
    url.set_port(None).ok()?;
    Some(url)
}
