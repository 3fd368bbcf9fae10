pub mod client;
pub mod headers;
pub mod request;

pub use client::build_probe_client;
pub use headers::{hsts_header_value, parse_headers};
pub use request::build_probe_request;
