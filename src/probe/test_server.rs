//! Minimal HTTPS/1.1 server for probe tests.
//!
//! Presents a self-signed certificate for `localhost`/`127.0.0.1`, records
//! each request, and answers with a fixed status and optional
//! Strict-Transport-Security header.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};

use crate::utils::{NormalizedUrl, normalize};

const CERT_PEM: &[u8] = include_bytes!("fixtures/localhost-cert.pem");
const KEY_PEM: &[u8] = include_bytes!("fixtures/localhost-key.pem");

#[derive(Debug, Clone)]
pub struct TestServerOptions {
    pub status: &'static str,
    pub hsts: Option<&'static str>,
    pub location: Option<&'static str>,
    /// Sleep before answering.
    pub delay: Option<Duration>,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            hsts: None,
            location: None,
            delay: None,
        }
    }
}

impl TestServerOptions {
    pub fn with_hsts(value: &'static str) -> Self {
        Self {
            hsts: Some(value),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    headers: Vec<String>,
}

pub struct TestServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    pub fn url(&self) -> NormalizedUrl {
        normalize(&format!("https://{}/", self.addr)).expect("test server url")
    }

    /// Methods of every request received so far, in arrival order.
    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }

    /// Header lines of the most recent request.
    pub fn request_headers(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.headers.clone())
            .unwrap_or_default()
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(options: TestServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    let config = Arc::new(server_config());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let config = Arc::clone(&config);
            let recorded = Arc::clone(&recorded);
            let options = options.clone();
            thread::spawn(move || {
                let _ = handle(stream, config, &options, &recorded);
            });
        }
    });
    TestServer { addr, requests }
}

fn server_config() -> ServerConfig {
    let certs = CertificateDer::pem_slice_iter(CERT_PEM)
        .collect::<Result<Vec<_>, _>>()
        .expect("certificate fixture");
    let key = PrivateKeyDer::from_pem_slice(KEY_PEM).expect("key fixture");
    ServerConfig::builder_with_provider(Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("protocol versions")
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .expect("server config")
}

fn handle(
    stream: TcpStream,
    config: Arc<ServerConfig>,
    options: &TestServerOptions,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;
    let conn = ServerConnection::new(config).map_err(std::io::Error::other)?;
    let mut tls = StreamOwned::new(conn, stream);

    let request = {
        let mut reader = BufReader::new(&mut tls);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 || line == "\r\n" {
                break;
            }
            headers.push(line.trim_end().to_string());
        }
        RecordedRequest {
            method: request_line
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
            headers,
        }
    };
    recorded.lock().unwrap().push(request);

    if let Some(delay) = options.delay {
        thread::sleep(delay);
    }

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n",
        options.status
    );
    if let Some(value) = options.hsts {
        response.push_str(&format!("Strict-Transport-Security: {}\r\n", value));
    }
    if let Some(location) = options.location {
        response.push_str(&format!("Location: {}\r\n", location));
    }
    response.push_str("\r\n");

    tls.write_all(response.as_bytes())?;
    tls.conn.send_close_notify();
    tls.flush()
}
