use crate::estimation::model::{PredictionUnavailable, SleepFeatures, SleepModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const API_VERSION: &str = "1.0";
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Sleep model served over HTTP, optionally backed by a local fallback.
pub struct RemoteSleepModel {
    endpoint: String,
    timeout: Duration,
    model_id: String,
    fallback_model: Option<Box<dyn SleepModel>>,
}

impl RemoteSleepModel {
    pub fn new(
        endpoint: String,
        timeout: Duration,
        model_id: String,
        fallback_model: Option<Box<dyn SleepModel>>,
    ) -> Self {
        Self {
            endpoint,
            timeout,
            model_id,
            fallback_model,
        }
    }

    fn call_remote(&self, features: &SleepFeatures) -> Result<f64, RemoteError> {
        let request = PredictRequest {
            api_version: API_VERSION,
            model_id: &self.model_id,
            wake: features.wake,
            estimated_sleep: features.estimated_sleep,
            coffee: features.coffee,
        };
        let payload = serde_json::to_string(&request)?;
        let response_body = send_http_json(&self.endpoint, &payload, self.timeout)?;
        let response: PredictResponse = serde_json::from_str(&response_body)?;
        response
            .actual_sleep_seconds
            .ok_or(RemoteError::MissingPrediction)
    }
}

impl fmt::Debug for RemoteSleepModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSleepModel")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("model_id", &self.model_id)
            .field("has_fallback", &self.fallback_model.is_some())
            .finish()
    }
}

impl SleepModel for RemoteSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionUnavailable> {
        match self.call_remote(features) {
            Ok(seconds) => Ok(seconds),
            Err(err) => {
                warn!(error = %err, endpoint = %self.endpoint, "Remote model call failed");
                if let Some(fallback) = self.fallback_model.as_ref() {
                    warn!(fallback = fallback.name(), "Falling back to local model");
                    return fallback.predict(features);
                }
                Err(PredictionUnavailable::new(err.to_string()))
            }
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    api_version: &'static str,
    model_id: &'a str,
    wake: f64,
    estimated_sleep: f64,
    coffee: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    actual_sleep_seconds: Option<f64>,
}

#[derive(Debug, Error)]
enum RemoteError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("dns error: {0}")]
    Dns(String),
    #[error("connect error: {0}")]
    Connect(std::io::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http status {0} ({body})", body = .1.trim())]
    Http(u16, String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response carried no prediction")]
    MissingPrediction,
    #[error("chunked responses are not supported")]
    UnsupportedTransferEncoding,
}

#[derive(Debug, PartialEq)]
struct ParsedUrl {
    host: String,
    port: u16,
    path: String,
}

fn parse_http_url(endpoint: &str) -> Result<ParsedUrl, RemoteError> {
    let trimmed = endpoint
        .strip_prefix("http://")
        .ok_or_else(|| RemoteError::InvalidUrl("only http:// supported".to_string()))?;

    let (host_port, path) = match trimmed.split_once('/') {
        Some((host_port, path)) if !path.is_empty() => (host_port, format!("/{path}")),
        Some((host_port, _)) => (host_port, "/".to_string()),
        None => (trimmed, "/".to_string()),
    };
    if host_port.is_empty() {
        return Err(RemoteError::InvalidUrl("missing host".to_string()));
    }

    let (host, port) = match host_port.split_once(':') {
        Some((host, port_str)) if !port_str.is_empty() => {
            let port = port_str
                .parse::<u16>()
                .map_err(|_| RemoteError::InvalidUrl("invalid port".to_string()))?;
            (host, port)
        }
        Some((host, _)) => (host, 80),
        None => (host_port, 80),
    };
    if host.is_empty() {
        return Err(RemoteError::InvalidUrl("missing host".to_string()));
    }

    Ok(ParsedUrl {
        host: host.to_string(),
        port,
        path,
    })
}

fn send_http_json(endpoint: &str, body: &str, timeout: Duration) -> Result<String, RemoteError> {
    let parsed = parse_http_url(endpoint)?;
    let addr = (parsed.host.as_str(), parsed.port)
        .to_socket_addrs()
        .map_err(|err| RemoteError::Dns(err.to_string()))?
        .next()
        .ok_or_else(|| RemoteError::Dns("no addresses resolved".to_string()))?;

    let mut stream = TcpStream::connect_timeout(&addr, timeout).map_err(RemoteError::Connect)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let request = format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        parsed.path,
        parsed.host,
        body.len(),
        body
    );
    stream.write_all(request.as_bytes())?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;

    let (headers, body) = response
        .split_once("\r\n\r\n")
        .ok_or_else(|| RemoteError::Http(0, "invalid http response".to_string()))?;

    let status_code = headers
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| RemoteError::Http(0, "missing status code".to_string()))?;

    if !(200..300).contains(&status_code) {
        return Err(RemoteError::Http(status_code, body.to_string()));
    }

    let chunked = headers.lines().skip(1).any(|line| {
        line.split_once(':').is_some_and(|(name, value)| {
            name.trim().eq_ignore_ascii_case("transfer-encoding")
                && value.to_ascii_lowercase().contains("chunked")
        })
    });
    if chunked {
        return Err(RemoteError::UnsupportedTransferEncoding);
    }

    Ok(body.to_string())
}
