//! Bandwidth measurement.
//!
//! A [`SpeedProbe`] reports download and upload throughput in megabits per
//! second. [`HttpSpeedProbe`] measures against an HTTP speed-test endpoint
//! that serves `GET /__down?bytes=N` and accepts `POST /__up`.

use std::io;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::debug;

use crate::collector::error::CollectError;
use crate::fmt::format_bytes;

/// Measures network throughput.
pub trait SpeedProbe: Send + Sync {
    /// Download throughput in Mb/s.
    fn download_mbps(&self) -> Result<f64, CollectError>;

    /// Upload throughput in Mb/s.
    fn upload_mbps(&self) -> Result<f64, CollectError>;
}

/// Converts a transfer of `bytes` over `elapsed` to megabits per second.
pub fn megabits_per_second(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    (bytes as f64 * 8.0) / secs / 1_000_000.0
}

/// Speed test settings.
#[derive(Debug, Clone)]
pub struct SpeedTestConfig {
    /// Base URL of the speed-test server.
    pub base_url: String,
    /// Bytes requested for the download measurement.
    pub download_bytes: u64,
    /// Bytes sent for the upload measurement.
    pub upload_bytes: u64,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SpeedTestConfig {
    pub const DEFAULT_URL: &'static str = "https://speed.cloudflare.com";
}

impl Default for SpeedTestConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_URL.to_string(),
            download_bytes: 25 * 1024 * 1024,
            upload_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Measures throughput with timed HTTP transfers.
pub struct HttpSpeedProbe {
    client: Client,
    config: SpeedTestConfig,
}

impl HttpSpeedProbe {
    pub fn new(config: SpeedTestConfig) -> Result<Self, CollectError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("devcat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CollectError::SpeedTest(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Uses a preconfigured client; `config.timeout` is not applied.
    pub fn with_client(client: Client, config: SpeedTestConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl SpeedProbe for HttpSpeedProbe {
    fn download_mbps(&self) -> Result<f64, CollectError> {
        let url = self.url(&format!("__down?bytes={}", self.config.download_bytes));
        debug!(
            "Downloading {} from {}",
            format_bytes(self.config.download_bytes),
            url
        );

        let start = Instant::now();
        let mut response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CollectError::SpeedTest(e.to_string()))?;
        let received = io::copy(&mut response, &mut io::sink())
            .map_err(|e| CollectError::SpeedTest(e.to_string()))?;
        let elapsed = start.elapsed();

        debug!(bytes = received, ?elapsed, "Download finished");
        Ok(megabits_per_second(received, elapsed))
    }

    fn upload_mbps(&self) -> Result<f64, CollectError> {
        let url = self.url("__up");
        let body = vec![0u8; self.config.upload_bytes as usize];
        debug!(
            "Uploading {} to {}",
            format_bytes(self.config.upload_bytes),
            url
        );

        let start = Instant::now();
        self.client
            .post(&url)
            .body(body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CollectError::SpeedTest(e.to_string()))?;
        let elapsed = start.elapsed();

        debug!(bytes = self.config.upload_bytes, ?elapsed, "Upload finished");
        Ok(megabits_per_second(self.config.upload_bytes, elapsed))
    }
}

/// Probe for runs that skip the speed test; reports zero throughput.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeedProbe;

impl SpeedProbe for NoSpeedProbe {
    fn download_mbps(&self) -> Result<f64, CollectError> {
        Ok(0.0)
    }

    fn upload_mbps(&self) -> Result<f64, CollectError> {
        Ok(0.0)
    }
}

/// Probe returning fixed values.
#[derive(Debug, Clone, Copy)]
pub struct FixedSpeedProbe {
    pub download: f64,
    pub upload: f64,
}

impl SpeedProbe for FixedSpeedProbe {
    fn download_mbps(&self) -> Result<f64, CollectError> {
        Ok(self.download)
    }

    fn upload_mbps(&self) -> Result<f64, CollectError> {
        Ok(self.upload)
    }
}
