use std::env;

use log::warn;

use super::constants::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
    MAX_COLLECTION_IDENTIFIERS, SCRYFALL_API_URL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub scryfall_api_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub collection_batch_size: usize,
    pub concurrent_requests: usize,
    pub strict_decklist: bool,
    pub decklist_path: String,
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scryfall_api_url: SCRYFALL_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: 0,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            collection_batch_size: MAX_COLLECTION_IDENTIFIERS,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            strict_decklist: false,
            decklist_path: "".to_string(),
            output_dir: ".".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        if let Ok(url) = env::var("SCRYFALL_API_URL") {
            if !url.trim().is_empty() {
                self.scryfall_api_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = match timeout.parse() {
                Ok(secs) if secs > 0 => secs,
                _ => DEFAULT_REQUEST_TIMEOUT_SECS,
            };
        }
        if let Ok(retries) = env::var("MAX_RETRIES") {
            self.max_retries = retries.parse().unwrap_or(0);
        }
        if let Ok(backoff) = env::var("RETRY_BACKOFF_MS") {
            self.retry_backoff_ms = backoff.parse().unwrap_or(DEFAULT_RETRY_BACKOFF_MS);
        }
        if let Ok(batch_size) = env::var("COLLECTION_BATCH_SIZE") {
            self.collection_batch_size = Self::clamp_batch_size(batch_size.parse().ok());
        }
        if let Ok(concurrent) = env::var("CONCURRENT_REQUESTS") {
            self.concurrent_requests = match concurrent.parse() {
                Ok(n) if n > 0 => n,
                _ => DEFAULT_CONCURRENT_REQUESTS,
            };
        }
        if let Ok(strict) = env::var("STRICT_DECKLIST") {
            self.strict_decklist = strict == "1";
        }
        if let Ok(decklist_path) = env::var("DECKLIST_PATH") {
            if std::path::Path::new(&decklist_path).is_file() {
                self.decklist_path = decklist_path;
            } else if !decklist_path.is_empty() {
                warn!("DECKLIST_PATH {} is not a file, ignoring it", decklist_path);
            }
        }
        if let Ok(output_dir) = env::var("OUTPUT_DIR") {
            if !output_dir.is_empty() {
                self.output_dir = output_dir;
            }
        }
    }

    /// Scryfall rejects collection requests with more than 75 identifiers.
    fn clamp_batch_size(requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => MAX_COLLECTION_IDENTIFIERS,
            Some(n) => n.min(MAX_COLLECTION_IDENTIFIERS),
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}
