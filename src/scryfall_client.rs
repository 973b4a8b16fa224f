use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;

use crate::cards::scryfallcard::{CardIdentifier, ScryfallCard};
use crate::lookup::{CardLookup, CollectionResponse, LookupError, NameMatch, NamedQuery};
use crate::utilities::constants::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_RETRY_BACKOFF_MS, MAX_COLLECTION_IDENTIFIERS,
    SCRYFALL_API_URL, SCRYFALL_COLLECTION_ENDPOINT, SCRYFALL_NAMED_ENDPOINT, USER_AGENT,
};

#[derive(Serialize)]
struct CollectionRequest {
    identifiers: Vec<CardIdentifier>,
}

pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
    batch_size: usize,
    concurrency: usize,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl ScryfallClient {
    pub fn new(base_url: Option<&str>, client: reqwest::Client) -> Self {
        ScryfallClient {
            client,
            base_url: base_url
                .unwrap_or(SCRYFALL_API_URL)
                .trim_end_matches('/')
                .to_string(),
            batch_size: MAX_COLLECTION_IDENTIFIERS,
            concurrency: DEFAULT_CONCURRENT_REQUESTS,
            max_retries: 0,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }

    /// Names per collection request, capped at Scryfall's limit of 75.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_COLLECTION_IDENTIFIERS);
        self
    }

    /// Collection requests kept in flight at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = backoff_ms;
        self
    }

    pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, LookupError> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?)
    }

    fn setup_http_headers() -> HeaderMap {
        let mut header_map = HeaderMap::new();
        header_map.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        header_map.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        header_map
    }

    fn named_url(&self, query: &NamedQuery) -> String {
        let mode = match query.mode {
            NameMatch::Exact => "exact",
            NameMatch::Fuzzy => "fuzzy",
        };
        let mut url = format!(
            "{}{}?{}={}",
            self.base_url,
            SCRYFALL_NAMED_ENDPOINT,
            mode,
            urlencoding::encode(&query.name)
        );
        if let Some(set) = &query.set {
            url.push_str(&format!("&set={}", urlencoding::encode(set)));
        }
        url
    }

    /// Sends the request, retrying transport errors, 5xx and 429 up to
    /// `max_retries` times with a doubling delay.
    async fn send_with_retry<F>(&self, build_request: F) -> Result<reqwest::Response, LookupError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt: u32 = 0;
        loop {
            let result = build_request().send().await;
            let retryable = match &result {
                Ok(response) => {
                    response.status().is_server_error()
                        || response.status() == StatusCode::TOO_MANY_REQUESTS
                }
                Err(_) => true,
            };
            if !retryable || attempt >= self.max_retries {
                return Ok(result?);
            }
            attempt += 1;
            let delay = self
                .retry_backoff_ms
                .saturating_mul(1u64 << (attempt - 1).min(16));
            match &result {
                Ok(response) => warn!(
                    "Scryfall answered {}, retry {} of {} in {} ms",
                    response.status(),
                    attempt,
                    self.max_retries,
                    delay
                ),
                Err(e) => warn!(
                    "Scryfall request failed: {}, retry {} of {} in {} ms",
                    e, attempt, self.max_retries, delay
                ),
            }
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    async fn fetch_collection_chunk(
        &self,
        names: &[String],
    ) -> Result<CollectionResponse, LookupError> {
        let url = format!("{}{}", self.base_url, SCRYFALL_COLLECTION_ENDPOINT);
        let body = serde_json::to_string(&CollectionRequest {
            identifiers: names.iter().map(|name| CardIdentifier::by_name(name)).collect(),
        })?;

        debug!("Requesting {} cards from {}", names.len(), url);
        let response = self
            .send_with_retry(|| {
                self.client
                    .post(&url)
                    .headers(Self::setup_http_headers())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.clone())
            })
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CardLookup for ScryfallClient {
    async fn find_named(&self, query: &NamedQuery) -> Result<Option<ScryfallCard>, LookupError> {
        let url = self.named_url(query);
        debug!("Looking up {}", url);
        let response = self
            .send_with_retry(|| self.client.get(&url).headers(Self::setup_http_headers()))
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("No card named '{}' on Scryfall", query.name);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Splits the names into requests Scryfall accepts and stitches the
    /// answers back together in request order.
    async fn find_collection(&self, names: &[String]) -> Result<CollectionResponse, LookupError> {
        if names.is_empty() {
            return Ok(CollectionResponse::default());
        }

        let chunks: Vec<&[String]> = names.chunks(self.batch_size).collect();
        info!(
            "Fetching {} names from Scryfall in {} request(s)",
            names.len(),
            chunks.len()
        );

        let requests: Vec<_> = chunks
            .into_iter()
            .map(|chunk| self.fetch_collection_chunk(chunk))
            .collect();
        stream::iter(requests)
            .buffered(self.concurrency)
            .try_fold(CollectionResponse::default(), |mut merged, next| async move {
                merged.extend(next);
                Ok(merged)
            })
            .await
    }
}
