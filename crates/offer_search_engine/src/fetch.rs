use std::time::Duration;

use futures_util::StreamExt;
use offer_search_core::{FilterSet, Offer};
use search_logging::{search_debug, search_info};

use crate::query::encode_query;
use crate::{decode_offers, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Base URL of the REST backend, without the `/offers` path.
    pub api_host: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_host: "http://localhost:8087".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    pub(crate) fn endpoint(&self, path: &str) -> Result<reqwest::Url, FetchError> {
        let raw = format!("{}/{}", self.api_host.trim_end_matches('/'), path);
        reqwest::Url::parse(&raw)
            .map_err(|err| FetchError::new(FailureKind::Unexpected, format!("{raw}: {err}")))
    }
}

/// Builds the HTTP client shared by the fetcher and the visibility service.
///
/// The cookie store carries the session credentials between requests.
pub fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .cookie_store(true)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Unexpected, err.to_string()))
}

#[async_trait::async_trait]
pub trait OfferFetcher: Send + Sync {
    /// Fetches one page of offers matching `filters`, starting at `offset`.
    ///
    /// Performs exactly one request and never retries.
    async fn fetch(&self, filters: &FilterSet, offset: u64) -> Result<Vec<Offer>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestOfferFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestOfferFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: FetchSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl OfferFetcher for ReqwestOfferFetcher {
    async fn fetch(&self, filters: &FilterSet, offset: u64) -> Result<Vec<Offer>, FetchError> {
        let mut url = self.settings.endpoint("offers")?;
        url.set_query(Some(&encode_query(filters, offset)));
        search_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            search_info!("offer search offset={} failed with {}", offset, status);
            return Err(FetchError::new(
                FailureKind::BadResponse(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = read_capped_body(response, self.settings.max_bytes).await?;
        let offers = decode_offers(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Unexpected, err.to_string()))?;
        search_info!(
            "offer search offset={} returned {} offers ({} bytes)",
            offset,
            offers.len(),
            bytes.len()
        );
        Ok(offers)
    }
}

/// Reads the whole body, failing once it grows past `max_bytes`.
pub(crate) async fn read_capped_body(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, FetchError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(max_bytes, content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(max_bytes, next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::Unexpected,
        format!("response too large (max {max_bytes}, actual {actual})"),
    )
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::new(FailureKind::Unexpected, err.to_string());
    }
    FetchError::new(FailureKind::NetworkFailure, err.to_string())
}
