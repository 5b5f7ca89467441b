//! Remote catalog access.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::filters::{BrandSelector, matches_text};
use crate::vehicles::{Vehicle, VehicleId};

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}

/// Retry behaviour for catalog requests.
///
/// Retries apply to transport failures only; a response with an unexpected
/// status is returned as-is. The backoff grows linearly with the attempt
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of tries. Values below 1 behave as 1.
    pub attempts: u32,

    /// Base delay between tries.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        RetryPolicy {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Delay to wait after the given 1-based attempt has failed.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Configuration for connecting to the catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Backend base URL, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Per-request timeout, bounding a hung transport.
    pub timeout: Duration,

    /// Retry behaviour for transport failures.
    pub retry: RetryPolicy,
}

impl CatalogClientConfig {
    /// Creates a configuration with the default timeout and retry policy.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogClientConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Read access to the vehicle catalog.
///
/// Absence and failure are distinct here: an unknown id is `Ok(None)`, a
/// broken transport is `Err`. Consumers that want the storefront's fail-soft
/// behaviour go through [`fetch_all_soft`] and friends instead of calling the
/// source directly.
#[automock]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Retrieves the full catalog.
    async fn fetch_all(&self) -> Result<Vec<Vehicle>, CatalogError>;

    /// Retrieves a single vehicle, `Ok(None)` when the id is unknown.
    async fn fetch_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, CatalogError>;
}

/// HTTP client for the catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    config: CatalogClientConfig,
    http: Client,
}

impl CatalogClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(CatalogClient { config, http })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &CatalogClientConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        let mut attempt: u32 = 1;

        loop {
            match self.http.get(url).send().await {
                Ok(response) => return Ok(response),
                Err(error) if attempt < self.config.retry.attempts => {
                    let delay = self.config.retry.delay_after(attempt);

                    tracing::warn!(%error, attempt, ?delay, "catalog request failed, retrying");
                    tokio::time::sleep(delay).await;

                    attempt += 1;
                }
                Err(error) => return Err(CatalogError::Http(error)),
            }
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_all(&self) -> Result<Vec<Vehicle>, CatalogError> {
        let url = vehicles_url(&self.config.base_url);
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "catalog list failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, CatalogError> {
        let url = vehicle_url(&self.config.base_url, id);
        let response = self.get(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "catalog lookup for {id} failed with status {status}: {text}"
            )));
        }

        Ok(Some(response.json().await?))
    }
}

fn vehicles_url(base: &str) -> String {
    format!("{}/cars", base.trim_end_matches('/'))
}

fn vehicle_url(base: &str, id: &VehicleId) -> String {
    format!("{}/cars/{id}", base.trim_end_matches('/'))
}

/// Fetches the full catalog, serving an empty snapshot on failure.
///
/// This is the storefront's fail-soft contract: a broken backend renders as
/// "no vehicles", never as an error surfaced to the browsing flow. The
/// failure itself is logged.
pub async fn fetch_all_soft(source: &impl CatalogSource) -> Catalog {
    match source.fetch_all().await {
        Ok(vehicles) => Catalog::new(vehicles),
        Err(error) => {
            tracing::warn!(%error, "catalog fetch failed, serving an empty catalog");
            Catalog::empty()
        }
    }
}

/// Fetches a single vehicle, treating failure like an unknown id.
pub async fn fetch_by_id_soft(source: &impl CatalogSource, id: &VehicleId) -> Option<Vehicle> {
    match source.fetch_by_id(id).await {
        Ok(vehicle) => vehicle,
        Err(error) => {
            tracing::warn!(%error, %id, "vehicle fetch failed, treating as absent");
            None
        }
    }
}

/// Fetches the catalog and applies the free-text predicate to it.
///
/// Inherits the fail-soft behaviour of [`fetch_all_soft`]: a failed fetch
/// yields no results.
pub async fn search_remote(source: &impl CatalogSource, query: &str) -> Vec<Vehicle> {
    let catalog = fetch_all_soft(source).await;

    catalog
        .iter()
        .filter(|vehicle| matches_text(vehicle, query))
        .cloned()
        .collect()
}

/// Fetches the catalog and keeps a single brand, case-insensitively.
///
/// Inherits the fail-soft behaviour of [`fetch_all_soft`]: a failed fetch
/// yields no results.
pub async fn filter_by_brand_remote(source: &impl CatalogSource, brand: &str) -> Vec<Vehicle> {
    let selector = BrandSelector::only(brand);
    let catalog = fetch_all_soft(source).await;

    catalog
        .iter()
        .filter(|vehicle| selector.matches(vehicle.brand()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::prices::Price;

    use super::*;

    fn vehicle(id: &str, name: &str) -> Vehicle {
        Vehicle::new(
            id,
            "Ferrari",
            name,
            "A very fast car.",
            Price::new(430_000),
            format!("https://img.example/{id}.jpg"),
        )
    }

    fn unavailable() -> CatalogError {
        CatalogError::UnexpectedResponse("catalog list failed with status 503".to_owned())
    }

    #[test]
    fn endpoint_urls_tolerate_trailing_slashes() {
        assert_eq!(
            vehicles_url("https://api.example.com/"),
            "https://api.example.com/cars"
        );
        assert_eq!(
            vehicle_url("https://api.example.com", &"sf90".into()),
            "https://api.example.com/cars/sf90"
        );
    }

    #[test]
    fn retry_backoff_grows_linearly() {
        let retry = RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(500),
        };

        assert_eq!(retry.delay_after(1), Duration::from_millis(500));
        assert_eq!(retry.delay_after(2), Duration::from_millis(1000));
    }

    #[test]
    fn no_retry_policy_has_a_single_attempt() {
        let retry = RetryPolicy::none();

        assert_eq!(retry.attempts, 1);
        assert_eq!(retry.delay_after(1), Duration::ZERO);
    }

    #[tokio::test]
    async fn fetch_all_soft_serves_empty_on_failure() {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_all().returning(|| Err(unavailable()));

        let catalog = fetch_all_soft(&source).await;

        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn fetch_all_soft_passes_vehicles_through() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_all()
            .returning(|| Ok(vec![vehicle("sf90", "Ferrari SF90 Stradale")]));

        let catalog = fetch_all_soft(&source).await;

        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn fetch_by_id_soft_treats_failure_as_absent() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_by_id()
            .returning(|_| Err(unavailable()));

        let found = fetch_by_id_soft(&source, &"sf90".into()).await;

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fetch_by_id_soft_passes_absence_through() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_by_id()
            .withf(|id| id.as_str() == "ghost")
            .returning(|_| Ok(None));

        let found = fetch_by_id_soft(&source, &"ghost".into()).await;

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn search_remote_applies_the_text_predicate() {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_all().returning(|| {
            Ok(vec![
                vehicle("sf90", "Ferrari SF90 Stradale"),
                vehicle("296", "Ferrari 296 GTB"),
            ])
        });

        let hits = search_remote(&source, "sf90").await;

        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(Vehicle::name), Some("Ferrari SF90 Stradale"));
    }

    #[tokio::test]
    async fn search_remote_with_failed_fetch_is_empty() {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_all().returning(|| Err(unavailable()));

        let hits = search_remote(&source, "ferrari").await;

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn filter_by_brand_remote_ignores_case() {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_all().returning(|| {
            Ok(vec![
                vehicle("sf90", "Ferrari SF90 Stradale"),
                Vehicle::new(
                    "765lt",
                    "McLaren",
                    "McLaren 765LT",
                    "A very light car.",
                    Price::new(390_000),
                    "https://img.example/765lt.jpg",
                ),
            ])
        });

        let hits = filter_by_brand_remote(&source, "mclaren").await;

        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(Vehicle::brand), Some("McLaren"));
    }

    #[test]
    fn client_config_defaults_are_sane() -> TestResult {
        let config = CatalogClientConfig::new("https://api.example.com");
        let client = CatalogClient::new(config)?;

        assert_eq!(client.config().timeout, Duration::from_secs(10));
        assert_eq!(client.config().retry.attempts, 3);

        Ok(())
    }
}
