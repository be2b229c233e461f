//! Yelp Fusion business search

use super::{QueryParams, SearchError, SearchProvider, SearchResults};
use crate::state_machine::state::Business;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.yelp.com";
const DEFAULT_LIMIT: u32 = 50;
/// Upper bound on `$` tiers
const MAX_PRICE_TIER: u8 = 4;

/// Configuration for the Yelp client
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub limit: u32,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout: Duration::from_secs(10),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("YELP_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("YELP_API_BASE").unwrap_or(defaults.base_url),
            limit: std::env::var("YELP_SEARCH_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.limit),
            timeout: defaults.timeout,
        }
    }
}

/// Yelp search client
pub struct YelpService {
    client: Client,
    config: SearchConfig,
    search_url: String,
}

impl YelpService {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to create HTTP client: {e}")))?;
        let search_url = format!(
            "{}/v3/businesses/search",
            config.base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            config,
            search_url,
        })
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> SearchError {
        match status.as_u16() {
            401 | 403 => SearchError::auth(format!("Authentication failed: {body}")),
            429 => SearchError::rate_limit(format!("Rate limited: {body}")),
            400 => SearchError::invalid_request(format!("Invalid request: {body}")),
            500..=599 => SearchError::server_error(format!("Server error: {body}")),
            _ => SearchError::unknown(format!("HTTP {status}: {body}")),
        }
    }
}

/// Query string for a search. The rating filter is not a provider
/// parameter and is never sent.
pub fn query_pairs(params: &QueryParams, limit: u32) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("term", "restaurants".to_string()),
        ("limit", limit.to_string()),
    ];
    if let Some(location) = &params.location {
        pairs.push(("location", location.clone()));
    }
    if let Some(categories) = params.categories_query() {
        pairs.push(("categories", categories));
    }
    if params.open_now {
        pairs.push(("open_now", "true".to_string()));
    }
    if let Some(price) = params.price {
        pairs.push(("price", price.query_value().to_string()));
    }
    pairs
}

/// Map the wire response into results, applying the rating filter
pub fn to_results(response: YelpSearchResponse, params: &QueryParams) -> SearchResults {
    tracing::debug!(
        provider_total = response.total,
        returned = response.businesses.len(),
        "Mapping search response"
    );
    let businesses: Vec<Business> = response
        .businesses
        .into_iter()
        .map(YelpBusiness::into_business)
        .filter(|b| params.rating.map_or(true, |r| r.contains(b.rating)))
        .collect();

    SearchResults {
        total: businesses.len(),
        businesses,
    }
}

#[async_trait]
impl SearchProvider for YelpService {
    async fn search(&self, params: &QueryParams) -> Result<SearchResults, SearchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::auth("YELP_API_KEY is not configured"))?;

        let response = self
            .client
            .get(&self.search_url)
            .bearer_auth(api_key)
            .query(&query_pairs(params, self.config.limit))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    SearchError::network(format!("Connection failed: {e}"))
                } else {
                    SearchError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let parsed: YelpSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::unknown(format!("Failed to parse response: {e}")))?;

        Ok(to_results(parsed, params))
    }

    fn provider_id(&self) -> &str {
        "yelp"
    }
}

// Yelp API types

#[derive(Debug, Deserialize)]
pub struct YelpSearchResponse {
    /// Pre-filter match count; the filtered length is reported instead
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Deserialize)]
pub struct YelpBusiness {
    name: String,
    #[serde(default)]
    location: YelpLocation,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    review_count: u32,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    is_closed: bool,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct YelpLocation {
    #[serde(default)]
    address1: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

impl YelpBusiness {
    fn into_business(self) -> Business {
        let price = self.price.as_deref().map_or(0, |p| {
            u8::try_from(p.chars().count())
                .unwrap_or(MAX_PRICE_TIER)
                .min(MAX_PRICE_TIER)
        });

        Business {
            name: self.name,
            address: self.location.address1.unwrap_or_default(),
            city: self.location.city.unwrap_or_default(),
            rating: self.rating,
            review_count: self.review_count,
            price,
            is_closed: self.is_closed,
            distance: self.distance.unwrap_or_default(),
            phone: self.phone.filter(|p| !p.is_empty()),
            url: self.url,
        }
    }
}
