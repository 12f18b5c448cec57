use std::collections::HashMap;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::utils::logging::log_fetch_progress;

const BASE_URL: &str = "http://api.geonames.org";

/// Page size for the paginated place search.
pub const PAGE_SIZE: usize = 1000;
/// Ceiling on simultaneous in-flight timezone lookups.
pub const MAX_CONCURRENT_LOOKUPS: usize = 50;
/// Connection pool cap for the GeoNames HTTP client.
const MAX_IDLE_CONNECTIONS: usize = 100;

/// GeoNames feature codes that describe populated places.
const CITY_FEATURE_CODES: [&str; 5] = ["PPL", "PPLA", "PPLA2", "PPLA3", "PPLA4"];

/// One place record from the search endpoint.
///
/// GeoNames serves coordinates as strings; they are passed through to the
/// timezone endpoint untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    /// Display name of the place.
    #[serde(default)]
    pub name: String,
    /// Latitude, as served by the API.
    #[serde(default)]
    pub lat: String,
    /// Longitude, as served by the API.
    #[serde(default)]
    pub lng: String,
    /// Feature code classifying the place (PPL, ADM1, ...).
    #[serde(default)]
    pub fcode: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    geonames: Vec<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
struct TimezoneResponse {
    #[serde(rename = "timezoneId")]
    timezone_id: Option<String>,
}

/// A paginated place search plus a per-coordinate timezone lookup.
///
/// The build loop is written against this trait so it can be exercised
/// without network access.
#[allow(async_fn_in_trait)]
pub trait PlacesSource {
    /// Fetches one page of place records starting at `start_row`.
    async fn search_page(&self, start_row: usize) -> Result<Vec<PlaceRecord>>;
    /// Looks up the timezone identifier for a coordinate pair.
    async fn timezone(&self, lat: &str, lng: &str) -> Result<Option<String>>;
}

/// GeoNames REST client, credentialed by a username query parameter.
pub struct GeonamesClient {
    http: reqwest::Client,
    username: String,
}

impl GeonamesClient {
    /// Builds a client with a bounded connection pool.
    pub fn new(username: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            username: username.into(),
        })
    }
}

impl PlacesSource for GeonamesClient {
    async fn search_page(&self, start_row: usize) -> Result<Vec<PlaceRecord>> {
        let max_rows = PAGE_SIZE.to_string();
        let start_row = start_row.to_string();

        let response: SearchResponse = self
            .http
            .get(format!("{BASE_URL}/searchJSON"))
            .query(&[
                ("country", "RU"),
                ("featureClass", "P"),
                ("maxRows", max_rows.as_str()),
                ("startRow", start_row.as_str()),
                ("username", self.username.as_str()),
                ("lang", "ru"),
            ])
            .send()
            .await
            .context("place search request failed")?
            .json()
            .await
            .context("place search returned malformed JSON")?;

        Ok(response.geonames)
    }

    async fn timezone(&self, lat: &str, lng: &str) -> Result<Option<String>> {
        let response: TimezoneResponse = self
            .http
            .get(format!("{BASE_URL}/timezoneJSON"))
            .query(&[
                ("lat", lat),
                ("lng", lng),
                ("username", self.username.as_str()),
            ])
            .send()
            .await
            .context("timezone lookup request failed")?
            .json()
            .await
            .context("timezone lookup returned malformed JSON")?;

        Ok(response.timezone_id)
    }
}

fn is_city(record: &PlaceRecord) -> bool {
    !record.name.is_empty()
        && !record.lat.is_empty()
        && !record.lng.is_empty()
        && CITY_FEATURE_CODES.contains(&record.fcode.as_str())
}

/// Pages through the place search and builds the city → timezone table.
///
/// Pages are fetched one at a time; within a page, timezone lookups for all
/// kept records run concurrently under a [`MAX_CONCURRENT_LOOKUPS`]-permit
/// semaphore and are awaited as a batch before the next page. Failed or
/// empty lookups are skipped; duplicate names resolve last-write-wins.
pub async fn collect_city_timezones<S: PlacesSource>(source: &S) -> Result<HashMap<String, String>> {
    let semaphore = Semaphore::new(MAX_CONCURRENT_LOOKUPS);
    let started = Instant::now();
    let mut table = HashMap::new();
    let mut resolved = 0usize;
    let mut start_row = 0;

    loop {
        let page = source.search_page(start_row).await?;
        if page.is_empty() {
            break;
        }
        debug!("fetched {} place records at offset {}", page.len(), start_row);

        let lookups = page.iter().filter(|record| is_city(record)).map(|record| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                match source.timezone(&record.lat, &record.lng).await {
                    Ok(Some(tz)) => Some((record.name.clone(), tz)),
                    Ok(None) => None,
                    Err(error) => {
                        warn!("timezone lookup for '{}' failed: {error:#}", record.name);
                        None
                    }
                }
            }
        });

        for (name, tz) in join_all(lookups).await.into_iter().flatten() {
            table.insert(name, tz);
            resolved += 1;
            if resolved % 100 == 0 {
                log_fetch_progress(resolved, started.elapsed());
            }
        }

        start_row += PAGE_SIZE;
    }

    Ok(table)
}
