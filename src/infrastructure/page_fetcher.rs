//! Page fetching for source plugins
//!
//! A fetcher turns a (horizon, area code) pair into raw markup. The HTTP
//! fetcher talks to the real site; the fixture fetcher serves markup that
//! was loaded up front, for tests and offline runs.

use once_cell::sync::Lazy;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::config::{FetcherConfig, defaults};
use super::{ForecastError, ForecastResult};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Supplies raw markup for a forecast page
pub trait PageFetcher {
    /// `forecast` is the horizon's path value (`today`, `5days`, ...)
    fn fetch(&self, forecast: &str, area_code: &str) -> ForecastResult<String>;
}

/// True when the page `<title>` equals `marker`
pub fn is_not_found_page(markup: &str, marker: &str) -> bool {
    let document = Html::parse_document(markup);
    document
        .select(&TITLE_SELECTOR)
        .next()
        .is_some_and(|title| title.text().collect::<String>().trim() == marker)
}

/// Fill `{forecast}` and `{area}` in a URL template and validate the result
pub fn build_url(template: &str, forecast: &str, area_code: &str) -> ForecastResult<Url> {
    let area_code = area_code.trim();
    if area_code.is_empty() {
        return Err(ForecastError::configuration("area code must not be empty"));
    }

    let url = template
        .replace("{forecast}", forecast)
        .replace("{area}", area_code);

    Url::parse(&url).map_err(|e| ForecastError::configuration(format!("invalid page URL '{url}': {e}")))
}

/// Blocking HTTP fetcher for one URL template
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    url_template: String,
    not_found_marker: String,
}

impl HttpPageFetcher {
    pub fn new(url_template: &str, config: &FetcherConfig) -> ForecastResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ForecastError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url_template: url_template.to_string(),
            not_found_marker: config.not_found_marker.clone(),
        })
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, forecast: &str, area_code: &str) -> ForecastResult<String> {
        let url = build_url(&self.url_template, forecast, area_code)?;
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ForecastError::fetch(url.as_str(), e))?;

        let status = response.status();
        debug!("{} answered {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(ForecastError::area_not_found(area_code, url.as_str()));
        }
        if !status.is_success() {
            return Err(ForecastError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let markup = response
            .text()
            .map_err(|e| ForecastError::fetch(url.as_str(), e))?;

        if is_not_found_page(&markup, &self.not_found_marker) {
            return Err(ForecastError::area_not_found(area_code, url.as_str()));
        }

        debug!("Received {} bytes from {}", markup.len(), url);
        Ok(markup)
    }
}

/// Serves the same pre-loaded markup for every request
#[derive(Debug, Clone)]
pub struct FixturePageFetcher {
    markup: String,
    not_found_marker: String,
}

impl FixturePageFetcher {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            not_found_marker: defaults::NOT_FOUND_MARKER.to_string(),
        }
    }

    pub fn from_file(path: &Path) -> ForecastResult<Self> {
        let markup = std::fs::read_to_string(path)
            .map_err(|e| ForecastError::configuration(format!("cannot read fixture {}: {e}", path.display())))?;
        Ok(Self::new(markup))
    }

    #[must_use]
    pub fn with_not_found_marker(mut self, marker: &str) -> Self {
        self.not_found_marker = marker.to_string();
        self
    }
}

impl PageFetcher for FixturePageFetcher {
    fn fetch(&self, forecast: &str, area_code: &str) -> ForecastResult<String> {
        debug!("Serving fixture markup for {} / {}", forecast, area_code);
        if is_not_found_page(&self.markup, &self.not_found_marker) {
            return Err(ForecastError::area_not_found(area_code, &format!("fixture:{forecast}")));
        }
        Ok(self.markup.clone())
    }
}
