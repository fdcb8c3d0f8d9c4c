use crate::catalog::RadarCatalog;

/// Public feed of French speed cameras.
pub const RADAR_FEED_URL: &str = "https://cdn.statically.io/gh/PoivronPoivreux/cdn/main/all.json";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),
    #[error("radar feed is not a list of radars: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the radar catalog comes from.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    client: reqwest::Client,
    url: String,
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new(RADAR_FEED_URL)
    }
}

impl CatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        CatalogSource {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single GET of the feed. No retry.
    pub async fn fetch(&self) -> Result<RadarCatalog, LoadError> {
        let request_error = |source| LoadError::Request {
            url: self.url.clone(),
            source,
        };

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let body = resp.text().await.map_err(request_error)?;
        Ok(RadarCatalog::from_json(&body)?)
    }

    /// Best-effort load: failures are logged and leave the catalog empty.
    pub async fn load(&self) -> RadarCatalog {
        match self.fetch().await {
            Ok(catalog) => {
                tracing::info!(radars = catalog.len(), url = %self.url, "Loaded radar catalog");
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching the radar data");
                RadarCatalog::empty()
            }
        }
    }
}
