use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};
use crate::models::{CatalogMovie, TmdbSearchResponse};
use crate::services::catalog::CatalogProvider;

/// TMDB-backed catalog provider.
///
/// A thin proxy over `GET /search/movie`. Responses are converted to
/// `CatalogMovie` and returned as-is; the catalog is never cached.
#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbCatalog {
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogMovie>> {
        if query.trim().is_empty() {
            return Err(AppError::Validation(
                "search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let payload: TmdbSearchResponse = response.json().await?;
        let movies: Vec<CatalogMovie> = payload
            .results
            .into_iter()
            .map(CatalogMovie::from)
            .collect();

        tracing::info!(query = %query, results = movies.len(), "Movie search completed");

        Ok(movies)
    }
}
