use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie as returned by catalog search, trimmed to the fields the
/// frontend needs to render results and save favorites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: f64,
    pub release_date: Option<NaiveDate>,
    pub overview: Option<String>,
}

/// Raw response from TMDB's `GET /search/movie`
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbMovie>,
}

/// One entry of a TMDB search response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<TmdbMovie> for CatalogMovie {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB reports unannounced release dates as an empty string
        let release_date = movie
            .release_date
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok());

        CatalogMovie {
            tmdb_id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            rating: movie.vote_average,
            release_date,
            overview: movie.overview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmdb_movie() -> TmdbMovie {
        TmdbMovie {
            id: 27205,
            title: "Inception".to_string(),
            poster_path: Some("/inception.jpg".to_string()),
            vote_average: 8.3,
            release_date: Some("2010-07-15".to_string()),
            overview: Some("A thief who steals corporate secrets".to_string()),
        }
    }

    #[test]
    fn test_tmdb_movie_to_catalog_movie() {
        let movie: CatalogMovie = tmdb_movie().into();

        assert_eq!(movie.tmdb_id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.poster_path, Some("/inception.jpg".to_string()));
        assert_eq!(movie.rating, 8.3);
        assert_eq!(movie.release_date, "2010-07-15".parse().ok());
    }

    #[test]
    fn test_empty_release_date_becomes_none() {
        let mut raw = tmdb_movie();
        raw.release_date = Some(String::new());

        let movie: CatalogMovie = raw.into();
        assert_eq!(movie.release_date, None);
    }

    #[test]
    fn test_unparseable_release_date_becomes_none() {
        let mut raw = tmdb_movie();
        raw.release_date = Some("2010".to_string());

        let movie: CatalogMovie = raw.into();
        assert_eq!(movie.release_date, None);
    }

    #[test]
    fn test_search_response_deserializes_sparse_entries() {
        let payload = r#"{"results":[{"id":603,"title":"The Matrix"}]}"#;
        let response: TmdbSearchResponse = serde_json::from_str(payload).unwrap();

        assert_eq!(response.results.len(), 1);
        let movie: CatalogMovie = response.results[0].clone().into();
        assert_eq!(movie.tmdb_id, 603);
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.release_date, None);
    }
}
