use serde::{Deserialize, Deserializer, Serialize};

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AdminProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub admin: Option<AdminProfile>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    Movie,
    Series,
}

impl CatalogKind {
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Movie => "Movie",
            CatalogKind::Series => "Series",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Movie => "movie",
            CatalogKind::Series => "series",
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogEntry {
    pub title: String,
    pub year: String,
    pub download_url: String,
    #[serde(rename = "type")]
    pub kind: CatalogKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    #[serde(other)]
    Other,
}

/// One entry of a TMDB multi-search response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    pub media_type: MediaType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl SearchResult {
    pub fn display_title(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or_default()
    }

    pub fn year(&self) -> String {
        non_empty(&self.release_date)
            .or_else(|| non_empty(&self.first_air_date))
            .and_then(|date| date.split('-').next())
            .map(str::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn poster_url(&self) -> Option<String> {
        non_empty(&self.poster_path).map(|path| format!("{IMAGE_BASE}{path}"))
    }

    pub fn kind(&self) -> CatalogKind {
        match self.media_type {
            MediaType::Tv => CatalogKind::Series,
            _ => CatalogKind::Movie,
        }
    }

    pub fn rating(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    pub fn is_catalogable(&self) -> bool {
        matches!(self.media_type, MediaType::Movie | MediaType::Tv)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: CatalogKind,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFeaturedEntry {
    pub movie_id: u64,
    pub title: String,
    pub year: String,
    pub download_url: String,
    #[serde(rename = "type")]
    pub kind: CatalogKind,
    pub poster: Option<String>,
    pub overview: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_movies: u64,
    pub total_series: u64,
    pub pending_uploads: u64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: serde_json::Value) -> SearchResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn search_result_prefers_title_then_name() {
        let movie = result(json!({"id": 1, "media_type": "movie", "title": "Dune"}));
        let show = result(json!({"id": 2, "media_type": "tv", "name": "Severance"}));
        assert_eq!(movie.display_title(), "Dune");
        assert_eq!(show.display_title(), "Severance");
        assert_eq!(show.kind(), CatalogKind::Series);
    }

    #[test]
    fn year_falls_back_to_first_air_date_and_na() {
        let show = result(json!({
            "id": 2, "media_type": "tv", "release_date": "", "first_air_date": "2022-02-18"
        }));
        let unknown = result(json!({"id": 3, "media_type": "movie"}));
        assert_eq!(show.year(), "2022");
        assert_eq!(unknown.year(), "N/A");
    }

    #[test]
    fn unknown_media_types_are_not_catalogable() {
        let person = result(json!({"id": 4, "media_type": "person", "name": "Zendaya"}));
        assert_eq!(person.media_type, MediaType::Other);
        assert!(!person.is_catalogable());
    }

    #[test]
    fn poster_url_joins_image_host() {
        let movie = result(json!({"id": 1, "media_type": "movie", "poster_path": "/d5.jpg"}));
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/d5.jpg")
        );
    }

    #[test]
    fn featured_year_accepts_numbers() {
        let entry: FeaturedEntry = serde_json::from_value(json!({
            "_id": "abc", "title": "Dune", "year": 2021, "type": "movie",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.year, "2021");
        assert_eq!(entry.kind, CatalogKind::Movie);
    }

    #[test]
    fn new_entry_serializes_wire_names() {
        let entry = NewCatalogEntry {
            title: "Dune".into(),
            year: "2021".into(),
            download_url: "https://x/y".into(),
            kind: CatalogKind::Series,
            genre: None,
            description: None,
            movie_id: Some(7),
            poster: None,
            overview: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["downloadUrl"], "https://x/y");
        assert_eq!(value["type"], "series");
        assert_eq!(value["movieId"], 7);
        assert!(value.get("genre").is_none());
    }
}
