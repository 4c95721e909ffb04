use crate::admin::errors::{self, ApiError, Fallback};
use crate::cancel::RequestScope;
use crate::env_variable_utils::{AppConfig, SearchEndpoint, TMDB_SEARCH_URL};
use crate::models::{
    AdminAccount, AdminProfile, CatalogStats, FeaturedEntry, NewCatalogEntry, NewFeaturedEntry,
    SearchResult, Session,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use urlencoding::encode;
use yew::{hook, use_context};

/// Calls the admin front end makes. One request per call, never retried.
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn login(
        &self,
        username: &str,
        password: &str,
        scope: &RequestScope,
    ) -> Result<LoginResponse, ApiError>;

    async fn list_movies(&self, scope: &RequestScope) -> Result<CatalogStats, ApiError>;

    async fn create_catalog_entry(
        &self,
        entry: &NewCatalogEntry,
        scope: &RequestScope,
    ) -> Result<(), ApiError>;

    async fn search_external(
        &self,
        query: &str,
        scope: &RequestScope,
    ) -> Result<Vec<SearchResult>, ApiError>;

    async fn list_featured(&self, scope: &RequestScope) -> Result<Vec<FeaturedEntry>, ApiError>;

    async fn create_featured(
        &self,
        entry: &NewFeaturedEntry,
        token: &str,
        scope: &RequestScope,
    ) -> Result<(), ApiError>;

    async fn delete_featured(
        &self,
        id: &str,
        token: &str,
        scope: &RequestScope,
    ) -> Result<(), ApiError>;

    async fn create_admin(
        &self,
        account: &AdminAccount,
        scope: &RequestScope,
    ) -> Result<(), ApiError>;
}

/// Client shared with components through a Yew context.
#[derive(Clone)]
pub struct ApiContext(pub Rc<dyn CatalogApi>);

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[hook]
pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext must be provided by the App")
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub admin: Option<AdminProfile>,
}

impl LoginResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            admin: self.admin,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoviesResponse {
    #[serde(default)]
    movies: serde_json::Value,
    #[serde(default)]
    total_movies: Option<u64>,
    #[serde(default)]
    total_series: Option<u64>,
    #[serde(default)]
    pending_uploads: Option<u64>,
}

impl From<MoviesResponse> for CatalogStats {
    fn from(response: MoviesResponse) -> Self {
        let listed = response.movies.as_array().map_or(0, Vec::len) as u64;
        Self {
            total_movies: response.total_movies.filter(|n| *n > 0).unwrap_or(listed),
            total_series: response.total_series.unwrap_or(0),
            pending_uploads: response.pending_uploads.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FeaturedResponse {
    #[serde(default)]
    movies: Vec<serde_json::Value>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, body: &str, fallback: &Fallback) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => ApiError::Api { status, message },
        Ok(_) => ApiError::Api {
            status,
            message: fallback.rejected.to_string(),
        },
        Err(e) => {
            log::error!("Unreadable error body (HTTP {}): {}", status, e);
            ApiError::Network(fallback.unreachable.to_string())
        }
    }
}

fn decode<T: DeserializeOwned>(status: u16, body: &str, fallback: &Fallback) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(rejection(status, body, fallback));
    }
    serde_json::from_str(body).map_err(|e| {
        log::error!("JSON parse error: {}", e);
        ApiError::Network(fallback.unreachable.to_string())
    })
}

fn expect_success(status: u16, body: &str, fallback: &Fallback) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(rejection(status, body, fallback))
    }
}

fn decode_login(status: u16, body: &str) -> Result<LoginResponse, ApiError> {
    match decode(status, body, &errors::LOGIN) {
        Err(ApiError::Api { message, .. }) => Err(ApiError::Auth(message)),
        other => other,
    }
}

/// Entries that fail to decode are skipped so the rest still show.
fn featured_entries(response: FeaturedResponse) -> Vec<FeaturedEntry> {
    let entries = response
        .movies
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value::<FeaturedEntry>(value)
                .map_err(|e| log::warn!("Skipping unreadable featured entry: {}", e))
                .ok()
        })
        .collect();
    newest_first(entries)
}

fn catalogable(response: SearchResponse) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .filter_map(|value| serde_json::from_value::<SearchResult>(value).ok())
        .filter(SearchResult::is_catalogable)
        .collect()
}

/// Sorts by `createdAt`, newest first. Equal timestamps keep server order;
/// unparseable ones go last.
pub fn newest_first(mut entries: Vec<FeaturedEntry>) -> Vec<FeaturedEntry> {
    entries.sort_by_key(|entry| {
        std::cmp::Reverse(
            entry
                .created_at
                .parse::<DateTime<Utc>>()
                .ok()
                .map(|t| t.timestamp_millis()),
        )
    });
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Method, backend path and `Authorization` value of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authorization: None,
        }
    }

    fn bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("Bearer {token}"));
        self
    }

    pub fn login() -> Self {
        Self::new(Method::Post, "/admin/login")
    }

    pub fn create_admin() -> Self {
        Self::new(Method::Post, "/admin/register")
    }

    pub fn list_movies() -> Self {
        Self::new(Method::Get, "/movies")
    }

    pub fn create_catalog_entry() -> Self {
        Self::new(Method::Post, "/new_movies")
    }

    pub fn list_featured() -> Self {
        Self::new(Method::Get, "/movie_of_week")
    }

    pub fn create_featured(token: &str) -> Self {
        Self::new(Method::Post, "/movie_of_week").bearer(token)
    }

    pub fn delete_featured(id: &str, token: &str) -> Self {
        Self::new(Method::Delete, format!("/movie_of_week/{}", encode(id))).bearer(token)
    }
}

pub struct HttpCatalogClient {
    backend_url: String,
    search: SearchEndpoint,
}

impl HttpCatalogClient {
    pub fn new(config: &AppConfig) -> Self {
        if matches!(config.search, SearchEndpoint::Direct { .. }) {
            log::warn!("TMDB_API_KEY is exposed to the browser; prefer SEARCH_URL");
        }
        Self {
            backend_url: config.backend_url.clone(),
            search: config.search.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }

    fn search_url(&self, query: &str) -> String {
        match &self.search {
            SearchEndpoint::Proxy { url } => {
                let separator = if url.contains('?') { '&' } else { '?' };
                format!("{url}{separator}query={}", encode(query))
            }
            SearchEndpoint::Direct { api_key } => format!(
                "{TMDB_SEARCH_URL}?api_key={}&query={}",
                encode(api_key),
                encode(query)
            ),
        }
    }

    fn request(&self, endpoint: &Endpoint, scope: &RequestScope) -> RequestBuilder {
        let url = self.url(&endpoint.path);
        let builder = match endpoint.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };
        let builder = match &endpoint.authorization {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        };
        Self::scoped(builder, scope)
    }

    fn scoped(builder: RequestBuilder, scope: &RequestScope) -> RequestBuilder {
        let signal = scope.signal();
        builder.abort_signal(signal.as_ref())
    }

    async fn send(
        &self,
        request: Result<Request, gloo_net::Error>,
        scope: &RequestScope,
        fallback: &Fallback,
    ) -> Result<(u16, String), ApiError> {
        let failed = |e: gloo_net::Error| {
            if scope.is_cancelled() {
                return ApiError::Cancelled;
            }
            log::error!("Network error: {}", e);
            ApiError::Network(fallback.unreachable.to_string())
        };

        let response = request.map_err(failed)?.send().await.map_err(failed)?;
        let status = response.status();
        let body = response.text().await.map_err(failed)?;
        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalogClient {
    async fn login(
        &self,
        username: &str,
        password: &str,
        scope: &RequestScope,
    ) -> Result<LoginResponse, ApiError> {
        let request = self
            .request(&Endpoint::login(), scope)
            .json(&LoginRequest { username, password });
        let (status, body) = self.send(request, scope, &errors::LOGIN).await?;
        decode_login(status, &body)
    }

    async fn list_movies(&self, scope: &RequestScope) -> Result<CatalogStats, ApiError> {
        let request = self.request(&Endpoint::list_movies(), scope).build();
        let (status, body) = self.send(request, scope, &errors::LIST_MOVIES).await?;
        decode::<MoviesResponse>(status, &body, &errors::LIST_MOVIES).map(CatalogStats::from)
    }

    async fn create_catalog_entry(
        &self,
        entry: &NewCatalogEntry,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        let fallback = if entry.movie_id.is_some() {
            &errors::LINK_ENTRY
        } else {
            &errors::CREATE_ENTRY
        };
        let request = self.request(&Endpoint::create_catalog_entry(), scope).json(entry);
        let (status, body) = self.send(request, scope, fallback).await?;
        expect_success(status, &body, fallback)
    }

    async fn search_external(
        &self,
        query: &str,
        scope: &RequestScope,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let request = Self::scoped(Request::get(&self.search_url(query)), scope).build();
        let (status, body) = self.send(request, scope, &errors::SEARCH).await?;
        decode::<SearchResponse>(status, &body, &errors::SEARCH).map(catalogable)
    }

    async fn list_featured(&self, scope: &RequestScope) -> Result<Vec<FeaturedEntry>, ApiError> {
        let request = self.request(&Endpoint::list_featured(), scope).build();
        let (status, body) = self.send(request, scope, &errors::LIST_FEATURED).await?;
        decode::<FeaturedResponse>(status, &body, &errors::LIST_FEATURED).map(featured_entries)
    }

    async fn create_featured(
        &self,
        entry: &NewFeaturedEntry,
        token: &str,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        let request = self
            .request(&Endpoint::create_featured(token), scope)
            .json(entry);
        let (status, body) = self.send(request, scope, &errors::CREATE_FEATURED).await?;
        expect_success(status, &body, &errors::CREATE_FEATURED)
    }

    async fn delete_featured(
        &self,
        id: &str,
        token: &str,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        let request = self
            .request(&Endpoint::delete_featured(id, token), scope)
            .build();
        let (status, _) = self.send(request, scope, &errors::DELETE_FEATURED).await?;
        if is_success(status) {
            Ok(())
        } else {
            Err(ApiError::Api {
                status,
                message: errors::DELETE_FEATURED.rejected.to_string(),
            })
        }
    }

    async fn create_admin(
        &self,
        account: &AdminAccount,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        let request = self.request(&Endpoint::create_admin(), scope).json(account);
        let (status, body) = self.send(request, scope, &errors::CREATE_ADMIN).await?;
        expect_success(status, &body, &errors::CREATE_ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogKind, MediaType};
    use serde_json::json;

    fn stats(body: serde_json::Value) -> CatalogStats {
        decode::<MoviesResponse>(200, &body.to_string(), &errors::LIST_MOVIES)
            .map(CatalogStats::from)
            .unwrap()
    }

    #[test]
    fn stats_use_server_counts_when_present() {
        let s = stats(json!({"totalMovies": 12, "totalSeries": 3, "pendingUploads": 1}));
        assert_eq!(
            s,
            CatalogStats {
                total_movies: 12,
                total_series: 3,
                pending_uploads: 1
            }
        );
    }

    #[test]
    fn stats_fall_back_to_collection_length_and_zero() {
        let s = stats(json!({"movies": [{"title": "a"}, {"title": "b"}], "totalMovies": 0}));
        assert_eq!(s.total_movies, 2);
        assert_eq!(s.total_series, 0);
        assert_eq!(s.pending_uploads, 0);

        let not_a_list = stats(json!({"movies": "nope"}));
        assert_eq!(not_a_list, CatalogStats::default());
    }

    #[test]
    fn stats_are_idempotent_for_the_same_body() {
        let body = json!({"movies": [{}, {}, {}], "totalSeries": 4});
        assert_eq!(stats(body.clone()), stats(body));
    }

    #[test]
    fn rejection_prefers_body_message() {
        let err = expect_success(409, r#"{"message":"Duplicate title"}"#, &errors::CREATE_ENTRY);
        assert_eq!(
            err,
            Err(ApiError::Api {
                status: 409,
                message: "Duplicate title".to_string()
            })
        );

        let err = expect_success(500, "{}", &errors::CREATE_ENTRY).unwrap_err();
        assert_eq!(err.to_string(), "Failed to add content");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unreadable_error_body_is_a_network_error() {
        let err = expect_success(502, "<html>Bad gateway</html>", &errors::CREATE_ADMIN);
        assert_eq!(
            err,
            Err(ApiError::Network("Error connecting to server".to_string()))
        );
    }

    #[test]
    fn created_with_empty_body_is_success() {
        assert_eq!(expect_success(201, "", &errors::CREATE_ENTRY), Ok(()));
    }

    #[test]
    fn login_failures_become_auth_errors() {
        let err = decode_login(401, r#"{"message":"Wrong password"}"#).unwrap_err();
        assert_eq!(err, ApiError::Auth("Wrong password".to_string()));

        let err = decode_login(401, "{}").unwrap_err();
        assert_eq!(err, ApiError::Auth("Invalid username or password".to_string()));

        let err = decode_login(200, "not json").unwrap_err();
        assert_eq!(err, ApiError::Network("Failed to connect to server".to_string()));
    }

    #[test]
    fn login_success_builds_session() {
        let response =
            decode_login(200, r#"{"token":"t0k","admin":{"username":"root"}}"#).unwrap();
        let session = response.into_session();
        assert_eq!(session.token, "t0k");
        assert_eq!(session.admin.unwrap().username, "root");
    }

    #[test]
    fn search_keeps_only_movies_and_tv() {
        let body = json!({"results": [
            {"id": 1, "media_type": "movie", "title": "Dune"},
            {"id": 2, "media_type": "person", "name": "Denis Villeneuve"}
        ]});
        let results = decode::<SearchResponse>(200, &body.to_string(), &errors::SEARCH)
            .map(catalogable)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].media_type, MediaType::Movie);
    }

    #[test]
    fn search_without_results_is_empty_not_error() {
        let results = decode::<SearchResponse>(200, "{}", &errors::SEARCH)
            .map(catalogable)
            .unwrap();
        assert!(results.is_empty());
    }

    fn featured(id: &str, created_at: &str) -> FeaturedEntry {
        FeaturedEntry {
            id: id.to_string(),
            movie_id: None,
            title: id.to_uppercase(),
            year: "2021".to_string(),
            download_url: None,
            kind: CatalogKind::Movie,
            poster: None,
            overview: None,
            rating: None,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn featured_sorted_newest_first_with_stable_ties() {
        let sorted = newest_first(vec![
            featured("old", "2024-01-01T00:00:00Z"),
            featured("broken", "yesterday"),
            featured("tie-a", "2024-03-01T00:00:00Z"),
            featured("new", "2024-04-01T00:00:00Z"),
            featured("tie-b", "2024-03-01T00:00:00Z"),
        ]);
        let ids: Vec<_> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "tie-a", "tie-b", "old", "broken"]);
    }

    fn client(search: SearchEndpoint) -> HttpCatalogClient {
        HttpCatalogClient::new(&AppConfig {
            backend_url: "https://cat.example/api".to_string(),
            search,
            app_name: "test".to_string(),
            debug: false,
        })
    }

    #[test]
    fn search_url_goes_through_proxy_by_default() {
        let c = client(SearchEndpoint::Proxy {
            url: "https://cat.example/api/tmdb/search/multi".to_string(),
        });
        assert_eq!(
            c.search_url("star wars"),
            "https://cat.example/api/tmdb/search/multi?query=star%20wars"
        );
        assert_eq!(c.url("/movies"), "https://cat.example/api/movies");
    }

    #[test]
    fn direct_search_url_carries_key() {
        let c = client(SearchEndpoint::Direct {
            api_key: "secret".to_string(),
        });
        assert_eq!(
            c.search_url("dune"),
            "https://api.themoviedb.org/3/search/multi?api_key=secret&query=dune"
        );
    }

    #[test]
    fn featured_calls_carry_the_bearer_header() {
        let create = Endpoint::create_featured("tok");
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.path, "/movie_of_week");
        assert_eq!(create.authorization.as_deref(), Some("Bearer tok"));

        let delete = Endpoint::delete_featured("a/b", "tok");
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.path, "/movie_of_week/a%2Fb");
        assert_eq!(delete.authorization.as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn unauthenticated_calls_use_fixed_routes() {
        let routes = [
            (Endpoint::login(), Method::Post, "/admin/login"),
            (Endpoint::create_admin(), Method::Post, "/admin/register"),
            (Endpoint::list_movies(), Method::Get, "/movies"),
            (Endpoint::create_catalog_entry(), Method::Post, "/new_movies"),
            (Endpoint::list_featured(), Method::Get, "/movie_of_week"),
        ];
        for (endpoint, method, path) in routes {
            assert_eq!(endpoint.method, method);
            assert_eq!(endpoint.path, path);
            assert_eq!(endpoint.authorization, None);
        }
    }

    #[test]
    fn unreadable_featured_entries_are_skipped() {
        let body = json!({"movies": [
            {"_id": "a", "title": "Dune", "year": 2021, "createdAt": "2024-05-01T00:00:00Z"},
            {"_id": "b", "createdAt": "2024-05-02T00:00:00Z"},
            {"title": "No id"}
        ]});
        let entries = decode::<FeaturedResponse>(200, &body.to_string(), &errors::LIST_FEATURED)
            .map(featured_entries)
            .unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(entries[0].title, "");
    }
}
