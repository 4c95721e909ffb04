use lazy_static::lazy_static;
use web_sys::window;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";
pub const TMDB_SEARCH_URL: &str = "https://api.themoviedb.org/3/search/multi";

lazy_static! {
    pub static ref APP_CONFIG: AppConfig = AppConfig::load();
}

/// Where movie searches are sent.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEndpoint {
    /// Backend route forwarding to TMDB; the API key stays on the server.
    Proxy { url: String },
    /// Direct TMDB calls with a key supplied at deploy time.
    Direct { api_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_url: String,
    pub search: SearchEndpoint,
    pub app_name: String,
    pub debug: bool,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(get_env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let search = match (lookup("SEARCH_URL"), lookup("TMDB_API_KEY")) {
            (Some(url), _) => SearchEndpoint::Proxy { url },
            (None, Some(api_key)) if !api_key.is_empty() => SearchEndpoint::Direct { api_key },
            _ => SearchEndpoint::Proxy {
                url: format!("{backend_url}/tmdb/search/multi"),
            },
        };

        Self {
            backend_url,
            search,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Catalog Admin".to_string()),
            debug: lookup("DEBUG_MODE")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }
}

pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    // Get the ENV_CONFIG object
    let env_config = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;

    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - environment variables not loaded");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;

    if !value.is_undefined() {
        value.as_string()
    } else {
        log::debug!("Environment variable '{}' is undefined", key);
        None
    }
}
