use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// RapidAPI key for the movie database provider.
    ///
    /// Optional at startup; searches fail with a configuration error until it is set.
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// Movie database API base URL
    #[serde(default = "default_movie_api_url")]
    pub movie_api_url: String,

    /// Value sent in the `x-rapidapi-host` header
    #[serde(default = "default_movie_api_host")]
    pub movie_api_host: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Provider settings handed to the movie database client.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieApiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub host: String,
}

impl MovieApiSettings {
    /// Returns the key if one is configured and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_movie_api_url() -> String {
    "https://movie-database-alternative.p.rapidapi.com".to_string()
}

fn default_movie_api_host() -> String {
    "movie-database-alternative.p.rapidapi.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Settings for the movie database provider client
    pub fn movie_api(&self) -> MovieApiSettings {
        MovieApiSettings {
            api_key: self.rapidapi_key.clone(),
            base_url: self.movie_api_url.trim_end_matches('/').to_string(),
            host: self.movie_api_host.clone(),
        }
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
