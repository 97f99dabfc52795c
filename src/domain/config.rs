use serde::Deserialize;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
///
/// The Matrix password is deliberately absent: it is read once from the
/// `WIKIBOT_PASSWORD` environment variable at startup and never logged.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Configuration for connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Bot behavior settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    /// Character that marks a message as a command invocation.
    #[serde(default = "default_trigger")]
    pub trigger: char,
    /// Search endpoint the wiki command queries. The term is appended verbatim
    /// after `+`-encoding spaces.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Upper bound on a single wiki fetch, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            search_url: default_search_url(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

fn default_trigger() -> char {
    '!'
}

fn default_search_url() -> String {
    "https://en.wikipedia.org/wiki/Special:Search?search=".to_string()
}

fn default_http_timeout() -> u64 {
    10
}
