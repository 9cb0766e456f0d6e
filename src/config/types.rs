use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::session::SessionConfig;

/// Environment variables with this prefix override values from the YAML file,
/// e.g. `STOREFRONT_API__BASE_URL`.
pub const ENV_PREFIX: &str = "STOREFRONT_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where the API lives, which auth endpoints to use,
/// where the session profile is persisted and how to log.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthEndpointsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Load config from "config.yaml" in the current directory.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    load_config_from("./config.yaml")
}

/// Load config from the given YAML file, with `STOREFRONT_` environment overrides on top.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Parse config from an in-memory YAML document. No environment overrides apply.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Where the REST API and the static pictures are served from.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    pub pictures_url: String,
    /// Per-request timeout. Requests are unbounded when absent.
    pub timeout_in_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// The canonical set of identity endpoints, relative to `api.base_url`.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AuthEndpointsConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_logout_path")]
    pub logout_path: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
}

impl Default for AuthEndpointsConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            refresh_path: default_refresh_path(),
            logout_path: default_logout_path(),
            profile_path: default_profile_path(),
        }
    }
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_logout_path() -> String {
    "/auth/logout".to_string()
}

fn default_profile_path() -> String {
    "/user/me".to_string()
}
