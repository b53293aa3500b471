use std::{collections::HashMap, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use mailform_models::Sensitive;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATH_ENV: &str = "MAILFORM_CONFIG_PATH";

pub const ENV_PREFIX: &str = "MAILFORM";

/// Load the default config file, the files listed in `MAILFORM_CONFIG_PATH` and
/// the `MAILFORM__*` environment variables, in this order.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|path| !path.is_empty()))
        .collect::<Vec<_>>();

    load_from(&paths, &[], None)
}

/// Load the config from the given files, followed by inline TOML `overrides`
/// and the environment.
///
/// If `env` is `None` the process environment is used.
pub fn load_from(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub emailjs: EmailJsConfig,
    pub form: FormConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub user_id: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub access_token: Option<Sensitive<String>>,
    pub api_endpoint_override: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub reset_on_failure: bool,
}

#[derive(Debug, Deserialize)]
pub struct NotificationsConfig {
    /// Leave unset to keep success notifications until they are dismissed.
    pub success_ttl: Option<Duration>,
    pub error_ttl: Option<Duration>,
}
