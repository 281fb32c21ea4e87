use config::{Config, Environment, File, Map};
use qrgen_domain::constants::{DEBUG_ENV, ENV_PREFIX, PORT_ENV};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors raised while assembling the configuration.
#[qrgen_derive::qrgen_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads the configuration from a file and the process environment.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path` (defaults to `server`, any extension the `config` crate knows).
///    Optional: a missing file leaves the defaults in place.
/// 2. **Structured overrides**: variables prefixed with `QRGEN__`, nested with `__`
///    (e.g. `QRGEN__ARCHIVE__DIR` maps to `archive.dir`).
/// 3. **Plain variables**: `PORT` sets `server.port`; `DEBUG` sets `debug` to `true` only when its
///    value is `true` in any letter case, and to `false` for any other value.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or a value cannot be deserialized
/// into `T` (e.g. `PORT=abc`).
///
/// # Example
/// ```rust
/// use qrgen_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     debug: bool,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let vars: Map<String, String> = std::env::vars().collect();
    load_config_with_env(path, &vars)
}

/// Same as [`load_config`], but reads variables from `vars` instead of the process environment.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: &Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let debug_flag = vars.get(DEBUG_ENV).map(|v| v.trim().eq_ignore_ascii_case("true"));

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .source(Some(vars.clone())),
        )
        .set_override_option("server.port", vars.get(PORT_ENV).cloned())
        .context("Invalid PORT override")?
        .set_override_option("debug", debug_flag)
        .context("Invalid DEBUG override")?;

    info!("Loading config from {}", effective_path.display());
    debug!(port = ?vars.get(PORT_ENV), debug = ?debug_flag, "Environment overrides");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
