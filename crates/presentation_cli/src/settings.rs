//! Layered configuration loading
//!
//! Sources, lowest priority first: built-in defaults, the config file,
//! `LOCATIONIQ_*` environment variables. Command-line flags are applied on
//! top by the caller.

use std::path::Path;

use integration_locationiq::LocationIqConfig;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "locationiq";

/// Prefix of environment overrides (e.g. `LOCATIONIQ_API_KEY`, `LOCATIONIQ_EXTRA__CITY`)
pub const ENV_PREFIX: &str = "LOCATIONIQ";

/// Load the client configuration
///
/// An explicit `path` must exist; the default file is optional.
pub fn load(path: Option<&Path>) -> Result<LocationIqConfig, config::ConfigError> {
    load_with_env(path, environment())
}

/// Environment source for `LOCATIONIQ_*` variables
///
/// Values stay strings; numeric and boolean fields are converted during
/// deserialization, so digit-only strings like postal codes keep their
/// leading zeros.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn load_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<LocationIqConfig, config::ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(env);

    builder.build()?.try_deserialize()
}
