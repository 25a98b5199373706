//! Console logging setup for binaries embedding the converter.

use snafu::{ResultExt, Snafu};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer as _, Registry, layer::SubscriberExt as _};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("unable to set the global default subscriber"))]
    SetGlobalDefaultSubscriber {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

/// Initializes `tracing` logging with the filter read from the environment
/// variable `env_var`.
///
/// We force callers to provide a variable name so it can be different per
/// binary, e.g. `AZAPI_PROVIDER_LOG`. If the variable is unset or invalid,
/// `default_level` is used.
pub fn initialize_logging(env_var: &str, default_level: LevelFilter) -> Result<(), Error> {
    let env_filter = env_filter_builder(env_var, default_level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let subscriber = Registry::default().with(console_layer);
    tracing::subscriber::set_global_default(subscriber).context(SetGlobalDefaultSubscriberSnafu)
}

/// Create an [`EnvFilter`] configured with the given environment variable and default level.
fn env_filter_builder(env_var: &str, default_level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_env_var(env_var)
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_applies_without_env_var() {
        let filter = env_filter_builder("AZAPI_PROVIDER_TEST_LOG_UNSET", LevelFilter::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn second_initialization_fails() {
        // Other tests may have installed a subscriber already, so only the
        // second call is guaranteed to fail.
        let _ = initialize_logging("AZAPI_PROVIDER_TEST_LOG", LevelFilter::INFO);
        let result = initialize_logging("AZAPI_PROVIDER_TEST_LOG", LevelFilter::INFO);

        assert!(matches!(
            result,
            Err(Error::SetGlobalDefaultSubscriber { .. })
        ));
    }
}
