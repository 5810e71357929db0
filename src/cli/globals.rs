use crate::{
    cli::commands::{ARG_API_URL, ARG_SCAN_INTERVAL_MS, ARG_SESSION_FILE},
    config::{apply_overrides, AppConfig, Overrides},
    errors::AppError,
};

/// Settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub config: AppConfig,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Resolves the configuration from defaults and the global flags, which
    /// already include their environment fallbacks.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the resulting API URL is unusable.
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self, AppError> {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            Overrides {
                api_base_url: matches.get_one::<String>(ARG_API_URL).cloned(),
                session_file: matches.get_one::<String>(ARG_SESSION_FILE).cloned(),
                scan_interval_ms: matches.get_one::<u64>(ARG_SCAN_INTERVAL_MS).copied(),
            },
        );
        config.validate()?;
        Ok(Self::new(config))
    }
}
