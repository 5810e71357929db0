use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Maps the `-v` scale to a tracing level; 0 keeps the ERROR default.
const fn level_for(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Parses arguments, installs logging, and resolves the requested action.
///
/// # Errors
///
/// Returns an error if telemetry initialization fails or the configuration
/// is unusable.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(level_for(commands::logging::verbosity(&matches)))?;

    dispatch::handler(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), None);
        assert_eq!(level_for(1), Some(tracing::Level::WARN));
        assert_eq!(level_for(3), Some(tracing::Level::DEBUG));
        assert_eq!(level_for(9), Some(tracing::Level::TRACE));
    }
}
