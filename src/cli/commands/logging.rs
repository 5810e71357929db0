//! Log verbosity inputs. `-v` counts up from the quiet default; `--log-level`
//! (or `TICKETDESK_LOG_LEVEL`) names a level directly. The louder one wins.

use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_LEVEL: &str = "log-level";
pub const ENV_LOG_LEVEL: &str = "TICKETDESK_LOG_LEVEL";

/// Accepts `error|warn|info|debug|trace` (any case) or a number from 0 to 5,
/// on the same scale as the `-v` count.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        let level = level.trim();
        if let Ok(parsed) = level.parse::<u8>() {
            return if parsed <= 5 {
                Ok(parsed)
            } else {
                Err(format!("log level {parsed} is out of range (0-5)"))
            };
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err(format!("invalid log level: {level}")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Increase verbosity: -v WARN, -vv INFO, -vvv DEBUG, -vvvv TRACE")
                .global(true)
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new(ARG_LOG_LEVEL)
                .long("log-level")
                .help("Log level: ERROR, WARN, INFO, DEBUG, TRACE or 0-5 (default: ERROR)")
                .env(ENV_LOG_LEVEL)
                .global(true)
                .value_parser(validator_log_level()),
        )
}

/// Effective verbosity on the `-v` scale.
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> u8 {
    let counted = matches.get_count(ARG_VERBOSITY);
    let named = matches.get_one::<u8>(ARG_LOG_LEVEL).copied().unwrap_or(0);
    counted.max(named)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_names_and_numbers() {
        let command = with_args(Command::new("t"));
        for (level, expected) in [("error", 0), ("WARN", 1), ("info", 2), ("3", 3), ("5", 5)] {
            temp_env::with_vars([(ENV_LOG_LEVEL, Some(level))], || {
                let matches = command.clone().get_matches_from(vec!["t"]);
                assert_eq!(matches.get_one::<u8>(ARG_LOG_LEVEL).copied(), Some(expected));
                assert_eq!(verbosity(&matches), expected);
            });
        }
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        for level in ["loud", "6"] {
            temp_env::with_vars([(ENV_LOG_LEVEL, Some(level))], || {
                let result = with_args(Command::new("t")).try_get_matches_from(vec!["t"]);
                assert!(result.is_err());
            });
        }
    }

    #[test]
    fn louder_input_wins() {
        temp_env::with_vars([(ENV_LOG_LEVEL, Some("info"))], || {
            let command = with_args(Command::new("t"));

            let quieter_flag = command.clone().get_matches_from(vec!["t", "-v"]);
            assert_eq!(verbosity(&quieter_flag), 2);

            let louder_flag = command.clone().get_matches_from(vec!["t", "-vvvv"]);
            assert_eq!(verbosity(&louder_flag), 4);

            let flag_over_env = command.get_matches_from(vec!["t", "--log-level", "debug"]);
            assert_eq!(verbosity(&flag_over_env), 3);
        });
    }

    #[test]
    fn quiet_by_default() {
        temp_env::with_vars([(ENV_LOG_LEVEL, None::<&str>)], || {
            let matches = with_args(Command::new("t")).get_matches_from(vec!["t"]);
            assert_eq!(verbosity(&matches), 0);
        });
    }
}
