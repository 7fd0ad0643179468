use anyhow::Error;
use slotwise_config::ConfigError;
use slotwise_core::time::TimeParseError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if cause.downcast_ref::<TimeParseError>().is_some() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidFormat { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        exit_status, invalid_input, not_found, EXIT_FAILURE, EXIT_INVALID_INPUT, EXIT_NOT_FOUND,
    };
    use anyhow::{anyhow, Context as _};
    use slotwise_core::time::parse_local_timestamp;

    #[test]
    fn exit_status_follows_the_error_chain() {
        assert_eq!(exit_status(&not_found("campaign x")), EXIT_NOT_FOUND);
        assert_eq!(exit_status(&invalid_input("bad json")), EXIT_INVALID_INPUT);

        let bad_now = parse_local_timestamp("yesterday")
            .context("resolve --now")
            .unwrap_err();
        assert_eq!(exit_status(&bad_now), EXIT_INVALID_INPUT);

        assert_eq!(exit_status(&anyhow!("disk on fire")), EXIT_FAILURE);
    }
}
