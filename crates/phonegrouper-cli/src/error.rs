use anyhow::Error;
use phonegrouper_config::ConfigError;
use phonegrouper_core::CoreError;
use phonegrouper_format::FormatError;
use std::io;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(CliError::InvalidInput(_)) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(format_err) = cause.downcast_ref::<FormatError>() {
            return ExitCode::from(format_exit_code(format_err));
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidMinimumDigitCount(_)
        | ConfigError::InvalidCountryCode(_)
        | ConfigError::InvalidSuffixDigits(_)
        | ConfigError::InvalidMinGroupSize(_)
        | ConfigError::InvalidDelimiter(_)
        | ConfigError::InvalidParallelThreshold(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn format_exit_code(err: &FormatError) -> u8 {
    match err {
        FormatError::Open { source, .. } if source.kind() == io::ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        FormatError::Open { .. }
        | FormatError::Read { .. }
        | FormatError::Io(_)
        | FormatError::Json(_) => EXIT_FAILURE,
    }
}
