use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

use crate::error::CookieError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser, Debug)]
#[command(
    name = "most-active-cookie",
    about = "Find the most active cookie(s) in a cookie log for a given day",
    version,
    long_about = None
)]
pub struct Args {
    /// Cookie log to scan (CSV with a header line)
    #[arg(short = 'f', value_name = "FILENAME")]
    pub file: PathBuf,

    /// Day to report on, in yyyy-MM-dd form
    #[arg(short = 'd', value_name = "DATE")]
    pub date: String,
}

/// Validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub file: PathBuf,
    pub date: NaiveDate,
}

impl CliArgs {
    pub fn from_env() -> Result<Self, CookieError> {
        Self::parse_from(std::env::args_os())
    }

    /// Parses a full argv, program name included. Only the exact shape
    /// `-f <filename> -d <date>` is accepted; the filename may start with `-`.
    pub fn parse_from<I, T>(argv: I) -> Result<Self, CookieError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

        let (file, date) = match argv.get(1..).unwrap_or_default() {
            [flag_f, file, flag_d, date] if flag_f == "-f" && flag_d == "-d" => (file, date),
            _ => {
                // Still routed through clap so -h and -V render
                let err = match Args::command().try_get_matches_from(argv.iter()) {
                    Ok(_) => CookieError::Usage,
                    Err(err) => usage_error(err),
                };
                debug!(action = "reject", component = "args", token_count = argv.len().saturating_sub(1), "Arguments not in -f <filename> -d <date> form");
                return Err(err);
            }
        };

        let date = match date.to_str() {
            Some(date) => parse_date(date)?,
            None => {
                return Err(CookieError::DateFormat {
                    value: date.to_string_lossy().into_owned(),
                })
            }
        };

        Ok(CliArgs {
            file: PathBuf::from(file),
            date,
        })
    }
}

fn usage_error(err: clap::Error) -> CookieError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CookieError::HelpRequested(err),
        kind => {
            debug!(action = "reject", component = "args", kind = ?kind, error = %err, "Argument parsing failed");
            CookieError::Usage
        }
    }
}

/// Strict `yyyy-MM-dd`: zero padded, four-digit year.
pub fn parse_date(value: &str) -> Result<NaiveDate, CookieError> {
    let date_format_error = || CookieError::DateFormat {
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| date_format_error())?;
    // chrono accepts unpadded fields and signed years
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(date_format_error());
    }
    Ok(date)
}
