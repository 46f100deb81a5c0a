use chrono::{DateTime, FixedOffset, NaiveDate};
use std::borrow::Cow;
use thiserror::Error;

// ISO-8601 offset date-time: 'T' separator, seconds and fraction optional
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M%:z";

/// One `cookie,timestamp` line from the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub cookie: &'a str,
    pub timestamp: DateTime<FixedOffset>,
}

/// Reasons a data line is skipped. None of these stop a scan.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bad formatted log, expected 2 fields but found {}: {fields:?}", .fields.len())]
    FieldCount { fields: Vec<String> },

    #[error("bad formatted log, empty cookie in {line:?}")]
    EmptyCookie { line: String },

    #[error("could not parse timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl<'a> LogRecord<'a> {
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let line = line.trim();
        let fields: Vec<&str> = line.split(',').collect();

        let (cookie, timestamp) = match fields.as_slice() {
            &[cookie, timestamp] => (cookie, timestamp),
            _ => {
                return Err(RecordError::FieldCount {
                    fields: fields.iter().map(|f| f.to_string()).collect(),
                })
            }
        };

        if cookie.is_empty() {
            return Err(RecordError::EmptyCookie {
                line: line.to_string(),
            });
        }

        let timestamp = parse_timestamp(timestamp).map_err(|source| RecordError::Timestamp {
            value: timestamp.to_string(),
            source,
        })?;

        Ok(LogRecord { cookie, timestamp })
    }

    /// Calendar date in the timestamp's own offset.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// The offset is mandatory; a bare local date-time is rejected.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let value = match value.strip_suffix('Z') {
        Some(local) => Cow::Owned(format!("{}+00:00", local)),
        None => Cow::Borrowed(value),
    };

    DateTime::parse_from_str(&value, TIMESTAMP_FORMAT).or_else(|err| {
        DateTime::parse_from_str(&value, TIMESTAMP_FORMAT_MINUTES).map_err(|_| err)
    })
}
