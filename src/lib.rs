pub mod aggregate;
pub mod args;
pub mod error;
pub mod record;
pub mod stats;
pub mod utils;

pub use aggregate::{
    aggregate, aggregate_lines, aggregate_reader, find_most_active_cookies, Aggregation,
};
pub use args::{Args, CliArgs};
pub use error::CookieError;
pub use record::{LogRecord, RecordError};
pub use stats::{CookieCounts, LeaderSet, ScanSummary};
