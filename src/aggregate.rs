use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::CookieError;
use crate::record::{LogRecord, RecordError};
use crate::stats::{CookieCounts, LeaderSet, ScanSummary};

/// Outcome of one pass: the winners plus how the lines were spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub leaders: LeaderSet,
    pub summary: ScanSummary,
}

/// Cookies with the most events on `target`, header line skipped.
/// Lines are raw bytes; a line that is not UTF-8 is skipped like any
/// other malformed record.
pub fn aggregate<I, S>(lines: I, target: NaiveDate) -> io::Result<HashSet<String>>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<[u8]>,
{
    Ok(aggregate_lines(lines, target)?.leaders.into_cookies())
}

pub fn aggregate_lines<I, S>(lines: I, target: NaiveDate) -> io::Result<Aggregation>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<[u8]>,
{
    let mut lines = lines.into_iter();
    let mut counts = CookieCounts::default();
    let mut leaders = LeaderSet::default();
    let mut summary = ScanSummary::default();

    // Header content is never inspected
    if let Some(header) = lines.next() {
        header?;
    }

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line_number = index + 2;
        summary.lines_read += 1;

        let line = match std::str::from_utf8(line.as_ref()) {
            Ok(line) => line,
            Err(e) => {
                warn!(action = "skip", component = "record_parser", line_number, error = %e, "Line is not valid UTF-8");
                summary.malformed += 1;
                continue;
            }
        };

        let record = match LogRecord::parse(line) {
            Ok(record) => record,
            Err(e @ RecordError::Timestamp { .. }) => {
                warn!(action = "skip", component = "record_parser", line_number, error = %e, "Unparseable timestamp");
                summary.bad_timestamps += 1;
                continue;
            }
            Err(e) => {
                warn!(action = "skip", component = "record_parser", line_number, error = %e, "Malformed record");
                summary.malformed += 1;
                continue;
            }
        };

        if record.date() != target {
            summary.other_dates += 1;
            continue;
        }

        summary.matched += 1;
        let count = counts.increment(record.cookie);
        leaders.observe(record.cookie, count);
    }

    summary.distinct_cookies = counts.distinct();
    Ok(Aggregation { leaders, summary })
}

/// Splits on `\n` without decoding, so only real read failures are errors.
pub fn aggregate_reader<R: BufRead>(reader: R, target: NaiveDate) -> io::Result<Aggregation> {
    aggregate_lines(reader.split(b'\n'), target)
}

/// Opens `path` and aggregates it. The file is closed before returning.
pub fn find_most_active_cookies(path: &Path, target: NaiveDate) -> Result<Aggregation, CookieError> {
    let start_time = Instant::now();
    info!(action = "start", component = "aggregator", file_path = ?path, date = %target, "Scanning cookie log");

    let file = File::open(path).map_err(|e| CookieError::source_unavailable(path, e))?;
    let aggregation = aggregate_reader(BufReader::new(file), target)
        .map_err(|e| CookieError::source_unavailable(path, e))?;

    let summary = &aggregation.summary;
    info!(
        action = "complete",
        component = "aggregator",
        lines_read = summary.lines_read,
        matched = summary.matched,
        other_dates = summary.other_dates,
        skipped = summary.skipped(),
        distinct_cookies = summary.distinct_cookies,
        max_count = aggregation.leaders.count(),
        leaders = aggregation.leaders.cookies().len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Scan completed"
    );

    Ok(aggregation)
}
