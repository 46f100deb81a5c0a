use chrono::NaiveDate;
use most_active_cookie::{find_most_active_cookies, CliArgs, CookieError};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn sample_log() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/cookie_log.csv")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn leaders(path: &Path, day: &str) -> HashSet<String> {
    find_most_active_cookies(path, date(day))
        .unwrap()
        .leaders
        .into_cookies()
}

fn set(cookies: &[&str]) -> HashSet<String> {
    cookies.iter().map(|c| c.to_string()).collect()
}

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn sample_log_single_winner() {
    assert_eq!(leaders(&sample_log(), "2018-12-09"), set(&["AtY0laUfhglK3lC7"]));
    assert_eq!(leaders(&sample_log(), "2018-12-07"), set(&["4sMM2LxV07bPJzwf"]));
}

#[test]
fn sample_log_three_way_tie() {
    assert_eq!(
        leaders(&sample_log(), "2018-12-08"),
        set(&["SAZuXPGUrfbcn5UA", "4sMM2LxV07bPJzwf", "fbcn5UAVanZf6UtG"])
    );
}

#[test]
fn sample_log_day_without_events() {
    assert!(leaders(&sample_log(), "2018-12-10").is_empty());
}

#[test]
fn results_match_counts() {
    let aggregation = find_most_active_cookies(&sample_log(), date("2018-12-09")).unwrap();
    assert_eq!(aggregation.leaders.count(), 2);
    assert_eq!(aggregation.summary.lines_read, 8);
    assert_eq!(aggregation.summary.matched, 4);
    assert_eq!(aggregation.summary.other_dates, 4);
    assert_eq!(aggregation.summary.distinct_cookies, 3);
}

#[test]
fn malformed_lines_in_a_file_are_tolerated() {
    let log = write_log(
        "cookie,timestamp\n\
         cookie1,2018-12-09T14:19:00+00:00\n\
         cookie2,2018-12-09T10:13:00+00:00,oops\n\
         cookie2,2018-12-09 10:13\n\
         cookie3,2018-12-09T11:00:00+00:00\n\
         cookie1,2018-12-09T12:00:00+00:00\n",
    );
    let aggregation = find_most_active_cookies(log.path(), date("2018-12-09")).unwrap();
    assert_eq!(aggregation.leaders.into_cookies(), set(&["cookie1"]));
    assert_eq!(aggregation.summary.malformed, 1);
    assert_eq!(aggregation.summary.bad_timestamps, 1);
}

#[test]
fn windows_line_endings() {
    let log = write_log(
        "cookie,timestamp\r\n\
         a,2018-12-09T14:19:00+00:00\r\n\
         b,2018-12-09T10:13:00+00:00\r\n",
    );
    assert_eq!(leaders(log.path(), "2018-12-09"), set(&["a", "b"]));
}

#[test]
fn missing_file_fails_without_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent.log");
    match find_most_active_cookies(&path, date("2024-03-23")) {
        Err(err @ CookieError::SourceUnavailable { .. }) => {
            assert!(err.to_string().contains("nonexistent.log"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn invalid_utf8_line_keeps_the_rest_of_the_file() {
    let mut log = NamedTempFile::new().unwrap();
    log.write_all(
        b"cookie,timestamp\n\
          a,2018-12-09T14:19:00+00:00\n\
          \xff\xfe,2018-12-09T14:19:00+00:00\n\
          b,2018-12-09T10:13:00+00:00\n",
    )
    .unwrap();
    log.flush().unwrap();
    let aggregation = find_most_active_cookies(log.path(), date("2018-12-09")).unwrap();
    assert_eq!(aggregation.summary.malformed, 1);
    assert_eq!(aggregation.leaders.into_cookies(), set(&["a", "b"]));
}

#[test]
fn minute_precision_timestamps_are_counted() {
    let log = write_log(
        "cookie,timestamp\n\
         a,2018-12-09T14:19+00:00\n\
         a,2018-12-09T14:20:00Z\n\
         b,2018-12-09 10:13:00+00:00\n\
         b,2018-12-09T10:13:00+00:00\n",
    );
    let aggregation = find_most_active_cookies(log.path(), date("2018-12-09")).unwrap();
    assert_eq!(aggregation.summary.bad_timestamps, 1);
    assert_eq!(aggregation.leaders.count(), 2);
    assert_eq!(aggregation.leaders.into_cookies(), set(&["a"]));
}

#[test]
fn parsed_arguments_drive_a_run() {
    let file = sample_log();
    let argv = [
        "most-active-cookie",
        "-f",
        file.to_str().unwrap(),
        "-d",
        "2018-12-09",
    ];
    let args = CliArgs::parse_from(argv).unwrap();
    let aggregation = find_most_active_cookies(&args.file, args.date).unwrap();
    assert_eq!(aggregation.leaders.sorted(), vec!["AtY0laUfhglK3lC7"]);
}
