use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Running per-cookie event counts for the target date.
#[derive(Debug, Default)]
pub struct CookieCounts {
    counts: HashMap<String, u64>,
}

impl CookieCounts {
    /// Adds one event for `cookie` and returns its new count.
    pub fn increment(&mut self, cookie: &str) -> u64 {
        if let Some(count) = self.counts.get_mut(cookie) {
            *count = count.saturating_add(1);
            return *count;
        }
        self.counts.insert(cookie.to_string(), 1);
        1
    }

    /// Number of distinct cookies seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// Cookies currently tied for the highest count, and that count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeaderSet {
    count: u64,
    cookies: HashSet<String>,
}

impl LeaderSet {
    /// Folds a cookie's freshly incremented count into the set.
    pub fn observe(&mut self, cookie: &str, count: u64) {
        match count.cmp(&self.count) {
            Ordering::Greater => {
                self.count = count;
                self.cookies.clear();
                self.cookies.insert(cookie.to_string());
            }
            Ordering::Equal if count > 0 => {
                self.cookies.insert(cookie.to_string());
            }
            _ => {}
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn cookies(&self) -> &HashSet<String> {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Leaders in lexicographic order, for stable output.
    pub fn sorted(&self) -> Vec<&str> {
        let mut cookies: Vec<&str> = self.cookies.iter().map(String::as_str).collect();
        cookies.sort_unstable();
        cookies
    }

    pub fn into_cookies(self) -> HashSet<String> {
        self.cookies
    }
}

/// Line tallies from one pass over a log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub lines_read: u64,
    pub malformed: u64,
    pub bad_timestamps: u64,
    pub other_dates: u64,
    pub matched: u64,
    pub distinct_cookies: usize,
}

impl ScanSummary {
    pub fn skipped(&self) -> u64 {
        self.malformed + self.bad_timestamps
    }
}
