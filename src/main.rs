use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

use most_active_cookie::{find_most_active_cookies, utils, CliArgs, CookieError, LeaderSet};

fn print_cookies(leaders: &LeaderSet) -> Result<()> {
    let mut out = io::stdout().lock();
    for cookie in leaders.sorted() {
        writeln!(out, "{}", cookie).context("Failed to write results")?;
    }
    out.flush().context("Failed to write results")?;
    Ok(())
}

fn run() -> Result<()> {
    let args = CliArgs::from_env()?;
    let aggregation = find_most_active_cookies(&args.file, args.date)?;
    if aggregation.leaders.is_empty() {
        info!(action = "complete", component = "main", date = %args.date, "No cookie activity on this date");
    }
    print_cookies(&aggregation.leaders)
}

fn main() {
    utils::setup_logging();

    if let Err(e) = run() {
        if let Some(CookieError::HelpRequested(help)) = e.downcast_ref::<CookieError>() {
            help.exit();
        }
        debug!(action = "abort", component = "main", error = ?e, "Run failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
