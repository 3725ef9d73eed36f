//! Commit-activity summary over a (possibly partial) commit search sample.
//!
//! The search API caps how much history can be paged through, so the trivial
//! vs. quality split of the fetched sample is extrapolated to the full-year
//! `total_count`. Bursty contributors can make that extrapolation inaccurate.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{CommitActivity, CommitSearchItem};
use crate::taxonomy::is_trivial_commit;
use crate::util::{ratio, round_to};

/// Weight of a trivial commit relative to a quality commit.
const TRIVIAL_COMMIT_WEIGHT: f64 = 0.5;

pub const ACTIVITY_WINDOW_DAYS: i64 = 365;

/// `YYYY-MM-DD` lower bound of the trailing activity window.
pub fn window_start(now: DateTime<Utc>) -> String {
    (now - Duration::days(ACTIVITY_WINDOW_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

/// Months an account could have been active in the window, 1..=12.
///
/// Accounts younger than a year are judged against their own age.
pub fn max_possible_months(account_created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    match account_created_at {
        Some(created) => {
            let days = (now - created).num_days();
            let months = (days as f64 / 30.0).ceil() as i64;
            months.clamp(1, 12) as u32
        }
        None => 12,
    }
}

pub fn summarize_activity(
    commits: &[CommitSearchItem],
    reported_total: Option<u64>,
    account_created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CommitActivity {
    let sampled = commits.len();
    let total_commits_year = reported_total.unwrap_or(sampled as u64);

    let trivial = commits
        .iter()
        .filter(|c| is_trivial_commit(c.message()))
        .count();
    let quality = sampled - trivial;

    let (trivial_commit_ratio, quality_commits_year) = if sampled == 0 {
        (0.0, total_commits_year as f64)
    } else {
        let weighted = quality as f64 + trivial as f64 * TRIVIAL_COMMIT_WEIGHT;
        let scaled = (total_commits_year as f64 * weighted / sampled as f64).floor();
        (round_to(trivial as f64 / sampled as f64, 2), scaled)
    };

    let mut monthly_distribution: BTreeMap<String, u32> = BTreeMap::new();
    for date in commits.iter().filter_map(|c| c.authored_at()) {
        *monthly_distribution
            .entry(date.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }

    let max_months = max_possible_months(account_created_at, now);
    let active_months = monthly_distribution.len() as u32;
    let consistency_index =
        round_to((active_months as f64 / max_months as f64 * 100.0).min(100.0), 2);
    let avg_commits_per_month = round_to(ratio(quality_commits_year, active_months as f64), 2);

    CommitActivity {
        total_commits_year,
        quality_commits_year,
        trivial_commit_ratio,
        monthly_distribution,
        active_months,
        max_possible_months: max_months,
        consistency_index,
        avg_commits_per_month,
    }
}
