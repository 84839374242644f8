use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Scholarship, SortKey};

const CLOSING_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub matched: usize,
    pub total_potential: u64,
    pub average_match: u32,
    pub closing_soon: usize,
}

/// What the results page shows for one search/sort state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView<'a> {
    pub search: String,
    pub sort: SortKey,
    pub summary: ResultsSummary,
    pub displayed: Vec<&'a Scholarship>,
}

impl<'a> ResultsView<'a> {
    pub fn build(
        matched: &'a [Scholarship],
        search: &str,
        sort: SortKey,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            search: search.to_string(),
            sort,
            summary: summarize(matched, now),
            displayed: rank(matched, search, sort),
        }
    }

    /// Zero-result state: the search filtered everything out.
    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }
}

pub fn matches_search(scholarship: &Scholarship, search: &str) -> bool {
    let needle = search.to_lowercase();
    scholarship.name.to_lowercase().contains(&needle)
        || scholarship.provider.to_lowercase().contains(&needle)
        || scholarship.category.to_lowercase().contains(&needle)
}

/// Filters `matched` by `search` and orders the survivors by `sort`,
/// leaving `matched` itself untouched.
pub fn rank<'a>(matched: &'a [Scholarship], search: &str, sort: SortKey) -> Vec<&'a Scholarship> {
    let mut displayed: Vec<&Scholarship> = matched
        .iter()
        .filter(|scholarship| matches_search(scholarship, search))
        .collect();

    match sort {
        SortKey::Match => displayed.sort_by(|a, b| b.match_score.cmp(&a.match_score)),
        SortKey::Deadline => displayed.sort_by(|a, b| a.deadline.cmp(&b.deadline)),
        SortKey::Amount => displayed.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
    displayed
}

pub fn summarize(matched: &[Scholarship], now: DateTime<Utc>) -> ResultsSummary {
    let total_potential = matched
        .iter()
        .fold(0u64, |total, s| total.saturating_add(s.amount));
    let average_match = if matched.is_empty() {
        0
    } else {
        let total: u32 = matched.iter().map(|s| u32::from(s.match_score)).sum();
        (f64::from(total) / matched.len() as f64).round() as u32
    };
    let closing_soon = matched
        .iter()
        .filter(|s| s.deadline - now <= Duration::days(CLOSING_SOON_DAYS))
        .count();

    ResultsSummary {
        matched: matched.len(),
        total_potential,
        average_match,
        closing_soon,
    }
}
