use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{format_currency, format_deadline, format_total_thousands, urgency_level};
use crate::models::{Scholarship, StudentProfile, UrgencyLevel};
use crate::scoring::{self, Adjustment};
use crate::view::{ResultsSummary, ResultsView};

/// One rendered scholarship card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card<'a> {
    #[serde(flatten)]
    pub scholarship: &'a Scholarship,
    pub urgency: UrgencyLevel,
    pub urgency_label: &'static str,
    pub formatted_amount: String,
    pub formatted_deadline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<Vec<Adjustment>>,
}

impl<'a> Card<'a> {
    pub fn new(
        scholarship: &'a Scholarship,
        profile: Option<&StudentProfile>,
        now: DateTime<Utc>,
    ) -> Self {
        let urgency = urgency_level(scholarship.deadline, now);
        Self {
            scholarship,
            urgency,
            urgency_label: urgency.badge(),
            formatted_amount: format_currency(scholarship.amount),
            formatted_deadline: format_deadline(scholarship.deadline, now),
            adjustments: profile.map(|profile| scoring::score_breakdown(scholarship, profile)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    student: &'a str,
    search: &'a str,
    sort: crate::models::SortKey,
    summary: ResultsSummary,
    scholarships: Vec<Card<'a>>,
}

/// Options controlling how results are rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Show which profile adjustments fired for each card.
    pub explain: bool,
}

pub fn build_json(
    profile: &StudentProfile,
    view: &ResultsView<'_>,
    now: DateTime<Utc>,
    options: RenderOptions,
) -> serde_json::Result<String> {
    let explain_for = options.explain.then_some(profile);
    let report = JsonReport {
        student: &profile.name,
        search: &view.search,
        sort: view.sort,
        summary: view.summary,
        scholarships: view
            .displayed
            .iter()
            .map(|scholarship| Card::new(scholarship, explain_for, now))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn build_report(
    profile: &StudentProfile,
    view: &ResultsView<'_>,
    now: DateTime<Utc>,
    options: RenderOptions,
) -> String {
    let mut output = String::new();
    let summary = &view.summary;

    let _ = writeln!(output, "# Your Matched Scholarships");
    let _ = writeln!(
        output,
        "Great news, {}! We found {} scholarships that match your profile.",
        profile.first_name(),
        summary.matched
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## At a Glance");
    let _ = writeln!(
        output,
        "- Total Available: {}",
        format_total_thousands(summary.total_potential)
    );
    let _ = writeln!(output, "- Avg Match: {}%", summary.average_match);
    let _ = writeln!(output, "- Closing Soon: {}", summary.closing_soon);
    let _ = writeln!(output);

    let search_label = if view.search.is_empty() {
        "all scholarships".to_string()
    } else {
        format!("\"{}\"", view.search)
    };
    let _ = writeln!(
        output,
        "Showing {} of {} for {}, sorted by {}.",
        view.displayed.len(),
        summary.matched,
        search_label,
        view.sort.label()
    );
    let _ = writeln!(output);

    if view.is_empty() {
        let _ = writeln!(output, "No scholarships match your search.");
        let _ = writeln!(output, "Clear search: rerun with `--search \"\"` to see every match.");
        return output;
    }

    let explain_for = options.explain.then_some(profile);
    for scholarship in view.displayed.iter() {
        let card = Card::new(scholarship, explain_for, now);
        write_card(&mut output, &card);
    }

    output
}

fn write_card(output: &mut String, card: &Card<'_>) {
    let scholarship = card.scholarship;

    let _ = writeln!(output, "## {}", scholarship.name);
    let _ = writeln!(output, "{}", scholarship.provider);
    let _ = writeln!(
        output,
        "[{}] [{}] Match {}%",
        scholarship.category, card.urgency_label, scholarship.match_score
    );
    let _ = writeln!(output);
    if !scholarship.description.is_empty() {
        let _ = writeln!(output, "{}", scholarship.description);
        let _ = writeln!(output);
    }
    if !scholarship.requirements.is_empty() {
        let tags: Vec<String> = scholarship
            .requirements
            .iter()
            .map(|requirement| format!("`{requirement}`"))
            .collect();
        let _ = writeln!(output, "Requirements: {}", tags.join(" "));
    }
    let _ = writeln!(
        output,
        "Award: {} | Deadline: {}",
        card.formatted_amount, card.formatted_deadline
    );
    if let Some(adjustments) = &card.adjustments {
        if adjustments.is_empty() {
            let _ = writeln!(output, "Score: catalog baseline, no profile adjustments");
        } else {
            for adjustment in adjustments {
                let _ = writeln!(
                    output,
                    "Score: +{} {}",
                    adjustment.points(),
                    adjustment.describe()
                );
            }
        }
    }
    let _ = writeln!(output, "Apply Now: <{}>", scholarship.application_url);
    let _ = writeln!(output);
}

/// Plain listing of a catalog, baseline scores included.
pub fn build_catalog_listing(catalog: &[Scholarship], now: DateTime<Utc>) -> String {
    let mut output = String::new();

    if catalog.is_empty() {
        let _ = writeln!(output, "Catalog is empty.");
        return output;
    }

    let _ = writeln!(output, "{} scholarships in catalog:", catalog.len());
    for scholarship in catalog {
        let _ = writeln!(
            output,
            "- [{}] {} ({}, {}) {} due {} baseline {}",
            scholarship.id,
            scholarship.name,
            scholarship.provider,
            scholarship.category,
            format_currency(scholarship.amount),
            format_deadline(scholarship.deadline, now),
            scholarship.match_score
        );
    }

    output
}
