use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{Scholarship, SortKey, StudentProfile};
use crate::scoring;
use crate::view::ResultsView;

/// Holds the catalog, the submitted profile and its matches for one run,
/// along with the current search text and sort selection.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Vec<Scholarship>,
    profile: Option<StudentProfile>,
    matched: Vec<Scholarship>,
    search: String,
    sort: SortKey,
}

impl Session {
    pub fn new(catalog: Vec<Scholarship>) -> Self {
        Self {
            catalog,
            profile: None,
            matched: Vec::new(),
            search: String::new(),
            sort: SortKey::default(),
        }
    }

    pub fn catalog(&self) -> &[Scholarship] {
        &self.catalog
    }

    pub fn profile(&self) -> Option<&StudentProfile> {
        self.profile.as_ref()
    }

    /// Replaces the profile and rescores the catalog from its baselines.
    pub fn submit_profile(&mut self, profile: StudentProfile) -> &[Scholarship] {
        self.matched = scoring::match_catalog(&self.catalog, &profile);
        info!(
            student = profile.first_name(),
            matched = self.matched.len(),
            catalog = self.catalog.len(),
            "profile submitted"
        );
        self.profile = Some(profile);
        &self.matched
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Results to render, or `None` before any profile has been submitted or
    /// when the profile matched nothing.
    pub fn results(&self, now: DateTime<Utc>) -> Option<ResultsView<'_>> {
        if self.profile.is_none() || self.matched.is_empty() {
            return None;
        }
        Some(ResultsView::build(&self.matched, &self.search, self.sort, now))
    }
}
