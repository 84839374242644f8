use serde::Serialize;
use tracing::debug;

use crate::models::{Major, Scholarship, StudentProfile};

pub const ELIGIBILITY_CUTOFF: u8 = 60;
pub const MAX_SCORE: u8 = 100;

const HIGH_GPA: f64 = 3.5;
const HIGH_GPA_BONUS: u32 = 5;
const STEM_MAJOR_BONUS: u32 = 3;
const FINANCIAL_NEED_BONUS: u32 = 5;
const STEM_CATEGORY: &str = "STEM";
const FINANCIAL_NEED_TAG: &str = "Financial Need";
const STEM_MAJORS: [Major; 4] = [
    Major::ComputerScience,
    Major::Engineering,
    Major::Biology,
    Major::Mathematics,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Adjustment {
    HighGpa,
    StemMajor,
    FinancialNeed,
}

impl Adjustment {
    pub fn points(&self) -> u32 {
        match self {
            Adjustment::HighGpa => HIGH_GPA_BONUS,
            Adjustment::StemMajor => STEM_MAJOR_BONUS,
            Adjustment::FinancialNeed => FINANCIAL_NEED_BONUS,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Adjustment::HighGpa => "GPA 3.5 or higher",
            Adjustment::StemMajor => "STEM major for a STEM scholarship",
            Adjustment::FinancialNeed => "financial need matches a need-based requirement",
        }
    }
}

/// Adjustments that apply to this scholarship for this profile.
pub fn score_breakdown(scholarship: &Scholarship, profile: &StudentProfile) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    if profile.gpa.is_some_and(|gpa| gpa >= HIGH_GPA) {
        adjustments.push(Adjustment::HighGpa);
    }
    if scholarship.category == STEM_CATEGORY
        && profile
            .major
            .as_ref()
            .is_some_and(|major| STEM_MAJORS.contains(major))
    {
        adjustments.push(Adjustment::StemMajor);
    }
    if profile.financial_need
        && scholarship
            .requirements
            .iter()
            .any(|requirement| requirement.contains(FINANCIAL_NEED_TAG))
    {
        adjustments.push(Adjustment::FinancialNeed);
    }

    adjustments
}

/// Catalog baseline plus profile adjustments, capped at 100.
pub fn score(scholarship: &Scholarship, profile: &StudentProfile) -> u8 {
    let bonus: u32 = score_breakdown(scholarship, profile)
        .iter()
        .map(Adjustment::points)
        .sum();
    let total = u32::from(scholarship.match_score) + bonus;
    total.min(u32::from(MAX_SCORE)) as u8
}

/// Scores every catalog entry for `profile`, keeps those at or above the
/// eligibility cutoff and orders them best match first. Equal scores keep
/// catalog order.
pub fn match_catalog(catalog: &[Scholarship], profile: &StudentProfile) -> Vec<Scholarship> {
    let mut matched: Vec<Scholarship> = catalog
        .iter()
        .map(|scholarship| Scholarship {
            match_score: score(scholarship, profile),
            ..scholarship.clone()
        })
        .filter(|scholarship| scholarship.match_score >= ELIGIBILITY_CUTOFF)
        .collect();

    matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    debug!(
        catalog = catalog.len(),
        matched = matched.len(),
        "matched catalog against profile"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_profile() -> StudentProfile {
        StudentProfile {
            name: "Avery Lee".to_string(),
            email: "avery@example.com".to_string(),
            gpa: Some(3.8),
            major: Some(Major::ComputerScience),
            year_of_study: None,
            financial_need: true,
            gender: None,
            ethnicity: String::new(),
            interests: Vec::new(),
        }
    }

    fn plain_profile() -> StudentProfile {
        StudentProfile {
            gpa: Some(3.0),
            major: Some(Major::Business),
            financial_need: false,
            ..sample_profile()
        }
    }

    fn sample_scholarship(id: &str, category: &str, baseline: u8, requirements: &[&str]) -> Scholarship {
        Scholarship {
            id: id.to_string(),
            name: format!("Scholarship {id}"),
            provider: "Provider".to_string(),
            amount: 1000,
            deadline: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            match_score: baseline,
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            description: String::new(),
            application_url: "https://example.com/apply".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn strong_stem_profile_is_capped_at_100() {
        let scholarship = sample_scholarship("1", "STEM", 95, &["GPA 3.5+", "Financial Need"]);
        assert_eq!(score(&scholarship, &sample_profile()), 100);
        assert_eq!(
            score_breakdown(&scholarship, &sample_profile()),
            vec![Adjustment::HighGpa, Adjustment::StemMajor, Adjustment::FinancialNeed]
        );
    }

    #[test]
    fn adjustments_add_to_baseline() {
        let scholarship = sample_scholarship("2", "Community", 70, &["Financial Need"]);
        assert_eq!(score(&scholarship, &sample_profile()), 80);
        assert_eq!(score(&scholarship, &plain_profile()), 70);
    }

    #[test]
    fn stem_bonus_requires_allowed_major_and_category() {
        let stem = sample_scholarship("3", "STEM", 50, &[]);
        let profile = StudentProfile {
            gpa: None,
            financial_need: false,
            major: Some(Major::Psychology),
            ..sample_profile()
        };
        assert_eq!(score(&stem, &profile), 50);

        let profile = StudentProfile {
            major: Some(Major::Mathematics),
            ..profile
        };
        assert_eq!(score(&stem, &profile), 53);

        let arts = sample_scholarship("4", "Arts", 50, &[]);
        assert_eq!(score(&arts, &profile), 50);
    }

    #[test]
    fn loosely_spelled_major_gets_no_stem_bonus() {
        let stem = sample_scholarship("8", "STEM", 70, &[]);
        for spelling in ["computer science", "COMPUTER-SCIENCE", "ComputerScience"] {
            let profile = crate::profile::ProfileForm {
                name: "Avery Lee".to_string(),
                email: "avery@example.com".to_string(),
                major: spelling.to_string(),
                ..Default::default()
            }
            .submit()
            .unwrap();
            assert_eq!(score(&stem, &profile), 70, "{spelling}");
        }

        let exact = crate::profile::ProfileForm {
            name: "Avery Lee".to_string(),
            email: "avery@example.com".to_string(),
            major: "Computer Science".to_string(),
            ..Default::default()
        }
        .submit()
        .unwrap();
        assert_eq!(score(&stem, &exact), 73);
    }

    #[test]
    fn financial_need_match_is_case_sensitive_substring() {
        let profile = StudentProfile {
            gpa: None,
            major: None,
            ..sample_profile()
        };
        let tagged = sample_scholarship("5", "Community", 60, &["Demonstrated Financial Need"]);
        assert_eq!(score(&tagged, &profile), 65);

        let lowercase = sample_scholarship("6", "Community", 60, &["financial need"]);
        assert_eq!(score(&lowercase, &profile), 60);
    }

    #[test]
    fn missing_gpa_skips_gpa_bonus() {
        let scholarship = sample_scholarship("7", "Arts", 70, &[]);
        let profile = StudentProfile {
            gpa: None,
            ..sample_profile()
        };
        assert_eq!(score(&scholarship, &profile), 70);

        let boundary = StudentProfile {
            gpa: Some(3.5),
            ..sample_profile()
        };
        assert_eq!(score(&scholarship, &boundary), 75);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let catalog = vec![
            sample_scholarship("a", "STEM", 0, &[]),
            sample_scholarship("b", "STEM", 100, &["Financial Need"]),
            sample_scholarship("c", "Arts", 99, &["Financial Need"]),
        ];
        for profile in [sample_profile(), plain_profile()] {
            for scholarship in &catalog {
                assert!(score(scholarship, &profile) <= MAX_SCORE);
            }
        }
    }

    #[test]
    fn match_catalog_filters_and_sorts() {
        let catalog = vec![
            sample_scholarship("low", "Arts", 40, &[]),
            sample_scholarship("mid", "Arts", 70, &[]),
            sample_scholarship("edge", "Arts", 60, &[]),
            sample_scholarship("high", "Arts", 90, &[]),
            sample_scholarship("tie", "Arts", 70, &[]),
        ];
        let matched = match_catalog(&catalog, &plain_profile());
        let ids: Vec<&str> = matched.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "tie", "edge"]);
        assert!(matched.iter().all(|s| s.match_score >= ELIGIBILITY_CUTOFF));
        assert!(matched.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn match_catalog_leaves_catalog_untouched() {
        let catalog = vec![sample_scholarship("1", "STEM", 95, &["Financial Need"])];
        let matched = match_catalog(&catalog, &sample_profile());
        assert_eq!(matched[0].match_score, 100);
        assert_eq!(catalog[0].match_score, 95);
    }

    #[test]
    fn adjustments_can_lift_entries_over_cutoff() {
        let catalog = vec![sample_scholarship("1", "STEM", 55, &[])];
        assert!(match_catalog(&catalog, &plain_profile()).is_empty());
        assert_eq!(match_catalog(&catalog, &sample_profile())[0].match_score, 63);
    }
}
