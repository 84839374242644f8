use chrono::{DateTime, Utc};

use crate::models::UrgencyLevel;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days until `deadline`, rounded up. Zero or negative once the
/// deadline has passed.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

pub fn urgency_level(deadline: DateTime<Utc>, now: DateTime<Utc>) -> UrgencyLevel {
    match days_until(deadline, now) {
        days if days <= 7 => UrgencyLevel::Urgent,
        days if days <= 30 => UrgencyLevel::Soon,
        _ => UrgencyLevel::Upcoming,
    }
}

pub fn format_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_until(deadline, now) {
        days if days <= 0 => "Expired".to_string(),
        1 => "1 day left".to_string(),
        days if days <= 7 => format!("{days} days left"),
        _ => deadline.format("%b %-d, %Y").to_string(),
    }
}

pub fn format_currency(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

/// Stats-bar rendering of a total, e.g. 57500 -> "$58K+".
pub fn format_total_thousands(total: u64) -> String {
    let thousands = (total as f64 / 1000.0).round() as u64;
    format!("${thousands}K+")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn days_until_rounds_up_partial_days() {
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(1), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(25), now()), 2);
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(36), now()), -1);
    }

    #[test]
    fn urgency_boundaries() {
        let at = |days| urgency_level(now() + Duration::days(days), now());
        assert_eq!(at(7), UrgencyLevel::Urgent);
        assert_eq!(at(8), UrgencyLevel::Soon);
        assert_eq!(at(30), UrgencyLevel::Soon);
        assert_eq!(at(31), UrgencyLevel::Upcoming);
        assert_eq!(at(-3), UrgencyLevel::Urgent);
    }

    #[test]
    fn deadline_labels() {
        let at = |days| format_deadline(now() + Duration::days(days), now());
        assert_eq!(at(0), "Expired");
        assert_eq!(at(-2), "Expired");
        assert_eq!(at(1), "1 day left");
        assert_eq!(at(7), "7 days left");
        assert_eq!(at(8), "Jan 9, 2025");
        assert_eq!(at(31), "Feb 1, 2025");
    }

    #[test]
    fn currency_has_no_decimals() {
        assert_eq!(format_currency(10000), "$10,000");
        assert_eq!(format_currency(7500), "$7,500");
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1234567), "$1,234,567");
    }

    #[test]
    fn totals_render_in_thousands() {
        assert_eq!(format_total_thousands(57500), "$58K+");
        assert_eq!(format_total_thousands(45000), "$45K+");
        assert_eq!(format_total_thousands(0), "$0K+");
    }
}
