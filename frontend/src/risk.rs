//! Presentation numbers derived from an analysis risk score.
//!
//! The principal/interest figures are illustrative only: the principal is a
//! fixed amount and the interest is a linear function of the score. They are
//! not extracted from the document.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

pub const ESTIMATED_PRINCIPAL: i64 = 25_000;
const INTEREST_FACTOR: f64 = 0.65;
const FALLBACK_PRINCIPAL: i64 = 10_000;
const FALLBACK_INTEREST: i64 = 1_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// `<= 30` low, `31..=70` moderate, `> 70` high.
    pub fn from_score(score: i64) -> Self {
        if score <= 30 {
            RiskTier::Low
        } else if score <= 70 {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// Gauge and interest-slice colour.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "#10b981",
            RiskTier::Moderate => "#eab308",
            RiskTier::High => "#ef4444",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RiskTier::Low => "risk-low",
            RiskTier::Moderate => "risk-moderate",
            RiskTier::High => "risk-high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoanEstimate {
    pub principal: i64,
    pub interest: i64,
}

impl LoanEstimate {
    pub fn from_score(score: i64) -> Self {
        let interest = (ESTIMATED_PRINCIPAL as f64 * (score as f64 / 100.0) * INTEREST_FACTOR).round() as i64;
        Self {
            principal: if ESTIMATED_PRINCIPAL > 0 { ESTIMATED_PRINCIPAL } else { FALLBACK_PRINCIPAL },
            interest: if interest >= 0 { interest } else { FALLBACK_INTEREST },
        }
    }

    pub fn total(&self) -> i64 {
        self.principal + self.interest
    }

    /// Share of the total taken by the principal, in percent.
    pub fn principal_share(&self) -> f64 {
        if self.total() == 0 {
            return 100.0;
        }
        self.principal as f64 * 100.0 / self.total() as f64
    }
}

/// `$25,000`: US dollars, grouped thousands, no fraction.
pub fn format_currency(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `January 2nd, 2026 3:07 PM`. Unparseable input is returned unchanged.
pub fn format_created_at(raw: &str) -> String {
    match DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        Ok(dt) => {
            let (pm, hour) = dt.hour12();
            format!(
                "{} {}, {} {}:{:02} {}",
                dt.format("%B"),
                ordinal(dt.day()),
                dt.year(),
                hour,
                dt.minute(),
                if pm { "PM" } else { "AM" }
            )
        }
        Err(_) => raw.to_string(),
    }
}

/// `Jan 2, 2026`, used on dashboard cards.
pub fn format_short_date(raw: &str) -> String {
    match DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_go_to_lower_tier() {
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(30), RiskTier::Low);
        assert_eq!(RiskTier::from_score(31), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(70), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(71), RiskTier::High);
        assert_eq!(RiskTier::from_score(100), RiskTier::High);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(RiskTier::from_score(30).label(), "Low");
        assert_eq!(RiskTier::from_score(31).label(), "Moderate");
        assert_eq!(RiskTier::from_score(71).label(), "High");
    }

    #[test]
    fn interest_endpoints() {
        assert_eq!(LoanEstimate::from_score(0).interest, 0);
        assert_eq!(LoanEstimate::from_score(100).interest, 16_250);
        assert_eq!(LoanEstimate::from_score(50).principal, ESTIMATED_PRINCIPAL);
    }

    #[test]
    fn interest_is_rounded() {
        // 25000 * 0.01 * 0.65 = 162.5
        assert_eq!(LoanEstimate::from_score(1).interest, 163);
        // 25000 * 0.33 * 0.65 = 5362.5
        assert_eq!(LoanEstimate::from_score(33).interest, 5363);
    }

    #[test]
    fn interest_is_monotonic() {
        let mut previous = LoanEstimate::from_score(0).interest;
        for score in 1..=100 {
            let current = LoanEstimate::from_score(score).interest;
            assert!(current >= previous, "interest dropped at score {score}");
            previous = current;
        }
    }

    #[test]
    fn negative_interest_falls_back() {
        assert_eq!(LoanEstimate::from_score(-10).interest, FALLBACK_INTEREST);
    }

    #[test]
    fn principal_share_of_zero_score_is_everything() {
        assert_eq!(LoanEstimate::from_score(0).principal_share(), 100.0);
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(16_250), "$16,250");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
        assert_eq!(format_currency(-2_500), "-$2,500");
    }

    #[test]
    fn created_at_formatting() {
        assert_eq!(format_created_at("2026-01-02T15:07:00Z"), "January 2nd, 2026 3:07 PM");
        assert_eq!(format_created_at("2026-03-11T00:30:00+00:00"), "March 11th, 2026 12:30 AM");
        assert_eq!(format_created_at("not a date"), "not a date");
    }

    #[test]
    fn short_date_formatting() {
        assert_eq!(format_short_date("2026-01-02T15:07:00Z"), "Jan 2, 2026");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(31), "31st");
    }
}
