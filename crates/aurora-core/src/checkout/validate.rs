// ── Step validation ──
//
// Synchronous checks run before a step may advance. Failures are never
// sent to the server; the first violated rule is reported.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::model::TravelerInfo;
use crate::pricing::PriceOverflow;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|_| unreachable!()));

/// Step 1 rules, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetailsViolation {
    #[error("Please select a start date")]
    MissingStartDate,
    #[error("Please select an end date")]
    MissingEndDate,
    #[error("End date must be after start date")]
    EndNotAfterStart,
    #[error("At least one adult is required")]
    NoAdults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TravelerProblem {
    #[error("name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Details(#[from] DetailsViolation),

    /// `index` is 0-based; the message shows it 1-based.
    #[error("Traveler {}: {kind}", .index + 1)]
    Traveler { index: usize, kind: TravelerProblem },

    #[error(transparent)]
    Price(#[from] PriceOverflow),
}

pub fn validate_details(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    adults: u32,
) -> Result<(), DetailsViolation> {
    let Some(start) = start_date else {
        return Err(DetailsViolation::MissingStartDate);
    };
    let Some(end) = end_date else {
        return Err(DetailsViolation::MissingEndDate);
    };
    if start >= end {
        return Err(DetailsViolation::EndNotAfterStart);
    }
    if adults < 1 {
        return Err(DetailsViolation::NoAdults);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Check every traveler, reporting the first offending entry.
pub fn validate_travelers(travelers: &[TravelerInfo]) -> Result<(), ValidationError> {
    for (index, traveler) in travelers.iter().enumerate() {
        if traveler.name.trim().is_empty() {
            return Err(ValidationError::Traveler {
                index,
                kind: TravelerProblem::MissingName,
            });
        }
        if !is_valid_email(&traveler.email) {
            return Err(ValidationError::Traveler {
                index,
                kind: TravelerProblem::InvalidEmail,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    fn traveler(name: &str, email: &str) -> TravelerInfo {
        TravelerInfo {
            name: name.into(),
            email: email.into(),
            phone: String::new(),
        }
    }

    #[test]
    fn reports_the_first_violated_rule() {
        assert_eq!(
            validate_details(None, None, 0),
            Err(DetailsViolation::MissingStartDate)
        );
        assert_eq!(
            validate_details(date("2025-06-01"), None, 0),
            Err(DetailsViolation::MissingEndDate)
        );
        assert_eq!(
            validate_details(date("2025-06-07"), date("2025-06-01"), 0),
            Err(DetailsViolation::EndNotAfterStart)
        );
        assert_eq!(
            validate_details(date("2025-06-01"), date("2025-06-07"), 0),
            Err(DetailsViolation::NoAdults)
        );
        assert_eq!(
            validate_details(date("2025-06-01"), date("2025-06-07"), 1),
            Ok(())
        );
    }

    #[test]
    fn same_day_trip_is_rejected() {
        let err = validate_details(date("2025-06-01"), date("2025-06-01"), 2).unwrap_err();
        assert_eq!(err.to_string(), "End date must be after start date");
    }

    #[test]
    fn validation_is_deterministic() {
        let first = validate_details(date("2025-06-01"), None, 3);
        for _ in 0..5 {
            assert_eq!(validate_details(date("2025-06-01"), None, 3), first);
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" a@b.co "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn email_may_be_embedded_in_longer_text() {
        assert!(is_valid_email("Ada Lovelace <ada@example.com>"));
        assert!(is_valid_email("ada @example.com x@y.z"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn reports_the_first_bad_traveler() {
        let travelers = vec![
            traveler("Ada", "ada@example.com"),
            traveler("   ", "nobody@example.com"),
            traveler("Charles", "not-an-email"),
        ];
        let err = validate_travelers(&travelers).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Traveler {
                index: 1,
                kind: TravelerProblem::MissingName,
            }
        );
        assert_eq!(err.to_string(), "Traveler 2: name is required");

        assert_eq!(
            validate_travelers(&travelers[2..]).unwrap_err().to_string(),
            "Traveler 1: a valid email address is required"
        );
        assert!(validate_travelers(&travelers[..1]).is_ok());
    }
}
