use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ValidationError;

/// A stored KPA (Key Performance Area) appraisal record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct KpaForm {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub designation: String,
    pub performance_period: String,
    pub kpa_title: String,
    pub kpa_description: Option<String>,
    pub target_value: Decimal,
    pub achieved_value: Decimal,
    pub weightage: Decimal,
    pub score: Option<Decimal>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Client payload for creating a form: the row fields minus everything the
/// server derives or assigns (id, score, timestamps, owner).
#[derive(Debug, Clone, Deserialize)]
pub struct NewKpaForm {
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub designation: String,
    pub performance_period: String,
    pub kpa_title: String,
    #[serde(default)]
    pub kpa_description: Option<String>,
    pub target_value: Decimal,
    pub achieved_value: Decimal,
    pub weightage: Decimal,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl NewKpaForm {
    /// Reject a payload before anything touches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("employee_id", &self.employee_id),
            ("employee_name", &self.employee_name),
            ("department", &self.department),
            ("designation", &self.designation),
            ("performance_period", &self.performance_period),
            ("kpa_title", &self.kpa_title),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::new(field, "must not be empty"));
            }
        }

        // Bounds of the DECIMAL(10,2) / DECIMAL(5,2) columns; oversized
        // values become field errors here instead of driver errors at insert.
        let max_value = Decimal::new(9_999_999_999, 2);
        let max_weightage = Decimal::new(99_999, 2);

        if self.target_value <= Decimal::ZERO {
            return Err(ValidationError::new("target_value", "must be greater than zero"));
        }
        if self.target_value > max_value {
            return Err(ValidationError::new("target_value", "must not exceed 99999999.99"));
        }
        if self.achieved_value < Decimal::ZERO {
            return Err(ValidationError::new("achieved_value", "must not be negative"));
        }
        if self.achieved_value > max_value {
            return Err(ValidationError::new("achieved_value", "must not exceed 99999999.99"));
        }
        if self.weightage <= Decimal::ZERO {
            return Err(ValidationError::new("weightage", "must be greater than zero"));
        }
        if self.weightage > max_weightage {
            return Err(ValidationError::new("weightage", "must not exceed 999.99"));
        }

        Ok(())
    }
}

/// Derived score: `(achieved / target) * weightage`, capped at `weightage`,
/// rounded to 2 decimal places with midpoints away from zero. Over-achievement
/// cannot lift a KPA above its weight.
///
/// Pure on purpose: the formula is testable without a database, and the
/// repository is the only caller that persists its output.
pub fn compute_score(
    target_value: Decimal,
    achieved_value: Decimal,
    weightage: Decimal,
) -> Result<Decimal, ValidationError> {
    if target_value <= Decimal::ZERO {
        return Err(ValidationError::new("target_value", "must be greater than zero"));
    }
    if achieved_value < Decimal::ZERO {
        return Err(ValidationError::new("achieved_value", "must not be negative"));
    }

    // With a non-negative ratio, overflow can only mean a value far above
    // the cap, so it collapses to the weightage like any over-achievement.
    let raw = achieved_value
        .checked_div(target_value)
        .and_then(|ratio| ratio.checked_mul(weightage));
    let score = match raw {
        Some(raw) => raw.min(weightage),
        None => weightage,
    };

    // DECIMAL columns round midpoints away from zero; the derived score
    // keeps the same rule.
    Ok(score.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample() -> NewKpaForm {
        NewKpaForm {
            employee_id: "EMP-001".into(),
            employee_name: "Asha Rao".into(),
            department: "Engineering".into(),
            designation: "Senior Engineer".into(),
            performance_period: "2025-Q2".into(),
            kpa_title: "Defect turnaround".into(),
            kpa_description: Some("Resolve reported defects within SLA".into()),
            target_value: dec("90"),
            achieved_value: dec("85"),
            weightage: dec("20"),
            remarks: None,
        }
    }

    #[test]
    fn test_score_is_proportional() {
        let score = compute_score(dec("90"), dec("85"), dec("20")).unwrap();
        assert_eq!(score, dec("18.89"));
    }

    #[test]
    fn test_score_caps_at_weightage() {
        let score = compute_score(dec("50"), dec("100"), dec("20")).unwrap();
        assert_eq!(score, dec("20"));
    }

    #[test]
    fn test_zero_achievement_scores_zero() {
        let score = compute_score(dec("90"), dec("0"), dec("20")).unwrap();
        assert_eq!(score, dec("0"));
    }

    #[test]
    fn test_zero_target_is_rejected() {
        let err = compute_score(Decimal::ZERO, dec("85"), dec("20")).unwrap_err();
        assert_eq!(err.field, "target_value");

        let err = compute_score(dec("-90"), dec("85"), dec("20")).unwrap_err();
        assert_eq!(err.field, "target_value");
    }

    #[test]
    fn test_negative_achievement_is_rejected() {
        let err = compute_score(dec("90"), dec("-1"), dec("20")).unwrap_err();
        assert_eq!(err.field, "achieved_value");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 1 / 8 * 1 = 0.125, a tie at two decimal places.
        let score = compute_score(dec("8"), dec("1"), dec("1")).unwrap();
        assert_eq!(score, dec("0.13"));
    }

    #[test]
    fn test_extreme_values_cap_instead_of_overflowing() {
        // The ratio alone exceeds Decimal's range.
        let huge = dec("70000000000000000000000000000");
        let score = compute_score(dec("0.01"), huge, dec("20")).unwrap();
        assert_eq!(score, dec("20"));

        // The ratio fits but multiplying by the weightage would not.
        let score = compute_score(dec("1"), huge, dec("20")).unwrap();
        assert_eq!(score, dec("20"));
    }

    #[test]
    fn test_validate_accepts_complete_payload() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let mut form = sample();
        form.employee_name = "   ".into();
        assert_eq!(form.validate().unwrap_err().field, "employee_name");

        let mut form = sample();
        form.department = String::new();
        assert_eq!(form.validate().unwrap_err().field, "department");
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut form = sample();
        form.target_value = Decimal::ZERO;
        assert_eq!(form.validate().unwrap_err().field, "target_value");

        let mut form = sample();
        form.achieved_value = dec("-1");
        assert_eq!(form.validate().unwrap_err().field, "achieved_value");

        let mut form = sample();
        form.weightage = dec("0");
        assert_eq!(form.validate().unwrap_err().field, "weightage");
    }

    #[test]
    fn test_validate_rejects_values_beyond_column_range() {
        let mut form = sample();
        form.target_value = dec("100000000");
        assert_eq!(form.validate().unwrap_err().field, "target_value");

        let mut form = sample();
        form.achieved_value = dec("70000000000000000000000000000");
        assert_eq!(form.validate().unwrap_err().field, "achieved_value");

        let mut form = sample();
        form.weightage = dec("1000");
        assert_eq!(form.validate().unwrap_err().field, "weightage");

        // The column maxima themselves are storable.
        let mut form = sample();
        form.target_value = dec("99999999.99");
        form.achieved_value = dec("99999999.99");
        form.weightage = dec("999.99");
        assert!(form.validate().is_ok());
    }
}
