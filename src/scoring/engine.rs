use super::factors::FACTORS;
use crate::error::{Error, Result};
use crate::records::FacilityRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,     // e.g. "Pax", "Traffic", "Runway"
    pub value: f64,        // Raw attribute value
    pub weight: f64,       // e.g. 0.25
    pub contribution: f64, // value * weight, unrounded
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

impl ScoreBreakdown {
    /// Sum of contributions before rounding.
    pub fn raw_total(&self) -> f64 {
        self.factors.iter().map(|f| f.contribution).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score a record: `round(pax * 0.25 + traffic * 0.20 + runway * 0.20, 2)`.
///
/// Fails with [`Error::InvalidRecord`] naming the first blank or non-finite
/// attribute.
pub fn calculate_score(record: &FacilityRecord) -> Result<ScoreResult> {
    let mut factors = Vec::with_capacity(FACTORS.len());

    for factor in &FACTORS {
        let value = factor.value(record).ok_or(Error::InvalidRecord {
            id: record.id,
            field: factor.attribute,
        })?;
        factors.push(FactorContribution {
            label: factor.label.to_string(),
            value,
            weight: factor.weight,
            contribution: factor.apply(value),
        });
    }

    let breakdown = ScoreBreakdown { factors };
    Ok(ScoreResult {
        score: round_score(breakdown.raw_total()),
        breakdown,
    })
}

/// Round to two decimal places, halves away from zero.
pub fn round_score(raw: f64) -> f64 {
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Attribute;
    use crate::records::RecordId;
    use chrono::Utc;

    fn sample_record(pax: Option<f64>, traffic: Option<f64>, runway: Option<f64>) -> FacilityRecord {
        FacilityRecord {
            id: RecordId::new(1),
            name: "Terminal".to_string(),
            airport: "CGK".to_string(),
            grade: 3,
            pax,
            traffic,
            runway,
            parameters: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cgk_example() {
        let result = calculate_score(&sample_record(Some(7.0), Some(5.0), Some(1.0))).unwrap();
        // 1.75 + 1.00 + 0.20
        assert_eq!(result.score, 2.95);
    }

    #[test]
    fn test_builtin_airports() {
        let dps = calculate_score(&sample_record(Some(6.0), Some(3.0), Some(2.0))).unwrap();
        assert_eq!(dps.score, 2.5);

        let sub = calculate_score(&sample_record(Some(5.0), Some(7.0), Some(1.2))).unwrap();
        assert_eq!(sub.score, 2.89);

        let upg = calculate_score(&sample_record(Some(4.0), Some(7.0), Some(1.4))).unwrap();
        assert_eq!(upg.score, 2.68);
    }

    #[test]
    fn test_formula_over_grid() {
        for p in [0.0, 1.0, 2.5, 13.0] {
            for t in [0.0, 0.3, 4.0] {
                for r in [0.0, 1.7, 9.0] {
                    let result = calculate_score(&sample_record(Some(p), Some(t), Some(r))).unwrap();
                    let expected = ((p * 0.25 + t * 0.20 + r * 0.20) * 100.0).round() / 100.0;
                    assert_eq!(result.score, expected, "p={} t={} r={}", p, t, r);
                }
            }
        }
    }

    #[test]
    fn test_breakdown_contributions() {
        let result = calculate_score(&sample_record(Some(7.0), Some(5.0), Some(1.0))).unwrap();
        let labels: Vec<&str> = result
            .breakdown
            .factors
            .iter()
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Pax", "Traffic", "Runway"]);
        assert_eq!(result.breakdown.factors[0].contribution, 1.75);
        assert!((result.breakdown.raw_total() - 2.95).abs() < 1e-9);
    }

    #[test]
    fn test_blank_attribute_is_invalid_record() {
        let err = calculate_score(&sample_record(Some(7.0), None, Some(1.0))).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRecord {
                field: Attribute::Traffic,
                ..
            }
        ));
    }

    #[test]
    fn test_nan_attribute_is_invalid_record() {
        let err = calculate_score(&sample_record(Some(f64::NAN), Some(1.0), Some(1.0))).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRecord {
                field: Attribute::Pax,
                ..
            }
        ));
    }

    #[test]
    fn test_round_score_half_away_from_zero() {
        assert_eq!(round_score(1.005 + 1e-9), 1.01);
        assert_eq!(round_score(2.344), 2.34);
        assert_eq!(round_score(0.0), 0.0);
    }
}
