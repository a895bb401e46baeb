use crate::error::Attribute;
use crate::records::FacilityRecord;

/// One weighted term of the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    pub label: &'static str,
    pub attribute: Attribute,
    pub weight: f64,
}

/// The fixed scoring formula: pax x0.25 + traffic x0.20 + runway x0.20
pub const FACTORS: [Factor; 3] = [
    Factor {
        label: "Pax",
        attribute: Attribute::Pax,
        weight: 0.25,
    },
    Factor {
        label: "Traffic",
        attribute: Attribute::Traffic,
        weight: 0.20,
    },
    Factor {
        label: "Runway",
        attribute: Attribute::Runway,
        weight: 0.20,
    },
];

impl Factor {
    /// Read this factor's attribute from a record. `None` for blank or
    /// non-finite values.
    pub fn value(&self, record: &FacilityRecord) -> Option<f64> {
        let raw = match self.attribute {
            Attribute::Pax => record.pax,
            Attribute::Traffic => record.traffic,
            Attribute::Runway => record.runway,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Weighted contribution of a raw value.
    pub fn apply(&self, value: f64) -> f64 {
        value * self.weight
    }
}
