use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Store-assigned record identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub id: RecordId,
    pub name: String,
    pub airport: String,
    pub grade: u8,
    pub pax: Option<f64>,
    pub traffic: Option<f64>,
    pub runway: Option<f64>,
    /// Reserved for per-record scoring parameters; always empty for now.
    pub parameters: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FacilityRecord {
    /// Age since the record was added
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    /// Case-insensitive substring match over name and airport, plain
    /// substring match over the grade digits. A blank query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.airport.to_lowercase().contains(&needle)
            || self.grade.to_string().contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, airport: &str, grade: u8) -> FacilityRecord {
        FacilityRecord {
            id: RecordId::new(1),
            name: name.to_string(),
            airport: airport.to_string(),
            grade,
            pax: None,
            traffic: None,
            runway: None,
            parameters: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let record = sample("Alpha Terminal", "CGK", 3);
        assert!(record.matches_query("alp"));
        assert!(record.matches_query("TERMINAL"));
        assert!(!record.matches_query("beta"));
    }

    #[test]
    fn test_matches_airport() {
        let record = sample("Hangar", "DPS", 3);
        assert!(record.matches_query("dp"));
    }

    #[test]
    fn test_matches_grade_substring() {
        let record = sample("Hangar", "DPS", 12);
        assert!(record.matches_query("12"));
        assert!(record.matches_query("2"));
        assert!(!record.matches_query("13"));
    }

    #[test]
    fn test_blank_query_matches() {
        let record = sample("Hangar", "DPS", 1);
        assert!(record.matches_query(""));
        assert!(record.matches_query("   "));
    }
}
