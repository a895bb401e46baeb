use crate::airport::AirportTable;
use crate::error::{Error, Field, FieldError, Result};

use super::types::FacilityRecord;

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 23;

/// Values held by the create form and the edit modal.
///
/// The numeric attributes are never typed by hand: they follow the airport
/// selection through [`RecordDraft::select_airport`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub airport: String,
    pub grade: Option<u8>,
    pub pax: Option<f64>,
    pub traffic: Option<f64>,
    pub runway: Option<f64>,
}

/// A draft that passed validation, ready to be written into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub airport: String,
    pub grade: u8,
    pub pax: Option<f64>,
    pub traffic: Option<f64>,
    pub runway: Option<f64>,
}

impl RecordDraft {
    /// Seed a draft from an existing record (edit modal).
    pub fn from_record(record: &FacilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            airport: record.airport.clone(),
            grade: Some(record.grade),
            pax: record.pax,
            traffic: record.traffic,
            runway: record.runway,
        }
    }

    /// Apply an airport selection. A known code fills in pax, traffic and
    /// runway; an unknown or blank code clears the airport and all three.
    pub fn select_airport(&mut self, code: &str, table: &AirportTable) {
        match table.resolve(code) {
            Some(attrs) => {
                self.airport = code.trim().to_ascii_uppercase();
                self.pax = Some(attrs.pax);
                self.traffic = Some(attrs.traffic);
                self.runway = Some(attrs.runway);
            }
            None => {
                self.airport.clear();
                self.pax = None;
                self.traffic = None;
                self.runway = None;
            }
        }
    }

    /// Step the airport selector through blank and every known code.
    pub fn cycle_airport(&mut self, forward: bool, table: &AirportTable) {
        let mut options: Vec<&str> = vec![""];
        options.extend(table.codes());

        let current = options
            .iter()
            .position(|code| code.eq_ignore_ascii_case(&self.airport))
            .unwrap_or(0);
        let next = step(current, options.len(), forward);
        let code = options[next].to_string();
        self.select_airport(&code, table);
    }

    /// Step the grade selector through blank and 1..=23.
    pub fn cycle_grade(&mut self, forward: bool) {
        let slots = (MAX_GRADE - MIN_GRADE + 1) as usize + 1;
        let current = match self.grade {
            Some(g) if (MIN_GRADE..=MAX_GRADE).contains(&g) => (g - MIN_GRADE) as usize + 1,
            _ => 0,
        };
        let next = step(current, slots, forward);
        self.grade = if next == 0 {
            None
        } else {
            Some(MIN_GRADE + (next - 1) as u8)
        };
    }

    /// Check required fields. Reports every problem at once, not just the first.
    pub fn validate(&self) -> Result<ValidDraft> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::Missing(Field::Name));
        }

        let airport = self.airport.trim();
        if airport.is_empty() {
            errors.push(FieldError::Missing(Field::Airport));
        }

        let grade = match self.grade {
            None => {
                errors.push(FieldError::Missing(Field::Grade));
                0
            }
            Some(g) if !(MIN_GRADE..=MAX_GRADE).contains(&g) => {
                errors.push(FieldError::GradeOutOfRange(g));
                g
            }
            Some(g) => g,
        };

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(ValidDraft {
            name: name.to_string(),
            airport: airport.to_string(),
            grade,
            pax: self.pax,
            traffic: self.traffic,
            runway: self.runway,
        })
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecordDraft {
        let mut draft = RecordDraft {
            name: "Cargo Apron".to_string(),
            grade: Some(5),
            ..Default::default()
        };
        draft.select_airport("CGK", &AirportTable::builtin());
        draft
    }

    #[test]
    fn test_select_known_airport_populates() {
        let mut draft = RecordDraft::default();
        draft.select_airport("DPS", &AirportTable::builtin());
        assert_eq!(draft.airport, "DPS");
        assert_eq!(draft.pax, Some(6.0));
        assert_eq!(draft.traffic, Some(3.0));
        assert_eq!(draft.runway, Some(2.0));
    }

    #[test]
    fn test_select_unknown_airport_clears() {
        let mut draft = filled();
        draft.select_airport("XXX", &AirportTable::builtin());
        assert_eq!(draft.airport, "");
        assert_eq!(draft.pax, None);
        assert_eq!(draft.traffic, None);
        assert_eq!(draft.runway, None);
        // Other fields are untouched
        assert_eq!(draft.name, "Cargo Apron");
        assert_eq!(draft.grade, Some(5));
    }

    #[test]
    fn test_cycle_airport_wraps_through_blank() {
        let table = AirportTable::builtin();
        let mut draft = RecordDraft::default();

        draft.cycle_airport(true, &table);
        assert_eq!(draft.airport, "CGK");
        draft.cycle_airport(false, &table);
        assert_eq!(draft.airport, "");
        assert_eq!(draft.pax, None);
        draft.cycle_airport(false, &table);
        assert_eq!(draft.airport, "UPG");
        assert_eq!(draft.runway, Some(1.4));
    }

    #[test]
    fn test_cycle_grade_bounds() {
        let mut draft = RecordDraft::default();
        draft.cycle_grade(true);
        assert_eq!(draft.grade, Some(1));
        draft.cycle_grade(false);
        assert_eq!(draft.grade, None);
        draft.cycle_grade(false);
        assert_eq!(draft.grade, Some(23));
        draft.cycle_grade(true);
        assert_eq!(draft.grade, None);
    }

    #[test]
    fn test_validate_ok_trims_name() {
        let mut draft = filled();
        draft.name = "  Cargo Apron ".to_string();
        let valid = draft.validate().unwrap();
        assert_eq!(valid.name, "Cargo Apron");
        assert_eq!(valid.airport, "CGK");
        assert_eq!(valid.grade, 5);
        assert_eq!(valid.pax, Some(7.0));
    }

    #[test]
    fn test_validate_collects_all_missing() {
        let draft = RecordDraft {
            name: "   ".to_string(),
            ..Default::default()
        };
        match draft.validate() {
            Err(Error::Validation(errors)) => {
                assert_eq!(
                    errors,
                    vec![
                        FieldError::Missing(Field::Name),
                        FieldError::Missing(Field::Airport),
                        FieldError::Missing(Field::Grade),
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_grade_range() {
        let mut draft = filled();
        draft.grade = Some(24);
        assert!(matches!(
            draft.validate(),
            Err(Error::Validation(ref errors)) if errors == &vec![FieldError::GradeOutOfRange(24)]
        ));

        draft.grade = Some(0);
        assert!(draft.validate().is_err());

        draft.grade = Some(23);
        assert!(draft.validate().is_ok());
    }
}
