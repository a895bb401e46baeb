use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref delay) = config.scoring_delay {
        if let Err(e) = humantime::parse_duration(delay.trim()) {
            errors.push(format!("scoring_delay: invalid duration '{}' - {}", delay, e));
        }
    }

    if let Some(ref airports) = config.airports {
        for (code, attrs) in airports {
            if code.trim().is_empty() {
                errors.push("airports: code must not be blank".to_string());
                continue;
            }
            let values = [
                ("pax", attrs.pax),
                ("traffic", attrs.traffic),
                ("runway", attrs.runway),
            ];
            for (name, value) in values {
                if !value.is_finite() || value < 0.0 {
                    errors.push(format!(
                        "airports.{}.{}: must be a non-negative number",
                        code, name
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportAttributes;
    use std::collections::BTreeMap;

    fn with_airport(code: &str, attrs: AirportAttributes) -> Config {
        let mut airports = BTreeMap::new();
        airports.insert(code.to_string(), attrs);
        Config {
            airports: Some(airports),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            scoring_delay: Some("2s".to_string()),
            ..with_airport("KNO", AirportAttributes::new(3.0, 4.0, 1.0))
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_delay() {
        let config = Config {
            scoring_delay: Some("soon".to_string()),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("scoring_delay"));
    }

    #[test]
    fn test_negative_attribute() {
        let config = with_airport("KNO", AirportAttributes::new(-1.0, 4.0, 1.0));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["airports.KNO.pax: must be a non-negative number"]);
    }

    #[test]
    fn test_blank_code() {
        let config = with_airport(" ", AirportAttributes::new(1.0, 1.0, 1.0));
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("blank"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            scoring_delay: Some("bad".to_string()),
            ..with_airport("KNO", AirportAttributes::new(f64::NAN, -2.0, 1.0))
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
