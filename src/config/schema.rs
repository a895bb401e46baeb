use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::airport::{AirportAttributes, AirportTable};

pub const DEFAULT_SCORING_DELAY: Duration = Duration::from_secs(2);

/// Main configuration.
///
/// Every key is optional; an empty file is a valid config.
///
/// Example YAML:
/// ```yaml
/// scoring_delay: "2s"
/// theme: dark
/// airports:
///   KNO: { pax: 3, traffic: 4, runway: 1.1 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How long score generation waits before results appear (humantime format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_delay: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeChoice>,

    /// Extra or replacement entries for the airport lookup table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airports: Option<BTreeMap<String, AirportAttributes>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Config {
    /// Effective scoring delay. Falls back to the default when unset or
    /// unparseable (validation reports the latter at startup).
    pub fn scoring_delay(&self) -> Duration {
        self.scoring_delay
            .as_deref()
            .and_then(|s| humantime::parse_duration(s.trim()).ok())
            .unwrap_or(DEFAULT_SCORING_DELAY)
    }

    pub fn theme(&self) -> ThemeChoice {
        self.theme.unwrap_or_default()
    }

    /// Built-in airports merged with the configured overrides.
    pub fn airport_table(&self) -> AirportTable {
        match &self.airports {
            Some(overrides) => AirportTable::with_overrides(overrides),
            None => AirportTable::builtin(),
        }
    }
}
