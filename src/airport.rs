//! Static airport reference data and the attribute resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric attributes attached to an airport code.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AirportAttributes {
    pub pax: f64,
    pub traffic: f64,
    pub runway: f64,
}

impl AirportAttributes {
    pub const fn new(pax: f64, traffic: f64, runway: f64) -> Self {
        Self {
            pax,
            traffic,
            runway,
        }
    }
}

/// Built-in lookup table.
const BUILTIN_AIRPORTS: [(&str, AirportAttributes); 4] = [
    ("CGK", AirportAttributes::new(7.0, 5.0, 1.0)),
    ("DPS", AirportAttributes::new(6.0, 3.0, 2.0)),
    ("SUB", AirportAttributes::new(5.0, 7.0, 1.2)),
    ("UPG", AirportAttributes::new(4.0, 7.0, 1.4)),
];

/// Read-only mapping from airport code to attributes.
///
/// Codes are stored upper-cased and iterate in sorted order, which is also
/// the order the form cycles through them.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportTable {
    entries: BTreeMap<String, AirportAttributes>,
}

impl Default for AirportTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AirportTable {
    /// The built-in table (CGK, DPS, SUB, UPG).
    pub fn builtin() -> Self {
        let entries = BUILTIN_AIRPORTS
            .iter()
            .map(|(code, attrs)| (code.to_string(), *attrs))
            .collect();
        Self { entries }
    }

    /// Built-in table with config-supplied entries layered on top.
    /// Overrides win on conflicting codes.
    pub fn with_overrides(overrides: &BTreeMap<String, AirportAttributes>) -> Self {
        let mut table = Self::builtin();
        for (code, attrs) in overrides {
            let code = normalize_code(code);
            if !code.is_empty() {
                table.entries.insert(code, *attrs);
            }
        }
        table
    }

    /// Look up a code. Matching ignores surrounding whitespace and case;
    /// blank or unknown codes resolve to `None`.
    pub fn resolve(&self, code: &str) -> Option<AirportAttributes> {
        let code = normalize_code(code);
        if code.is_empty() {
            return None;
        }
        self.entries.get(&code).copied()
    }

    /// Known codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AirportAttributes)> {
        self.entries.iter().map(|(code, attrs)| (code.as_str(), attrs))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
