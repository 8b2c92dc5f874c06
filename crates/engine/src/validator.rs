//! Scenario validators. Each one is a single-method capability the registry
//! hands to the orchestrator: a pure decision over (actual response, catalog
//! case) with no network, logging, or state.

use crate::compare::{compare_fields, fields_equal};
use crate::model::{GeoField, LookupResponse, TestCase, ValidationFailure};

/// Refusal reasons accepted for invalid or restricted IPs (substring match,
/// case-insensitive).
pub const INVALID_IP_REASONS: [&str; 5] =
    ["invalid", "reserved", "private", "broadcast", "loopback"];

/// Refusal wordings the API uses for an empty input (substring match,
/// case-sensitive).
pub const EMPTY_IP_MARKERS: [&str; 2] = ["IP address is required", "Invalid IP"];

pub trait Validate: Send + Sync {
    fn validate(&self, actual: &LookupResponse, case: &TestCase) -> Result<(), ValidationFailure>;
}

// ---------------------------------------------------------------------------
// Record-shaped scenarios
// ---------------------------------------------------------------------------

/// Every non-empty expected field must match the response.
pub struct ValidIp;

impl Validate for ValidIp {
    fn validate(&self, actual: &LookupResponse, case: &TestCase) -> Result<(), ValidationFailure> {
        let fields = case.expected.present_fields();
        let mismatches = compare_fields(&case.expected, actual, &fields);
        if mismatches.is_empty() {
            return Ok(());
        }
        let detail = mismatches
            .iter()
            .map(|m| format!("{}: expected '{}', got '{}'", m.field, m.expected, m.actual))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ValidationFailure::with_mismatches(
            format!("mismatches found: {detail}"),
            mismatches,
        ))
    }
}

/// Inverted check: the actual value must NOT equal the expected one. Keeps
/// the catalog's `* mismatch` scenarios meaning "these differ on purpose".
pub struct FieldNotEqual {
    pub field: GeoField,
}

impl Validate for FieldNotEqual {
    fn validate(&self, actual: &LookupResponse, case: &TestCase) -> Result<(), ValidationFailure> {
        if fields_equal(&case.expected, actual, self.field) {
            return Err(ValidationFailure::new(format!(
                "{} unexpectedly matches the expected value",
                self.field
            )));
        }
        Ok(())
    }
}

/// The listed fields must be present and non-empty in the response.
pub struct FieldPresent {
    pub fields: &'static [GeoField],
}

impl Validate for FieldPresent {
    fn validate(&self, actual: &LookupResponse, _case: &TestCase) -> Result<(), ValidationFailure> {
        for &field in self.fields {
            let present = actual.field(field).map_or(false, |v| !v.trim().is_empty());
            if !present {
                return Err(ValidationFailure::new(format!(
                    "{field} should be present in the response"
                )));
            }
        }
        Ok(())
    }
}

/// Numeric range check for a coordinate field. Unparsable values, including
/// absent ones, are a format failure rather than a silent pass.
pub struct CoordinateRange {
    pub field: GeoField,
    pub min: f64,
    pub max: f64,
}

impl CoordinateRange {
    pub fn latitude() -> Self {
        Self {
            field: GeoField::Latitude,
            min: -90.0,
            max: 90.0,
        }
    }

    pub fn longitude() -> Self {
        Self {
            field: GeoField::Longitude,
            min: -180.0,
            max: 180.0,
        }
    }
}

impl Validate for CoordinateRange {
    fn validate(&self, actual: &LookupResponse, _case: &TestCase) -> Result<(), ValidationFailure> {
        let raw = actual.field(self.field).unwrap_or("").trim();
        let value: f64 = match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                return Err(ValidationFailure::new(format!(
                    "invalid {} format: '{raw}'",
                    self.field
                )))
            }
        };
        // f64 parsing admits "inf" and "NaN"; neither is a coordinate.
        if !value.is_finite() {
            return Err(ValidationFailure::new(format!(
                "invalid {} format: '{raw}'",
                self.field
            )));
        }
        if value < self.min || value > self.max {
            return Err(ValidationFailure::new(format!(
                "{} out of range: {value}",
                self.field
            )));
        }
        Ok(())
    }
}

/// Length bound on the country code.
pub struct CountryCodeLength {
    pub max: usize,
}

impl Validate for CountryCodeLength {
    fn validate(&self, actual: &LookupResponse, _case: &TestCase) -> Result<(), ValidationFailure> {
        let code = actual.field(GeoField::CountryCode).unwrap_or("").trim();
        let len = code.chars().count();
        if len > self.max {
            return Err(ValidationFailure::new(format!(
                "country code too long: '{code}' ({len} chars, max {})",
                self.max
            )));
        }
        Ok(())
    }
}

/// Country and country code are deliberately inconsistent in the catalog; at
/// least one of the pair must disagree with the response.
pub struct ConflictingCountryAndCode;

impl Validate for ConflictingCountryAndCode {
    fn validate(&self, actual: &LookupResponse, case: &TestCase) -> Result<(), ValidationFailure> {
        let country_matches = fields_equal(&case.expected, actual, GeoField::Country);
        let code_matches = fields_equal(&case.expected, actual, GeoField::CountryCode);
        if country_matches && code_matches {
            return Err(ValidationFailure::new(
                "country and country_code both match despite the conflict",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Refusal-shaped scenarios
// ---------------------------------------------------------------------------

/// The lookup must be refused, and the refusal must name one of the known
/// reasons for rejecting the address.
pub struct InvalidIp;

impl Validate for InvalidIp {
    fn validate(&self, actual: &LookupResponse, _case: &TestCase) -> Result<(), ValidationFailure> {
        match actual.refusal_message() {
            Some(message) => {
                let lower = message.to_lowercase();
                if INVALID_IP_REASONS.iter().any(|r| lower.contains(r)) {
                    Ok(())
                } else {
                    Err(ValidationFailure::new(format!(
                        "unexpected refusal message: '{message}'"
                    )))
                }
            }
            None => Err(ValidationFailure::new(
                "expected the lookup to be refused for an invalid or restricted IP",
            )),
        }
    }
}

/// An empty input must be refused with the API's empty-input wording.
pub struct EmptyIp;

impl Validate for EmptyIp {
    fn validate(&self, actual: &LookupResponse, _case: &TestCase) -> Result<(), ValidationFailure> {
        match actual.refusal_message() {
            Some(message) => {
                if EMPTY_IP_MARKERS.iter().any(|m| message.contains(m)) {
                    Ok(())
                } else {
                    Err(ValidationFailure::new(format!(
                        "unexpected refusal message: '{message}'"
                    )))
                }
            }
            None => Err(ValidationFailure::new(
                "expected the lookup to be refused for an empty IP",
            )),
        }
    }
}
