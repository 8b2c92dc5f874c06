use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Field vocabulary
// ---------------------------------------------------------------------------

/// The geolocation fields a catalog row may pin down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoField {
    Country,
    Region,
    City,
    CountryCode,
    Continent,
    Latitude,
    Longitude,
    Postal,
}

impl GeoField {
    pub const ALL: [GeoField; 8] = [
        GeoField::Country,
        GeoField::Region,
        GeoField::City,
        GeoField::CountryCode,
        GeoField::Continent,
        GeoField::Latitude,
        GeoField::Longitude,
        GeoField::Postal,
    ];

    /// Wire/CSV column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Region => "region",
            Self::City => "city",
            Self::CountryCode => "country_code",
            Self::Continent => "continent",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Postal => "postal",
        }
    }
}

impl fmt::Display for GeoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Catalog input
// ---------------------------------------------------------------------------

/// Expected field values from one catalog row. An absent field is simply not
/// checked.
#[derive(Debug, Clone, Default)]
pub struct ExpectedValues {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub postal: Option<String>,
}

impl ExpectedValues {
    pub fn get(&self, field: GeoField) -> Option<&str> {
        match field {
            GeoField::Country => self.country.as_deref(),
            GeoField::Region => self.region.as_deref(),
            GeoField::City => self.city.as_deref(),
            GeoField::CountryCode => self.country_code.as_deref(),
            GeoField::Continent => self.continent.as_deref(),
            GeoField::Latitude => self.latitude.as_deref(),
            GeoField::Longitude => self.longitude.as_deref(),
            GeoField::Postal => self.postal.as_deref(),
        }
    }

    pub fn set(&mut self, field: GeoField, value: impl Into<String>) {
        let slot = match field {
            GeoField::Country => &mut self.country,
            GeoField::Region => &mut self.region,
            GeoField::City => &mut self.city,
            GeoField::CountryCode => &mut self.country_code,
            GeoField::Continent => &mut self.continent,
            GeoField::Latitude => &mut self.latitude,
            GeoField::Longitude => &mut self.longitude,
            GeoField::Postal => &mut self.postal,
        };
        *slot = Some(value.into());
    }

    /// Fields carrying a non-empty expected value, in declaration order.
    pub fn present_fields(&self) -> Vec<GeoField> {
        GeoField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).map_or(false, |v| !v.trim().is_empty()))
            .collect()
    }
}

/// One catalog row: an IP, a scenario name, and the expected fields.
#[derive(Debug, Clone, Default)]
pub struct TestCase {
    /// Scenario as spelled in the catalog; normalized at dispatch.
    pub scenario: String,
    /// Trimmed IP. May be empty when the raw cell was whitespace, which is
    /// how the catalog spells "look up an empty address".
    pub ip: String,
    pub expected: ExpectedValues,
    /// Full original row, attached to the case report.
    pub row: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// A successful lookup: the field vocabulary as returned by the API, numbers
/// stringified at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub ip: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub postal: Option<String>,
}

impl GeoRecord {
    pub fn get(&self, field: GeoField) -> Option<&str> {
        match field {
            GeoField::Country => self.country.as_deref(),
            GeoField::Region => self.region.as_deref(),
            GeoField::City => self.city.as_deref(),
            GeoField::CountryCode => self.country_code.as_deref(),
            GeoField::Continent => self.continent.as_deref(),
            GeoField::Latitude => self.latitude.as_deref(),
            GeoField::Longitude => self.longitude.as_deref(),
            GeoField::Postal => self.postal.as_deref(),
        }
    }

    pub fn set(&mut self, field: GeoField, value: impl Into<String>) {
        let slot = match field {
            GeoField::Country => &mut self.country,
            GeoField::Region => &mut self.region,
            GeoField::City => &mut self.city,
            GeoField::CountryCode => &mut self.country_code,
            GeoField::Continent => &mut self.continent,
            GeoField::Latitude => &mut self.latitude,
            GeoField::Longitude => &mut self.longitude,
            GeoField::Postal => &mut self.postal,
        };
        *slot = Some(value.into());
    }
}

/// What a lookup produced: a full record, or an API-level refusal carrying
/// the upstream message. Transport failures never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    Record(GeoRecord),
    Refused { message: String },
}

impl LookupResponse {
    /// Uniform field access; a refusal carries no fields.
    pub fn field(&self, field: GeoField) -> Option<&str> {
        match self {
            Self::Record(record) => record.get(field),
            Self::Refused { .. } => None,
        }
    }

    pub fn refusal_message(&self) -> Option<&str> {
        match self {
            Self::Record(_) => None,
            Self::Refused { message } => Some(message),
        }
    }
}

/// Transport-level failure: the lookup never produced a usable response.
/// Always a hard case failure, never retried.
#[derive(Debug, Clone)]
pub struct LookupError {
    pub reason: String,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup produced no data: {}", self.reason)
    }
}

impl std::error::Error for LookupError {}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// One field the comparison flagged. Raw values on both sides, absence
/// rendered as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub field: GeoField,
    pub expected: String,
    pub actual: String,
}

/// A validator rejection. `mismatches` is empty unless the failure came out
/// of a field comparison.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub message: String,
    pub mismatches: Vec<FieldMismatch>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mismatches: Vec::new(),
        }
    }

    pub fn with_mismatches(message: impl Into<String>, mismatches: Vec<FieldMismatch>) -> Self {
        Self {
            message: message.into(),
            mismatches,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFailure {}

// ---------------------------------------------------------------------------
// Outcome + report
// ---------------------------------------------------------------------------

/// Terminal state of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed {
        message: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        mismatches: Vec<FieldMismatch>,
    },
    Skipped {
        reason: String,
    },
}

impl CaseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// Normalized scenario key.
    pub scenario: String,
    pub ip: String,
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
    /// Original catalog row.
    pub row: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub meta: RunMeta,
    pub summary: SuiteSummary,
    pub cases: Vec<CaseReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub suite: String,
    pub base_url: String,
    pub engine_version: String,
    pub run_at: String,
}
