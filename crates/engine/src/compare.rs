//! Field-by-field comparison between expected catalog values and a lookup
//! response. Every equality-style check in the crate routes through here so
//! trimming and absence handling stay uniform.

use crate::model::{ExpectedValues, FieldMismatch, GeoField, LookupResponse};

/// Compare the named fields, trimming surrounding whitespace on both sides.
/// Absent values participate as the empty string rather than erroring.
/// Returns one entry per differing field, in `fields` order; an empty vec
/// means all checked fields agree.
pub fn compare_fields(
    expected: &ExpectedValues,
    actual: &LookupResponse,
    fields: &[GeoField],
) -> Vec<FieldMismatch> {
    let mut mismatches = Vec::new();
    for &field in fields {
        let exp = expected.get(field).unwrap_or("");
        let act = actual.field(field).unwrap_or("");
        if exp.trim() != act.trim() {
            mismatches.push(FieldMismatch {
                field,
                expected: exp.to_string(),
                actual: act.to_string(),
            });
        }
    }
    mismatches
}

/// True when the single field compares equal after trimming.
pub fn fields_equal(expected: &ExpectedValues, actual: &LookupResponse, field: GeoField) -> bool {
    compare_fields(expected, actual, &[field]).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoRecord;

    fn expected(pairs: &[(GeoField, &str)]) -> ExpectedValues {
        let mut values = ExpectedValues::default();
        for (field, value) in pairs {
            values.set(*field, *value);
        }
        values
    }

    fn record(pairs: &[(GeoField, &str)]) -> LookupResponse {
        let mut rec = GeoRecord::default();
        for (field, value) in pairs {
            rec.set(*field, *value);
        }
        LookupResponse::Record(rec)
    }

    #[test]
    fn agreeing_fields_produce_no_mismatch() {
        let exp = expected(&[(GeoField::Country, "United States"), (GeoField::City, "Dallas")]);
        let act = record(&[(GeoField::Country, "United States"), (GeoField::City, "Dallas")]);
        let out = compare_fields(&exp, &act, &[GeoField::Country, GeoField::City]);
        assert!(out.is_empty());
    }

    #[test]
    fn differing_field_reports_raw_values() {
        let exp = expected(&[(GeoField::Country, "United States ")]);
        let act = record(&[(GeoField::Country, "Canada")]);
        let out = compare_fields(&exp, &act, &[GeoField::Country]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field, GeoField::Country);
        assert_eq!(out[0].expected, "United States ");
        assert_eq!(out[0].actual, "Canada");
    }

    #[test]
    fn whitespace_is_trimmed_before_equality() {
        let exp = expected(&[(GeoField::CountryCode, " US ")]);
        let act = record(&[(GeoField::CountryCode, "US")]);
        assert!(compare_fields(&exp, &act, &[GeoField::CountryCode]).is_empty());
    }

    #[test]
    fn absent_actual_counts_as_empty_and_mismatches() {
        let exp = expected(&[(GeoField::Region, "Texas")]);
        let act = record(&[]);
        let out = compare_fields(&exp, &act, &[GeoField::Region]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].actual, "");
    }

    #[test]
    fn absent_on_both_sides_agrees() {
        let exp = expected(&[]);
        let act = record(&[]);
        assert!(compare_fields(&exp, &act, &[GeoField::Postal]).is_empty());
    }

    #[test]
    fn refusal_carries_no_fields() {
        let exp = expected(&[(GeoField::Country, "France")]);
        let act = LookupResponse::Refused {
            message: "Invalid IP address".into(),
        };
        let out = compare_fields(&exp, &act, &[GeoField::Country]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].actual, "");
    }

    #[test]
    fn numeric_looking_values_compare_as_strings() {
        let exp = expected(&[(GeoField::Latitude, "42")]);
        let act = record(&[(GeoField::Latitude, "42.0")]);
        assert_eq!(compare_fields(&exp, &act, &[GeoField::Latitude]).len(), 1);
    }

    #[test]
    fn output_follows_fields_order() {
        let exp = expected(&[(GeoField::City, "a"), (GeoField::Country, "b")]);
        let act = record(&[]);
        let out = compare_fields(&exp, &act, &[GeoField::Country, GeoField::City]);
        assert_eq!(out[0].field, GeoField::Country);
        assert_eq!(out[1].field, GeoField::City);
    }

    #[test]
    fn fields_equal_matches_compare() {
        let exp = expected(&[(GeoField::Continent, "Europe")]);
        let same = record(&[(GeoField::Continent, "Europe ")]);
        let other = record(&[(GeoField::Continent, "Asia")]);
        assert!(fields_equal(&exp, &same, GeoField::Continent));
        assert!(!fields_equal(&exp, &other, GeoField::Continent));
    }
}
