//! Catalog loading: the CSV of test cases driving a suite run.

use std::collections::BTreeMap;

use crate::error::LoadError;
use crate::model::{ExpectedValues, GeoField, TestCase};

/// Parse the case catalog. The header must name `ip` and `scenario`; rows
/// where either cell is empty are commentary and are dropped. The optional
/// field columns fill the expected values; an empty cell means "not checked".
/// Case order follows the catalog exactly.
pub fn load_catalog(csv_data: &str) -> Result<Vec<TestCase>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::Csv(e.to_string()))?
        .clone();

    let idx = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
        })
    };
    let ip_idx = idx("ip")?;
    let scenario_idx = idx("scenario")?;

    let field_columns: Vec<(GeoField, usize)> = GeoField::ALL
        .iter()
        .filter_map(|&f| headers.iter().position(|h| h == f.as_str()).map(|i| (f, i)))
        .collect();

    let mut cases = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoadError::Csv(e.to_string()))?;

        let raw_ip = record.get(ip_idx).unwrap_or("");
        let raw_scenario = record.get(scenario_idx).unwrap_or("");
        // Raw emptiness, not trimmed: a whitespace-only ip cell is how the
        // catalog asks for an empty-address lookup.
        if raw_ip.is_empty() || raw_scenario.is_empty() {
            continue;
        }

        let mut expected = ExpectedValues::default();
        for &(field, i) in &field_columns {
            let value = record.get(i).unwrap_or("");
            if !value.trim().is_empty() {
                expected.set(field, value);
            }
        }

        let row: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();

        cases.push(TestCase {
            scenario: raw_scenario.to_string(),
            ip: raw_ip.trim().to_string(),
            expected,
            row,
        });
    }

    Ok(cases)
}
