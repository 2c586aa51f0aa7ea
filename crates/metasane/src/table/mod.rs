//! The in-memory table model: field-type classification, controlled
//! vocabulary checks, and discrepancy detection.

mod classify;
mod controlled;
mod discrepancy;

pub use controlled::{ControlledFieldReport, VOCAB_DELIMITER, split_vocab_ref};
pub use discrepancy::{DiscrepancyReport, NormalizationRule, RuleTotals};

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::error::{MetasaneError, Result};

/// The disjoint field-type partition of a table.
///
/// Every field name lands in exactly one of the three sets.
#[derive(Debug, Clone, Default)]
pub struct FieldTypes {
    /// Fields where every cell is a number or an ignorable placeholder.
    pub numeric: HashSet<String>,
    /// Non-numeric fields where every cell is a date/time or ignorable.
    pub timestamp: HashSet<String>,
    /// Everything else: free-text fields.
    pub categorical: HashSet<String>,
}

/// A parsed metadata table, immutable after construction.
///
/// Rows are held row-major in `field_names` order. Derived classifications
/// are computed on first access and cached for the table's lifetime; the
/// records themselves are never mutated.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    field_names: Vec<String>,
    records: Vec<Vec<String>>,
    types: OnceCell<FieldTypes>,
    categorical_values: OnceCell<IndexMap<String, IndexMap<String, usize>>>,
}

impl MetadataTable {
    /// Construct from ordered field names and row-major records.
    ///
    /// Fails fast on duplicate field names or rows whose width does not
    /// match the header.
    pub fn new(field_names: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &field_names {
            if !seen.insert(name.as_str()) {
                return Err(MetasaneError::DuplicateField(name.clone()));
            }
        }

        for (row, record) in records.iter().enumerate() {
            if record.len() != field_names.len() {
                return Err(MetasaneError::MalformedRecord {
                    row,
                    message: format!(
                        "expected {} fields, found {}",
                        field_names.len(),
                        record.len()
                    ),
                });
            }
        }

        Ok(Self {
            field_names,
            records,
            types: OnceCell::new(),
            categorical_values: OnceCell::new(),
        })
    }

    /// Construct from records given as field-name-to-value mappings.
    ///
    /// Every record must carry exactly the declared field names: a missing
    /// or unknown field is a [`MetasaneError::MalformedRecord`].
    pub fn from_records(
        field_names: Vec<String>,
        records: Vec<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for (row, mut record) in records.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(field_names.len());
            for name in &field_names {
                match record.remove(name) {
                    Some(value) => cells.push(value),
                    None => {
                        return Err(MetasaneError::MalformedRecord {
                            row,
                            message: format!("missing field '{name}'"),
                        });
                    }
                }
            }
            if let Some(extra) = record.into_keys().next() {
                return Err(MetasaneError::MalformedRecord {
                    row,
                    message: format!("unknown field '{extra}'"),
                });
            }
            rows.push(cells);
        }
        Self::new(field_names, rows)
    }

    /// The ordered column identifiers.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// `(row count, field count)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.field_names.len())
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        let (rows, fields) = self.shape();
        rows * fields
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// All values of one column, in row order.
    pub(crate) fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .map(move |record| record.get(index).map(String::as_str).unwrap_or(""))
    }

    /// The field-type partition, computed on first call.
    pub fn field_types(&self) -> &FieldTypes {
        self.types.get_or_init(|| self.compute_field_types())
    }

    /// Fields classified as numeric.
    pub fn numeric_fields(&self) -> &HashSet<String> {
        &self.field_types().numeric
    }

    /// Fields classified as timestamps.
    pub fn timestamp_fields(&self) -> &HashSet<String> {
        &self.field_types().timestamp
    }

    /// Fields classified as categorical.
    pub fn categorical_fields(&self) -> &HashSet<String> {
        &self.field_types().categorical
    }

    /// Raw value occurrence counts for every categorical field.
    ///
    /// Fields appear in header order; values within a field in
    /// first-observed row order. Computed once and reused by the
    /// discrepancy detector.
    pub fn categorical_field_values(&self) -> &IndexMap<String, IndexMap<String, usize>> {
        self.categorical_values
            .get_or_init(|| self.compute_categorical_values())
    }

    fn compute_field_types(&self) -> FieldTypes {
        let mut types = FieldTypes::default();

        // Numeric wins over timestamp: a column of bare integers must not
        // be reclassified as dates.
        for (index, name) in self.field_names.iter().enumerate() {
            if self.column_satisfies(index, classify::is_numeric) {
                types.numeric.insert(name.clone());
            } else if self.column_satisfies(index, classify::is_timestamp) {
                types.timestamp.insert(name.clone());
            } else {
                types.categorical.insert(name.clone());
            }
        }

        log::debug!(
            "classified {} fields: {} numeric, {} timestamp, {} categorical",
            self.field_names.len(),
            types.numeric.len(),
            types.timestamp.len(),
            types.categorical.len()
        );
        types
    }

    /// A column satisfies a type check when every cell passes it or is an
    /// ignorable placeholder.
    fn column_satisfies(&self, index: usize, check: impl Fn(&str) -> bool) -> bool {
        self.column_values(index)
            .all(|value| classify::is_ignorable(value) || check(value))
    }

    fn compute_categorical_values(&self) -> IndexMap<String, IndexMap<String, usize>> {
        let categorical = &self.field_types().categorical;

        let mut fields = IndexMap::new();
        for (index, name) in self.field_names.iter().enumerate() {
            if !categorical.contains(name) {
                continue;
            }
            let mut counts: IndexMap<String, usize> = IndexMap::new();
            for value in self.column_values(index) {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
            fields.insert(name.clone(), counts);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MetadataTable {
        let field_names = ["#ID", "Foo", "Bar", "Baz", "Num", "Timestamp"]
            .map(String::from)
            .to_vec();
        let rows = [
            ["A", "Yes", "foo bar", "na", "0.001", "None"],
            ["B", " NO", "foobar", "vocab_1:BAr", " NA", "1:55 PM"],
            ["C", "yes", "na", "vocab_1:foobar", "-1e-2", "na"],
            ["D", "NO ", " foo  bar ", "na", " N/A", "2013-12-30"],
            ["E", "yes", " foo  bar ", "vocab_3:baz", "36.446", "1:55PM"],
        ]
        .map(|row| row.map(String::from).to_vec())
        .to_vec();
        MetadataTable::new(field_names, rows).unwrap()
    }

    fn names(set: &HashSet<String>) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_shape_and_size() {
        let table = fixture();
        assert_eq!(table.shape(), (5, 6));
        assert_eq!(table.size(), 30);
    }

    #[test]
    fn test_numeric_fields() {
        assert_eq!(names(fixture().numeric_fields()), vec!["Num"]);
    }

    #[test]
    fn test_timestamp_fields() {
        assert_eq!(names(fixture().timestamp_fields()), vec!["Timestamp"]);
    }

    #[test]
    fn test_categorical_fields() {
        assert_eq!(
            names(fixture().categorical_fields()),
            vec!["#ID", "Bar", "Baz", "Foo"]
        );
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let table = fixture();
        let types = table.field_types();
        let mut all: Vec<&str> = types
            .numeric
            .iter()
            .chain(&types.timestamp)
            .chain(&types.categorical)
            .map(String::as_str)
            .collect();
        all.sort_unstable();
        let mut expected: Vec<&str> = table.field_names().iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_categorical_field_values() {
        let table = fixture();
        let values = table.categorical_field_values();

        let foo = &values["Foo"];
        assert_eq!(foo["Yes"], 1);
        assert_eq!(foo["yes"], 2);
        assert_eq!(foo["NO "], 1);
        assert_eq!(foo[" NO"], 1);

        let baz = &values["Baz"];
        assert_eq!(baz["na"], 2);
        assert_eq!(baz["vocab_1:BAr"], 1);

        // Numeric and timestamp fields are not collected.
        assert!(!values.contains_key("Num"));
        assert!(!values.contains_key("Timestamp"));
    }

    #[test]
    fn test_value_counts_sum_to_row_count() {
        let table = fixture();
        for (field, counts) in table.categorical_field_values() {
            let total: usize = counts.values().sum();
            assert_eq!(total, table.row_count(), "field {field}");
        }
    }

    #[test]
    fn test_empty_table_classifies_all_numeric() {
        let table =
            MetadataTable::new(vec!["a".into(), "b".into()], Vec::new()).unwrap();
        assert_eq!(table.numeric_fields().len(), 2);
        assert!(table.categorical_fields().is_empty());
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let err = MetadataTable::new(vec!["a".into(), "a".into()], Vec::new()).unwrap_err();
        assert!(matches!(err, MetasaneError::DuplicateField(name) if name == "a"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = MetadataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, MetasaneError::MalformedRecord { row: 0, .. }));
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            HashMap::from([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x".to_string()),
            ]),
            HashMap::from([
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "y".to_string()),
            ]),
        ];
        let table =
            MetadataTable::from_records(vec!["a".into(), "b".into()], records).unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(names(table.numeric_fields()), vec!["a"]);
    }

    #[test]
    fn test_from_records_missing_field_rejected() {
        let records = vec![HashMap::from([("a".to_string(), "1".to_string())])];
        let err = MetadataTable::from_records(vec!["a".into(), "b".into()], records)
            .unwrap_err();
        assert!(matches!(err, MetasaneError::MalformedRecord { row: 0, .. }));
    }

    #[test]
    fn test_from_records_unknown_field_rejected() {
        let records = vec![HashMap::from([
            ("a".to_string(), "1".to_string()),
            ("zzz".to_string(), "2".to_string()),
        ])];
        let err =
            MetadataTable::from_records(vec!["a".into()], records).unwrap_err();
        assert!(matches!(err, MetasaneError::MalformedRecord { row: 0, .. }));
    }
}
