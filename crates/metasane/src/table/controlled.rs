//! Controlled-vocabulary extraction and validation.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{MetasaneError, Result};
use crate::vocab::VocabularyLookup;

use super::MetadataTable;

/// The character separating a vocabulary identifier from its term.
pub const VOCAB_DELIMITER: char = ':';

/// Split a cell value into an optional vocabulary identifier and the
/// residual term, on the first delimiter occurrence.
///
/// A pure function of the string: it does not consult any loaded
/// vocabulary.
///
/// ```
/// use metasane::split_vocab_ref;
///
/// assert_eq!(split_vocab_ref("ENVO:foo"), (Some("ENVO"), "foo"));
/// assert_eq!(split_vocab_ref("foo"), (None, "foo"));
/// ```
pub fn split_vocab_ref(value: &str) -> (Option<&str>, &str) {
    match value.split_once(VOCAB_DELIMITER) {
        Some((vocab_id, term)) => (Some(vocab_id), term),
        None => (None, value),
    }
}

/// Outcome of validating the controlled fields of a table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ControlledFieldReport {
    /// Distinct offending raw cell values, keyed by field.
    pub invalid_values: IndexMap<String, BTreeSet<String>>,
    /// Total number of invalid cells encountered, duplicates included.
    pub invalid_cell_count: usize,
}

impl ControlledFieldReport {
    /// Whether every controlled cell resolved to a known term.
    pub fn is_clean(&self) -> bool {
        self.invalid_cell_count == 0
    }
}

impl MetadataTable {
    /// Which categorical fields look like controlled-vocabulary references,
    /// and which vocabulary identifiers each one mentions.
    ///
    /// With `known_vocabs` supplied, only identifiers that exist in it are
    /// recorded. Fields mentioning no identifier are omitted; numeric and
    /// timestamp fields are never inspected.
    pub fn candidate_controlled_fields(
        &self,
        known_vocabs: Option<&dyn VocabularyLookup>,
    ) -> IndexMap<String, BTreeSet<String>> {
        let categorical = &self.field_types().categorical;

        let mut candidates: IndexMap<String, BTreeSet<String>> = IndexMap::new();
        for (index, name) in self.field_names().iter().enumerate() {
            if !categorical.contains(name) {
                continue;
            }
            for value in self.column_values(index) {
                let (Some(vocab_id), _) = split_vocab_ref(value) else {
                    continue;
                };
                if known_vocabs.is_none_or(|vocabs| vocabs.exists(vocab_id)) {
                    candidates
                        .entry(name.clone())
                        .or_default()
                        .insert(vocab_id.to_string());
                }
            }
        }
        candidates
    }

    /// Validate every controlled field against its vocabulary.
    ///
    /// A field observed referencing more than one known vocabulary is a
    /// configuration error ([`MetasaneError::MultipleVocabularies`]) and
    /// stops validation outright. Otherwise each cell of a controlled field
    /// is invalid when it carries no vocabulary identifier, references a
    /// vocabulary other than the field's fixed one, or its term is not a
    /// member (case-insensitively) of that vocabulary.
    ///
    /// Two passes over the controlled columns, kept deliberately simple.
    pub fn validate_controlled_fields(
        &self,
        known_vocabs: &dyn VocabularyLookup,
    ) -> Result<ControlledFieldReport> {
        let candidates = self.candidate_controlled_fields(Some(known_vocabs));

        // First pass outcome: one fixed vocabulary per controlled field.
        let mut fixed: IndexMap<&str, &str> = IndexMap::new();
        for (field, vocab_ids) in &candidates {
            if vocab_ids.len() > 1 {
                return Err(MetasaneError::MultipleVocabularies {
                    field: field.clone(),
                    count: vocab_ids.len(),
                });
            }
            if let Some(vocab_id) = vocab_ids.iter().next() {
                fixed.insert(field.as_str(), vocab_id.as_str());
            }
        }

        let mut report = ControlledFieldReport::default();
        for (index, name) in self.field_names().iter().enumerate() {
            let Some(&vocab_id) = fixed.get(name.as_str()) else {
                continue;
            };
            for value in self.column_values(index) {
                let valid = match split_vocab_ref(value) {
                    (Some(id), term) => {
                        id == vocab_id && known_vocabs.is_member(vocab_id, term)
                    }
                    (None, _) => false,
                };
                if !valid {
                    report.invalid_cell_count += 1;
                    report
                        .invalid_values
                        .entry(name.clone())
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }
        Ok(report)
    }
}
