//! Property-based tests for metasane.
//!
//! These tests use proptest to generate random tables and cell values and
//! verify that the core invariants hold under all conditions:
//!
//! 1. **No panics**: analysis never crashes on any input
//! 2. **Partition**: the three field-type sets tile the field names exactly
//! 3. **Idempotence**: every normalization rule is a fixed point of itself
//! 4. **Conservation**: value counts always sum back to the row count

use proptest::prelude::*;

use metasane::{MetadataTable, NormalizationRule, split_vocab_ref};

// =============================================================================
// Test Strategies
// =============================================================================

/// Printable-ASCII cell values, whitespace and punctuation included.
fn cell_value() -> impl Strategy<Value = String> {
    "[ -~]{0,30}"
}

/// Values that look like vocabulary references.
fn vocab_ref_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{2,6}:[a-z ]{1,20}",
        "[a-z_]{1,10}:[A-Za-z0-9 ]{0,15}",
        "[A-Za-z0-9 ]{0,20}",
    ]
}

/// A small table: 1-5 uniquely named fields, 0-20 rows.
fn small_table() -> impl Strategy<Value = MetadataTable> {
    (1usize..=5).prop_flat_map(|fields| {
        let names: Vec<String> = (0..fields).map(|i| format!("field_{i}")).collect();
        prop::collection::vec(prop::collection::vec(cell_value(), fields), 0..20)
            .prop_map(move |rows| {
                MetadataTable::new(names.clone(), rows).expect("well-formed by construction")
            })
    })
}

// =============================================================================
// Field-type partition
// =============================================================================

proptest! {
    /// The three type sets are pairwise disjoint and exhaustive.
    #[test]
    fn prop_partition_tiles_field_names(table in small_table()) {
        let types = table.field_types();

        let total = types.numeric.len() + types.timestamp.len() + types.categorical.len();
        prop_assert_eq!(total, table.field_names().len());

        for name in table.field_names() {
            let buckets = usize::from(types.numeric.contains(name))
                + usize::from(types.timestamp.contains(name))
                + usize::from(types.categorical.contains(name));
            prop_assert_eq!(buckets, 1, "field {} in {} buckets", name, buckets);
        }
    }

    /// Per-field occurrence counts sum to the row count.
    #[test]
    fn prop_value_counts_sum_to_row_count(table in small_table()) {
        for (field, counts) in table.categorical_field_values() {
            let total: usize = counts.values().sum();
            prop_assert_eq!(total, table.row_count(), "field {}", field);
        }
    }

    /// Analysis entry points never panic on arbitrary tables.
    #[test]
    fn prop_analysis_never_panics(table in small_table()) {
        let _ = table.field_types();
        let _ = table.candidate_controlled_fields(None);
        let _ = table.find_discrepancies();
    }
}

// =============================================================================
// Normalization rules
// =============================================================================

proptest! {
    /// Normalizing an already-normalized value is a no-op.
    #[test]
    fn prop_rules_are_idempotent(value in cell_value()) {
        for rule in NormalizationRule::ALL {
            let once = rule.apply(&value);
            let twice = rule.apply(&once);
            prop_assert_eq!(&twice, &once, "rule {:?} on {:?}", rule, value);
        }
    }

    /// Values in one cluster share their normalized form by construction.
    #[test]
    fn prop_clusters_share_normalized_form(table in small_table()) {
        let report = table.find_discrepancies();
        for (_, rules) in &report.field_clusters {
            for (rule_name, clusters) in rules {
                let rule = NormalizationRule::ALL
                    .iter()
                    .find(|r| r.name() == rule_name.as_str())
                    .expect("report keys come from the catalog");
                for cluster in clusters {
                    prop_assert!(cluster.len() >= 2);
                    let forms: Vec<String> =
                        cluster.iter().map(|raw| rule.apply(raw)).collect();
                    prop_assert!(forms.windows(2).all(|w| w[0] == w[1]));
                }
            }
        }
    }
}

// =============================================================================
// Vocabulary reference decomposition
// =============================================================================

proptest! {
    /// Decomposition loses no characters and reassembles to the input.
    #[test]
    fn prop_split_vocab_ref_round_trips(value in vocab_ref_like()) {
        match split_vocab_ref(&value) {
            (Some(vocab_id), term) => {
                prop_assert_eq!(format!("{vocab_id}:{term}"), value);
            }
            (None, term) => {
                prop_assert_eq!(term, value.as_str());
                prop_assert!(!value.contains(':'));
            }
        }
    }
}
