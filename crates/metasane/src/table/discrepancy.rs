//! Near-duplicate value detection across categorical fields.
//!
//! Distinct raw values that collapse to the same string under a
//! normalization rule (`"Yes"` and `"yes"`, `"NO "` and `" NO"`) are
//! evidence of inconsistent data entry. Each rule is applied independently,
//! so one pair of values can be reported under several rules.

use indexmap::IndexMap;
use serde::Serialize;

use super::MetadataTable;

/// Characters removed by the `brackets` rule.
const BRACKET_CHARS: &[char] = &['(', ')', '{', '}', '<', '>', '[', ']'];

/// A normalization applied to raw cell values when hunting near-duplicates.
///
/// Every rule is a pure, idempotent string transform. The catalog is a
/// fixed enumeration ([`NormalizationRule::ALL`]); detection iterates over
/// it rather than any dynamic registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizationRule {
    /// Lowercase the value.
    Capitalization,
    /// Strip leading and trailing whitespace.
    HangingWhitespace,
    /// Remove all whitespace, internal included.
    Whitespace,
    Pipe,
    Underscore,
    Hyphen,
    ForwardSlash,
    Backslash,
    Period,
    SingleQuote,
    DoubleQuote,
    Ampersand,
    Comma,
    /// Remove `( ) { } < > [ ]`.
    Brackets,
}

impl NormalizationRule {
    /// Every rule, in reporting order.
    pub const ALL: [NormalizationRule; 14] = [
        NormalizationRule::Capitalization,
        NormalizationRule::HangingWhitespace,
        NormalizationRule::Whitespace,
        NormalizationRule::Pipe,
        NormalizationRule::Underscore,
        NormalizationRule::Hyphen,
        NormalizationRule::ForwardSlash,
        NormalizationRule::Backslash,
        NormalizationRule::Period,
        NormalizationRule::SingleQuote,
        NormalizationRule::DoubleQuote,
        NormalizationRule::Ampersand,
        NormalizationRule::Comma,
        NormalizationRule::Brackets,
    ];

    /// The rule name used as a report key.
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationRule::Capitalization => "capitalization",
            NormalizationRule::HangingWhitespace => "hanging whitespace",
            NormalizationRule::Whitespace => "whitespace",
            NormalizationRule::Pipe => "pipe",
            NormalizationRule::Underscore => "underscore",
            NormalizationRule::Hyphen => "hyphen",
            NormalizationRule::ForwardSlash => "forward slash",
            NormalizationRule::Backslash => "backslash",
            NormalizationRule::Period => "period",
            NormalizationRule::SingleQuote => "single quote",
            NormalizationRule::DoubleQuote => "double quote",
            NormalizationRule::Ampersand => "ampersand",
            NormalizationRule::Comma => "comma",
            NormalizationRule::Brackets => "brackets",
        }
    }

    /// Apply the transform to one value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            NormalizationRule::Capitalization => value.to_lowercase(),
            NormalizationRule::HangingWhitespace => value.trim().to_string(),
            NormalizationRule::Whitespace => {
                value.chars().filter(|c| !c.is_whitespace()).collect()
            }
            NormalizationRule::Pipe => strip_char(value, '|'),
            NormalizationRule::Underscore => strip_char(value, '_'),
            NormalizationRule::Hyphen => strip_char(value, '-'),
            NormalizationRule::ForwardSlash => strip_char(value, '/'),
            NormalizationRule::Backslash => strip_char(value, '\\'),
            NormalizationRule::Period => strip_char(value, '.'),
            NormalizationRule::SingleQuote => strip_char(value, '\''),
            NormalizationRule::DoubleQuote => strip_char(value, '"'),
            NormalizationRule::Ampersand => strip_char(value, '&'),
            NormalizationRule::Comma => strip_char(value, ','),
            NormalizationRule::Brackets => value
                .chars()
                .filter(|c| !BRACKET_CHARS.contains(c))
                .collect(),
        }
    }
}

fn strip_char(value: &str, target: char) -> String {
    value.chars().filter(|&c| c != target).collect()
}

/// Aggregate counts for one rule across the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleTotals {
    /// Number of distinct clusters found under this rule.
    pub clusters: usize,
    /// Total cell occurrences involved across those clusters.
    pub cells: usize,
}

/// Discrepancy clusters detected across all categorical fields.
///
/// Rules and fields with nothing to report are omitted from both maps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscrepancyReport {
    /// Per-rule aggregates, keyed by rule name.
    pub rule_totals: IndexMap<String, RuleTotals>,
    /// Per-field, per-rule clusters: the distinct raw values that
    /// normalized to the same form, in first-observed order.
    pub field_clusters: IndexMap<String, IndexMap<String, Vec<Vec<String>>>>,
}

impl DiscrepancyReport {
    /// Whether no rule produced a cluster anywhere in the table.
    pub fn is_clean(&self) -> bool {
        self.rule_totals.is_empty()
    }
}

impl MetadataTable {
    /// Find clusters of distinct raw values that normalize identically.
    ///
    /// Only categorical fields are scanned. Cluster membership is by
    /// distinct raw string; occurrence counts feed the per-rule cell
    /// totals only.
    pub fn find_discrepancies(&self) -> DiscrepancyReport {
        let mut report = DiscrepancyReport::default();

        for (field, value_counts) in self.categorical_field_values() {
            for rule in NormalizationRule::ALL {
                // Normalized form -> distinct raw values, first-observed order.
                let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();
                for raw in value_counts.keys() {
                    groups.entry(rule.apply(raw)).or_default().push(raw);
                }

                for (_, raws) in groups {
                    if raws.len() < 2 {
                        continue;
                    }
                    let cells: usize = raws
                        .iter()
                        .map(|raw| value_counts.get(*raw).copied().unwrap_or(0))
                        .sum();

                    let totals = report
                        .rule_totals
                        .entry(rule.name().to_string())
                        .or_default();
                    totals.clusters += 1;
                    totals.cells += cells;

                    report
                        .field_clusters
                        .entry(field.clone())
                        .or_default()
                        .entry(rule.name().to_string())
                        .or_default()
                        .push(raws.into_iter().map(String::from).collect());
                }
            }
        }
        report
    }
}
