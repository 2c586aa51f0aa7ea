//! Metasane: sanity checking for tabular metadata.
//!
//! Metasane inspects spreadsheet-style metadata (rows of records, one column
//! per field) for two families of problems:
//!
//! - **Controlled vocabulary misuse**: columns holding namespace-qualified
//!   references like `ENVO:soil` must reference exactly one vocabulary per
//!   column, and every value must resolve to a known term in it.
//! - **Near-duplicate values**: free-text columns containing several textual
//!   variants of the same value (`"Yes"` vs `"yes"`, `"NO "` vs `" NO"`),
//!   surfaced as discrepancy clusters per normalization rule.
//!
//! # Core Principles
//!
//! - **Non-destructive**: the input table is never modified.
//! - **Findings are data**: invalid cells and discrepancy clusters are
//!   returned as results for the caller to report, not raised as errors.
//!
//! # Example
//!
//! ```
//! use metasane::{MetadataTable, VocabularySet};
//!
//! let table = MetadataTable::new(
//!     vec!["sample".into(), "env".into()],
//!     vec![
//!         vec!["S1".into(), "ENVO:soil".into()],
//!         vec!["S2".into(), "ENVO:Soil".into()],
//!     ],
//! )?;
//!
//! let vocabs = VocabularySet::from_term_lists([("ENVO".to_string(), vec!["soil"])]);
//! let validation = table.validate_controlled_fields(&vocabs)?;
//! assert!(validation.is_clean());
//!
//! let discrepancies = table.find_discrepancies();
//! assert_eq!(discrepancies.rule_totals["capitalization"].clusters, 1);
//! # Ok::<(), metasane::MetasaneError>(())
//! ```

pub mod error;
pub mod input;
pub mod table;
pub mod vocab;

pub use error::{MetasaneError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use table::{
    ControlledFieldReport, DiscrepancyReport, FieldTypes, MetadataTable, NormalizationRule,
    RuleTotals, VOCAB_DELIMITER, split_vocab_ref,
};
pub use vocab::{VocabularyLookup, VocabularySet};
