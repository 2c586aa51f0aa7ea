//! Controlled vocabulary storage and lookup.
//!
//! A controlled vocabulary is a named, closed set of permitted term values.
//! Cells reference a vocabulary with a namespace prefix, e.g. `ENVO:soil`
//! references the term `soil` in the `ENVO` vocabulary. Term comparison is
//! case-insensitive throughout: terms are lowercased when loaded and probes
//! are lowercased when queried.

mod loader;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Lookup contract the table validator depends on.
///
/// [`MetadataTable`](crate::MetadataTable) validates against this trait rather
/// than a concrete store, so callers with vocabularies held elsewhere (a
/// database, a remote registry) can plug in their own implementation.
pub trait VocabularyLookup {
    /// Whether a vocabulary with this identifier is loaded.
    fn exists(&self, vocab_id: &str) -> bool;

    /// Case-insensitive term membership. False if `vocab_id` is unknown.
    fn is_member(&self, vocab_id: &str, term: &str) -> bool;

    /// Number of loaded vocabularies.
    fn count(&self) -> usize;
}

/// An in-memory set of named controlled vocabularies.
///
/// Immutable in spirit once built: analysis never mutates it. Terms are
/// stored stripped of surrounding whitespace and lowercased; blank entries
/// are dropped at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularySet {
    vocabs: HashMap<String, HashSet<String>>,
}

impl VocabularySet {
    /// Create an empty vocabulary set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(identifier, term lines)` pairs.
    ///
    /// Each line is trimmed and lowercased; blank lines are skipped.
    pub fn from_term_lists<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = (String, L)>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let mut set = Self::new();
        for (id, lines) in lists {
            set.add_vocabulary(id, lines);
        }
        set
    }

    /// Add (or replace) one vocabulary from raw term lines.
    pub fn add_vocabulary<L>(&mut self, id: impl Into<String>, lines: L)
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let terms = lines
            .into_iter()
            .filter_map(|line| {
                let term = line.as_ref().trim().to_lowercase();
                if term.is_empty() { None } else { Some(term) }
            })
            .collect();
        self.vocabs.insert(id.into(), terms);
    }

    /// Whether a vocabulary with this identifier is loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.vocabs.contains_key(id)
    }

    /// The lowercased terms of one vocabulary, if loaded.
    pub fn get(&self, id: &str) -> Option<&HashSet<String>> {
        self.vocabs.get(id)
    }

    /// Number of loaded vocabularies.
    pub fn len(&self) -> usize {
        self.vocabs.len()
    }

    /// Whether no vocabularies are loaded.
    pub fn is_empty(&self) -> bool {
        self.vocabs.is_empty()
    }
}

impl VocabularyLookup for VocabularySet {
    fn exists(&self, vocab_id: &str) -> bool {
        self.contains(vocab_id)
    }

    fn is_member(&self, vocab_id: &str, term: &str) -> bool {
        self.vocabs
            .get(vocab_id)
            .is_some_and(|terms| terms.contains(&term.to_lowercase()))
    }

    fn count(&self) -> usize {
        self.len()
    }
}
