//! Loading vocabularies from plain-text term files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{MetasaneError, Result};

use super::VocabularySet;

impl VocabularySet {
    /// Load every regular file in a directory as one vocabulary.
    ///
    /// The file stem becomes the vocabulary identifier and each line one
    /// term (trimmed, lowercased; blank lines skipped). Subdirectories are
    /// ignored.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| MetasaneError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut set = Self::new();
        for entry in entries {
            let entry = entry.map_err(|e| MetasaneError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            set.add_vocabulary(id, read_term_lines(&path)?);
        }

        log::info!("loaded {} vocabularies from {}", set.len(), dir.display());
        Ok(set)
    }
}

fn read_term_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| MetasaneError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| MetasaneError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        lines.push(line);
    }
    Ok(lines)
}
