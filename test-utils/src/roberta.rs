use std::{io::Result, path::PathBuf};

use crate::{resolve_path, DATA_DIR};

/// Resolves the path to the RoBERTa test resources directory.
///
/// The directory holds a complete base vocabulary, a small vocabulary and a few merge rules.
pub fn resources() -> Result<PathBuf> {
    resolve_path(&[DATA_DIR, "roberta_test"])
}

/// Resolves the path to the RoBERTa test vocabulary.
pub fn vocab() -> Result<PathBuf> {
    resolve_path(&[DATA_DIR, "roberta_test", "vocabulary.json"])
}

/// Resolves the path to the RoBERTa test merge rules.
pub fn merges() -> Result<PathBuf> {
    resolve_path(&[DATA_DIR, "roberta_test", "merges.txt"])
}
