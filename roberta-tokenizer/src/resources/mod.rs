pub mod byte_table;
pub mod ranks;
pub mod vocab;

use std::{
    fs::File,
    io::{BufReader, Error as IoError},
    path::{Path, PathBuf},
};

use displaydoc::Display;
use log::debug;
use num_traits::FromPrimitive;
use serde_json::Error as JsonError;
use thiserror::Error;

use crate::resources::{
    byte_table::ByteTable,
    ranks::{Ranks, SymbolPair},
    vocab::Vocab,
};

/// The file name of the base vocabulary within a resources directory.
pub const BASE_VOCAB_FILE: &str = "base_vocabulary.json";

/// The file name of the vocabulary within a resources directory.
pub const VOCAB_FILE: &str = "vocabulary.json";

/// The file name of the merge rules within a resources directory.
pub const MERGES_FILE: &str = "merges.txt";

/// The potential errors of the resources.
#[derive(Debug, Display, Error)]
pub enum ResourcesError {
    /// Failed to open the resource file {path:?}: {source}
    Open { path: PathBuf, source: IoError },
    /// Failed to read a resource: {0}
    Read(#[from] IoError),
    /// Failed to parse a json resource: {0}
    Json(#[from] JsonError),
    /// The base vocabulary must contain exactly 256 bytes, but it contains {0}
    ByteTableSize(usize),
    /// The id {0} is not representable by the id type
    IdRange(u64),
    /// The merge rules don't contain any pairs
    EmptyMerges,
    /// The merge rule in line {0} is not a pair of symbols
    MergeLine(usize),
    /// The merge rule in line {0} repeats an earlier pair
    DuplicateMerge(usize),
}

/// The immutable lookup tables of a byte level BPE tokenizer.
#[derive(Clone, Debug)]
pub struct Resources<N> {
    bytes: ByteTable,
    vocab: Vocab<N>,
    ranks: Ranks,
}

impl<N> Resources<N> {
    /// Creates the resources from already parsed tables.
    pub fn new(bytes: ByteTable, vocab: Vocab<N>, ranks: Ranks) -> Self {
        Self {
            bytes,
            vocab,
            ranks,
        }
    }

    /// Loads the resources from the [`BASE_VOCAB_FILE`], [`VOCAB_FILE`] and [`MERGES_FILE`]
    /// within the directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ResourcesError>
    where
        N: FromPrimitive,
    {
        let dir = dir.as_ref();
        let bytes = ByteTable::parse(open(dir.join(BASE_VOCAB_FILE))?)?;
        let vocab = Vocab::parse(open(dir.join(VOCAB_FILE))?)?;
        let ranks = Ranks::parse(open(dir.join(MERGES_FILE))?)?;
        debug!(
            "loaded {} symbols and {} merge rules from {:?}",
            vocab.len(),
            ranks.len(),
            dir,
        );

        Ok(Self::new(bytes, vocab, ranks))
    }

    /// Encodes the byte as its base symbol.
    pub fn encode_byte(&self, byte: u8) -> &str {
        self.bytes.encode_byte(byte)
    }

    /// Encodes the symbol as its id or falls back to the default id.
    pub fn encode_word(&self, symbol: &str, default: N) -> N
    where
        N: Copy,
    {
        self.vocab.encode_word(symbol, default)
    }

    /// Gets the rank of the pair or falls back to the default rank.
    pub fn rank_of(&self, pair: &SymbolPair, default: u32) -> u32 {
        self.ranks.rank_of(pair, default)
    }

    pub fn ranks(&self) -> &Ranks {
        &self.ranks
    }
}

fn open(path: PathBuf) -> Result<BufReader<File>, ResourcesError> {
    File::open(&path)
        .map(BufReader::new)
        .map_err(|source| ResourcesError::Open { path, source })
}
