use std::path::PathBuf;

use log::debug;
use num_traits::FromPrimitive;
use once_cell::sync::OnceCell;

use crate::{
    builder::{Builder, BuilderError},
    post_tokenizer::Sentinels,
    tokenizer::Tokenizer,
};

/// A RoBERTa tokenizer which loads its resources on first use.
///
/// The resources directory is validated eagerly, the resources themselves are loaded at most
/// once even if the tokenizer is shared between threads. A failed load is not cached and will be
/// attempted again on the next use.
#[derive(Debug)]
pub struct LazyTokenizer<N> {
    dir: PathBuf,
    sentinels: Sentinels,
    tokenizer: OnceCell<Tokenizer<N>>,
}

impl<N> LazyTokenizer<N> {
    /// Creates a lazy tokenizer from a resources directory.
    ///
    /// The default settings are the same as for [`Builder::new()`].
    ///
    /// # Errors
    /// Fails if the directory doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BuilderError> {
        let dir = dir.into();
        if dir.is_dir() {
            Ok(Self {
                dir,
                sentinels: Sentinels::default(),
                tokenizer: OnceCell::new(),
            })
        } else {
            Err(BuilderError::ResourcesDir(dir))
        }
    }

    /// Sets the class id, see [`Builder::with_cls()`].
    pub fn with_cls(mut self, id: u64) -> Self {
        self.sentinels.cls = id;
        self
    }

    /// Sets the separation id, see [`Builder::with_sep()`].
    pub fn with_sep(mut self, id: u64) -> Self {
        self.sentinels.sep = id;
        self
    }

    /// Sets the unknown id, see [`Builder::with_unk()`].
    pub fn with_unk(mut self, id: u64) -> Self {
        self.sentinels.unk = id;
        self
    }

    /// Sets the padding id, see [`Builder::with_pad()`].
    pub fn with_pad(mut self, id: u64) -> Self {
        self.sentinels.pad = id;
        self
    }

    /// Gets the tokenizer and builds it on first use.
    pub fn get(&self) -> Result<&Tokenizer<N>, BuilderError>
    where
        N: FromPrimitive,
    {
        self.tokenizer.get_or_try_init(|| {
            debug!("loading the tokenizer resources from {:?}", self.dir);
            Builder::from_dir(&self.dir)?
                .with_sentinels(self.sentinels)
                .build()
        })
    }

    /// Tokenizes the sentence, see [`Tokenizer::tokenize()`].
    ///
    /// # Errors
    /// Fails if the tokenizer can't be built on first use.
    pub fn tokenize(&self, sentence: impl AsRef<str>) -> Result<Vec<N>, BuilderError>
    where
        N: FromPrimitive + Copy,
    {
        self.get().map(|tokenizer| tokenizer.tokenize(sentence))
    }
}
