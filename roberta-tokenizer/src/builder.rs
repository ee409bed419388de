use std::{
    io::{BufRead, Read},
    path::{Path, PathBuf},
};

use displaydoc::Display;
use fancy_regex::Error as RegexError;
use num_traits::FromPrimitive;
use thiserror::Error;

use crate::{
    encoder::PairEncoder,
    model::Model,
    post_tokenizer::{PostTokenizer, PostTokenizerError, Sentinels},
    pre_tokenizer::PreTokenizer,
    resources::{byte_table::ByteTable, ranks::Ranks, vocab::Vocab, Resources, ResourcesError},
    tokenizer::Tokenizer,
};

/// A builder to create a RoBERTa [`Tokenizer`].
#[derive(Debug)]
pub struct Builder<N> {
    resources: Resources<N>,
    sentinels: Sentinels,
}

/// The potential errors of the builder.
#[derive(Debug, Display, Error)]
pub enum BuilderError {
    /// The resources directory {0:?} doesn't exist
    ResourcesDir(PathBuf),
    /// Failed to load the resources: {0}
    Resources(#[from] ResourcesError),
    /// Failed to build the pre-tokenizer: {0}
    PreTokenizer(#[from] RegexError),
    /// Failed to build the post-tokenizer: {0}
    PostTokenizer(#[from] PostTokenizerError),
}

impl<N> Builder<N> {
    /// Creates a [`Tokenizer`] builder from a resources directory.
    ///
    /// The directory must contain the base vocabulary, the vocabulary and the merge rules, see
    /// [`Resources::from_dir()`]. The default settings are the same as for [`new()`].
    ///
    /// [`new()`]: Self::new
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, BuilderError>
    where
        N: FromPrimitive,
    {
        Ok(Self::from_resources(Resources::from_dir(dir)?))
    }

    /// Creates a [`Tokenizer`] builder from a vocabulary and merge rules.
    ///
    /// The default settings are:
    /// - The byte to unicode mapping of GPT-2 as base vocabulary.
    /// - The class id `0`, the separation id `2`, the unknown id `3` and the padding id `1`.
    pub fn new(vocab: impl Read, merges: impl BufRead) -> Result<Self, BuilderError>
    where
        N: FromPrimitive,
    {
        Ok(Self::from_resources(Resources::new(
            ByteTable::default(),
            Vocab::parse(vocab)?,
            Ranks::parse(merges)?,
        )))
    }

    /// Creates a [`Tokenizer`] builder from already loaded resources.
    pub fn from_resources(resources: Resources<N>) -> Self {
        Self {
            resources,
            sentinels: Sentinels::default(),
        }
    }

    /// Sets the class id, also known as the beginning of sequence id.
    ///
    /// Defaults to `0`.
    pub fn with_cls(mut self, id: u64) -> Self {
        self.sentinels.cls = id;
        self
    }

    /// Sets the separation id, also known as the end of sequence id.
    ///
    /// Defaults to `2`.
    pub fn with_sep(mut self, id: u64) -> Self {
        self.sentinels.sep = id;
        self
    }

    /// Sets the unknown id for symbols which are missing in the vocabulary.
    ///
    /// Defaults to `3`.
    pub fn with_unk(mut self, id: u64) -> Self {
        self.sentinels.unk = id;
        self
    }

    /// Sets the padding id.
    ///
    /// Defaults to `1`.
    pub fn with_pad(mut self, id: u64) -> Self {
        self.sentinels.pad = id;
        self
    }

    pub(crate) fn with_sentinels(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Builds the tokenizer.
    ///
    /// # Errors
    /// Fails if a sentinel id is not representable by the id type.
    pub fn build(self) -> Result<Tokenizer<N>, BuilderError>
    where
        N: FromPrimitive,
    {
        Ok(Tokenizer {
            pre_tokenizer: PreTokenizer::new()?,
            model: Model {
                resources: self.resources,
                encoder: PairEncoder,
            },
            post_tokenizer: PostTokenizer::new(self.sentinels)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir() {
        let tokenizer = Builder::<u32>::from_dir(test_utils::roberta::resources().unwrap())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(tokenizer.cls_id(), 0);
        assert_eq!(tokenizer.sep_id(), 2);
        assert_eq!(tokenizer.unk_id(), 3);
        assert_eq!(tokenizer.pad_id(), 1);
    }

    #[test]
    fn test_missing_dir() {
        assert!(matches!(
            Builder::<u32>::from_dir("dummy/base/dir/path").unwrap_err(),
            BuilderError::Resources(ResourcesError::Open { .. }),
        ));
    }

    #[test]
    fn test_invalid_merges() {
        assert!(matches!(
            Builder::<u32>::new("{}".as_bytes(), "".as_bytes()).unwrap_err(),
            BuilderError::Resources(ResourcesError::EmptyMerges),
        ));
    }

    #[test]
    fn test_invalid_sentinel() {
        assert!(matches!(
            Builder::<u8>::new("{}".as_bytes(), "e r".as_bytes())
                .unwrap()
                .with_cls(256)
                .build()
                .unwrap_err(),
            BuilderError::PostTokenizer(PostTokenizerError::IdRange { id: 256, .. }),
        ));
    }
}
