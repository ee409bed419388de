use std::iter::once;

use displaydoc::Display;
use num_traits::FromPrimitive;
use thiserror::Error;

/// The default class id, also known as the beginning of sequence id.
pub const CLS_ID: u64 = 0;

/// The default padding id.
pub const PAD_ID: u64 = 1;

/// The default separation id, also known as the end of sequence id.
pub const SEP_ID: u64 = 2;

/// The default unknown id.
pub const UNK_ID: u64 = 3;

/// The potential errors of the post-tokenizer.
#[derive(Debug, Display, Error)]
pub enum PostTokenizerError {
    /// The {name} id {id} is not representable by the id type
    IdRange { name: &'static str, id: u64 },
}

/// The configured, not yet validated sentinel ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sentinels {
    pub(crate) cls: u64,
    pub(crate) sep: u64,
    pub(crate) unk: u64,
    pub(crate) pad: u64,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            cls: CLS_ID,
            sep: SEP_ID,
            unk: UNK_ID,
            pad: PAD_ID,
        }
    }
}

/// A RoBERTa post-tokenizer.
///
/// Holds the sentinel ids which are not derived from the vocabulary.
#[derive(Debug)]
pub(crate) struct PostTokenizer<N> {
    pub(crate) cls_id: N,
    pub(crate) sep_id: N,
    pub(crate) unk_id: N,
    pub(crate) pad_id: N,
}

impl<N> PostTokenizer<N> {
    pub(crate) const ADDED_TOKENS: usize = 2;

    /// Validates the sentinels.
    pub(crate) fn new(sentinels: Sentinels) -> Result<Self, PostTokenizerError>
    where
        N: FromPrimitive,
    {
        let validate = |name, id| N::from_u64(id).ok_or(PostTokenizerError::IdRange { name, id });

        Ok(Self {
            cls_id: validate("class", sentinels.cls)?,
            sep_id: validate("separation", sentinels.sep)?,
            unk_id: validate("unknown", sentinels.unk)?,
            pad_id: validate("padding", sentinels.pad)?,
        })
    }

    /// Wraps the ids with the class and separation ids.
    pub(crate) fn post_tokenize(&self, ids: Vec<N>) -> Vec<N>
    where
        N: Copy,
    {
        let mut wrapped = Vec::with_capacity(ids.len() + Self::ADDED_TOKENS);
        wrapped.extend(once(self.cls_id).chain(ids).chain(once(self.sep_id)));
        wrapped
    }
}
