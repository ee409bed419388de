#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! A RoBERTa tokenizer which converts sentences into token ids.
//!
//! The tokenizer is based on a byte level byte pair encoding (BPE) and consists of a RoBERTa
//! pre-tokenizer, a byte level BPE model and a RoBERTa post-tokenizer. The ids can be of any
//! numerical data type which implements [`FromPrimitive`]` + `[`Copy`].
//!
//! The pre-tokenizer is not configurable, it splits a sentence into contractions, words, numbers,
//! punctuation and whitespace like GPT-2.
//!
//! The model is configurable by its resources:
//! - The base vocabulary, which maps each byte to a printable base symbol.
//! - The vocabulary, which maps symbols to ids.
//! - The merge rules, which rank the pairs of adjacent symbols.
//!
//! The post-tokenizer is configurable by:
//! - The class id.
//! - The separation id.
//! - The unknown id.
//! - The padding id, which is only provided for callers which pad the ids themselves.
//!
//! ```no_run
//! use roberta_tokenizer::Builder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokenizer = Builder::<i64>::from_dir("roberta")?
//!         .with_cls(0)
//!         .with_sep(2)
//!         .with_unk(3)
//!         .build()?;
//!
//!     let ids = tokenizer.tokenize("This is a sentence.");
//!     let ids = tokenizer.tokenize_batch(&["This is a sentence.", "And another one!"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! [`FromPrimitive`]: num_traits::FromPrimitive

mod builder;
mod encoder;
mod lazy;
mod model;
mod post_tokenizer;
mod pre_tokenizer;
mod resources;
mod tokenizer;

pub use crate::{
    builder::{Builder, BuilderError},
    encoder::PairEncoder,
    lazy::LazyTokenizer,
    post_tokenizer::{PostTokenizerError, CLS_ID, PAD_ID, SEP_ID, UNK_ID},
    pre_tokenizer::PreTokenizer,
    resources::{
        byte_table::ByteTable,
        ranks::{Ranks, SymbolPair},
        vocab::Vocab,
        Resources,
        ResourcesError,
        BASE_VOCAB_FILE,
        MERGES_FILE,
        VOCAB_FILE,
    },
    tokenizer::Tokenizer,
};
