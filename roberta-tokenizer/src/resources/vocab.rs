use std::{collections::HashMap, io::Read, iter::FromIterator};

use num_traits::FromPrimitive;
use serde_json::from_reader;

use crate::resources::ResourcesError;

/// A partial mapping from symbols to token ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Vocab<N>(HashMap<String, N>);

impl<N> Vocab<N> {
    /// Parses the vocabulary from a json object with symbols as keys and ids as values.
    ///
    /// # Errors
    /// Fails on invalid json or if an id is not representable by `N`.
    pub fn parse(vocab: impl Read) -> Result<Self, ResourcesError>
    where
        N: FromPrimitive,
    {
        from_reader::<_, HashMap<String, u64>>(vocab)?
            .into_iter()
            .map(|(symbol, id)| {
                N::from_u64(id)
                    .map(|id| (symbol, id))
                    .ok_or(ResourcesError::IdRange(id))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Encodes the symbol as its id or falls back to the default id.
    pub fn encode_word(&self, symbol: &str, default: N) -> N
    where
        N: Copy,
    {
        self.0.get(symbol).copied().unwrap_or(default)
    }

    /// Gets the number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S, N> FromIterator<(S, N)> for Vocab<N>
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(symbol, id)| (symbol.into(), id))
                .collect(),
        )
    }
}
