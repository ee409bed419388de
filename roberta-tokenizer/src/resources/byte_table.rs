use std::{collections::HashMap, io::Read};

use serde_json::from_reader;

use crate::resources::ResourcesError;

/// The number of distinct byte values.
const BYTES: usize = 256;

/// A total mapping from byte values to base symbols.
///
/// Every byte of an UTF-8 encoded sequence is representable by a printable base symbol, which
/// makes the byte level encoding lossless and free of unknown bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteTable(Vec<String>);

impl ByteTable {
    /// Parses the base vocabulary from a json object with the keys `"0"` to `"255"`.
    pub fn parse(base_vocab: impl Read) -> Result<Self, ResourcesError> {
        from_reader::<_, HashMap<u8, String>>(base_vocab)
            .map_err(Into::into)
            .and_then(Self::from_map)
    }

    /// Creates the table from a mapping which must contain every byte value.
    pub fn from_map(map: HashMap<u8, String>) -> Result<Self, ResourcesError> {
        if map.len() != BYTES {
            return Err(ResourcesError::ByteTableSize(map.len()));
        }

        let mut symbols = map.into_iter().collect::<Vec<_>>();
        symbols.sort_unstable_by_key(|(byte, _)| *byte);
        Ok(Self(symbols.into_iter().map(|(_, symbol)| symbol).collect()))
    }

    /// Encodes the byte as its base symbol.
    ///
    /// Signed bytes must be reinterpreted as unsigned beforehand, ie. `-128_i8 as u8`.
    pub fn encode_byte(&self, byte: u8) -> &str {
        self.0[byte as usize].as_str()
    }
}

impl Default for ByteTable {
    /// The byte to unicode mapping of GPT-2, which is shared by all RoBERTa models.
    ///
    /// Printable latin-1 bytes map to themselves, the remaining bytes map in ascending order to
    /// the code points starting at `U+0100`, eg. the space `0x20` maps to `Ġ`.
    fn default() -> Self {
        let is_printable = |byte: u8| matches!(byte, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF);
        let mut shift = 0;

        Self(
            (0..=u8::MAX)
                .map(|byte| {
                    if is_printable(byte) {
                        char::from(byte)
                    } else {
                        shift += 1;
                        char::from_u32(0xFF + shift).unwrap_or(char::REPLACEMENT_CHARACTER)
                    }
                    .to_string()
                })
                .collect(),
        )
    }
}
