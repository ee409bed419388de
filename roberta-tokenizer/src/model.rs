use crate::{encoder::PairEncoder, resources::Resources};

/// A RoBERTa byte level BPE model.
#[derive(Debug)]
pub(crate) struct Model<N> {
    pub(crate) resources: Resources<N>,
    pub(crate) encoder: PairEncoder,
}

impl<N> Model<N> {
    /// Tokenizes the chunk and appends its ids.
    ///
    /// The chunk is byte level encoded before the pair encoding, symbols which are missing in the
    /// vocabulary are mapped to the unknown id.
    pub(crate) fn tokenize(&self, chunk: &str, unk_id: N, ids: &mut Vec<N>)
    where
        N: Copy,
    {
        let chunk = chunk
            .bytes()
            .map(|byte| self.resources.encode_byte(byte))
            .collect::<String>();

        ids.extend(
            self.encoder
                .encode(&chunk, self.resources.ranks())
                .iter()
                .map(|symbol| self.resources.encode_word(symbol, unk_id)),
        );
    }
}
