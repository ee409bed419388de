#[cfg(feature = "multithreaded")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    model::Model,
    post_tokenizer::PostTokenizer,
    pre_tokenizer::PreTokenizer,
    resources::Resources,
};

/// A RoBERTa tokenizer.
///
/// Can be created via the [`Builder`] and consists of a RoBERTa pre-tokenizer, a byte level BPE
/// model and a RoBERTa post-tokenizer. The tokenizer is immutable and can be shared between
/// threads.
///
/// [`Builder`]: crate::Builder
#[derive(Debug)]
pub struct Tokenizer<N> {
    pub(crate) pre_tokenizer: PreTokenizer,
    pub(crate) model: Model<N>,
    pub(crate) post_tokenizer: PostTokenizer<N>,
}

impl<N> Tokenizer<N> {
    /// Tokenizes the sentence.
    ///
    /// The ids are wrapped by the class and separation ids. Neither truncation nor padding is
    /// applied, an empty sentence results in only the class and separation ids.
    pub fn tokenize(&self, sentence: impl AsRef<str>) -> Vec<N>
    where
        N: Copy,
    {
        let mut ids = Vec::new();
        for chunk in self.pre_tokenizer.pre_tokenize(sentence.as_ref()) {
            self.model.tokenize(chunk, self.post_tokenizer.unk_id, &mut ids);
        }

        self.post_tokenizer.post_tokenize(ids)
    }

    /// Tokenizes the batch of sentences.
    ///
    /// The sentences are tokenized in parallel if the `multithreaded` feature is enabled, the
    /// order of the results always matches the order of the sentences.
    pub fn tokenize_batch(&self, sentences: &[impl AsRef<str> + Sync]) -> Vec<Vec<N>>
    where
        N: Copy + Send + Sync,
    {
        #[cfg(not(feature = "multithreaded"))]
        let sentences = sentences.iter();
        #[cfg(feature = "multithreaded")]
        let sentences = sentences.into_par_iter();

        sentences.map(|sentence| self.tokenize(sentence)).collect()
    }

    /// Gets the class id, also known as the beginning of sequence id.
    pub fn cls_id(&self) -> N
    where
        N: Copy,
    {
        self.post_tokenizer.cls_id
    }

    /// Gets the separation id, also known as the end of sequence id.
    pub fn sep_id(&self) -> N
    where
        N: Copy,
    {
        self.post_tokenizer.sep_id
    }

    /// Gets the unknown id.
    pub fn unk_id(&self) -> N
    where
        N: Copy,
    {
        self.post_tokenizer.unk_id
    }

    /// Gets the padding id.
    ///
    /// The tokenizer never pads, the id is meant for callers which pad to a fixed length.
    pub fn pad_id(&self) -> N
    where
        N: Copy,
    {
        self.post_tokenizer.pad_id
    }

    /// Gets the lookup tables.
    pub fn resources(&self) -> &Resources<N> {
        &self.model.resources
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader, sync::Arc, thread};

    use super::*;
    use crate::Builder;

    const CLS: i64 = 0;
    const SEP: i64 = 2;
    const UNK: i64 = 3;

    fn tokenizer() -> Tokenizer<i64> {
        Builder::from_dir(test_utils::roberta::resources().unwrap())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenizer().tokenize("lower newer"),
            [CLS, 4, 5, 6, 19, 114, 13, 7, 6, 19, SEP],
        );
    }

    #[test]
    fn test_tokenize_single_word() {
        assert_eq!(tokenizer().tokenize("er"), [CLS, 19, SEP]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenizer().tokenize(""), [CLS, SEP]);
    }

    #[test]
    fn test_tokenize_long_repetition() {
        let ids = tokenizer().tokenize("er".repeat(24));
        assert_eq!(ids.len(), 24 + 2);
        assert_eq!(ids.first(), Some(&CLS));
        assert_eq!(ids.last(), Some(&SEP));
        assert!(ids[1..ids.len() - 1].iter().all(|id| *id == 19));
    }

    #[test]
    fn test_tokenize_unknown() {
        // neither the symbols nor the merges of "stdin" exist
        assert_eq!(
            tokenizer().tokenize("stdin er"),
            [CLS, 9, 10, 12, 11, 13, 114, 19, SEP],
        );
        assert_eq!(tokenizer().tokenize("xyz"), [CLS, UNK, UNK, UNK, SEP]);
    }

    #[test]
    fn test_tokenize_sentinels() {
        let tokenizer = tokenizer();
        for sentence in &["", " ", "lower", "Grüße, 世界!", "\n\t\r", "🙂", "'s'll'd"] {
            let ids = tokenizer.tokenize(sentence);
            assert!(ids.len() >= 2);
            assert_eq!(ids[0], tokenizer.cls_id());
            assert_eq!(ids[ids.len() - 1], tokenizer.sep_id());
        }
    }

    #[test]
    fn test_tokenize_multibyte() {
        // "ü" is encoded as two base symbols which are both unknown
        assert_eq!(tokenizer().tokenize("ü"), [CLS, UNK, UNK, SEP]);
        // the 4 bytes of the emoji result in 4 unknown symbols
        assert_eq!(tokenizer().tokenize("🙂").len(), 4 + 2);
    }

    #[test]
    fn test_tokenize_very_long_word() {
        let sentence = "https://www.google.com/search?as_q=you+have+to+write+a+really+really+long+search+\
            to+get+to+2000+characters.+like+seriously%2C+you+have+no+idea+how+long+it+has+to+be\
            &as_epq=2000+characters+is+absolutely+freaking+enormous.+You+can+fit+soooooooooooooo\
            oooooooooooooooooooo+much+data+into+2000+characters.&as_oq=Argh!+So+many+characters.\
            +I%27m+bored+now%2C+so+I%27ll+just+copy+and+paste."
            .repeat(8);
        let ids = tokenizer().tokenize(&sentence);
        assert_eq!(ids.first(), Some(&CLS));
        assert_eq!(ids.last(), Some(&SEP));
        assert!(ids.len() > sentence.len() / 2);
    }

    #[test]
    fn test_tokenize_batch() {
        let tokenizer = tokenizer();
        assert_eq!(
            tokenizer.tokenize_batch(&["er", "", "lower newer"]),
            vec![
                vec![CLS, 19, SEP],
                vec![CLS, SEP],
                vec![CLS, 4, 5, 6, 19, 114, 13, 7, 6, 19, SEP],
            ],
        );
        assert!(tokenizer.tokenize_batch(&[] as &[&str]).is_empty());
    }

    #[test]
    fn test_tokenize_concurrently() {
        let tokenizer = Arc::new(tokenizer());
        let handles = (0..4)
            .map(|_| {
                let tokenizer = Arc::clone(&tokenizer);
                thread::spawn(move || tokenizer.tokenize("lower newer"))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                [CLS, 4, 5, 6, 19, 114, 13, 7, 6, 19, SEP],
            );
        }
    }

    #[test]
    fn test_sentinels() {
        let vocab = BufReader::new(File::open(test_utils::roberta::vocab().unwrap()).unwrap());
        let merges = "e r".as_bytes();
        let tokenizer = Builder::<u32>::new(vocab, merges)
            .unwrap()
            .with_cls(100)
            .with_sep(101)
            .with_unk(102)
            .with_pad(103)
            .build()
            .unwrap();
        assert_eq!(tokenizer.cls_id(), 100);
        assert_eq!(tokenizer.sep_id(), 101);
        assert_eq!(tokenizer.unk_id(), 102);
        assert_eq!(tokenizer.pad_id(), 103);
        assert_eq!(tokenizer.tokenize("erx"), [100, 19, 102, 101]);
    }
}
