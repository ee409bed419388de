use fancy_regex::{Error as RegexError, Regex};
use log::warn;

/// The split pattern of GPT-2, which is shared by all RoBERTa models.
///
/// Matches in order of priority: contractions, letters, digits and other characters each with
/// an optional leading space, whitespace which isn't followed by a non-whitespace character and
/// any remaining whitespace.
///
/// Whitespace is restricted to the ASCII characters space, tab, line feed, vertical tab, form
/// feed and carriage return. Other unicode spaces like U+00A0 are other characters.
const PATTERN: &str = r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^ \t\n\x0B\f\r\p{L}\p{N}]+|[ \t\n\x0B\f\r]+(?![^ \t\n\x0B\f\r])|[ \t\n\x0B\f\r]+";

/// A RoBERTa pre-tokenizer.
#[derive(Debug)]
pub struct PreTokenizer(Regex);

impl PreTokenizer {
    /// Creates the pre-tokenizer.
    pub fn new() -> Result<Self, RegexError> {
        Regex::new(PATTERN).map(Self)
    }

    /// Splits the sequence into chunks.
    ///
    /// The chunks are consecutive and cover the whole sequence.
    pub fn pre_tokenize<'s>(&self, sequence: &'s str) -> Vec<&'s str> {
        let mut chunks = Vec::new();
        let mut end = 0;

        for chunk in self.0.find_iter(sequence) {
            match chunk {
                Ok(chunk) => {
                    chunks.push(chunk.as_str());
                    end = chunk.end();
                }
                Err(error) => {
                    warn!(
                        "failed to split the sequence at byte {}, keeping the remainder: {}",
                        end, error,
                    );
                    if end < sequence.len() {
                        chunks.push(&sequence[end..]);
                    }
                    break;
                }
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre_tokenize(sequence: &str) -> Vec<&str> {
        PreTokenizer::new().unwrap().pre_tokenize(sequence)
    }

    #[test]
    fn test_words() {
        assert_eq!(pre_tokenize("lower newer"), ["lower", " newer"]);
        assert_eq!(pre_tokenize("Hello world!"), ["Hello", " world", "!"]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(
            pre_tokenize("I'm sure it's what we'll do"),
            ["I", "'m", " sure", " it", "'s", " what", " we", "'ll", " do"],
        );
        assert_eq!(pre_tokenize("they'd've"), ["they", "'d", "'ve"]);
    }

    #[test]
    fn test_digits_and_others() {
        assert_eq!(pre_tokenize("in 2000 years"), ["in", " 2000", " years"]);
        assert_eq!(pre_tokenize("a1b"), ["a", "1", "b"]);
        assert_eq!(pre_tokenize("%27m ?!"), ["%", "27", "m", " ?!"]);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(pre_tokenize("a   b"), ["a", "  ", " b"]);
        assert_eq!(pre_tokenize("a \n b"), ["a", " \n", " b"]);
        assert_eq!(pre_tokenize("a  "), ["a", "  "]);
        assert_eq!(pre_tokenize("   "), ["   "]);
        assert_eq!(pre_tokenize("\t"), ["\t"]);
    }

    #[test]
    fn test_empty() {
        assert!(pre_tokenize("").is_empty());
    }

    #[test]
    fn test_unicode() {
        assert_eq!(pre_tokenize("Grüße, 世界"), ["Grüße", ",", " 世界"]);
        assert_eq!(pre_tokenize("🙂🙂 ok"), ["🙂🙂", " ok"]);
    }

    #[test]
    fn test_unicode_whitespace() {
        assert_eq!(pre_tokenize("a\u{a0}!"), ["a", "\u{a0}!"]);
        assert_eq!(pre_tokenize(" \u{a0}x"), [" \u{a0}", "x"]);
        assert_eq!(pre_tokenize("a\u{3000}b"), ["a", "\u{3000}", "b"]);
        assert_eq!(pre_tokenize("a \u{2003}\u{85}"), ["a", " \u{2003}\u{85}"]);
        assert_eq!(pre_tokenize("x\u{1680} \x0B\x0C"), ["x", "\u{1680}", " \x0B\x0C"]);
    }

    #[test]
    fn test_coverage() {
        let sequence = "https://www.google.com/search?as_q=you+have+to+write \t\n a+really+long I%27m";
        assert_eq!(pre_tokenize(sequence).concat(), sequence);
    }
}
