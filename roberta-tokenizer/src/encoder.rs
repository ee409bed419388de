use std::collections::HashSet;

use crate::resources::ranks::Ranks;

/// A greedy byte pair encoder.
///
/// Splits a byte level encoded chunk into characters and repeatedly merges all occurrences of
/// the adjacent pair with the lowest rank until either a single symbol remains or no adjacent
/// pair has a rank.
#[derive(Clone, Copy, Debug, Default)]
pub struct PairEncoder;

impl PairEncoder {
    /// Encodes the chunk into its merged symbols.
    pub fn encode(&self, chunk: &str, ranks: &Ranks) -> Vec<String> {
        let mut symbols = chunk.chars().map(String::from).collect::<Vec<_>>();

        while symbols.len() > 1 {
            let (left, right) = match Self::lowest_pair(&symbols, ranks) {
                Some((left, right)) => (left.to_string(), right.to_string()),
                None => break,
            };
            symbols = Self::merge(symbols, &left, &right);
        }

        symbols
    }

    /// Finds the distinct adjacent pair with the lowest rank.
    ///
    /// Ties are resolved in favor of the leftmost first occurrence.
    fn lowest_pair<'s>(symbols: &'s [String], ranks: &Ranks) -> Option<(&'s str, &'s str)> {
        let mut visited = HashSet::with_capacity(symbols.len());

        symbols
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .filter(|pair| visited.insert(*pair))
            .filter_map(|(left, right)| ranks.get(left, right).map(|rank| (rank, left, right)))
            .fold(None, |lowest, (rank, left, right)| match lowest {
                Some((lowest_rank, _, _)) if lowest_rank <= rank => lowest,
                _ => Some((rank, left, right)),
            })
            .map(|(_, left, right)| (left, right))
    }

    /// Merges all non-overlapping occurrences of the pair from left to right.
    fn merge(symbols: Vec<String>, left: &str, right: &str) -> Vec<String> {
        let mut merged = Vec::with_capacity(symbols.len());
        let mut symbols = symbols.into_iter().peekable();

        while let Some(mut symbol) = symbols.next() {
            if symbol == left {
                if let Some(next) = symbols.next_if(|next| next == right) {
                    symbol.push_str(&next);
                }
            }
            merged.push(symbol);
        }

        merged
    }
}
