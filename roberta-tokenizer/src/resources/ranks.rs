use std::{
    collections::{hash_map::Entry, HashMap},
    io::BufRead,
    iter::FromIterator,
};

use log::debug;

use crate::resources::ResourcesError;

/// An ordered pair of adjacent symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolPair {
    left: String,
    right: String,
}

impl SymbolPair {
    /// Creates a pair from its left and right symbols.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn left(&self) -> &str {
        self.left.as_str()
    }

    pub fn right(&self) -> &str {
        self.right.as_str()
    }
}

/// The merge priorities of symbol pairs.
///
/// A lower rank merges earlier, an absent pair is never merged. The ranks are keyed by the left
/// and then the right symbol, which allows lookups of borrowed symbols.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranks(HashMap<String, HashMap<String, u32>>);

impl Ranks {
    /// Parses the merge rules.
    ///
    /// Each line holds one pair of symbols separated by a single space and the rank is the
    /// zero-based line index. Trailing spaces of a line are ignored. The first line is skipped as
    /// a header if it isn't a pair.
    ///
    /// # Errors
    /// Fails if a line can't be read, if a line isn't a pair, if a pair is repeated or if there
    /// are no pairs at all.
    pub fn parse(merges: impl BufRead) -> Result<Self, ResourcesError> {
        let lines = merges.lines().collect::<Result<Vec<_>, _>>()?;
        let mut lines = lines
            .iter()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .peekable();

        if let Some((_, header)) = lines.next_if(|(_, line)| split_pair(line).is_none()) {
            debug!("skipped the merges header {:?}", header);
        }

        let mut ranks = HashMap::<String, HashMap<String, u32>>::new();
        for (rank, (idx, line)) in (0..).zip(lines) {
            let (left, right) = split_pair(line).ok_or(ResourcesError::MergeLine(idx + 1))?;
            match ranks
                .entry(left.to_string())
                .or_default()
                .entry(right.to_string())
            {
                Entry::Occupied(_) => return Err(ResourcesError::DuplicateMerge(idx + 1)),
                Entry::Vacant(entry) => {
                    entry.insert(rank);
                }
            }
        }

        if ranks.is_empty() {
            Err(ResourcesError::EmptyMerges)
        } else {
            Ok(Self(ranks))
        }
    }

    /// Gets the rank of the pair or falls back to the default rank.
    pub fn rank_of(&self, pair: &SymbolPair, default: u32) -> u32 {
        self.get(pair.left(), pair.right()).unwrap_or(default)
    }

    /// Gets the rank of the adjacent symbols if they form a known pair.
    pub fn get(&self, left: &str, right: &str) -> Option<u32> {
        self.0
            .get(left)
            .and_then(|rights| rights.get(right))
            .copied()
    }

    /// Gets the number of pairs.
    pub fn len(&self) -> usize {
        self.0.values().map(HashMap::len).sum()
    }

    /// Checks if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SymbolPair, u32)> for Ranks {
    fn from_iter<I: IntoIterator<Item = (SymbolPair, u32)>>(iter: I) -> Self {
        let mut ranks = HashMap::<String, HashMap<String, u32>>::new();
        for (SymbolPair { left, right }, rank) in iter {
            ranks.entry(left).or_default().insert(right, rank);
        }
        Self(ranks)
    }
}

/// Splits the line into exactly two space separated symbols.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut symbols = line.trim_end_matches(' ').split(' ');
    match (symbols.next(), symbols.next(), symbols.next()) {
        (Some(left), Some(right), None) => Some((left, right)),
        _ => None,
    }
}
