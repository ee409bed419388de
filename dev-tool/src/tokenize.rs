use std::{
    fs::File,
    io::{stdin, stdout, BufRead, BufReader, Result as IoResult, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use displaydoc::Display;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use structopt::StructOpt;
use thiserror::Error;

use roberta_tokenizer::{Builder, BuilderError, Tokenizer};

use crate::{
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    utils::spin_until_done,
};

/// Tokenizes text with one sentence per line and prints the ids as json lines.
#[derive(StructOpt, Debug)]
pub struct TokenizeCmd {
    /// The directory with the base vocabulary, the vocabulary and the merge rules.
    #[structopt(short, long)]
    resources: PathBuf,

    /// Overrides the class id.
    #[structopt(long)]
    cls: Option<u64>,

    /// Overrides the separation id.
    #[structopt(long)]
    sep: Option<u64>,

    /// Overrides the unknown id.
    #[structopt(long)]
    unk: Option<u64>,

    /// Overrides the padding id.
    #[structopt(long)]
    pad: Option<u64>,

    /// Truncates or pads the ids of each sentence to a fixed length.
    ///
    /// Truncation keeps the separation id as the last id, padding appends the padding id.
    #[structopt(short = "l", long)]
    fixed_len: Option<usize>,

    /// Pretty prints the json.
    #[structopt(long)]
    pretty: bool,

    /// The file with the sentences, reads from stdin if absent.
    input: Option<PathBuf>,
}

/// The potential errors of a fixed length.
#[derive(Debug, Display, Error)]
pub enum FixedLenError {
    /// The fixed length {0} can't hold the class and separation ids
    TooShort(usize),
}

/// A fixed number of ids per sentence.
#[derive(Clone, Copy, Debug)]
struct FixedLen(usize);

impl FixedLen {
    fn new(len: usize) -> Result<Self, FixedLenError> {
        if len < 2 {
            Err(FixedLenError::TooShort(len))
        } else {
            Ok(Self(len))
        }
    }

    /// Truncates or pads the ids to the fixed length.
    fn fit(self, mut ids: Vec<u32>, sep_id: u32, pad_id: u32) -> Vec<u32> {
        if ids.len() > self.0 {
            ids.truncate(self.0 - 1);
            ids.push(sep_id);
        } else {
            ids.resize(self.0, pad_id);
        }
        ids
    }
}

#[derive(Debug, PartialEq, Serialize)]
struct TokenizedLine {
    line: usize,
    ids: Vec<u32>,
}

impl TokenizeCmd {
    pub fn run(self) -> Result<i32, Error> {
        let TokenizeCmd {
            resources,
            cls,
            sep,
            unk,
            pad,
            fixed_len,
            pretty,
            input,
        } = self;

        let fixed_len = fixed_len.map(FixedLen::new).transpose()?;
        let tokenizer = spin_until_done("Loading resources", || {
            build_tokenizer(&resources, cls, sep, unk, pad)
        })
        .context("Building the tokenizer failed")?;

        let lines = read_lines(input.as_deref())?;
        debug!("Tokenizing {} lines", lines.len());
        let (tokenized, skipped) = tokenize_lines(&tokenizer, &lines, fixed_len);

        let stdout = stdout();
        let mut stdout = stdout.lock();
        for line in tokenized {
            if pretty {
                serde_json::to_writer_pretty(&mut stdout, &line)?;
            } else {
                serde_json::to_writer(&mut stdout, &line)?;
            }
            writeln!(stdout)?;
        }

        if skipped == 0 {
            Ok(NO_ERROR)
        } else {
            warn!("Skipped {} unreadable lines", skipped);
            Ok(NON_FATAL_ERROR)
        }
    }
}

fn build_tokenizer(
    resources: &Path,
    cls: Option<u64>,
    sep: Option<u64>,
    unk: Option<u64>,
    pad: Option<u64>,
) -> Result<Tokenizer<u32>, BuilderError> {
    let mut builder = Builder::<u32>::from_dir(resources)?;
    if let Some(id) = cls {
        builder = builder.with_cls(id);
    }
    if let Some(id) = sep {
        builder = builder.with_sep(id);
    }
    if let Some(id) = unk {
        builder = builder.with_unk(id);
    }
    if let Some(id) = pad {
        builder = builder.with_pad(id);
    }
    builder.build()
}

fn read_lines(input: Option<&Path>) -> Result<Vec<IoResult<String>>, Error> {
    if let Some(path) = input {
        let file = File::open(path).with_context(|| format!("Opening {:?} failed", path))?;
        Ok(BufReader::new(file).lines().collect())
    } else {
        let stdin = stdin();
        let lines = stdin.lock().lines().collect();
        Ok(lines)
    }
}

/// Tokenizes the lines in parallel and counts the unreadable lines.
fn tokenize_lines(
    tokenizer: &Tokenizer<u32>,
    lines: &[IoResult<String>],
    fixed_len: Option<FixedLen>,
) -> (Vec<TokenizedLine>, usize) {
    let tokenized = lines
        .par_iter()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(line) => {
                let ids = tokenizer.tokenize(line);
                let ids = match fixed_len {
                    Some(len) => len.fit(ids, tokenizer.sep_id(), tokenizer.pad_id()),
                    None => ids,
                };
                Some(TokenizedLine { line: idx + 1, ids })
            }
            Err(error) => {
                warn!("Skipped line {}: {}", idx + 1, error);
                None
            }
        })
        .collect::<Vec<_>>();
    let skipped = lines.len() - tokenized.len();

    (tokenized, skipped)
}

#[cfg(test)]
mod tests {
    use std::io::{Error as IoError, ErrorKind};

    use super::*;

    fn tokenizer() -> Tokenizer<u32> {
        let resources = test_utils::roberta::resources().unwrap();
        build_tokenizer(&resources, None, None, None, Some(9)).unwrap()
    }

    #[test]
    fn test_fixed_len() {
        assert!(matches!(FixedLen::new(1), Err(FixedLenError::TooShort(1))));

        let len = FixedLen::new(4).unwrap();
        assert_eq!(len.fit(vec![0, 4, 5, 6, 19, 2], 2, 1), [0, 4, 5, 2]);
        assert_eq!(len.fit(vec![0, 4, 5, 2], 2, 1), [0, 4, 5, 2]);
        assert_eq!(len.fit(vec![0, 2], 2, 1), [0, 2, 1, 1]);
    }

    #[test]
    fn test_tokenize_lines() {
        let lines = vec![
            Ok("lower newer".to_string()),
            Err(IoError::new(ErrorKind::InvalidData, "invalid utf-8")),
            Ok("".to_string()),
        ];

        let (tokenized, skipped) = tokenize_lines(&tokenizer(), &lines, None);
        assert_eq!(skipped, 1);
        assert_eq!(
            tokenized,
            [
                TokenizedLine {
                    line: 1,
                    ids: vec![0, 4, 5, 6, 19, 114, 13, 7, 6, 19, 2],
                },
                TokenizedLine {
                    line: 3,
                    ids: vec![0, 2],
                },
            ],
        );
    }

    #[test]
    fn test_tokenize_lines_fixed_len() {
        let lines = vec![Ok("lower newer".to_string()), Ok("er".to_string())];
        let fixed_len = FixedLen::new(5).ok();

        let (tokenized, skipped) = tokenize_lines(&tokenizer(), &lines, fixed_len);
        assert_eq!(skipped, 0);
        assert_eq!(tokenized[0].ids, [0, 4, 5, 6, 2]);
        assert_eq!(tokenized[1].ids, [0, 19, 2, 9, 9]);
    }
}
