use crate::error::{ClusterError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::{FromStr, SplitAsciiWhitespace};

/// Open a token source, decompressing `.gz` files; `None` reads stdin
pub fn open_input<P: AsRef<Path>>(path: Option<P>) -> io::Result<Box<dyn BufRead>> {
    let Some(path) = path else {
        return Ok(Box::new(BufReader::new(io::stdin())));
    };
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Largest accepted partner count, the range of a signed 32-bit id
pub const MAX_PARTNER_COUNT: usize = i32::MAX as usize;

const PARTNER_COUNT_TOKEN: &str = "partner count (integer in [0, 2147483647])";

/// Parsed problem instance: a partner universe and three parallel edge lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterInput {
    pub partner_count: usize,
    pub from: Vec<i64>,
    pub to: Vec<i64>,
    pub restaurant_ids: Vec<i64>,
}

impl ClusterInput {
    pub fn num_edges(&self) -> usize {
        self.from.len()
    }
}

/// Whitespace-delimited integer tokens consumed in strict order
pub struct TokenReader<'a> {
    tokens: SplitAsciiWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    pub fn new(text: &'a str) -> Self {
        TokenReader {
            tokens: text.split_ascii_whitespace(),
        }
    }

    /// Next token parsed as `T`; `expected` names it in the error
    pub fn next<T: FromStr>(&mut self, expected: impl Into<String>) -> Result<T> {
        let expected = expected.into();
        match self.tokens.next() {
            Some(token) => token.parse().map_err(|_| ClusterError::Parse {
                expected,
                found: format!("'{token}'"),
            }),
            None => Err(ClusterError::Parse {
                expected,
                found: "end of input".to_string(),
            }),
        }
    }

    /// `count` tokens named `name[0]`, `name[1]`, ...
    pub fn next_list<T: FromStr>(&mut self, name: &str, count: usize) -> Result<Vec<T>> {
        (0..count).map(|i| self.next(format!("{name}[{i}]"))).collect()
    }

    /// Tokens left unread
    pub fn remaining(self) -> usize {
        self.tokens.count()
    }
}

/// Parse `partnerCount n from[..n] to[..n] restaurantId[..n]`
pub fn parse_input(text: &str) -> Result<ClusterInput> {
    let mut tokens = TokenReader::new(text);

    let partner_count: usize = tokens.next(PARTNER_COUNT_TOKEN)?;
    if partner_count > MAX_PARTNER_COUNT {
        return Err(ClusterError::Parse {
            expected: PARTNER_COUNT_TOKEN.to_string(),
            found: partner_count.to_string(),
        });
    }
    let num_edges: usize = tokens.next("edge count (non-negative integer)")?;
    let from = tokens.next_list("from", num_edges)?;
    let to = tokens.next_list("to", num_edges)?;
    let restaurant_ids = tokens.next_list("restaurant", num_edges)?;

    let trailing = tokens.remaining();
    if trailing > 0 {
        log::debug!("Ignoring {trailing} trailing token(s) after restaurant ids");
    }

    Ok(ClusterInput {
        partner_count,
        from,
        to,
        restaurant_ids,
    })
}

/// Read all of `reader` and parse it as a problem instance
pub fn read_input<R: Read>(mut reader: R) -> Result<ClusterInput> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_input(&text)
}
