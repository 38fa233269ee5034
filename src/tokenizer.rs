//! Whitespace tokenization of a raw command line.
//!
//! There is no quoting, escaping or substitution here: a token is simply a
//! maximal run of non-delimiter characters, in input order.

/// Characters that separate arguments on a command line.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Split a raw input line into argument tokens.
///
/// Runs of delimiter characters collapse into a single boundary and the
/// delimiters themselves are never emitted. An empty line, or a line made of
/// delimiters only, yields an empty vector. Each token owns its text, so the
/// result outlives the line it was produced from.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
