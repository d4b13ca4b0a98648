//! Gene index parser.
//!
//! The index lists one gene per line as a NEXUS-style `charset`
//! statement over the concatenated alignment:
//!
//! ```text
//! charset EOG808PJJ = 1 - 120 ;
//! charset EOG808PJK = 121 - 348 ;
//! ```
//!
//! Tokens are separated by arbitrary whitespace. Coordinates are
//! 1-based and inclusive. The first malformed line aborts parsing.

use std::io::BufRead;

use log::debug;
use thiserror::Error;

use crate::model::GeneRange;

/// Number of whitespace-separated tokens on a charset line.
const CHARSET_TOKENS: usize = 7;

/// Errors that can occur during index parsing.
#[derive(Error, Debug)]
pub enum CharsetError {
    #[error("Failed to read index: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line {line}: expected 7 tokens ('charset NAME = START - END ;'), found {found}")]
    TokenCount { line: usize, found: usize },

    #[error("Line {line}: expected '{expected}', found '{found}'")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Line {line}: invalid coordinate '{value}'")]
    InvalidCoordinate { line: usize, value: String },

    #[error("Line {line}: coordinates are 1-based, got start 0")]
    ZeroStart { line: usize },

    #[error("Line {line}: end {end} is before start {start}")]
    EndBeforeStart { line: usize, start: usize, end: usize },
}

/// Result type for index parsing.
pub type CharsetResult<T> = Result<T, CharsetError>;

/// Parses a single charset line. `line_number` is only used for errors.
pub fn parse_charset_line(line: &str, line_number: usize) -> CharsetResult<GeneRange> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != CHARSET_TOKENS {
        return Err(CharsetError::TokenCount {
            line: line_number,
            found: tokens.len(),
        });
    }

    expect_token(tokens[0], "charset", line_number, true)?;
    expect_token(tokens[2], "=", line_number, false)?;
    expect_token(tokens[4], "-", line_number, false)?;
    expect_token(tokens[6], ";", line_number, false)?;

    let start = parse_coordinate(tokens[3], line_number)?;
    let end = parse_coordinate(tokens[5], line_number)?;

    if start == 0 {
        return Err(CharsetError::ZeroStart { line: line_number });
    }
    if end < start {
        return Err(CharsetError::EndBeforeStart {
            line: line_number,
            start,
            end,
        });
    }

    Ok(GeneRange::new(tokens[1], start, end))
}

fn expect_token(
    found: &str,
    expected: &'static str,
    line_number: usize,
    ignore_case: bool,
) -> CharsetResult<()> {
    let matches = if ignore_case {
        found.eq_ignore_ascii_case(expected)
    } else {
        found == expected
    };
    if matches {
        Ok(())
    } else {
        Err(CharsetError::UnexpectedToken {
            line: line_number,
            expected,
            found: found.to_string(),
        })
    }
}

fn parse_coordinate(token: &str, line_number: usize) -> CharsetResult<usize> {
    token.parse::<usize>().map_err(|_| CharsetError::InvalidCoordinate {
        line: line_number,
        value: token.to_string(),
    })
}

/// Parses an index from a reader, returning gene ranges in file order.
///
/// Blank lines are skipped.
pub fn parse_charsets<R: BufRead>(reader: R) -> CharsetResult<Vec<GeneRange>> {
    let mut genes = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        let gene = parse_charset_line(&line, idx + 1)?;
        debug!(
            "added gene {}: {} ({}-{})",
            genes.len() + 1,
            gene.name,
            gene.start,
            gene.end
        );
        genes.push(gene);
    }

    Ok(genes)
}

/// Parses an index from a string.
pub fn parse_charsets_str(content: &str) -> CharsetResult<Vec<GeneRange>> {
    parse_charsets(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_index() {
        let content = "charset G1 = 1 - 120 ;\ncharset G2 = 121 - 348 ;\n";
        let genes = parse_charsets_str(content).unwrap();

        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0], GeneRange::new("G1", 1, 120));
        assert_eq!(genes[1], GeneRange::new("G2", 121, 348));
    }

    #[test]
    fn test_parse_flexible_whitespace() {
        let content = "  charset\tEOG808PJJ   =  2 -\t5  ;  \n";
        let genes = parse_charsets_str(content).unwrap();
        assert_eq!(genes, vec![GeneRange::new("EOG808PJJ", 2, 5)]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let content = "\ncharset G1 = 1 - 4 ;\n\n   \ncharset G2 = 5 - 8 ;\n";
        let genes = parse_charsets_str(content).unwrap();
        assert_eq!(genes.len(), 2);
    }

    #[test]
    fn test_wrong_token_count() {
        let result = parse_charsets_str("charset G1 = 1 - 4;\n");
        assert!(matches!(
            result,
            Err(CharsetError::TokenCount { line: 1, found: 6 })
        ));
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let content = "charset G1 = 1 - 4 ;\ncharset G2 = five - 8 ;\n";
        let result = parse_charsets_str(content);
        assert!(matches!(
            result,
            Err(CharsetError::InvalidCoordinate { line: 2, .. })
        ));
    }

    #[test]
    fn test_unexpected_literal() {
        let result = parse_charsets_str("charset G1 : 1 - 4 ;\n");
        assert!(matches!(
            result,
            Err(CharsetError::UnexpectedToken { expected: "=", .. })
        ));
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let genes = parse_charsets_str("CHARSET G1 = 1 - 4 ;\n").unwrap();
        assert_eq!(genes[0].name, "G1");
    }

    #[test]
    fn test_zero_start_rejected() {
        let result = parse_charsets_str("charset G1 = 0 - 4 ;\n");
        assert!(matches!(result, Err(CharsetError::ZeroStart { line: 1 })));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = parse_charsets_str("charset G1 = 9 - 4 ;\n");
        assert!(matches!(
            result,
            Err(CharsetError::EndBeforeStart { start: 9, end: 4, .. })
        ));
    }

    #[test]
    fn test_empty_index() {
        assert!(parse_charsets_str("").unwrap().is_empty());
    }
}
