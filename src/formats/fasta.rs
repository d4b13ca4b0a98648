//! Single-line FASTA reader for concatenated alignments.
//!
//! Each species occupies exactly two lines: a header and its whole
//! aligned sequence on one line (no wrapping).
//!
//! ## Format
//!
//! ```text
//! >species_name
//! ACGT--?ACGT...
//! >another_species
//! ACGTTT-ACG?...
//! ```
//!
//! The reader is a two-state scan (expecting a header, expecting a
//! sequence) and rejects any input that breaks the alternation.

use std::io::BufRead;

use log::{debug, warn};
use thiserror::Error;

use crate::model::SpeciesSequence;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read alignment: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty species name at line {0}")]
    EmptyName(usize),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Header for '{name}' at line {line} is not followed by a sequence line")]
    HeaderWithoutSequence { name: String, line: usize },
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// What the scan expects on the next line.
enum ScanState {
    Header,
    Sequence { name: String, line: usize },
}

/// Parses single-line FASTA records from a reader, in file order.
///
/// Blank lines are skipped between records, but a blank line right after
/// a header is that species' (empty) sequence. A sequence line is taken
/// verbatim apart from surrounding whitespace, so it may start with '-'.
/// A file without records yields an empty list.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<SpeciesSequence>> {
    let mut species = Vec::new();
    let mut state = ScanState::Header;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() && matches!(state, ScanState::Header) {
            continue;
        }

        state = match state {
            ScanState::Header => {
                let Some(header) = line.strip_prefix('>') else {
                    return Err(FastaError::SequenceWithoutHeader(line_number));
                };
                let name = header.trim();
                if name.is_empty() {
                    return Err(FastaError::EmptyName(line_number));
                }
                ScanState::Sequence {
                    name: name.to_string(),
                    line: line_number,
                }
            }
            ScanState::Sequence { name, line: header_line } => {
                if line.starts_with('>') {
                    return Err(FastaError::HeaderWithoutSequence {
                        name,
                        line: header_line,
                    });
                }
                debug!("added species {}: {}", species.len() + 1, name);
                species.push(SpeciesSequence::new(name, line));
                ScanState::Header
            }
        };
    }

    if let ScanState::Sequence { name, line } = state {
        return Err(FastaError::HeaderWithoutSequence { name, line });
    }

    if species.is_empty() {
        warn!("no species records found");
    }

    Ok(species)
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<SpeciesSequence>> {
    parse_fasta(content.as_bytes())
}
