//! Input file readers.
//!
//! Two line-oriented formats are read:
//! - the gene index (`charset NAME = START - END ;` lines)
//! - single-line FASTA alignments (`>name` / `sequence` pairs)
//!
//! Both readers are fail-fast: the first malformed line aborts the run.

pub mod charset;
pub mod fasta;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{GeneRange, SpeciesSequence};

/// Errors that can occur while reading an input file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file '{path}'")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid gene index '{path}'")]
    CharsetError {
        path: PathBuf,
        #[source]
        source: charset::CharsetError,
    },

    #[error("Invalid alignment '{path}'")]
    FastaError {
        path: PathBuf,
        #[source]
        source: fasta::FastaError,
    },
}

/// Result type for reading operations.
pub type ParseResult<T> = Result<T, ParseError>;

fn open<P: AsRef<Path>>(path: P) -> ParseResult<BufReader<File>> {
    let file = File::open(&path).map_err(|source| ParseError::IoError {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads the gene index file, returning gene ranges in file order.
pub fn read_gene_ranges<P: AsRef<Path>>(path: P) -> ParseResult<Vec<GeneRange>> {
    let reader = open(&path)?;
    charset::parse_charsets(reader).map_err(|source| ParseError::CharsetError {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

/// Reads an alignment file, returning species in file order.
pub fn read_species<P: AsRef<Path>>(path: P) -> ParseResult<Vec<SpeciesSequence>> {
    let reader = open(&path)?;
    fasta::parse_fasta(reader).map_err(|source| ParseError::FastaError {
        path: path.as_ref().to_path_buf(),
        source,
    })
}
