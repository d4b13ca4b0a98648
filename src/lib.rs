//! # fasta2genes - Per-gene extraction from concatenated alignments
//!
//! Splits multi-species alignments of concatenated genes back into one
//! FASTA file per gene.
//!
//! ## Architecture
//!
//! - `model`: Gene ranges, species sequences, extracted genes and groups
//! - `formats`: Gene index (`charset`) and single-line FASTA readers
//! - `extract`: Slicing, edge-gap cleanup and validity of one gene
//! - `aggregate`: Species × gene cross product, grouped by gene
//! - `output`: Run configuration, gene file writer and debug printer

pub mod aggregate;
pub mod extract;
pub mod formats;
pub mod model;
pub mod output;

pub use aggregate::aggregate;
pub use extract::{extract_gene, is_valid_gene};
pub use model::{ExtractedGene, GeneGroups, GeneRange, SpeciesSequence};
pub use output::{process_alignment_file, RunConfig};
