//! fasta2genes - Split concatenated alignments into per-gene files
//!
//! ## Usage
//!
//! ```bash
//! fasta2genes -i genes.idx alignment.fasta [alignment2.fasta ...]
//! fasta2genes -d -i genes.idx alignment.fasta   # print, write nothing
//! ```
//!
//! The index lists one gene per line:
//!
//! ```text
//! charset EOG808PJJ = 1 - 120 ;
//! ```
//!
//! Every gene gets a `<gene>.fasta` file (appended to, never truncated)
//! holding the species whose subsequence is not entirely unknown.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{debug, LevelFilter};

use fasta2genes::formats::read_gene_ranges;
use fasta2genes::output::{process_alignment_file, RunConfig};

/// fasta2genes - Extract genes from concatenated multi-species alignments
///
/// Reads the gene coordinates from the index file, then for each
/// alignment file appends every species' valid gene subsequence to
/// <gene>.fasta.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment files (single-line FASTA)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Gene index file ('charset NAME = START - END ;' lines)
    #[arg(short = 'i', long = "index")]
    index: PathBuf,

    /// Debug mode: print gene groups instead of writing files, with verbose tracing
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Verbose tracing while still writing gene files
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Directory where gene files are appended
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let base = if self.debug {
            RunConfig::debug()
        } else {
            RunConfig {
                verbose: self.verbose,
                ..RunConfig::default()
            }
        };
        RunConfig {
            output_dir: self.output_dir.clone(),
            ..base
        }
    }
}

fn init_logging(config: &RunConfig) {
    env_logger::Builder::new()
        .filter_level(if config.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.run_config();
    init_logging(&config);

    debug!("processing gene details in index file: {}", args.index.display());
    let genes = read_gene_ranges(&args.index)?;
    debug!("read {} genes from {}", genes.len(), args.index.display());

    for file in &args.files {
        process_alignment_file(file, &genes, &config)?;
        debug!("done processing fasta file: {}", file.display());
    }

    Ok(())
}
