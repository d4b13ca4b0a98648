//! Output of gene groups.
//!
//! In normal mode each gene's group is appended to `<gene>.fasta` in the
//! output directory, one `>species` / `sequence` record per species.
//! Files are never truncated, so successive alignment files (and
//! successive runs) accumulate in the same gene files.
//!
//! In debug mode the groups are printed instead and nothing is written.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::aggregate::aggregate;
use crate::formats::read_species;
use crate::model::{ExtractedGene, GeneGroups, GeneRange};

/// Extension of the per-gene output files.
pub const GENE_FILE_EXTENSION: &str = "fasta";

/// Run-wide settings, passed explicitly to the writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Append groups to gene files (otherwise print them)
    pub write_output: bool,
    /// Trace extraction details
    pub verbose: bool,
    /// Directory holding the gene files
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            write_output: true,
            verbose: false,
            output_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Debug mode: print instead of writing, and trace everything.
    pub fn debug() -> Self {
        Self {
            write_output: false,
            verbose: true,
            ..Self::default()
        }
    }

    /// Path of the output file for `gene`.
    pub fn gene_path(&self, gene: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", gene, GENE_FILE_EXTENSION))
    }
}

/// Writes records in two-line FASTA form.
fn write_records<W: Write>(out: &mut W, records: &[ExtractedGene]) -> io::Result<()> {
    for record in records {
        writeln!(out, ">{}", record.name)?;
        writeln!(out, "{}", record.sequence)?;
    }
    Ok(())
}

/// Appends one gene's group to its file, creating the file if needed.
///
/// The file is opened even for an empty group so that it exists after
/// the run.
pub fn append_gene_file(path: &Path, records: &[ExtractedGene]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open gene file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write gene file {}", path.display()))?;
    Ok(())
}

/// Appends every group to its gene file.
pub fn write_groups(groups: &GeneGroups, config: &RunConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    for (gene, records) in groups.iter() {
        let path = config.gene_path(gene);
        debug!("appending {} species to {}", records.len(), path.display());
        append_gene_file(&path, records)?;
    }
    Ok(())
}

/// Prints every group, empty ones included.
pub fn print_groups<W: Write>(out: &mut W, groups: &GeneGroups) -> io::Result<()> {
    for (gene, records) in groups.iter() {
        writeln!(out)?;
        writeln!(out, "-------------------")?;
        writeln!(out, "gene {}", gene)?;
        write_records(out, records)?;
    }
    Ok(())
}

/// Hands the groups to the writer or the printer, never both.
pub fn emit_groups(groups: &GeneGroups, config: &RunConfig) -> Result<()> {
    if config.write_output {
        write_groups(groups, config)
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        print_groups(&mut handle, groups).context("Failed to print gene groups")
    }
}

/// Reads one alignment file, regroups its species by gene and emits the
/// groups. Groups are not carried over to the next file.
pub fn process_alignment_file<P: AsRef<Path>>(
    path: P,
    genes: &[GeneRange],
    config: &RunConfig,
) -> Result<GeneGroups> {
    let path = path.as_ref();
    debug!("reading species in file: {}", path.display());
    let species = read_species(path)?;

    let groups = aggregate(&species, genes);
    emit_groups(&groups, config)?;

    info!(
        "{}: {} species, {} gene records across {} genes",
        path.display(),
        species.len(),
        groups.record_count(),
        groups.gene_count()
    );
    Ok(groups)
}
