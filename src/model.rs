//! Data model for gene extraction.
//!
//! This module contains the data structures shared by the readers, the
//! extraction engine and the writers:
//! - Gene ranges parsed from the index file
//! - Species sequences read from alignment files
//! - Extracted (cleaned) gene subsequences
//! - Per-gene groups of valid extractions, in a deterministic order

use std::collections::HashMap;

/// A named gene as a 1-based, inclusive column interval of the
/// concatenated alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRange {
    /// Gene name (also the stem of its output file)
    pub name: String,
    /// First column, 1-based
    pub start: usize,
    /// Last column, 1-based and inclusive
    pub end: usize,
}

impl GeneRange {
    /// Creates a new gene range. Callers are expected to have checked
    /// `1 <= start <= end`.
    pub fn new(name: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Number of alignment columns covered by the gene.
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// A valid range always covers at least one column.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One species' full aligned sequence, as read from an alignment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSequence {
    /// Species name (header line, without '>')
    pub name: String,
    /// Aligned sequence data (letters, '?' and '-')
    pub sequence: String,
}

impl SpeciesSequence {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }
}

/// The cleaned subsequence of one gene for one species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGene {
    /// Species name, carried through from the source sequence
    pub name: String,
    /// Cleaned subsequence; always exactly as long as the gene range
    pub sequence: String,
}

impl ExtractedGene {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }
}

/// Valid extractions grouped by gene name.
///
/// Genes iterate in the order they were first registered, and each
/// gene's extractions keep the order in which they were pushed, so
/// output files are deterministic.
#[derive(Debug, Clone, Default)]
pub struct GeneGroups {
    groups: Vec<(String, Vec<ExtractedGene>)>,
    index: HashMap<String, usize>,
}

impl GeneGroups {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gene with an empty group. Registering an existing
    /// gene again keeps its current group and position.
    pub fn register(&mut self, gene: &str) {
        if !self.index.contains_key(gene) {
            self.index.insert(gene.to_string(), self.groups.len());
            self.groups.push((gene.to_string(), Vec::new()));
        }
    }

    /// Appends an extraction to a gene's group, registering the gene
    /// first if needed.
    pub fn push(&mut self, gene: &str, extracted: ExtractedGene) {
        self.register(gene);
        let slot = self.index[gene];
        self.groups[slot].1.push(extracted);
    }

    /// Gets the group of a gene.
    pub fn get(&self, gene: &str) -> Option<&[ExtractedGene]> {
        self.index.get(gene).map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Iterates over `(gene name, group)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ExtractedGene])> {
        self.groups
            .iter()
            .map(|(name, group)| (name.as_str(), group.as_slice()))
    }

    /// Returns the number of registered genes.
    pub fn gene_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the total number of extractions across all genes.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.len()).sum()
    }

    /// Returns true if no gene is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
