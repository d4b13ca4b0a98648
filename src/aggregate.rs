//! Regroups per-species extractions by gene.

use log::debug;

use crate::extract::{extract_gene, is_valid_gene};
use crate::model::{GeneGroups, GeneRange, SpeciesSequence};

/// Extracts every gene from every species and keeps the valid results,
/// grouped by gene name.
///
/// Species are processed one at a time, all genes each, so every group
/// lists species in file order. Every gene in `genes` gets a group,
/// even when no species has a valid extraction for it.
pub fn aggregate(species_list: &[SpeciesSequence], genes: &[GeneRange]) -> GeneGroups {
    let mut groups = GeneGroups::new();
    for gene in genes {
        groups.register(&gene.name);
    }

    for species in species_list {
        debug!("processing species: {}", species.name);
        for gene in genes {
            let extracted = extract_gene(species, gene);
            if is_valid_gene(&extracted) {
                debug!("adding {} to gene {}", species.name, gene.name);
                groups.push(&gene.name, extracted);
            }
        }
        debug!("done processing species: {}", species.name);
    }

    groups
}
