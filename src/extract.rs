//! Gene extraction engine.
//!
//! Slices one gene out of a species' aligned sequence and normalises it:
//! - `?` (ambiguous) becomes `X`
//! - gaps at either edge of the window become `X`
//! - internal gaps are kept
//!
//! The result always has the gene's length. Columns missing because the
//! sequence is shorter than the range are filled with `X` on the left,
//! like leading gaps.

use log::debug;

use crate::model::{ExtractedGene, GeneRange, SpeciesSequence};

/// Unknown marker used for ambiguous and edge-gapped positions.
pub const UNKNOWN: char = 'X';
/// Ambiguous base in the input alignment.
pub const AMBIGUOUS: char = '?';
/// Alignment gap.
pub const GAP: char = '-';

fn push_unknown(seq: &mut String, count: usize) {
    seq.extend(std::iter::repeat(UNKNOWN).take(count));
}

/// Extracts and cleans the subsequence of `gene` from `species`.
///
/// Never fails: a window running past the end of the sequence yields a
/// shorter slice, which the padding steps bring back to the gene length.
pub fn extract_gene(species: &SpeciesSequence, gene: &GeneRange) -> ExtractedGene {
    let gene_len = gene.len();

    // 1-based inclusive [start, end] -> 0-based [start - 1, end)
    let window: String = species
        .sequence
        .chars()
        .skip(gene.start.saturating_sub(1))
        .take(gene_len)
        .map(|c| if c == AMBIGUOUS { UNKNOWN } else { c })
        .collect();

    let window_len = window.chars().count();
    if window_len < gene_len {
        debug!(
            "gene {} runs past the end of {} ({} of {} columns present)",
            gene.name, species.name, window_len, gene_len
        );
    }

    // Leading gaps and any clipped columns, padded on the left
    let body = window.trim_start_matches(GAP);
    let mut cleaned = String::with_capacity(gene_len);
    push_unknown(&mut cleaned, gene_len - body.chars().count());
    cleaned.push_str(body);

    // Trailing gaps, padded on the right
    let kept = cleaned.trim_end_matches(GAP).len();
    cleaned.truncate(kept);
    let missing = gene_len - cleaned.chars().count();
    push_unknown(&mut cleaned, missing);

    debug!("{} / {}: cleaned seq = {}", gene.name, species.name, cleaned);
    ExtractedGene::new(species.name.clone(), cleaned)
}

/// A gene is unusable only when every position is unknown.
pub fn is_valid_gene(gene: &ExtractedGene) -> bool {
    if gene.sequence.starts_with(UNKNOWN) {
        if gene.sequence.chars().all(|c| c == UNKNOWN) {
            debug!(
                "gene {} is INVALID - no valid letters in seq: {}",
                gene.name, gene.sequence
            );
            return false;
        }
        debug!(
            "gene {} starts with invalid letter in seq: {}",
            gene.name, gene.sequence
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sequence: &str, start: usize, end: usize) -> String {
        let species = SpeciesSequence::new("sp", sequence);
        extract_gene(&species, &GeneRange::new("g", start, end)).sequence
    }

    #[test]
    fn test_plain_slice() {
        assert_eq!(extract("ACGTACGT", 1, 4), "ACGT");
        assert_eq!(extract("ACGTACGT", 3, 6), "GTAC");
        assert_eq!(extract("ACGTACGT", 8, 8), "T");
    }

    #[test]
    fn test_trailing_gap_becomes_unknown() {
        // Window [2,5] of "-XCG-" is "XCG-"
        assert_eq!(extract("-XCG-", 2, 5), "XCGX");
    }

    #[test]
    fn test_edge_gaps_only() {
        assert_eq!(extract("--A-C--", 1, 7), "XXA-CXX");
    }

    #[test]
    fn test_question_marks() {
        assert_eq!(extract("A?C?", 1, 4), "AXCX");
        assert_eq!(extract("????", 1, 4), "XXXX");
    }

    #[test]
    fn test_question_mark_shields_gap() {
        // '?' is replaced before gaps are stripped, so the gap behind it
        // is no longer at the edge
        assert_eq!(extract("?-A-?", 1, 5), "X-A-X");
    }

    #[test]
    fn test_all_gaps() {
        assert_eq!(extract("ACGT-----ACGT", 5, 9), "XXXXX");
    }

    #[test]
    fn test_range_past_end() {
        // Clipped columns count as missing on the left
        assert_eq!(extract("ACG", 2, 6), "XXXCG");
        assert_eq!(extract("AC-", 2, 5), "XXCX");
    }

    #[test]
    fn test_range_beyond_sequence() {
        assert_eq!(extract("ACGT", 10, 12), "XXX");
        assert_eq!(extract("", 1, 3), "XXX");
    }

    #[test]
    fn test_length_always_matches_range() {
        let sequences = ["", "A", "----", "??--AC", "AC-GT?-", "ACGTACGTACGT"];
        for seq in sequences {
            for start in 1..=8 {
                for end in start..=10 {
                    let out = extract(seq, start, end);
                    assert_eq!(
                        out.chars().count(),
                        end - start + 1,
                        "{} [{}, {}]",
                        seq,
                        start,
                        end
                    );
                }
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let cases = [("--A?-C--", 1, 8), ("AC-GT", 2, 7), ("??--", 1, 4)];
        for (seq, start, end) in cases {
            let once = extract(seq, start, end);
            let twice = extract(&once, 1, once.chars().count());
            assert_eq!(once, twice);
            assert!(!once.contains(AMBIGUOUS));
        }
    }

    #[test]
    fn test_species_name_carried() {
        let species = SpeciesSequence::new("Danio_rerio", "ACGT");
        let gene = extract_gene(&species, &GeneRange::new("G1", 1, 2));
        assert_eq!(gene.name, "Danio_rerio");
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_gene(&ExtractedGene::new("a", "ACGT")));
        assert!(is_valid_gene(&ExtractedGene::new("a", "XXXA")));
        assert!(is_valid_gene(&ExtractedGene::new("a", "AXXX")));
        assert!(is_valid_gene(&ExtractedGene::new("a", "X-XX")));
        assert!(!is_valid_gene(&ExtractedGene::new("a", "X")));
        assert!(!is_valid_gene(&ExtractedGene::new("a", "XXXX")));
    }

    #[test]
    fn test_gapped_and_ambiguous_windows_invalid() {
        let species = SpeciesSequence::new("sp", "AC------????GT");
        let gaps = extract_gene(&species, &GeneRange::new("g1", 3, 8));
        let unknown = extract_gene(&species, &GeneRange::new("g2", 9, 12));
        assert!(!is_valid_gene(&gaps));
        assert!(!is_valid_gene(&unknown));

        let mixed = extract_gene(&species, &GeneRange::new("g3", 7, 13));
        assert_eq!(mixed.sequence, "XXXXXXG");
        assert!(is_valid_gene(&mixed));
    }
}
