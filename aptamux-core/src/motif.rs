//! Motif extraction and occurrence counting.
//!
//! A motif is a fixed-length contiguous subsequence (k-mer). The extractor is
//! used twice: once to build the candidate probe universe across the whole
//! catalog, and once per protein to build the occurrence table the affinity
//! model reads.

use std::collections::{HashMap, HashSet};

use crate::catalog::Catalog;
use crate::types::AptamuxError;

/// Extracts all overlapping length-`k` motifs of `sequence`, stride 1.
///
/// The output preserves sequence order and has exactly `len - k + 1`
/// entries.
///
/// # Errors
///
/// Returns [`AptamuxError::InvalidInput`] when `k` is zero or exceeds the
/// sequence length.
///
/// # Examples
///
/// ```rust
/// use aptamux_core::motif::extract_motifs;
///
/// let motifs = extract_motifs("MKTAY", 3)?;
/// assert_eq!(motifs, vec!["MKT", "KTA", "TAY"]);
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
pub fn extract_motifs(sequence: &str, k: usize) -> Result<Vec<&str>, AptamuxError> {
    if k == 0 {
        return Err(AptamuxError::InvalidInput(
            "Motif length must be positive".to_string(),
        ));
    }
    if k > sequence.len() {
        return Err(AptamuxError::InvalidInput(format!(
            "Motif length {} exceeds sequence length {}",
            k,
            sequence.len()
        )));
    }

    Ok(sequence
        .as_bytes()
        .windows(k)
        // Catalog sequences are ASCII residue codes, so byte windows are
        // valid substrings.
        .map(|window| std::str::from_utf8(window).expect("ASCII residue window"))
        .collect())
}

/// Collects the distinct motifs across the whole catalog, in first-observation
/// order.
///
/// This ordering is deterministic for a given catalog, which keeps probe-set
/// sampling reproducible.
///
/// # Errors
///
/// Propagates [`AptamuxError::InvalidInput`] from [`extract_motifs`] when any
/// catalog sequence is shorter than `k`.
pub fn candidate_motifs(catalog: &Catalog, k: usize) -> Result<Vec<String>, AptamuxError> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for protein in catalog.proteins() {
        for motif in extract_motifs(&protein.sequence, k)? {
            if seen.insert(motif.to_string()) {
                candidates.push(motif.to_string());
            }
        }
    }

    Ok(candidates)
}

/// Builds the per-protein occurrence table: motif -> count within the
/// sequence's k-mers.
///
/// Computed once per protein and reused across every probe lookup, so the
/// affinity matrix build stays O(probes x proteins).
///
/// # Errors
///
/// Propagates [`AptamuxError::InvalidInput`] from [`extract_motifs`].
pub fn motif_counts(sequence: &str, k: usize) -> Result<HashMap<&str, usize>, AptamuxError> {
    let mut counts = HashMap::new();
    for motif in extract_motifs(sequence, k)? {
        *counts.entry(motif).or_insert(0) += 1;
    }
    Ok(counts)
}
