use std::fmt;

use thiserror::Error;

/// A reference protein from the assay catalog.
///
/// Proteins are immutable once loaded. The `abundance` field is expressed in
/// an arbitrary but consistent unit and drives the test-panel sampling
/// weights.
///
/// # Examples
///
/// ```rust
/// use aptamux_core::types::Protein;
///
/// let protein = Protein {
///     id: "P001".to_string(),
///     sequence: "MKTAYIAKQR".to_string(),
///     abundance: 12.5,
/// };
/// assert_eq!(protein.id, "P001");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Protein {
    /// Unique catalog identifier.
    pub id: String,
    /// Reference sequence over the protein alphabet.
    pub sequence: String,
    /// Relative abundance used as a sampling weight (non-negative).
    pub abundance: f64,
}

/// A deployed motif-probe with its drawn binding affinities.
///
/// Both affinities are log10 binding constants drawn once at probe-set
/// construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    /// The fixed-length motif this probe targets.
    pub motif: String,
    /// log10 on-target binding affinity.
    pub on_target_log_affinity: f64,
    /// log10 off-target (background) binding affinity.
    pub off_target_log_affinity: f64,
}

/// One simulated measurement spot: a ground-truth protein identity and the
/// binary binding pattern observed across the probe set.
///
/// The observation vector has exactly one entry per deployed probe, in the
/// same ordering as the affinity and probability matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSpot {
    /// Catalog index of the protein actually present on the spot.
    pub true_protein: usize,
    /// Binary binding outcome per probe.
    pub observed: Vec<bool>,
}

/// Decoding outcome for a single test spot.
#[derive(Debug, Clone)]
pub struct IdentificationResult {
    /// Catalog index of the ground-truth protein.
    pub true_index: usize,
    /// Catalog index of the inferred protein.
    pub inferred_index: usize,
    /// Identifier of the ground-truth protein.
    pub true_id: String,
    /// Identifier of the inferred protein.
    pub inferred_id: String,
    /// Pearson correlation of the winning candidate.
    pub score: f64,
    /// log10 ratio of runner-up to winner tail probabilities under the
    /// fitted background score distribution. Larger means a more uniquely
    /// confident match.
    pub marginal_confidence: f64,
}

impl IdentificationResult {
    /// Whether the decoder recovered the true identity.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.true_index == self.inferred_index
    }
}

impl fmt::Display for IdentificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "true={};inferred={};score={:.4};confidence={:.3}",
            self.true_id, self.inferred_id, self.score, self.marginal_confidence
        )
    }
}

/// Error types that can occur during assay simulation and decoding.
#[derive(Error, Debug)]
pub enum AptamuxError {
    /// Invalid input data or configuration value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The configured coverage fraction selected zero probes.
    #[error("Probe coverage selected zero probes from {0} candidate motifs")]
    EmptyProbeSet(usize),
    /// The per-spot score vector had zero variance, so no background
    /// distribution can be fitted for confidence scoring.
    #[error("Degenerate score distribution: all {0} candidate scores are equal")]
    DegenerateScoreDistribution(usize),
    /// Error parsing input data.
    #[error("Parse error: {0}")]
    ParseError(String),
    /// File I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
