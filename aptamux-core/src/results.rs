use crate::evaluator::ConfusionSummary;
use crate::probability::{MixtureDiagnostic, ProbabilityMatrix};
use crate::types::IdentificationResult;

/// Simulation and decoding results from one assay run.
///
/// Contains the per-spot identification records, the aggregated confusion
/// summary, the probability matrix (for diagnostic plotting by external
/// consumers), the optional binding-mixture diagnostic, and run metadata.
///
/// # Examples
///
/// ```rust,no_run
/// use aptamux_core::{AssayAnalyzer, config::AssayConfig};
/// use aptamux_core::catalog::read_catalog_fasta;
///
/// let catalog = read_catalog_fasta("proteome.fasta")?;
/// let analyzer = AssayAnalyzer::new(AssayConfig::default());
/// let results = analyzer.run(&catalog)?;
///
/// println!("Decoded {} spots", results.identifications.len());
/// println!("Accuracy: {:.2}%", results.confusion.accuracy() * 100.0);
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
#[derive(Debug)]
pub struct AssayResults {
    /// One identification record per decoded spot, in panel order.
    pub identifications: Vec<IdentificationResult>,

    /// Confusion matrix and derived accuracy metrics.
    pub confusion: ConfusionSummary,

    /// The read-only binding probability matrix used for this run.
    ///
    /// Exposed for external diagnostic plotting.
    pub probability: ProbabilityMatrix,

    /// Two-component mixture diagnostic, when requested in the config.
    pub mixture: Option<MixtureDiagnostic>,

    /// Metadata about the simulated panel.
    pub panel_info: PanelInfo,
}

/// Metadata describing one simulated panel.
#[derive(Debug, Clone)]
pub struct PanelInfo {
    /// Number of distinct catalog proteins.
    pub num_proteins: usize,

    /// Number of distinct motifs observed across the catalog.
    pub num_candidate_motifs: usize,

    /// Number of deployed probes.
    pub num_probes: usize,

    /// Number of simulated test spots.
    pub num_spots: usize,

    /// Seed that produced this run.
    pub seed: u64,
}
