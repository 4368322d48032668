use crate::constants::{
    DEFAULT_AFFINITY_STD_DEV, DEFAULT_CONCENTRATION, DEFAULT_MOTIF_LENGTH, DEFAULT_NUM_SPOTS,
    DEFAULT_OFF_TARGET_AFFINITY, DEFAULT_ON_TARGET_AFFINITY, DEFAULT_PROBE_COVERAGE, DEFAULT_SEED,
};

/// Output format options for assay simulation results.
///
/// # Formats
///
/// - **Table**: human-readable run report with per-spot calls and a
///   confusion summary
/// - **Tsv**: tab-separated per-spot identification records for downstream
///   tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report with identification table and confusion summary.
    Table,

    /// Tab-separated values, one identification record per line.
    ///
    /// Lightweight and easy to parse.
    Tsv,
}

/// Configuration settings for an assay simulation run.
///
/// This struct controls the binding model, the panel size, and execution
/// behavior. All stochastic behavior is controlled by `seed`; two runs with
/// the same configuration and catalog are bit-for-bit identical.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use aptamux_core::config::AssayConfig;
///
/// let config = AssayConfig::default();
/// assert_eq!(config.motif_length, 3);
/// ```
///
/// ## Custom panel
///
/// ```rust
/// use aptamux_core::config::AssayConfig;
///
/// let config = AssayConfig {
///     num_spots: 500,
///     seed: 7,
///     probe_coverage: 0.25,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AssayConfig {
    /// Motif length `k` used for probe targets and occurrence counting.
    ///
    /// **Default**: `3`
    pub motif_length: usize,

    /// Base on-target binding affinity (linear scale).
    ///
    /// The mean of each probe's on-target log-affinity draw is the log10 of
    /// this value.
    ///
    /// **Default**: `1e-5`
    pub on_target_affinity: f64,

    /// Base off-target (background) binding affinity (linear scale).
    ///
    /// **Default**: `1e-1`
    pub off_target_affinity: f64,

    /// Standard deviation of per-probe affinity draws, in log10 space.
    ///
    /// **Default**: `1.0`
    pub affinity_std_dev: f64,

    /// Fraction of distinct catalog motifs deployed as probes, in (0, 1].
    ///
    /// The deployed set size is `floor(coverage * candidates)`.
    ///
    /// **Default**: `0.5`
    pub probe_coverage: f64,

    /// Reagent concentration used by the logistic probability transform.
    ///
    /// Must be positive.
    ///
    /// **Default**: `1e-3`
    pub concentration: f64,

    /// Number of test spots drawn for the simulated panel.
    ///
    /// **Default**: `100`
    pub num_spots: usize,

    /// Seed for the run's single random source.
    ///
    /// **Default**: `42`
    pub seed: u64,

    /// Fit the two-component binding mixture diagnostic after priming.
    ///
    /// Reporting-only; has no effect on decoding.
    ///
    /// **Default**: `false`
    pub fit_mixture: bool,

    /// Suppress informational output during processing.
    ///
    /// When `true`, prevents progress messages from being printed to stderr.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Output format for simulation results.
    ///
    /// **Default**: [`OutputFormat::Table`]
    pub output_format: OutputFormat,

    /// Number of threads for the parallel per-spot decode loop.
    ///
    /// When set, configures the Rayon global pool. Set to `None` for
    /// automatic detection.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            motif_length: DEFAULT_MOTIF_LENGTH,
            on_target_affinity: DEFAULT_ON_TARGET_AFFINITY,
            off_target_affinity: DEFAULT_OFF_TARGET_AFFINITY,
            affinity_std_dev: DEFAULT_AFFINITY_STD_DEV,
            probe_coverage: DEFAULT_PROBE_COVERAGE,
            concentration: DEFAULT_CONCENTRATION,
            num_spots: DEFAULT_NUM_SPOTS,
            seed: DEFAULT_SEED,
            fit_mixture: false,
            quiet: false,
            output_format: OutputFormat::Table,
            num_threads: None,
        }
    }
}
