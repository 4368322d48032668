/// Version string for Aptamux
pub const VERSION: &str = "0.1.0";

// =============================================================================
// Binding model defaults
// =============================================================================

/// Length of a motif-probe target in residues
pub const DEFAULT_MOTIF_LENGTH: usize = 3;

/// Base on-target binding affinity (linear scale, log10 taken at draw time)
pub const DEFAULT_ON_TARGET_AFFINITY: f64 = 1e-5;

/// Base off-target binding affinity (linear scale, log10 taken at draw time)
pub const DEFAULT_OFF_TARGET_AFFINITY: f64 = 1e-1;

/// Standard deviation of per-probe affinity draws in log10 space
pub const DEFAULT_AFFINITY_STD_DEV: f64 = 1.0;

/// Fraction of distinct catalog motifs promoted to deployed probes
pub const DEFAULT_PROBE_COVERAGE: f64 = 0.5;

/// Reagent concentration applied during the logistic transform
pub const DEFAULT_CONCENTRATION: f64 = 1e-3;

/// Number of test spots in a simulated panel
pub const DEFAULT_NUM_SPOTS: usize = 100;

/// Seed for the run's random source
pub const DEFAULT_SEED: u64 = 42;

// =============================================================================
// Catalog input
// =============================================================================

/// Abundance assigned to catalog records that do not declare one
pub const DEFAULT_ABUNDANCE: f64 = 1.0;

/// Key used for abundance annotations in FASTA descriptions
pub const ABUNDANCE_KEY: &str = "abundance=";

// =============================================================================
// Numeric guards
// =============================================================================

/// Floor applied to normal tail probabilities before taking log10
pub const MIN_TAIL_PROBABILITY: f64 = 1e-300;

/// Maximum EM iterations for the binding-mixture diagnostic
pub const MAX_MIXTURE_ITERATIONS: usize = 100;

/// Convergence threshold on log-likelihood change for the mixture fit
pub const MIXTURE_CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Number of probability-matrix entries subsampled for the mixture fit
pub const MIXTURE_SAMPLE_SIZE: usize = 2000;
