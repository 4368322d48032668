//! Probe-set construction and the log-affinity model.
//!
//! Each deployed probe carries two log10 affinities drawn once from normal
//! distributions centered on the configured base constants. The log-affinity
//! of a (probe, protein) pair is linear in the motif occurrence count: zero
//! occurrences give pure background affinity, and each copy of the target
//! motif adds one on-target increment. Linear-in-count is a simplifying
//! assumption, not a saturating binding model.

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::catalog::Catalog;
use crate::config::AssayConfig;
use crate::motif::motif_counts;
use crate::types::{AptamuxError, Probe};

/// Samples the deployed probe set from the candidate motif universe.
///
/// Selects `floor(coverage * candidates)` distinct motifs uniformly without
/// replacement, then draws each probe's on- and off-target log10 affinities
/// independently from `Normal(log10(base), affinity_std_dev)`. Selected
/// probes keep candidate order, so the probe ordering is deterministic given
/// the RNG state.
///
/// # Errors
///
/// - [`AptamuxError::InvalidInput`] for a coverage fraction outside (0, 1],
///   non-positive affinity bases, or an invalid standard deviation.
/// - [`AptamuxError::EmptyProbeSet`] when the coverage floor selects zero
///   motifs.
pub fn build_probe_set<R: Rng + ?Sized>(
    candidates: &[String],
    config: &AssayConfig,
    rng: &mut R,
) -> Result<Vec<Probe>, AptamuxError> {
    if !(config.probe_coverage > 0.0 && config.probe_coverage <= 1.0) {
        return Err(AptamuxError::InvalidInput(format!(
            "Probe coverage must be in (0, 1], got {}",
            config.probe_coverage
        )));
    }
    if config.on_target_affinity <= 0.0 || config.off_target_affinity <= 0.0 {
        return Err(AptamuxError::InvalidInput(
            "Affinity base constants must be positive".to_string(),
        ));
    }

    let num_probes = (config.probe_coverage * candidates.len() as f64).floor() as usize;
    if num_probes == 0 {
        return Err(AptamuxError::EmptyProbeSet(candidates.len()));
    }

    let on_target = Normal::new(config.on_target_affinity.log10(), config.affinity_std_dev)
        .map_err(|e| AptamuxError::InvalidInput(format!("Invalid affinity spread: {}", e)))?;
    let off_target = Normal::new(config.off_target_affinity.log10(), config.affinity_std_dev)
        .map_err(|e| AptamuxError::InvalidInput(format!("Invalid affinity spread: {}", e)))?;

    let mut selected = index::sample(rng, candidates.len(), num_probes).into_vec();
    selected.sort_unstable();

    Ok(selected
        .into_iter()
        .map(|candidate_index| Probe {
            motif: candidates[candidate_index].clone(),
            on_target_log_affinity: on_target.sample(rng),
            off_target_log_affinity: off_target.sample(rng),
        })
        .collect())
}

/// Log-affinity of one (probe, protein) pair from the motif occurrence count.
///
/// Zero occurrences yield exactly the off-target affinity; each occurrence
/// adds one on-target increment.
#[must_use]
pub fn compute_log_affinity(probe: &Probe, occurrences: usize) -> f64 {
    probe.off_target_log_affinity + probe.on_target_log_affinity * occurrences as f64
}

/// Dense probe-by-protein table of log-affinity scores.
///
/// Built exactly once per run and read-only afterwards. Each protein's probe
/// profile is stored contiguously, indexed by integer position; no string
/// keys are touched after construction.
#[derive(Debug, Clone)]
pub struct AffinityMatrix {
    /// Protein-major values: `values[protein * num_probes + probe]`.
    values: Vec<f64>,
    num_probes: usize,
    num_proteins: usize,
}

impl AffinityMatrix {
    /// Computes the log-affinity of every (probe, protein) pair.
    ///
    /// Each protein's motif occurrence table is precomputed once and reused
    /// across probes, keeping the build O(probes x proteins).
    ///
    /// # Errors
    ///
    /// Propagates [`AptamuxError::InvalidInput`] when a catalog sequence is
    /// shorter than the motif length.
    pub fn build(probes: &[Probe], catalog: &Catalog, k: usize) -> Result<Self, AptamuxError> {
        let num_probes = probes.len();
        let num_proteins = catalog.len();
        let mut values = Vec::with_capacity(num_probes * num_proteins);

        for protein in catalog.proteins() {
            let counts = motif_counts(&protein.sequence, k)?;
            for probe in probes {
                let occurrences = counts.get(probe.motif.as_str()).copied().unwrap_or(0);
                values.push(compute_log_affinity(probe, occurrences));
            }
        }

        Ok(Self {
            values,
            num_probes,
            num_proteins,
        })
    }

    /// Log-affinity for one (probe, protein) pair.
    #[must_use]
    pub fn get(&self, probe: usize, protein: usize) -> f64 {
        self.values[protein * self.num_probes + probe]
    }

    /// The contiguous per-probe profile of one protein.
    #[must_use]
    pub fn profile(&self, protein: usize) -> &[f64] {
        let start = protein * self.num_probes;
        &self.values[start..start + self.num_probes]
    }

    /// All values in protein-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of deployed probes (rows).
    #[must_use]
    pub fn num_probes(&self) -> usize {
        self.num_probes
    }

    /// Number of catalog proteins (columns).
    #[must_use]
    pub fn num_proteins(&self) -> usize {
        self.num_proteins
    }
}
