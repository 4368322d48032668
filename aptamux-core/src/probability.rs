//! Logistic binding-probability model and the optional mixture diagnostic.
//!
//! The probability of a binding event is a logistic transform of the pair's
//! log-affinity relative to the log10 reagent concentration: strong binders
//! (log-affinity well below the concentration threshold) saturate toward 1,
//! weak binders toward 0. The transform never reaches exactly 0 or 1 for
//! finite input.

use rand::seq::index;
use rand::Rng;

use crate::affinity::AffinityMatrix;
use crate::constants::{MAX_MIXTURE_ITERATIONS, MIXTURE_CONVERGENCE_TOLERANCE};
use crate::stats::{normal_pdf, std_dev};
use crate::types::AptamuxError;

/// Logistic transform from log-affinity and reagent concentration to a
/// binding probability.
///
/// Monotonically non-increasing in `log_affinity` for fixed concentration;
/// output lies strictly inside (0, 1) for finite input.
///
/// # Examples
///
/// ```rust
/// use aptamux_core::probability::to_probability;
///
/// let strong = to_probability(-6.0, 1e-3);
/// let weak = to_probability(-1.0, 1e-3);
/// assert!(strong > 0.9);
/// assert!(weak < 0.2);
/// ```
#[must_use]
pub fn to_probability(log_affinity: f64, concentration: f64) -> f64 {
    1.0 / (1.0 + (log_affinity - concentration.log10()).exp())
}

/// Dense probe-by-protein table of binding probabilities.
///
/// A pure element-wise function of the affinity matrix and the reagent
/// concentration, with the same protein-major layout. Built once per run,
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct ProbabilityMatrix {
    values: Vec<f64>,
    num_probes: usize,
    num_proteins: usize,
}

impl ProbabilityMatrix {
    /// Applies [`to_probability`] element-wise to an affinity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError::InvalidInput`] for a non-positive or
    /// non-finite concentration.
    pub fn from_affinity(
        affinity: &AffinityMatrix,
        concentration: f64,
    ) -> Result<Self, AptamuxError> {
        if !(concentration > 0.0 && concentration.is_finite()) {
            return Err(AptamuxError::InvalidInput(format!(
                "Concentration must be positive and finite, got {}",
                concentration
            )));
        }

        let values = affinity
            .values()
            .iter()
            .map(|&log_affinity| to_probability(log_affinity, concentration))
            .collect();

        Ok(Self {
            values,
            num_probes: affinity.num_probes(),
            num_proteins: affinity.num_proteins(),
        })
    }

    /// Binding probability for one (probe, protein) pair.
    #[must_use]
    pub fn get(&self, probe: usize, protein: usize) -> f64 {
        self.values[protein * self.num_probes + probe]
    }

    /// The contiguous per-probe probability profile of one protein.
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

    /// Number of deployed probes.
    #[must_use]
    pub fn num_probes(&self) -> usize {
        self.num_probes
    }

    /// Number of catalog proteins.
    #[must_use]
    pub fn num_proteins(&self) -> usize {
        self.num_proteins
    }
}

/// Parameters of the fitted two-component binding mixture.
///
/// Component 0 is the lower-mean (off-target-dominated) mode, component 1
/// the higher-mean (on-target-dominated) mode. Descriptive output only; the
/// decoder never reads this.
#[derive(Debug, Clone)]
pub struct MixtureDiagnostic {
    /// Mixing weights, summing to 1.
    pub weights: [f64; 2],
    /// Component means.
    pub means: [f64; 2],
    /// Component standard deviations.
    pub std_devs: [f64; 2],
    /// EM iterations performed before convergence or cutoff.
    pub iterations: usize,
}

impl MixtureDiagnostic {
    /// Separation between the two modes in pooled standard deviations.
    #[must_use]
    pub fn separation(&self) -> f64 {
        let pooled = 0.5 * (self.std_devs[0] + self.std_devs[1]);
        if pooled == 0.0 {
            return 0.0;
        }
        (self.means[1] - self.means[0]).abs() / pooled
    }
}

/// Fits a two-component univariate Gaussian mixture to a random subsample of
/// probability-matrix entries.
///
/// Characterizes the separation between the off-target-dominated and
/// on-target-dominated probability modes. Side-effect free, off the decode
/// critical path, and deterministic given the RNG state. Returns `None` when
/// the matrix holds fewer than two entries or the subsample is degenerate
/// (zero spread).
pub fn fit_binding_mixture<R: Rng + ?Sized>(
    matrix: &ProbabilityMatrix,
    sample_size: usize,
    rng: &mut R,
) -> Option<MixtureDiagnostic> {
    let values = matrix.values();
    if values.len() < 2 || sample_size < 2 {
        return None;
    }

    let amount = sample_size.min(values.len());
    let sample: Vec<f64> = index::sample(rng, values.len(), amount)
        .into_iter()
        .map(|i| values[i])
        .collect();

    let spread = std_dev(&sample);
    if spread == 0.0 {
        return None;
    }

    // Initialize the components at the sample extremes with the overall
    // spread, weights split evenly.
    let min = sample.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut weights = [0.5, 0.5];
    let mut means = [min, max];
    let mut std_devs = [spread, spread];

    let mut previous_log_likelihood = f64::NEG_INFINITY;
    let mut iterations = 0;
    let mut responsibilities = vec![0.0; sample.len()];

    for iteration in 0..MAX_MIXTURE_ITERATIONS {
        iterations = iteration + 1;

        // E-step: responsibility of component 1 for each observation.
        let mut log_likelihood = 0.0;
        for (i, &x) in sample.iter().enumerate() {
            let d0 = weights[0] * normal_pdf(x, means[0], std_devs[0]);
            let d1 = weights[1] * normal_pdf(x, means[1], std_devs[1]);
            let total = d0 + d1;
            responsibilities[i] = if total > 0.0 { d1 / total } else { 0.5 };
            log_likelihood += total.max(f64::MIN_POSITIVE).ln();
        }

        // M-step.
        let n1: f64 = responsibilities.iter().sum();
        let n0 = sample.len() as f64 - n1;
        if n0 <= f64::EPSILON || n1 <= f64::EPSILON {
            break;
        }

        means[0] = sample
            .iter()
            .zip(&responsibilities)
            .map(|(&x, &r)| (1.0 - r) * x)
            .sum::<f64>()
            / n0;
        means[1] = sample
            .iter()
            .zip(&responsibilities)
            .map(|(&x, &r)| r * x)
            .sum::<f64>()
            / n1;

        let var0 = sample
            .iter()
            .zip(&responsibilities)
            .map(|(&x, &r)| (1.0 - r) * (x - means[0]).powi(2))
            .sum::<f64>()
            / n0;
        let var1 = sample
            .iter()
            .zip(&responsibilities)
            .map(|(&x, &r)| r * (x - means[1]).powi(2))
            .sum::<f64>()
            / n1;
        // Variance floor keeps a component from collapsing onto one point
        std_devs[0] = var0.max(1e-12).sqrt();
        std_devs[1] = var1.max(1e-12).sqrt();

        weights[0] = n0 / sample.len() as f64;
        weights[1] = n1 / sample.len() as f64;

        if (log_likelihood - previous_log_likelihood).abs() < MIXTURE_CONVERGENCE_TOLERANCE {
            break;
        }
        previous_log_likelihood = log_likelihood;
    }

    // Report the lower-mean component first.
    if means[0] > means[1] {
        means.swap(0, 1);
        std_devs.swap(0, 1);
        weights.swap(0, 1);
    }

    Some(MixtureDiagnostic {
        weights,
        means,
        std_devs,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{Probe, Protein};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_matrix() -> ProbabilityMatrix {
        let catalog = Catalog::new(vec![
            Protein {
                id: "P1".to_string(),
                sequence: "ABCABCA".to_string(),
                abundance: 1.0,
            },
            Protein {
                id: "P2".to_string(),
                sequence: "XYZXYZ".to_string(),
                abundance: 1.0,
            },
        ])
        .unwrap();
        let probes = vec![
            Probe {
                motif: "ABC".to_string(),
                on_target_log_affinity: -5.0,
                off_target_log_affinity: -1.0,
            },
            Probe {
                motif: "XYZ".to_string(),
                on_target_log_affinity: -5.0,
                off_target_log_affinity: -1.0,
            },
        ];
        let affinity = AffinityMatrix::build(&probes, &catalog, 3).unwrap();
        ProbabilityMatrix::from_affinity(&affinity, 1e-3).unwrap()
    }

    #[test]
    fn test_to_probability_bounds() {
        for log_affinity in [-50.0, -5.0, 0.0, 5.0, 50.0] {
            let p = to_probability(log_affinity, 1e-3);
            assert!(p > 0.0 && p < 1.0, "p = {} out of (0,1)", p);
        }
    }

    #[test]
    fn test_to_probability_monotone() {
        let concentration = 1e-3;
        let mut previous = to_probability(-20.0, concentration);
        for step in 1..80 {
            let current = to_probability(-20.0 + step as f64 * 0.5, concentration);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_to_probability_midpoint() {
        // At log_affinity == log10(concentration) the logistic sits at 0.5
        let p = to_probability(-3.0, 1e-3);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probability_matrix_values() {
        let matrix = test_matrix();
        assert_eq!(matrix.num_probes(), 2);
        assert_eq!(matrix.num_proteins(), 2);

        // P1 binds the ABC probe strongly (two motif copies), XYZ weakly
        assert!(matrix.get(0, 0) > 0.99);
        assert!(matrix.get(1, 0) < 0.2);
        // P2 is the mirror image
        assert!(matrix.get(0, 1) < 0.2);
        assert!(matrix.get(1, 1) > 0.99);

        for &value in matrix.values() {
            assert!(value > 0.0 && value < 1.0);
        }
    }

    #[test]
    fn test_probability_matrix_bad_concentration() {
        let catalog = Catalog::new(vec![Protein {
            id: "P1".to_string(),
            sequence: "ABC".to_string(),
            abundance: 1.0,
        }])
        .unwrap();
        let probes = vec![Probe {
            motif: "ABC".to_string(),
            on_target_log_affinity: -5.0,
            off_target_log_affinity: -1.0,
        }];
        let affinity = AffinityMatrix::build(&probes, &catalog, 3).unwrap();

        for concentration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ProbabilityMatrix::from_affinity(&affinity, concentration);
            assert!(matches!(result, Err(AptamuxError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_mixture_fit_recovers_two_modes() {
        let matrix = test_matrix();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let diagnostic = fit_binding_mixture(&matrix, 100, &mut rng).unwrap();

        // Low mode near the off-target probabilities, high mode near 1
        assert!(diagnostic.means[0] < 0.5);
        assert!(diagnostic.means[1] > 0.5);
        assert!((diagnostic.weights[0] + diagnostic.weights[1] - 1.0).abs() < 1e-9);
        assert!(diagnostic.separation() > 1.0);
    }

    #[test]
    fn test_mixture_fit_deterministic() {
        let matrix = test_matrix();
        let mut rng1 = ChaCha8Rng::seed_from_u64(5);
        let mut rng2 = ChaCha8Rng::seed_from_u64(5);
        let first = fit_binding_mixture(&matrix, 4, &mut rng1).unwrap();
        let second = fit_binding_mixture(&matrix, 4, &mut rng2).unwrap();
        assert_eq!(first.means, second.means);
        assert_eq!(first.weights, second.weights);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn test_mixture_fit_too_small() {
        let matrix = test_matrix();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(fit_binding_mixture(&matrix, 1, &mut rng).is_none());
    }
}
