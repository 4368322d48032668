use std::marker::PhantomData;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::affinity::{build_probe_set, AffinityMatrix};
use crate::catalog::{read_catalog_fasta, Catalog};
use crate::config::AssayConfig;
use crate::constants::MIXTURE_SAMPLE_SIZE;
use crate::decoder::decode_spot;
use crate::evaluator::ConfusionSummary;
use crate::motif::candidate_motifs;
use crate::probability::{fit_binding_mixture, ProbabilityMatrix};
use crate::results::{AssayResults, PanelInfo};
use crate::sampling::draw_spots;
use crate::types::{AptamuxError, IdentificationResult, Probe, TestSpot};

/// Marker trait for the assay panel state.
///
/// Used in the type-state pattern to enforce that the probe set and both
/// matrices are built before any sampling or decoding happens.
pub trait PanelState {}

/// Marker type for an assay whose panel has not been deployed yet.
#[derive(Debug, Clone)]
pub struct Unprimed;

/// Marker type for an assay with a deployed probe set and built matrices.
#[derive(Debug, Clone)]
pub struct Primed;

impl PanelState for Unprimed {}
impl PanelState for Primed {}

/// The deployed panel: probe set plus the two derived matrices.
///
/// Built exactly once per run by [`UnprimedAssay::prime`] and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct DeployedPanel {
    /// Deployed probes, in the ordering shared by both matrices.
    pub probes: Vec<Probe>,
    /// Log-affinity scores per (probe, protein).
    pub affinity: AffinityMatrix,
    /// Binding probabilities per (probe, protein).
    pub probability: ProbabilityMatrix,
    /// Size of the candidate motif universe the probes were drawn from.
    pub num_candidate_motifs: usize,
}

/// Main assay simulation engine.
///
/// Uses the type-state pattern with the `S` parameter to ensure the panel is
/// primed before simulation. The state transitions from [`Unprimed`] to
/// [`Primed`] via [`UnprimedAssay::prime`].
///
/// # Examples
///
/// ```rust,no_run
/// use aptamux_core::engine::UnprimedAssay;
/// use aptamux_core::catalog::read_catalog_fasta;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let catalog = read_catalog_fasta("proteome.fasta")?;
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let assay = UnprimedAssay::new(catalog);
/// let primed = assay.prime(&mut rng)?;
///
/// let spots = primed.simulate_panel(100, &mut rng)?;
/// let identifications = primed.decode_panel(&spots)?;
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
#[derive(Debug)]
pub struct Assay<S: PanelState> {
    /// Configuration options for the simulation.
    pub config: AssayConfig,
    /// The protein catalog the run targets.
    catalog: Catalog,
    /// Deployed panel, present only in the primed state.
    panel: Option<DeployedPanel>,
    /// Type-state marker (zero-sized)
    _state: PhantomData<S>,
}

/// Type alias for an assay without a deployed panel.
pub type UnprimedAssay = Assay<Unprimed>;

/// Type alias for an assay with a deployed panel.
pub type PrimedAssay = Assay<Primed>;

impl UnprimedAssay {
    /// Creates an unprimed assay with default configuration.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            config: AssayConfig::default(),
            catalog,
            panel: None,
            _state: PhantomData,
        }
    }

    /// Creates an unprimed assay with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError`] if thread pool configuration fails.
    pub fn with_config(config: AssayConfig, catalog: Catalog) -> Result<Self, AptamuxError> {
        if let Some(num_threads) = config.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    AptamuxError::InvalidInput(format!("Failed to configure thread pool: {}", e))
                })?;
        }

        Ok(Self {
            config,
            catalog,
            panel: None,
            _state: PhantomData,
        })
    }

    /// Deploys the probe panel: extracts the candidate motif universe,
    /// samples the probe set, and builds the affinity and probability
    /// matrices.
    ///
    /// All randomness (probe selection and affinity draws) comes from the
    /// supplied RNG; the matrices are immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError::InvalidInput`] for catalog sequences shorter
    /// than the motif length or invalid model parameters, and
    /// [`AptamuxError::EmptyProbeSet`] when the coverage fraction selects no
    /// probes.
    pub fn prime(self, rng: &mut ChaCha8Rng) -> Result<PrimedAssay, AptamuxError> {
        let candidates = candidate_motifs(&self.catalog, self.config.motif_length)?;

        if !self.config.quiet {
            eprintln!(
                "Priming panel over {} proteins ({} distinct motifs)...",
                self.catalog.len(),
                candidates.len()
            );
        }

        let probes = build_probe_set(&candidates, &self.config, rng)?;
        let affinity = AffinityMatrix::build(&probes, &self.catalog, self.config.motif_length)?;
        let probability = ProbabilityMatrix::from_affinity(&affinity, self.config.concentration)?;

        if !self.config.quiet {
            eprintln!(
                "Deployed {} probes ({} x {} probability matrix)",
                probes.len(),
                probability.num_probes(),
                probability.num_proteins()
            );
        }

        Ok(Assay {
            config: self.config,
            catalog: self.catalog,
            panel: Some(DeployedPanel {
                num_candidate_motifs: candidates.len(),
                probes,
                affinity,
                probability,
            }),
            _state: PhantomData,
        })
    }
}

impl PrimedAssay {
    /// The deployed panel.
    ///
    /// # Panics
    ///
    /// Never panics for an assay produced by [`UnprimedAssay::prime`]; the
    /// primed state guarantees the panel exists.
    #[must_use]
    pub fn panel(&self) -> &DeployedPanel {
        self.panel.as_ref().expect("Primed assay carries a panel")
    }

    /// The catalog this assay targets.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Draws a simulated test panel of `num_spots` spots.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError::InvalidInput`] when `num_spots` is zero.
    pub fn simulate_panel(
        &self,
        num_spots: usize,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<TestSpot>, AptamuxError> {
        draw_spots(num_spots, &self.catalog, &self.panel().probability, rng)
    }

    /// Decodes every spot of a test panel.
    ///
    /// Spots are decoded in parallel; each decode reads only the immutable
    /// probability matrix, so results are independent of scheduling and
    /// returned in panel order.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError::DegenerateScoreDistribution`] if any spot
    /// produces an all-equal score vector.
    pub fn decode_panel(
        &self,
        spots: &[TestSpot],
    ) -> Result<Vec<IdentificationResult>, AptamuxError> {
        let matrix = &self.panel().probability;
        spots
            .par_iter()
            .map(|spot| decode_spot(spot, matrix, &self.catalog))
            .collect()
    }
}

/// High-level assay analyzer driving a complete simulation run.
///
/// This is the recommended entry point: it seeds the run's single random
/// source from the configuration, primes the panel, simulates and decodes a
/// test panel, and aggregates the confusion summary. A fixed seed reproduces
/// the entire run bit-for-bit.
///
/// # Examples
///
/// ```rust,no_run
/// use aptamux_core::{AssayAnalyzer, config::AssayConfig};
/// use aptamux_core::catalog::read_catalog_fasta;
///
/// let catalog = read_catalog_fasta("proteome.fasta")?;
/// let analyzer = AssayAnalyzer::new(AssayConfig {
///     num_spots: 200,
///     seed: 7,
///     ..Default::default()
/// });
///
/// let results = analyzer.run(&catalog)?;
/// println!("Accuracy: {:.2}%", results.confusion.accuracy() * 100.0);
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
#[derive(Debug)]
pub struct AssayAnalyzer {
    /// Configuration options for the simulation.
    pub config: AssayConfig,
}

impl AssayAnalyzer {
    /// Creates a new analyzer with the specified configuration.
    #[must_use]
    pub const fn new(config: AssayConfig) -> Self {
        Self { config }
    }

    /// Runs a complete simulation against a catalog loaded from a FASTA
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError`] for unreadable or malformed catalog files
    /// and for any simulation failure from [`AssayAnalyzer::run`].
    pub fn run_fasta_file(&self, path: &str) -> Result<AssayResults, AptamuxError> {
        let catalog = read_catalog_fasta(path)?;
        self.run(&catalog)
    }

    /// Runs a complete simulation: prime, sample, decode, evaluate.
    ///
    /// # Errors
    ///
    /// Propagates every error kind from the underlying stages; a failure
    /// aborts the run rather than producing a partial result set.
    pub fn run(&self, catalog: &Catalog) -> Result<AssayResults, AptamuxError> {
        if self.config.num_spots == 0 {
            return Err(AptamuxError::InvalidInput(
                "Panel must contain at least one spot".to_string(),
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let assay = UnprimedAssay::with_config(self.config.clone(), catalog.clone())?;
        let primed = assay.prime(&mut rng)?;

        let spots = primed.simulate_panel(self.config.num_spots, &mut rng)?;
        let identifications = primed.decode_panel(&spots)?;
        let confusion = ConfusionSummary::from_results(&identifications, catalog.len());

        let mixture = if self.config.fit_mixture {
            fit_binding_mixture(&primed.panel().probability, MIXTURE_SAMPLE_SIZE, &mut rng)
        } else {
            None
        };

        if !self.config.quiet {
            eprintln!(
                "Decoded {} spots: {} correct ({:.2}% accuracy)",
                confusion.total(),
                confusion.correct(),
                confusion.accuracy() * 100.0
            );
        }

        let panel_info = PanelInfo {
            num_proteins: catalog.len(),
            num_candidate_motifs: primed.panel().num_candidate_motifs,
            num_probes: primed.panel().probes.len(),
            num_spots: self.config.num_spots,
            seed: self.config.seed,
        };

        Ok(AssayResults {
            identifications,
            confusion,
            probability: primed.panel().probability.clone(),
            mixture,
            panel_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Protein;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            Protein {
                id: "P1".to_string(),
                sequence: "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ".to_string(),
                abundance: 5.0,
            },
            Protein {
                id: "P2".to_string(),
                sequence: "MADEEKLPPGWEKRMSRSSGRVYYFNHITNASQ".to_string(),
                abundance: 2.0,
            },
            Protein {
                id: "P3".to_string(),
                sequence: "MSDNGPQNQRNAPRITFGGPSDSTGSNQNGERS".to_string(),
                abundance: 1.0,
            },
        ])
        .unwrap()
    }

    fn quiet_config() -> AssayConfig {
        AssayConfig {
            quiet: true,
            num_spots: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_panel_state_markers() {
        let _unprimed: Unprimed = Unprimed;
        let _primed: Primed = Primed;
        assert_eq!(format!("{:?}", _unprimed.clone()), "Unprimed");
        assert_eq!(format!("{:?}", _primed.clone()), "Primed");
    }

    #[test]
    fn test_unprimed_assay_new() {
        let assay = UnprimedAssay::new(test_catalog());
        assert!(assay.panel.is_none());
        assert_eq!(assay.config.motif_length, 3);
    }

    #[test]
    fn test_prime_builds_panel() {
        let assay = UnprimedAssay::with_config(quiet_config(), test_catalog()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let primed = assay.prime(&mut rng).unwrap();
        let panel = primed.panel();

        assert!(!panel.probes.is_empty());
        assert!(panel.num_candidate_motifs >= panel.probes.len());
        assert_eq!(panel.affinity.num_probes(), panel.probes.len());
        assert_eq!(panel.probability.num_proteins(), 3);
    }

    #[test]
    fn test_prime_reproducible() {
        let config = quiet_config();
        let mut rng1 = ChaCha8Rng::seed_from_u64(5);
        let mut rng2 = ChaCha8Rng::seed_from_u64(5);

        let first = UnprimedAssay::with_config(config.clone(), test_catalog())
            .unwrap()
            .prime(&mut rng1)
            .unwrap();
        let second = UnprimedAssay::with_config(config, test_catalog())
            .unwrap()
            .prime(&mut rng2)
            .unwrap();

        assert_eq!(first.panel().probes, second.panel().probes);
        assert_eq!(
            first.panel().probability.values(),
            second.panel().probability.values()
        );
    }

    #[test]
    fn test_simulate_and_decode_panel() {
        let assay = UnprimedAssay::with_config(quiet_config(), test_catalog()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let primed = assay.prime(&mut rng).unwrap();

        let spots = primed.simulate_panel(10, &mut rng).unwrap();
        assert_eq!(spots.len(), 10);

        let identifications = primed.decode_panel(&spots).unwrap();
        assert_eq!(identifications.len(), 10);
        for (spot, result) in spots.iter().zip(&identifications) {
            assert_eq!(spot.true_protein, result.true_index);
            assert!(result.inferred_index < 3);
        }
    }

    #[test]
    fn test_analyzer_run_end_to_end() {
        let analyzer = AssayAnalyzer::new(quiet_config());
        let results = analyzer.run(&test_catalog()).unwrap();

        assert_eq!(results.identifications.len(), 10);
        assert_eq!(results.confusion.total(), 10);
        assert_eq!(results.panel_info.num_proteins, 3);
        assert_eq!(results.panel_info.num_spots, 10);
        assert_eq!(results.panel_info.seed, 42);
        assert!(results.mixture.is_none());
        // Confusion cells sum to the panel size
        let cell_sum: usize = (0..3)
            .flat_map(|t| (0..3).map(move |i| (t, i)))
            .map(|(t, i)| results.confusion.count(t, i))
            .sum();
        assert_eq!(cell_sum, 10);
    }

    #[test]
    fn test_analyzer_fixed_seed_reproducible() {
        let analyzer = AssayAnalyzer::new(quiet_config());
        let first = analyzer.run(&test_catalog()).unwrap();
        let second = analyzer.run(&test_catalog()).unwrap();

        let first_calls: Vec<usize> =
            first.identifications.iter().map(|r| r.inferred_index).collect();
        let second_calls: Vec<usize> =
            second.identifications.iter().map(|r| r.inferred_index).collect();
        assert_eq!(first_calls, second_calls);

        for (a, b) in first.identifications.iter().zip(&second.identifications) {
            assert_eq!(a.true_index, b.true_index);
            assert_eq!(a.score, b.score);
            assert_eq!(a.marginal_confidence, b.marginal_confidence);
        }
        assert_eq!(first.probability.values(), second.probability.values());
    }

    #[test]
    fn test_fixed_seed_matches_recorded_reference() {
        // Recorded reference panel. Only P3 carries abundance, full coverage
        // deploys every candidate motif, and the extreme affinity bases with
        // zero spread pin every binding probability to within 1e-20 of 0 or
        // 1, so the literal expectations below are stable across revisions.
        let catalog = Catalog::new(vec![
            Protein {
                id: "P1".to_string(),
                sequence: "ABCDEF".to_string(),
                abundance: 0.0,
            },
            Protein {
                id: "P2".to_string(),
                sequence: "GHIJKL".to_string(),
                abundance: 0.0,
            },
            Protein {
                id: "P3".to_string(),
                sequence: "MNOPQR".to_string(),
                abundance: 1.0,
            },
        ])
        .unwrap();
        let config = AssayConfig {
            probe_coverage: 1.0,
            on_target_affinity: 1e-100,
            off_target_affinity: 1e50,
            affinity_std_dev: 0.0,
            num_spots: 10,
            seed: 42,
            quiet: true,
            ..Default::default()
        };

        // Deployed probes: every candidate motif in first-observation order
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let primed = UnprimedAssay::with_config(config.clone(), catalog.clone())
            .unwrap()
            .prime(&mut rng)
            .unwrap();
        let motifs: Vec<&str> = primed
            .panel()
            .probes
            .iter()
            .map(|p| p.motif.as_str())
            .collect();
        assert_eq!(
            motifs,
            vec![
                "ABC", "BCD", "CDE", "DEF", "GHI", "HIJ", "IJK", "JKL", "MNO", "NOP", "OPQ", "PQR"
            ]
        );

        // Every spot lands on P3 and observes exactly its motif indicator
        let expected_observation = [
            false, false, false, false, false, false, false, false, true, true, true, true,
        ];
        let spots = primed.simulate_panel(4, &mut rng).unwrap();
        for spot in &spots {
            assert_eq!(spot.true_protein, 2);
            assert_eq!(spot.observed, expected_observation);
        }

        // End-to-end identification sequence for the recorded scenario
        let results = AssayAnalyzer::new(config).run(&catalog).unwrap();
        let inferred: Vec<usize> = results
            .identifications
            .iter()
            .map(|r| r.inferred_index)
            .collect();
        assert_eq!(inferred, vec![2; 10]);
        assert_eq!(results.confusion.accuracy(), 1.0);
        assert_eq!(results.panel_info.num_candidate_motifs, 12);
        assert_eq!(results.panel_info.num_probes, 12);
        for result in &results.identifications {
            assert_eq!(result.inferred_id, "P3");
            assert!((result.score - 1.0).abs() < 1e-9);
            assert!(result.marginal_confidence > 0.0);
        }
    }

    #[test]
    fn test_analyzer_different_seeds_differ() {
        let first = AssayAnalyzer::new(AssayConfig {
            seed: 1,
            num_spots: 50,
            quiet: true,
            ..Default::default()
        })
        .run(&test_catalog())
        .unwrap();
        let second = AssayAnalyzer::new(AssayConfig {
            seed: 2,
            num_spots: 50,
            quiet: true,
            ..Default::default()
        })
        .run(&test_catalog())
        .unwrap();

        let first_truth: Vec<usize> = first.identifications.iter().map(|r| r.true_index).collect();
        let second_truth: Vec<usize> =
            second.identifications.iter().map(|r| r.true_index).collect();
        assert_ne!(first_truth, second_truth);
    }

    #[test]
    fn test_analyzer_zero_spots_rejected() {
        let analyzer = AssayAnalyzer::new(AssayConfig {
            num_spots: 0,
            quiet: true,
            ..Default::default()
        });
        let result = analyzer.run(&test_catalog());
        assert!(matches!(result, Err(AptamuxError::InvalidInput(_))));
    }

    #[test]
    fn test_analyzer_mixture_diagnostic() {
        let analyzer = AssayAnalyzer::new(AssayConfig {
            fit_mixture: true,
            ..quiet_config()
        });
        let results = analyzer.run(&test_catalog()).unwrap();
        let mixture = results.mixture.expect("diagnostic requested");
        assert!(mixture.means[0] <= mixture.means[1]);
    }

    #[test]
    fn test_analyzer_short_sequence_fails() {
        let catalog = Catalog::new(vec![
            Protein {
                id: "OK".to_string(),
                sequence: "MKTAYIAKQR".to_string(),
                abundance: 1.0,
            },
            Protein {
                id: "SHORT".to_string(),
                sequence: "MK".to_string(),
                abundance: 1.0,
            },
        ])
        .unwrap();

        let analyzer = AssayAnalyzer::new(quiet_config());
        let result = analyzer.run(&catalog);
        assert!(matches!(result, Err(AptamuxError::InvalidInput(_))));
    }

    #[test]
    fn test_analyzer_missing_fasta() {
        let analyzer = AssayAnalyzer::new(quiet_config());
        let result = analyzer.run_fasta_file("nonexistent.fasta");
        assert!(matches!(result, Err(AptamuxError::IoError(_))));
    }
}
