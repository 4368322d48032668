//! # Aptamux - Multiplexed Aptamer Assay Simulator
//!
//! A Rust library for simulating multiplexed aptamer-based protein
//! identification assays. Given a catalog of protein sequences, it derives a
//! probe panel from sequence motifs, simulates stochastic binding on a spot
//! array, and decodes each spot back to a protein identity.
//!
//! ## Overview
//!
//! An aptamer panel is built from the short motifs (k-mers) observed across
//! the catalog. Each probe binds its target motif strongly and everything
//! else weakly, with per-probe affinities drawn from a stochastic model. The
//! simulator deposits proteins onto test spots in proportion to their
//! abundance, draws binary binding observations per probe, and identifies
//! each spot by correlating its observation vector against every catalog
//! candidate.
//!
//! ## Features
//!
//! - **Motif-Derived Panels**: Probe sets sampled from the catalog's k-mer
//!   vocabulary at a configurable coverage
//! - **Stochastic Affinity Model**: Per-probe on/off-target log-affinities
//!   drawn from normal distributions
//! - **Correlation Decoder**: Pearson-correlation scoring with a normal-fit
//!   marginal confidence per identification
//! - **Mixture Diagnostic**: Optional two-component Gaussian fit separating
//!   bound from unbound probability mass
//! - **Parallel Decoding**: Multi-threaded spot decoding using Rayon
//! - **Reproducibility**: A single seeded RNG drives every stochastic step
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aptamux_core::{AssayAnalyzer, config::AssayConfig};
//!
//! // Create analyzer with default configuration
//! let analyzer = AssayAnalyzer::new(AssayConfig::default());
//!
//! // Simulate and decode a panel from a FASTA catalog
//! let results = analyzer.run_fasta_file("proteome.fasta")?;
//!
//! println!("Decoded {} spots", results.identifications.len());
//! println!("Accuracy: {:.2}%", results.confusion.accuracy() * 100.0);
//! # Ok::<(), aptamux_core::types::AptamuxError>(())
//! ```
//!
//! ## Architecture
//!
//! The library uses a type-state pattern to ensure a panel is primed before
//! spots are simulated or decoded:
//!
//! ```rust,no_run
//! use aptamux_core::engine::UnprimedAssay;
//! use aptamux_core::catalog::read_catalog_fasta;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let catalog = read_catalog_fasta("proteome.fasta")?;
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // Prime the panel (type changes to PrimedAssay)
//! let assay = UnprimedAssay::new(catalog);
//! let primed = assay.prime(&mut rng)?;
//!
//! // Simulate and decode spots
//! let spots = primed.simulate_panel(100, &mut rng)?;
//! let identifications = primed.decode_panel(&spots)?;
//! println!("Decoded {} spots", identifications.len());
//! # Ok::<(), aptamux_core::types::AptamuxError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Configuration options for simulation runs
//! - [`engine`]: Panel priming, simulation, and decoding pipeline
//! - [`types`]: Core data types and error definitions
//! - [`results`]: Run results and panel metadata
//! - [`catalog`]: Protein catalog construction and FASTA input
//! - [`motif`]: k-mer extraction and candidate motif vocabulary
//! - [`affinity`]: Probe set construction and log-affinity matrix
//! - [`probability`]: Binding probabilities and the mixture diagnostic
//! - [`sampling`]: Abundance-weighted spot simulation
//! - [`decoder`]: Correlation scoring and identification
//! - [`evaluator`]: Confusion matrix and accuracy metrics
//! - [`output`]: Report formatting (table and TSV)
//! - [`stats`]: Shared statistical helpers
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, AptamuxError>`](types::AptamuxError),
//! providing detailed error information for:
//!
//! - Invalid catalogs (empty sequences, non-finite abundances)
//! - Degenerate score distributions during decoding
//! - I/O and parse errors during FASTA input
//! - Configuration errors (coverage or concentration out of range)

pub mod affinity;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod engine;
pub mod evaluator;
pub mod motif;
pub mod output;
pub mod probability;
pub mod results;
pub mod sampling;
pub mod stats;
pub mod types;

pub use engine::AssayAnalyzer;
