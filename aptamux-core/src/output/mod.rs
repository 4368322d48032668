//! Output formatting for assay simulation results.
//!
//! This module renders [`AssayResults`] for the external reporting
//! collaborators: a human-readable table report and a machine-readable TSV
//! stream.
//!
//! # Examples
//!
//! ```rust,no_run
//! use aptamux_core::{AssayAnalyzer, config::{AssayConfig, OutputFormat}};
//! use aptamux_core::catalog::read_catalog_fasta;
//! use aptamux_core::output::write_results;
//! use std::io::stdout;
//!
//! let catalog = read_catalog_fasta("proteome.fasta")?;
//! let results = AssayAnalyzer::new(AssayConfig::default()).run(&catalog)?;
//!
//! write_results(&mut stdout(), &results, OutputFormat::Tsv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use crate::config::OutputFormat;
use crate::results::AssayResults;
use crate::types::AptamuxError;

mod formats {
    pub mod table;
    pub mod tsv;
}

use formats::{table::write_table_format, tsv::write_tsv_format};

/// Writes assay results in the specified format.
///
/// # Errors
///
/// Returns [`AptamuxError::IoError`] if writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    results: &AssayResults,
    format: OutputFormat,
) -> Result<(), AptamuxError> {
    match format {
        OutputFormat::Table => write_table_format(writer, results),
        OutputFormat::Tsv => write_tsv_format(writer, results),
    }
}
