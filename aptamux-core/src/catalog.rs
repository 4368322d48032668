//! Protein catalog loading and validation.
//!
//! The catalog is the external reference table the simulation runs against:
//! an ordered list of `{id, sequence, abundance}` records with duplicate
//! identifiers collapsed. Records can be supplied in memory or read from a
//! FASTA file whose descriptions carry `abundance=<value>` annotations.

use std::collections::HashSet;
use std::fs::File;

use bio::io::fasta;

use crate::constants::{ABUNDANCE_KEY, DEFAULT_ABUNDANCE};
use crate::types::{AptamuxError, Protein};

/// Ordered, validated collection of reference proteins.
///
/// Construction enforces the invariants the rest of the pipeline relies on:
/// the catalog is non-empty, every sequence is non-empty, abundances are
/// finite and non-negative, at least one abundance is positive, and each id
/// appears exactly once (first occurrence wins).
///
/// # Examples
///
/// ```rust
/// use aptamux_core::catalog::Catalog;
/// use aptamux_core::types::Protein;
///
/// let catalog = Catalog::new(vec![
///     Protein { id: "P1".into(), sequence: "MKTAYI".into(), abundance: 2.0 },
///     Protein { id: "P2".into(), sequence: "MADEEK".into(), abundance: 1.0 },
/// ])?;
/// assert_eq!(catalog.len(), 2);
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    proteins: Vec<Protein>,
}

impl Catalog {
    /// Builds a catalog from protein records, collapsing duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`AptamuxError::InvalidInput`] if the record list is empty,
    /// a sequence is empty, an abundance is negative or non-finite, or no
    /// abundance is positive.
    pub fn new(records: Vec<Protein>) -> Result<Self, AptamuxError> {
        if records.is_empty() {
            return Err(AptamuxError::InvalidInput(
                "Protein catalog is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut proteins = Vec::with_capacity(records.len());
        for record in records {
            if record.sequence.is_empty() {
                return Err(AptamuxError::InvalidInput(format!(
                    "Protein {} has an empty sequence",
                    record.id
                )));
            }
            if !record.abundance.is_finite() || record.abundance < 0.0 {
                return Err(AptamuxError::InvalidInput(format!(
                    "Protein {} has invalid abundance {}",
                    record.id, record.abundance
                )));
            }
            if seen.insert(record.id.clone()) {
                proteins.push(record);
            }
        }

        if proteins.iter().all(|p| p.abundance == 0.0) {
            return Err(AptamuxError::InvalidInput(
                "All catalog abundances are zero".to_string(),
            ));
        }

        Ok(Self { proteins })
    }

    /// The catalog entries, in load order.
    #[must_use]
    pub fn proteins(&self) -> &[Protein] {
        &self.proteins
    }

    /// Number of distinct proteins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    /// Whether the catalog holds no proteins. Never true for a constructed
    /// catalog; present for slice-like completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Abundance weights aligned with catalog order.
    #[must_use]
    pub fn abundances(&self) -> Vec<f64> {
        self.proteins.iter().map(|p| p.abundance).collect()
    }

    /// Identifier of the protein at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn id(&self, index: usize) -> &str {
        &self.proteins[index].id
    }
}

/// Reads a protein catalog from a FASTA file.
///
/// Each record becomes one catalog entry. The record description is scanned
/// for an `abundance=<float>` annotation; records without one default to an
/// abundance of 1.0.
///
/// # Errors
///
/// Returns [`AptamuxError::IoError`] if the file cannot be opened,
/// [`AptamuxError::ParseError`] for malformed FASTA or abundance values, and
/// the catalog validation errors from [`Catalog::new`].
///
/// # Examples
///
/// ```rust,no_run
/// use aptamux_core::catalog::read_catalog_fasta;
///
/// let catalog = read_catalog_fasta("proteome.fasta")?;
/// println!("{} proteins loaded", catalog.len());
/// # Ok::<(), aptamux_core::types::AptamuxError>(())
/// ```
pub fn read_catalog_fasta(filename: &str) -> Result<Catalog, AptamuxError> {
    let file = File::open(filename)?;
    let reader = fasta::Reader::new(file);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| AptamuxError::ParseError(e.to_string()))?;
        let sequence = String::from_utf8(record.seq().to_vec())
            .map_err(|e| AptamuxError::ParseError(e.to_string()))?;
        let abundance = match record.desc() {
            Some(desc) => parse_abundance(record.id(), desc)?,
            None => DEFAULT_ABUNDANCE,
        };
        records.push(Protein {
            id: record.id().to_string(),
            sequence: sequence.to_ascii_uppercase(),
            abundance,
        });
    }

    Catalog::new(records)
}

/// Extracts an `abundance=<float>` annotation from a record description.
fn parse_abundance(id: &str, description: &str) -> Result<f64, AptamuxError> {
    for token in description.split_whitespace() {
        if let Some(value) = token.strip_prefix(ABUNDANCE_KEY) {
            return value.parse::<f64>().map_err(|_| {
                AptamuxError::ParseError(format!(
                    "Protein {} has unparseable abundance annotation '{}'",
                    id, token
                ))
            });
        }
    }
    Ok(DEFAULT_ABUNDANCE)
}
