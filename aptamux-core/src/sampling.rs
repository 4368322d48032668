//! Test-panel and observation sampling.
//!
//! The sampling engine draws the ground-truth protein identities for a panel
//! of measurement spots from the abundance-weighted catalog distribution,
//! then draws each spot's binary observation vector from the probability
//! matrix, one Bernoulli trial per probe.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::catalog::Catalog;
use crate::probability::ProbabilityMatrix;
use crate::types::{AptamuxError, TestSpot};

/// Draws `num_spots` ground-truth protein identities with replacement,
/// with selection probability proportional to catalog abundance.
///
/// # Errors
///
/// Returns [`AptamuxError::InvalidInput`] when `num_spots` is zero or the
/// abundance weights cannot form a distribution (all zero).
pub fn draw_test_panel<R: Rng + ?Sized>(
    num_spots: usize,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<usize>, AptamuxError> {
    if num_spots == 0 {
        return Err(AptamuxError::InvalidInput(
            "Panel must contain at least one spot".to_string(),
        ));
    }

    let distribution = WeightedIndex::new(catalog.abundances())
        .map_err(|e| AptamuxError::InvalidInput(format!("Invalid abundance weights: {}", e)))?;

    Ok((0..num_spots).map(|_| distribution.sample(rng)).collect())
}

/// Draws one binary observation vector for a protein: a Bernoulli trial per
/// probe with success probability taken from the protein's probability
/// profile, in matrix probe order.
pub fn draw_observation<R: Rng + ?Sized>(
    protein: usize,
    matrix: &ProbabilityMatrix,
    rng: &mut R,
) -> Vec<bool> {
    matrix
        .profile(protein)
        .iter()
        .map(|&p| rng.gen_bool(p))
        .collect()
}

/// Draws a complete test panel: ground-truth identities plus one observation
/// vector each.
///
/// # Errors
///
/// Propagates the panel-draw errors from [`draw_test_panel`].
pub fn draw_spots<R: Rng + ?Sized>(
    num_spots: usize,
    catalog: &Catalog,
    matrix: &ProbabilityMatrix,
    rng: &mut R,
) -> Result<Vec<TestSpot>, AptamuxError> {
    let panel = draw_test_panel(num_spots, catalog, rng)?;

    Ok(panel
        .into_iter()
        .map(|true_protein| TestSpot {
            observed: draw_observation(true_protein, matrix, rng),
            true_protein,
        })
        .collect())
}
