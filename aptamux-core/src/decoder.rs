//! Identification of protein identity from observed binding patterns.
//!
//! The decoder scores every catalog candidate by Pearson correlation between
//! a spot's binary observation vector and the candidate's probability
//! profile, picks the best match, and derives a confidence statistic from a
//! normal fit to the whole score vector (treated as an empirical background
//! distribution of correlations).

use crate::catalog::Catalog;
use crate::constants::MIN_TAIL_PROBABILITY;
use crate::probability::ProbabilityMatrix;
use crate::stats::{mean, normal_upper_tail, pearson, std_dev};
use crate::types::{AptamuxError, IdentificationResult, TestSpot};

/// Scores every candidate protein against one observation vector.
///
/// Returns one Pearson correlation per catalog protein, in catalog order.
/// Candidates with a constant probability profile (or an all-equal
/// observation vector) score 0.0.
///
/// # Panics
///
/// Panics if the observation length differs from the matrix probe count;
/// spots and matrices from the same run always agree.
#[must_use]
pub fn score_candidates(observed: &[bool], matrix: &ProbabilityMatrix) -> Vec<f64> {
    assert_eq!(
        observed.len(),
        matrix.num_probes(),
        "Observation length must match the probe count"
    );

    let observed_values: Vec<f64> = observed.iter().map(|&bit| f64::from(bit as u8)).collect();

    (0..matrix.num_proteins())
        .map(|protein| pearson(&observed_values, matrix.profile(protein)))
        .collect()
}

/// Fits a normal background distribution to the score vector and derives the
/// marginal confidence of the winning candidate.
///
/// `p1` and `p2` are the upper-tail probabilities of the best and runner-up
/// scores under the fit; the confidence is `log10(p2 / p1)`, the log10 ratio
/// of how much less likely the runner-up is to reach its correlation than
/// the winner. Tail probabilities are clamped away from zero before the log.
///
/// # Errors
///
/// Returns [`AptamuxError::DegenerateScoreDistribution`] when the score
/// vector has zero variance (including the single-candidate case), since no
/// background distribution can be fitted.
pub fn marginal_confidence(scores: &[f64]) -> Result<f64, AptamuxError> {
    let sd = std_dev(scores);
    if sd <= 0.0 || !sd.is_finite() {
        return Err(AptamuxError::DegenerateScoreDistribution(scores.len()));
    }
    let center = mean(scores);

    let mut best = f64::NEG_INFINITY;
    let mut second = f64::NEG_INFINITY;
    for &score in scores {
        if score > best {
            second = best;
            best = score;
        } else if score > second {
            second = score;
        }
    }

    let p1 = normal_upper_tail(best, center, sd).max(MIN_TAIL_PROBABILITY);
    let p2 = normal_upper_tail(second, center, sd).max(MIN_TAIL_PROBABILITY);

    Ok(p2.log10() - p1.log10())
}

/// Decodes one test spot into an identification result.
///
/// The inferred protein is the argmax of the candidate scores; exact ties
/// are broken deterministically in favor of the lowest catalog index.
///
/// # Errors
///
/// Returns [`AptamuxError::DegenerateScoreDistribution`] when all candidate
/// scores are equal.
pub fn decode_spot(
    spot: &TestSpot,
    matrix: &ProbabilityMatrix,
    catalog: &Catalog,
) -> Result<IdentificationResult, AptamuxError> {
    let scores = score_candidates(&spot.observed, matrix);

    // Strictly-greater comparison keeps the first index on ties.
    let mut inferred_index = 0;
    for (candidate, &score) in scores.iter().enumerate() {
        if score > scores[inferred_index] {
            inferred_index = candidate;
        }
    }

    let confidence = marginal_confidence(&scores)?;

    Ok(IdentificationResult {
        true_index: spot.true_protein,
        inferred_index,
        true_id: catalog.id(spot.true_protein).to_string(),
        inferred_id: catalog.id(inferred_index).to_string(),
        score: scores[inferred_index],
        marginal_confidence: confidence,
    })
}
