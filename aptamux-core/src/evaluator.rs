//! Accuracy evaluation of decoded identifications.
//!
//! Pure aggregation over [`IdentificationResult`] records: a dense confusion
//! matrix keyed by (true, inferred) catalog indices plus derived overall and
//! per-class metrics. No randomness.

use crate::types::IdentificationResult;

/// Confusion summary across all decoded spots.
#[derive(Debug, Clone)]
pub struct ConfusionSummary {
    /// Dense counts: `counts[true_index * num_classes + inferred_index]`.
    counts: Vec<usize>,
    num_classes: usize,
    total: usize,
}

impl ConfusionSummary {
    /// Aggregates identification results over a catalog of `num_classes`
    /// proteins.
    #[must_use]
    pub fn from_results(results: &[IdentificationResult], num_classes: usize) -> Self {
        let mut counts = vec![0usize; num_classes * num_classes];
        for result in results {
            counts[result.true_index * num_classes + result.inferred_index] += 1;
        }
        Self {
            counts,
            num_classes,
            total: results.len(),
        }
    }

    /// Count of spots with ground truth `true_index` decoded as
    /// `inferred_index`.
    #[must_use]
    pub fn count(&self, true_index: usize, inferred_index: usize) -> usize {
        self.counts[true_index * self.num_classes + inferred_index]
    }

    /// Number of catalog classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Total number of decoded spots.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of correctly decoded spots (diagonal sum).
    #[must_use]
    pub fn correct(&self) -> usize {
        (0..self.num_classes).map(|i| self.count(i, i)).sum()
    }

    /// Overall accuracy: correct / total. 0.0 for an empty summary.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct() as f64 / self.total as f64
    }

    /// Precision for one class: fraction of spots decoded as `class` that
    /// were truly `class`. `None` when the class was never inferred.
    #[must_use]
    pub fn precision(&self, class: usize) -> Option<f64> {
        let inferred: usize = (0..self.num_classes).map(|t| self.count(t, class)).sum();
        if inferred == 0 {
            return None;
        }
        Some(self.count(class, class) as f64 / inferred as f64)
    }

    /// Recall for one class: fraction of truly-`class` spots decoded as
    /// `class`. `None` when the class never appeared as ground truth.
    #[must_use]
    pub fn recall(&self, class: usize) -> Option<f64> {
        let actual: usize = (0..self.num_classes).map(|i| self.count(class, i)).sum();
        if actual == 0 {
            return None;
        }
        Some(self.count(class, class) as f64 / actual as f64)
    }
}
