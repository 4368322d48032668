//! Human-readable table report.

use std::io::Write;

use crate::results::AssayResults;
use crate::types::AptamuxError;

/// Writes a human-readable assay report: panel summary, per-spot
/// identifications, the confusion matrix, and per-class metrics.
pub fn write_table_format<W: Write>(
    writer: &mut W,
    results: &AssayResults,
) -> Result<(), AptamuxError> {
    let info = &results.panel_info;

    writeln!(writer, "# Aptamux assay report (seed={})", info.seed)?;
    writeln!(
        writer,
        "# proteins={} candidate_motifs={} probes={} spots={}",
        info.num_proteins, info.num_candidate_motifs, info.num_probes, info.num_spots
    )?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{:>6}  {:<20} {:<20} {:>8} {:>12}  {}",
        "spot", "true", "inferred", "score", "confidence", "ok"
    )?;
    for (spot, result) in results.identifications.iter().enumerate() {
        writeln!(
            writer,
            "{:>6}  {:<20} {:<20} {:>8.4} {:>12.4}  {}",
            spot + 1,
            result.true_id,
            result.inferred_id,
            result.score,
            result.marginal_confidence,
            if result.is_correct() { "+" } else { "-" }
        )?;
    }
    writeln!(writer)?;

    let confusion = &results.confusion;
    writeln!(
        writer,
        "accuracy: {:.2}% ({}/{})",
        confusion.accuracy() * 100.0,
        confusion.correct(),
        confusion.total()
    )?;
    writeln!(writer)?;

    // Class labels recovered from the identification records; classes that
    // never appeared keep a positional placeholder.
    let mut labels: Vec<String> = (0..confusion.num_classes())
        .map(|class| format!("#{}", class))
        .collect();
    for result in &results.identifications {
        labels[result.true_index] = result.true_id.clone();
        labels[result.inferred_index] = result.inferred_id.clone();
    }

    writeln!(writer, "{:<20} {:>8} {:>8}", "class", "prec", "recall")?;
    for (class, label) in labels.iter().enumerate() {
        let precision = confusion
            .precision(class)
            .map_or_else(|| "-".to_string(), |p| format!("{:.3}", p));
        let recall = confusion
            .recall(class)
            .map_or_else(|| "-".to_string(), |r| format!("{:.3}", r));
        writeln!(writer, "{:<20} {:>8} {:>8}", label, precision, recall)?;
    }

    if let Some(mixture) = &results.mixture {
        writeln!(writer)?;
        writeln!(
            writer,
            "binding mixture: w=[{:.3}, {:.3}] mu=[{:.4}, {:.4}] sd=[{:.4}, {:.4}] \
             separation={:.3} ({} iterations)",
            mixture.weights[0],
            mixture.weights[1],
            mixture.means[0],
            mixture.means[1],
            mixture.std_devs[0],
            mixture.std_devs[1],
            mixture.separation(),
            mixture.iterations
        )?;
    }

    Ok(())
}
