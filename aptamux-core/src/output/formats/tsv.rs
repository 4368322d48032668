//! Tab-separated per-spot output for downstream analysis.

use std::io::Write;

use crate::results::AssayResults;
use crate::types::AptamuxError;

/// Writes one header line plus one TSV row per decoded spot.
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    results: &AssayResults,
) -> Result<(), AptamuxError> {
    writeln!(
        writer,
        "spot\ttrue_id\tinferred_id\tscore\tmarginal_confidence\tcorrect"
    )?;
    for (spot, result) in results.identifications.iter().enumerate() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{}",
            spot + 1,
            result.true_id,
            result.inferred_id,
            result.score,
            result.marginal_confidence,
            u8::from(result.is_correct())
        )?;
    }
    Ok(())
}
