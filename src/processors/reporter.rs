// dimsort/src/processors/reporter.rs
use crate::core::{DimensionBucket, SortStats};
use crate::utils::format_file_size;
use std::io::{self, Write};
use std::path::Path;

pub const EMPTY_REPORT: &str = "No images sorted into folders.";

/// Writes the dry-run report. Returns `false` when there was nothing to report.
pub fn write_report<W: Write>(buckets: &[DimensionBucket], out: &mut W) -> io::Result<bool> {
    if buckets.is_empty() {
        writeln!(out, "{}", EMPTY_REPORT)?;
        return Ok(false);
    }

    for bucket in buckets {
        writeln!(
            out,
            "Image Size: {} ({} {}, {})",
            bucket.dimensions(),
            bucket.count(),
            if bucket.count() == 1 { "image" } else { "images" },
            format_file_size(bucket.total_bytes())
        )?;
        for path in bucket.paths() {
            writeln!(out, "|  {}", path.display())?;
        }
    }

    Ok(true)
}

pub fn print_report(buckets: &[DimensionBucket]) -> io::Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(buckets, &mut out)
}

pub fn write_sort_summary<W: Write>(
    stats: &SortStats,
    destination: &Path,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "Sorted {} images ({}) into: {}",
        stats.relocated_count,
        format_file_size(stats.relocated_bytes),
        destination.display()
    )?;

    if !stats.skipped.is_empty() || !stats.failures.is_empty() {
        writeln!(
            out,
            "Skipped {} non-images, {} failed",
            stats.skipped.len(),
            stats.failures.len()
        )?;
    }

    Ok(())
}
