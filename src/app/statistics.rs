//! End-of-run statistics.

use std::path::Path;

use colored::*;
use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{PageOutcome, RunStats};

/// Prints the per-outcome counts and a one-line summary.
pub fn print_run_statistics(stats: &RunStats, elapsed_seconds: f64, output: Option<&Path>) {
    let total = stats.total();
    let with_issues = stats.total_with_issues();

    info!("Outcome counts ({} total):", total);
    for outcome in PageOutcome::iter() {
        let count = stats.get_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }

    let summary = format!(
        "Processed {} URL{} ({} clean, {} with warnings or errors) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        total - with_issues,
        with_issues,
        elapsed_seconds
    );
    if with_issues == 0 {
        println!("\n{}", summary.green().bold());
    } else {
        println!("\n{}", summary.yellow().bold());
    }

    match output {
        Some(path) => println!("{}", format!("Results saved to {}", path.display()).cyan()),
        None => println!("{}", "No results were written.".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_print_run_statistics_empty() {
        let stats = RunStats::new();
        print_run_statistics(&stats, 0.0, None);
    }

    #[test]
    fn test_print_run_statistics_with_outcomes() {
        let stats = RunStats::new();
        stats.record(PageOutcome::Extracted);
        stats.record(PageOutcome::ExtractedWithFallback);
        stats.record(PageOutcome::RenderFailed);
        let path = PathBuf::from("output/page_details_example_com_20240101_000000.csv");
        print_run_statistics(&stats, 12.5, Some(&path));
    }
}
