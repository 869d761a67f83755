//! Per-URL console progress.

use colored::*;
use log::info;

use crate::orchestrator::PageResult;

/// Announces the URL about to be processed.
pub fn log_url_start(index: usize, total: usize, url: &str) {
    println!(
        "\n{}",
        format!("Processing ({index}/{total}): {url}").green().bold()
    );
}

/// Reports how processing of a URL ended.
pub fn log_url_result(result: &PageResult) {
    let record = &result.record;
    if record.error.is_empty() {
        println!("{}", format!("  Successfully processed {}", record.url).cyan());
    } else {
        println!(
            "{}",
            format!("  Warning/Error noted for {}: {}", record.url, record.error).yellow()
        );
    }
}

/// Logs throughput so far.
pub fn log_progress(start_time: std::time::Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} URLs in {:.1} seconds (~{:.2} URLs/sec)",
        completed, total, elapsed_secs, rate
    );
}
