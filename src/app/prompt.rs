//! Interactive console prompts.
//!
//! All prompts read a single line from stdin. A closed input stream counts
//! as an empty answer, so runs fed from a pipe fall back to the defaults.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::*;
use log::{info, warn};
use tokio::runtime::RuntimeFlavor;

use crate::fetch::TlsSkipPrompt;

/// Prints `question` and reads one trimmed line. `None` on EOF or read error.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Option<String> {
    // Prompt display is best effort; a broken stdout must not abort the run.
    let _ = write!(output, "{question}");
    let _ = output.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            warn!("Failed to read answer from stdin: {}", e);
            None
        }
    }
}

/// Asks on the real console.
///
/// The read blocks until the user answers. On a multi-threaded tokio
/// runtime the worker hands its other tasks (the browser's CDP handler
/// among them) to another thread for the duration.
fn ask_console(question: &str) -> Option<String> {
    run_blocking(|| ask(&mut io::stdin().lock(), &mut io::stdout(), question))
}

/// Runs a blocking closure without stalling the tasks queued on the current
/// runtime worker. Outside a multi-threaded runtime it just calls `f`.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

fn is_yes(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"))
}

/// Interprets the answer to "how many URLs?".
///
/// Blank, zero, negative, non-numeric and larger-than-available answers all
/// mean "every URL".
pub fn parse_url_count(answer: &str, total: usize) -> usize {
    let answer = answer.trim();
    if answer.is_empty() {
        return total;
    }
    match answer.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_or(total, |n| n.min(total)),
        Ok(_) => total,
        Err(_) => {
            warn!("'{}' is not a number; processing all URLs", answer);
            total
        }
    }
}

/// Asks how many of the `total` URLs to process.
pub fn prompt_url_count(total: usize) -> usize {
    let question = format!(
        "Found {total} URLs. How many do you want to process? (Enter 0 or leave blank for all): "
    )
    .cyan()
    .to_string();
    let count = ask_console(&question).map_or(total, |answer| parse_url_count(&answer, total));
    info!("Processing {} of {} URLs", count, total);
    count
}

/// Asks for another input file path after `missing` was not found.
/// `None` when the user enters nothing.
pub fn prompt_input_path(missing: &Path) -> Option<PathBuf> {
    println!(
        "{}",
        format!("Input file '{}' not found.", missing.display()).yellow()
    );
    let question = "Please enter the correct path to the input URL file (or press Enter to exit): "
        .cyan()
        .to_string();
    ask_console(&question)
        .filter(|answer| !answer.is_empty())
        .map(PathBuf::from)
}

/// Asks whether to go on after a finished batch.
pub fn confirm_next_batch(processed: usize, total: usize) -> bool {
    let question = format!(
        "Processed {processed}/{total} URLs. Continue with the next batch? (y/n): "
    )
    .cyan()
    .to_string();
    is_yes(ask_console(&question).as_deref())
}

/// [`TlsSkipPrompt`] that asks on the console.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleTlsPrompt;

impl TlsSkipPrompt for ConsoleTlsPrompt {
    fn confirm_skip(&self, url: &str) -> bool {
        println!(
            "\n{}",
            format!("TLS certificate verification failed for: {url}").yellow()
        );
        let question = "Skip TLS verification for this and all remaining URLs in this run? (y/n): "
            .yellow()
            .to_string();
        let accepted = is_yes(ask_console(&question).as_deref());
        if accepted {
            println!("{}", "Skipping TLS verification from now on.".cyan());
        } else {
            println!(
                "{}",
                "TLS verification not skipped; this URL cannot be checked.".red()
            );
        }
        accepted
    }
}
