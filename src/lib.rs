//! page_details library: SEO and content metadata extraction
//!
//! This library reads a list of URLs and, for each one, checks it with a
//! lightweight HEAD request, renders it in a headless browser, finds its main
//! content region and extracts titles, meta tags and heading/link/image
//! counts into one fixed-shape record per URL.
//!
//! # Example
//!
//! ```no_run
//! use page_details::{run_extraction, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input_file: std::path::PathBuf::from("urls.txt"),
//!     max_urls: Some(0),
//!     ..Default::default()
//! };
//!
//! let report = run_extraction(config).await?;
//! println!("Processed {} of {} URLs", report.processed, report.total_urls);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime and a Chromium/Chrome installation.

pub mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod orchestrator;
pub mod parse;
pub mod render;
pub mod scope;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use orchestrator::{PageRecord, PageResult, Pipeline};
pub use run::{run_extraction, RunReport};

// Internal run module (drives the pipeline over the input list)
mod run {
    use anyhow::{bail, Context, Result};
    use chrono::Local;
    use colored::Colorize;
    use log::{info, warn};
    use std::path::PathBuf;
    use std::time::Instant;

    use crate::app::{
        confirm_next_batch, log_progress, log_url_result, log_url_start, print_run_statistics,
        prompt_input_path, prompt_url_count, read_input_file, ConsoleTlsPrompt,
    };
    use crate::config::{Config, ExtractionSettings};
    use crate::error_handling::RunStats;
    use crate::export::{output_path, write_records};
    use crate::fetch::TlsDecision;
    use crate::initialization::{choose_user_agent, init_browser, init_client};
    use crate::orchestrator::{PageRecord, Pipeline};
    use crate::render::with_driver;
    use crate::scope::ScopePriority;

    /// Results of an extraction run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// URLs selected for processing
        pub total_urls: usize,
        /// URLs actually processed (fewer when the user stopped between batches)
        pub processed: usize,
        /// Processed URLs whose record carries an error tag
        pub with_issues: usize,
        /// Results file, if anything was written
        pub output_path: Option<PathBuf>,
        pub elapsed_seconds: f64,
    }

    /// Runs the extraction over the configured input file.
    ///
    /// URLs are processed one at a time with a single browser session, which
    /// is shut down before results are written.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or contains no URLs, if
    /// the HTTP client or browser cannot be initialized, or if the results
    /// file cannot be written. Failures of individual URLs are never errors;
    /// they are recorded in the results.
    pub async fn run_extraction(config: Config) -> Result<RunReport> {
        let start_time = Instant::now();
        let started_at = Local::now();

        let input_file = locate_input_file(config.input_file.clone())?;
        let mut urls = read_input_file(&input_file)?;
        if urls.is_empty() {
            bail!("No valid URLs found in {}", input_file.display());
        }

        let available = urls.len();
        let selected = match config.max_urls {
            Some(0) => available,
            Some(n) => n.min(available),
            None => prompt_url_count(available),
        };
        urls.truncate(selected);
        let total_urls = urls.len();

        let user_agent = choose_user_agent(&config.user_agents);
        let client = init_client(&user_agent).context("Failed to initialize HTTP client")?;
        println!("{}", "Starting browser...".yellow());
        let driver = init_browser(&config, &user_agent)
            .await
            .context("Failed to initialize browser")?;

        let settings = ExtractionSettings::from(&config);
        let scopes = ScopePriority::from_selectors(&config.scope_priority);
        let prompt = ConsoleTlsPrompt;
        let pipeline = Pipeline::new(&client, &prompt, &driver, &settings, &scopes);
        let mut decision = TlsDecision::new(config.skip_ssl_check_default);
        let stats = RunStats::new();

        let batch_size = if config.run_in_batches {
            config.batch_size.max(1)
        } else {
            total_urls
        };

        let records = with_driver(
            &driver,
            process_urls(&pipeline, &urls, batch_size, &mut decision, &stats, start_time),
        )
        .await;

        let output_path = if records.is_empty() {
            warn!("No URLs were processed; nothing to write");
            None
        } else {
            let path = output_path(
                &config.output_dir,
                &urls[0],
                config.output_format,
                &started_at,
            );
            write_records(&path, &records, config.output_format)?;
            Some(path)
        };

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_run_statistics(&stats, elapsed_seconds, output_path.as_deref());

        Ok(RunReport {
            total_urls,
            processed: records.len(),
            with_issues: stats.total_with_issues(),
            output_path,
            elapsed_seconds,
        })
    }

    async fn process_urls(
        pipeline: &Pipeline<'_>,
        urls: &[String],
        batch_size: usize,
        decision: &mut TlsDecision,
        stats: &RunStats,
        start_time: Instant,
    ) -> Vec<PageRecord> {
        let total = urls.len();
        let mut records = Vec::with_capacity(total);

        for (batch_index, batch) in urls.chunks(batch_size.max(1)).enumerate() {
            if batch_index > 0 && !confirm_next_batch(records.len(), total) {
                info!(
                    "Stopping after {} of {} URLs at user request",
                    records.len(),
                    total
                );
                break;
            }

            for url in batch {
                log_url_start(records.len() + 1, total, url);
                let result = pipeline.extract(url, decision).await;
                log_url_result(&result);
                stats.record(result.outcome);
                records.push(result.record);
            }
            log_progress(start_time, records.len(), total);
        }

        records
    }

    /// Returns `path` if it exists, otherwise keeps asking for another one.
    fn locate_input_file(mut path: PathBuf) -> Result<PathBuf> {
        while !path.exists() {
            warn!("Input file not found: {}", path.display());
            match prompt_input_path(&path) {
                Some(next) => path = next,
                None => bail!("Input file {} not found", path.display()),
            }
        }
        Ok(path)
    }
}
