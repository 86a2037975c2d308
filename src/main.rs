use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use log::{info, warn};
use pato_episodes::error::util::ensure_directory;
use pato_episodes::io::{read_cohort, write_episodes};
use pato_episodes::utils::logging::{create_spinner, finish_progress_bar};
use pato_episodes::{PipelineConfig, PipelineContext, run_cohort};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

const USAGE: &str = "usage: pato-episodes <cohort.parquet> <output-dir> [config.json]";

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output_dir)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let input = PathBuf::from(input);
    let output_dir = PathBuf::from(output_dir);

    let config = match args.next() {
        Some(path) => PipelineConfig::from_json_file(&PathBuf::from(&path))
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => PipelineConfig::default(),
    };
    info!(
        "Preset {:?}, window {} days, merge policy {:?}, {} worker threads",
        config.preset,
        config.window_days,
        config.merge_policy,
        config.effective_threads()
    );

    let start = Instant::now();
    let ctx = PipelineContext::from_config(config).context("Invalid pipeline configuration")?;
    let spinner = create_spinner(Some("Reading cohort"));
    let table = read_cohort(&input, &ctx.config)
        .with_context(|| format!("Failed to read cohort from {}", input.display()))?;
    finish_progress_bar(&spinner, None);

    let output = run_cohort(&table, &ctx).context("Cohort processing failed")?;

    ensure_directory(&output_dir, "output directory", true)?;
    let categories = ctx.field_names();
    write_episodes(
        &output_dir.join("initial.parquet"),
        &output.classification.initial,
        &categories,
    )
    .context("Failed to write initial episodes")?;
    write_episodes(
        &output_dir.join("recurrence.parquet"),
        &output.classification.recurrence,
        &categories,
    )
    .context("Failed to write recurrence episodes")?;

    println!("{}", output.report.summary());
    if !output.report.is_clean() {
        warn!(
            "{} issue(s) found; rerun with RUST_LOG=debug for details",
            output.report.issues.len()
        );
        for issue in output.report.issues.iter().filter(|issue| issue.is_fatal()) {
            warn!("  {}: {}", issue.patient_id, issue.message);
        }
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
