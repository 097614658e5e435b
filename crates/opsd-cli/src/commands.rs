//! Command handlers for the pipeline CLI.
//!
//! Each handler loads the pipeline configuration, resolves its input,
//! runs the library stages under an `info_span!`, and prints a console
//! summary. Errors bubble up to `main` where they become exit code 1.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use opsd_ingest::{download_source, load_time_frame};
use opsd_model::{DataSource, PipelineConfig, load_pipeline_config, tag_columns};
use opsd_quality::{build_exploration_summary, build_quality_report};

use crate::cli::{AnalyzeArgs, CleanArgs, ExploreArgs, FetchArgs};
use crate::summary;

pub fn run_fetch(config_path: &Path, args: &FetchArgs) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let (name, source) = resolve_source(&config, args.source.as_deref())?;
    let span = info_span!("fetch", source = %name);
    let _guard = span.enter();
    let started = Instant::now();

    let outcome = download_source(source, args.force)?;

    info!(duration_ms = started.elapsed().as_millis(), "fetch complete");
    summary::print_fetch_summary(&name, &outcome);
    Ok(())
}

pub fn run_explore(config_path: &Path, args: &ExploreArgs) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let input = resolve_input(&config, args.input.as_deref())?;
    ensure_input_exists(&input)?;
    let span = info_span!("explore", input = %input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let frame = load_time_frame(&input)?;
    let tags = tag_columns(
        &frame.column_names(),
        &frame.time_column,
        &config.focus_countries,
    );
    let exploration = build_exploration_summary(&frame, &tags, &config.focus_countries, &input)?;
    let report_path = opsd_quality::write_exploration_report(&exploration, &args.report_dir)?;

    info!(duration_ms = started.elapsed().as_millis(), "explore complete");
    summary::print_exploration_summary(&exploration, &report_path);
    Ok(())
}

pub fn run_analyze(config_path: &Path, args: &AnalyzeArgs) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let input = resolve_input(&config, args.input.as_deref())?;
    ensure_input_exists(&input)?;
    let span = info_span!("analyze", input = %input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let frame = load_time_frame(&input)?;
    let tags = tag_columns(
        &frame.column_names(),
        &frame.time_column,
        &config.focus_countries,
    );
    let report = build_quality_report(&frame, &tags, &config)?;
    let report_path = opsd_quality::write_quality_report(&report, &args.report_dir)?;

    info!(duration_ms = started.elapsed().as_millis(), "analyze complete");
    summary::print_quality_summary(&report, &report_path);
    Ok(())
}

pub fn run_clean(config_path: &Path, args: &CleanArgs) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let input = resolve_input(&config, args.input.as_deref())?;
    ensure_input_exists(&input)?;
    let span = info_span!("clean", input = %input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let frame = load_time_frame(&input)?;
    let clean = opsd_transform::run_clean(&frame, &config, &args.output_dir)?;

    info!(duration_ms = started.elapsed().as_millis(), "clean complete");
    summary::print_clean_summary(&clean);
    Ok(())
}

/// Picks the data source to fetch: the named one, or the sole configured
/// source when no name is given.
pub fn resolve_source<'a>(
    config: &'a PipelineConfig,
    requested: Option<&str>,
) -> Result<(String, &'a DataSource)> {
    match requested {
        Some(name) => {
            let source = config.data_sources.get(name).with_context(|| {
                let available: Vec<&str> =
                    config.data_sources.keys().map(String::as_str).collect();
                format!(
                    "data source {name:?} is not configured (available: {})",
                    available.join(", ")
                )
            })?;
            Ok((name.to_string(), source))
        }
        None => {
            let mut sources = config.data_sources.iter();
            match (sources.next(), sources.next()) {
                (Some((name, source)), None) => Ok((name.clone(), source)),
                (None, _) => bail!("no data sources configured"),
                _ => bail!("several data sources configured, pick one with --source"),
            }
        }
    }
}

/// Resolves the input CSV path: the explicit argument, or the sole
/// configured source's download path.
pub fn resolve_input(config: &PipelineConfig, input: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = input {
        return Ok(path.to_path_buf());
    }
    let mut sources = config.data_sources.values();
    match (sources.next(), sources.next()) {
        (Some(source), None) => Ok(source.local_path()),
        (None, _) => bail!("no data sources configured to default the input from, pass INPUT"),
        _ => bail!("several data sources configured, pass INPUT explicitly"),
    }
}

fn ensure_input_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("input file {} not found, run the fetch command first", path.display());
    }
    Ok(())
}
