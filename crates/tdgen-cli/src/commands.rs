use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use tdgen_core::{generate_with_progress, resolve_seed, seeded_rng};
use tdgen_ingest::{default_master_dir, load_master_data};
use tdgen_model::{GenerationOptions, MasterData, OutputColumn, TableNames};
use tdgen_output::write_timestamped;

use crate::cli::GenerateArgs;
use crate::types::{GenerateResult, TableSummary};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} records";

/// Loads master data, generates records and writes the combined CSV.
///
/// `show_progress` draws a progress bar on stderr during synthesis.
pub fn run_generate(args: &GenerateArgs, show_progress: bool) -> Result<GenerateResult> {
    let options = generation_options(args)?;
    let master_dir = args.master_dir.clone().unwrap_or_else(default_master_dir);
    let seed = resolve_seed(args.seed);
    let run_span = info_span!("run", seed, records = args.num_records);
    let _run_guard = run_span.enter();
    if args.seed.is_none() {
        info!(seed, "using random seed; pass --seed to reproduce this run");
    }

    // =========================================================================
    // Stage 1: Load master data
    // =========================================================================
    let load_start = Instant::now();
    let master = info_span!("load", dir = %master_dir.display())
        .in_scope(|| load_master_data(&master_dir))
        .with_context(|| format!("load master data from {}", master_dir.display()))?;
    info!(
        tables = master.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "master data loaded"
    );

    // =========================================================================
    // Stage 2: Generate, deduplicate, sort
    // =========================================================================
    let mut rng = seeded_rng(seed);
    let bar = progress_bar(args.num_records, show_progress);
    let outcome = generate_with_progress(&master, &options, &mut rng, |done| {
        bar.set_position(done as u64);
    });
    bar.finish_and_clear();
    let outcome = outcome.context("generate records")?;

    // =========================================================================
    // Stage 3: Write output
    // =========================================================================
    let output = if args.dry_run {
        info!("dry run: output not written");
        None
    } else {
        let timestamp = Local::now().naive_local();
        let path = info_span!("write", dir = %args.output_dir.display())
            .in_scope(|| {
                write_timestamped(
                    &args.output_dir,
                    &args.output_prefix,
                    &outcome.records,
                    &timestamp,
                )
            })
            .context("write output")?;
        Some(path)
    };

    Ok(GenerateResult {
        tables: table_summaries(&master, &options.tables),
        master_dir,
        seed,
        seed_fixed: args.seed.is_some(),
        requested: args.num_records,
        generated: outcome.generated,
        duplicates_removed: outcome.duplicates_removed,
        written: outcome.records.len(),
        universe_size: outcome.universe_size,
        seat_resets: outcome.seat_resets,
        customers_assigned: outcome.customers_assigned,
        output,
    })
}

/// Maps command-line flags onto validated [`GenerationOptions`].
pub fn generation_options(args: &GenerateArgs) -> Result<GenerationOptions> {
    let mut options = GenerationOptions::new(args.num_records)
        .with_universe(args.universe.into())
        .with_no_seat_flag(args.no_seat_flag.as_str())
        .with_customer_column(args.customer_column.as_str());
    if args.seat_grade {
        options = options.with_seat_grade();
    }
    if !args.dedupe_keys.is_empty() {
        let keys = args
            .dedupe_keys
            .iter()
            .map(|key| key.parse::<OutputColumn>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("parse --dedupe-key")?;
        options = options.with_dedupe_keys(keys);
    }
    options.validate().context("invalid generation options")?;
    Ok(options)
}

fn table_summaries(master: &MasterData, names: &TableNames) -> Vec<TableSummary> {
    let used = [
        names.customers.as_str(),
        names.flags.as_str(),
        names.seats.as_str(),
        names.prices.as_str(),
    ];
    master
        .tables()
        .map(|table| TableSummary {
            name: table.name().to_string(),
            rows: table.len(),
            columns: table.columns().len(),
            used: used.contains(&table.name()),
        })
        .collect()
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar
}
