//! End-to-end generation: synthesize, deduplicate, sort.

use std::time::Instant;

use rand::Rng;
use tdgen_model::{GenerationOptions, MasterData, OutputRecord, Result};
use tracing::{info, info_span};

use crate::postprocess::dedupe_and_sort;
use crate::synth::Synthesizer;

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Deduplicated records sorted by customer identifier.
    pub records: Vec<OutputRecord>,
    /// Records synthesized before deduplication.
    pub generated: usize,
    pub duplicates_removed: usize,
    /// Size of the seat combination universe.
    pub universe_size: usize,
    /// Times the seat pool was exhausted and reset.
    pub seat_resets: usize,
    /// Distinct customers that received an assignment.
    pub customers_assigned: usize,
}

/// Runs a full generation pass over `master`.
pub fn generate<R: Rng + ?Sized>(
    master: &MasterData,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<GenerationOutcome> {
    generate_with_progress(master, options, rng, |_| {})
}

/// Like [`generate`], calling `on_record` with the running count after
/// each synthesized record.
pub fn generate_with_progress<R, F>(
    master: &MasterData,
    options: &GenerationOptions,
    rng: &mut R,
    mut on_record: F,
) -> Result<GenerationOutcome>
where
    R: Rng + ?Sized,
    F: FnMut(usize),
{
    options.validate()?;
    let mut synthesizer = Synthesizer::from_master(master, options)?;

    let span = info_span!("synthesize", records = options.num_records);
    let start = Instant::now();
    let generated: Vec<OutputRecord> = span.in_scope(|| {
        synthesizer
            .synthesize(options.num_records, rng)
            .enumerate()
            .map(|(idx, record)| {
                on_record(idx + 1);
                record
            })
            .collect()
    });
    let universe_size = synthesizer.sampler().universe_len();
    let seat_resets = synthesizer.sampler().resets();
    let customers_assigned = synthesizer.assigner().len();
    info!(
        records = generated.len(),
        customers = customers_assigned,
        universe = universe_size,
        seat_resets,
        duration_ms = start.elapsed().as_millis(),
        "synthesis complete"
    );

    let generated_count = generated.len();
    let processed = dedupe_and_sort(generated, &options.dedupe_keys);
    info!(
        kept = processed.records.len(),
        duplicates_removed = processed.duplicates_removed,
        "deduplicated and sorted records"
    );

    Ok(GenerationOutcome {
        records: processed.records,
        generated: generated_count,
        duplicates_removed: processed.duplicates_removed,
        universe_size,
        seat_resets,
        customers_assigned,
    })
}
