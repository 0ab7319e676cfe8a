//! Sampling core for master-data driven test dataset generation.
//!
//! # Pipeline
//!
//! ```text
//! MasterData ─► Synthesizer ─► Vec<OutputRecord> ─► dedupe_and_sort ─► output
//!                 │
//!                 ├─ CustomerAssigner  (stable flag/grade per customer)
//!                 └─ SeatSampler       (seat combinations without replacement)
//! ```
//!
//! All randomness is injected as a `rand::Rng`; [`rng::seeded_rng`] gives a
//! reproducible one.

pub mod assign;
pub mod generate;
pub mod postprocess;
pub mod rng;
pub mod sampler;
pub mod synth;

pub use assign::CustomerAssigner;
pub use generate::{GenerationOutcome, generate, generate_with_progress};
pub use postprocess::{PostProcessed, compare_customer_ids, dedupe, dedupe_and_sort, sort_by_customer};
pub use rng::{random_seed, resolve_seed, seeded_rng};
pub use sampler::{MAX_CROSS_PRODUCT, SeatSampler, build_universe};
pub use synth::{Records, Synthesizer, is_no_seat_flag};
