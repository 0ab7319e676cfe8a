//! Seat combination sampling without replacement.
//!
//! The sampler draws from a fixed universe of [`SeatCombination`]s. A
//! combination is not drawn again until every combination of the universe
//! has been drawn once; at that point the used set is cleared and a new
//! epoch starts.

use std::collections::HashSet;
use std::sync::Arc;

use itertools::Itertools;
use rand::Rng;
use tdgen_model::{
    ConfigurationError, GenerationOptions, MasterData, MasterTable, Result, SeatCombination,
    UniverseMode,
};
use tracing::debug;

/// Largest cross-product universe the sampler will materialize.
pub const MAX_CROSS_PRODUCT: u128 = 10_000_000;

/// Draws seat combinations from a universe, resetting when exhausted.
#[derive(Debug, Clone)]
pub struct SeatSampler {
    universe: Vec<SeatCombination>,
    /// Indices into `universe` not yet drawn in the current epoch.
    available: Vec<usize>,
    used: Vec<bool>,
    resets: usize,
}

impl SeatSampler {
    /// Creates a sampler over `universe`, which must not be empty.
    pub fn new(universe: Vec<SeatCombination>) -> Result<Self> {
        if universe.is_empty() {
            return Err(ConfigurationError::EmptyUniverse);
        }
        let len = universe.len();
        Ok(Self {
            universe,
            available: (0..len).collect(),
            used: vec![false; len],
            resets: 0,
        })
    }

    /// Builds the universe from the seats table as configured.
    pub fn from_master(master: &MasterData, options: &GenerationOptions) -> Result<Self> {
        let seats = master.require(&options.tables.seats)?;
        let universe = build_universe(seats, &options.seat_columns, options.universe)?;
        debug!(
            mode = ?options.universe,
            columns = %options.seat_columns.join(","),
            size = universe.len(),
            "seat universe built"
        );
        Self::new(universe)
    }

    /// Draws one combination uniformly from those not yet used this epoch.
    ///
    /// When every combination has been used, the used set is cleared first.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &SeatCombination {
        if self.available.is_empty() {
            self.reset();
        }
        let slot = rng.gen_range(0..self.available.len());
        let index = self.available.swap_remove(slot);
        self.used[index] = true;
        &self.universe[index]
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.available.extend(0..self.universe.len());
        self.used.fill(false);
        debug!(
            universe = self.universe.len(),
            resets = self.resets,
            "seat combinations exhausted, resetting used set"
        );
    }

    pub fn universe(&self) -> &[SeatCombination] {
        &self.universe
    }

    pub fn universe_len(&self) -> usize {
        self.universe.len()
    }

    /// Number of combinations drawn in the current epoch.
    pub fn used_len(&self) -> usize {
        self.universe.len() - self.available.len()
    }

    pub fn is_used(&self, combination: &SeatCombination) -> bool {
        self.universe
            .iter()
            .zip(&self.used)
            .any(|(candidate, used)| *used && candidate == combination)
    }

    /// Number of times the used set has been cleared.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

/// Builds the seat universe for `columns` from the seats table.
pub fn build_universe(
    seats: &MasterTable,
    columns: &[String],
    mode: UniverseMode,
) -> Result<Vec<SeatCombination>> {
    for column in columns {
        seats.require_column(column)?;
    }
    let shared: Arc<[String]> = columns.iter().cloned().collect();
    match mode {
        UniverseMode::Observed => Ok(observed_universe(seats, &shared)),
        UniverseMode::CrossProduct => cross_product_universe(seats, &shared),
    }
}

/// Distinct combinations present in the table, in first-appearance order.
/// Rows with every seat column blank are skipped.
fn observed_universe(seats: &MasterTable, columns: &Arc<[String]>) -> Vec<SeatCombination> {
    let mut seen = HashSet::new();
    let mut universe = Vec::new();
    for row in seats.rows() {
        let values: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).cloned().unwrap_or_default())
            .collect();
        if values.iter().all(String::is_empty) {
            continue;
        }
        if seen.insert(values.clone()) {
            universe.push(SeatCombination::new(Arc::clone(columns), values));
        }
    }
    universe
}

fn cross_product_universe(
    seats: &MasterTable,
    columns: &Arc<[String]>,
) -> Result<Vec<SeatCombination>> {
    let distinct: Vec<Vec<String>> = columns
        .iter()
        .map(|column| seats.distinct_values(column))
        .collect();
    let size = distinct
        .iter()
        .fold(1u128, |acc, values| acc.saturating_mul(values.len() as u128));
    if size > MAX_CROSS_PRODUCT {
        return Err(ConfigurationError::UniverseTooLarge {
            size,
            limit: MAX_CROSS_PRODUCT,
        });
    }
    if size == 0 {
        return Ok(Vec::new());
    }
    Ok(distinct
        .into_iter()
        .multi_cartesian_product()
        .map(|values| SeatCombination::new(Arc::clone(columns), values))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| (*c).to_string()).collect()
    }

    fn seats() -> MasterTable {
        MasterTable::from_rows(
            "seats",
            &["floor", "seat", "grade"],
            &[
                &["1", "1", "S"],
                &["1", "2", "S"],
                &["2", "1", "A"],
                &["1", "1", "S"],
            ],
        )
    }

    #[test]
    fn observed_universe_is_distinct_rows() {
        let universe =
            build_universe(&seats(), &columns(&["floor", "seat"]), UniverseMode::Observed).unwrap();
        let values: Vec<&[String]> = universe.iter().map(SeatCombination::values).collect();
        assert_eq!(values, vec![["1", "1"], ["1", "2"], ["2", "1"]]);
    }

    #[test]
    fn cross_product_universe_covers_all_value_pairs() {
        let universe = build_universe(
            &seats(),
            &columns(&["floor", "seat"]),
            UniverseMode::CrossProduct,
        )
        .unwrap();
        assert_eq!(universe.len(), 4);
        assert!(
            universe
                .iter()
                .any(|c| c.get("floor") == Some("2") && c.get("seat") == Some("2"))
        );
    }

    #[test]
    fn missing_seat_column_is_configuration_error() {
        let err = build_universe(&seats(), &columns(&["block"]), UniverseMode::Observed)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingColumn { column, .. } if column == "block"));
    }

    #[test]
    fn empty_universe_is_rejected() {
        assert!(matches!(
            SeatSampler::new(Vec::new()),
            Err(ConfigurationError::EmptyUniverse)
        ));
    }

    #[test]
    fn draws_whole_universe_before_reset() {
        let universe =
            build_universe(&seats(), &columns(&["floor", "seat"]), UniverseMode::Observed).unwrap();
        let mut sampler = SeatSampler::new(universe).unwrap();
        let mut rng = seeded_rng(3);

        let mut first_epoch = HashSet::new();
        for drawn in 1..=3 {
            let combo = sampler.draw(&mut rng).clone();
            assert!(sampler.is_used(&combo));
            assert!(first_epoch.insert(combo));
            assert_eq!(sampler.used_len(), drawn);
        }
        assert_eq!(sampler.resets(), 0);

        let combo = sampler.draw(&mut rng).clone();
        assert_eq!(sampler.resets(), 1);
        assert_eq!(sampler.used_len(), 1);
        assert!(first_epoch.contains(&combo));
    }

    #[test]
    fn single_combination_repeats_with_reset_each_draw() {
        let table = MasterTable::from_rows("seats", &["seat"], &[&["9"]]);
        let universe = build_universe(&table, &columns(&["seat"]), UniverseMode::Observed).unwrap();
        let mut sampler = SeatSampler::new(universe).unwrap();
        let mut rng = seeded_rng(0);
        for _ in 0..4 {
            assert_eq!(sampler.draw(&mut rng).get("seat"), Some("9"));
        }
        assert_eq!(sampler.resets(), 3);
    }
}
