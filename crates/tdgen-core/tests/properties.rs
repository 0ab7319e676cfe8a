//! Property tests for the seat sampler and post-processing.

use std::cmp::Ordering;
use std::collections::HashSet;

use proptest::prelude::*;
use tdgen_core::{SeatSampler, build_universe, compare_customer_ids, dedupe_and_sort, seeded_rng};
use tdgen_model::{MasterTable, OutputColumn, OutputRecord, SeatFields, UniverseMode};

fn seat_table(size: usize) -> MasterTable {
    let values: Vec<String> = (0..size).map(|i| i.to_string()).collect();
    let rows: Vec<[&str; 1]> = values.iter().map(|v| [v.as_str()]).collect();
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    MasterTable::from_rows("seats", &["seat"], &rows)
}

fn record(customer: String, price: String) -> OutputRecord {
    OutputRecord {
        customer_no: customer,
        flag: "1".to_string(),
        price_type: price,
        grade: "S".to_string(),
        seat: SeatFields::default(),
    }
}

proptest! {
    #[test]
    fn every_epoch_draws_each_combination_once(
        size in 1usize..12,
        draws in 1usize..60,
        seed in any::<u64>(),
    ) {
        let universe = build_universe(
            &seat_table(size),
            &["seat".to_string()],
            UniverseMode::Observed,
        )
        .unwrap();
        let mut sampler = SeatSampler::new(universe).unwrap();
        let mut rng = seeded_rng(seed);

        let drawn: Vec<String> = (0..draws)
            .map(|_| sampler.draw(&mut rng).values()[0].clone())
            .collect();

        for epoch in drawn.chunks(size) {
            let distinct: HashSet<&String> = epoch.iter().collect();
            prop_assert_eq!(distinct.len(), epoch.len());
        }
        prop_assert_eq!(sampler.resets(), (draws - 1) / size);
        prop_assert_eq!(sampler.used_len(), (draws - 1) % size + 1);
    }

    #[test]
    fn dedupe_and_sort_is_bounded_unique_and_ordered(
        rows in prop::collection::vec(("[0-9]{1,4}|[a-c]{1,2}", "[xy]"), 0..80),
    ) {
        let records: Vec<OutputRecord> = rows
            .into_iter()
            .map(|(customer, price)| record(customer, price))
            .collect();
        let total = records.len();
        let keys = [OutputColumn::CustomerNo, OutputColumn::PriceType];
        let result = dedupe_and_sort(records, &keys);

        prop_assert!(result.records.len() <= total);
        prop_assert_eq!(result.records.len() + result.duplicates_removed, total);

        let unique: HashSet<(&str, &str)> = result
            .records
            .iter()
            .map(|r| (r.customer_no.as_str(), r.price_type.as_str()))
            .collect();
        prop_assert_eq!(unique.len(), result.records.len());

        for pair in result.records.windows(2) {
            prop_assert_ne!(
                compare_customer_ids(&pair[0].customer_no, &pair[1].customer_no),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn customer_id_order_is_antisymmetric(a in "[0-9a-z]{0,6}", b in "[0-9a-z]{0,6}") {
        prop_assert_eq!(compare_customer_ids(&a, &b), compare_customer_ids(&b, &a).reverse());
    }
}
