//! Row synthesis: one output record per iteration.

use rand::Rng;
use tdgen_model::{
    ConfigurationError, GenerationOptions, MasterData, MasterTable, OutputRecord, Result,
    SeatFields,
};

use crate::assign::{CustomerAssigner, pick};
use crate::sampler::SeatSampler;

/// Produces output records from the customers and prices tables, the
/// customer assigner and the seat sampler.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    customers: Vec<String>,
    price_types: Vec<String>,
    assigner: CustomerAssigner,
    sampler: SeatSampler,
    no_seat_flag: String,
}

impl Synthesizer {
    /// Fails when there are no customer ids or no price types to sample.
    pub fn new(
        customers: Vec<String>,
        price_types: Vec<String>,
        assigner: CustomerAssigner,
        sampler: SeatSampler,
        no_seat_flag: impl Into<String>,
    ) -> Result<Self> {
        if customers.is_empty() {
            return Err(ConfigurationError::EmptyValueSet("customer"));
        }
        if price_types.is_empty() {
            return Err(ConfigurationError::EmptyValueSet("price type"));
        }
        Ok(Self {
            customers,
            price_types,
            assigner,
            sampler,
            no_seat_flag: no_seat_flag.into(),
        })
    }

    /// Validates the master data and prepares all sampling state for a run.
    pub fn from_master(master: &MasterData, options: &GenerationOptions) -> Result<Self> {
        let customers_table = master.require(&options.tables.customers)?;
        let customers = sample_values(customers_table, &options.customer_column)?;

        let prices = master.require(&options.tables.prices)?;
        let price_column = prices
            .first_column()
            .ok_or_else(|| ConfigurationError::EmptyTable {
                table: prices.name().to_string(),
            })?;
        let price_types = sample_values(prices, price_column)?;

        let assigner = CustomerAssigner::from_master(master, options)?;
        let sampler = SeatSampler::from_master(master, options)?;

        Self::new(
            customers,
            price_types,
            assigner,
            sampler,
            options.no_seat_flag.clone(),
        )
    }

    /// Lazily produces exactly `count` records.
    pub fn synthesize<'a, R: Rng + ?Sized>(
        &'a mut self,
        count: usize,
        rng: &'a mut R,
    ) -> Records<'a, R> {
        Records {
            synthesizer: self,
            rng,
            remaining: count,
        }
    }

    /// Produces one record.
    pub fn next_record<R: Rng + ?Sized>(&mut self, rng: &mut R) -> OutputRecord {
        let customer = pick(&self.customers, rng);
        let assignment = self.assigner.assign(customer, rng).clone();

        let (seat, grade) = if is_no_seat_flag(&assignment.flag, &self.no_seat_flag) {
            (SeatFields::default(), assignment.grade)
        } else {
            let combination = self.sampler.draw(rng);
            let grade = combination
                .grade()
                .map_or(assignment.grade, str::to_string);
            (SeatFields::from_combination(combination), grade)
        };

        OutputRecord {
            customer_no: customer.to_string(),
            flag: assignment.flag,
            price_type: pick(&self.price_types, rng).to_string(),
            grade,
            seat,
        }
    }

    pub fn assigner(&self) -> &CustomerAssigner {
        &self.assigner
    }

    pub fn sampler(&self) -> &SeatSampler {
        &self.sampler
    }

    pub fn no_seat_flag(&self) -> &str {
        &self.no_seat_flag
    }
}

/// Lazy sequence of synthesized records. Not restartable.
pub struct Records<'a, R: Rng + ?Sized> {
    synthesizer: &'a mut Synthesizer,
    rng: &'a mut R,
    remaining: usize,
}

impl<R: Rng + ?Sized> Iterator for Records<'_, R> {
    type Item = OutputRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.synthesizer.next_record(&mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for Records<'_, R> {}

/// True when `flag` is the no-seat sentinel.
///
/// Values are trimmed; when both parse as numbers they compare numerically,
/// so `"0.0"` matches a sentinel of `"0"`.
pub fn is_no_seat_flag(flag: &str, sentinel: &str) -> bool {
    let (flag, sentinel) = (flag.trim(), sentinel.trim());
    if flag == sentinel {
        return true;
    }
    match (flag.parse::<f64>(), sentinel.parse::<f64>()) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

/// Non-empty values of a column, one per row, for sampling with replacement.
fn sample_values(table: &MasterTable, column: &str) -> Result<Vec<String>> {
    table.require_column(column)?;
    table.require_rows()?;
    let values: Vec<String> = table
        .column_values(column)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        return Err(ConfigurationError::NoValues {
            table: table.name().to_string(),
            column: column.to_string(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn no_seat_flag_matches_numerically() {
        assert!(is_no_seat_flag("0", "0"));
        assert!(is_no_seat_flag(" 0 ", "0"));
        assert!(is_no_seat_flag("0.0", "0"));
        assert!(!is_no_seat_flag("1", "0"));
        assert!(!is_no_seat_flag("none", "0"));
        assert!(is_no_seat_flag("none", "none"));
    }

    fn master(flags: &[&[&str]]) -> MasterData {
        [
            MasterTable::from_rows("customers", &["customerNo"], &[&["7"], &["3"]]),
            MasterTable::from_rows("flags", &["flag"], flags),
            MasterTable::from_rows(
                "seats",
                &["floor", "area", "block", "row", "seat", "grade"],
                &[
                    &["1", "A", "B1", "1", "1", "S"],
                    &["1", "A", "B1", "1", "2", "S"],
                    &["2", "C", "B9", "4", "7", "A"],
                ],
            ),
            MasterTable::from_rows("prices", &["price_type"], &[&["adult"], &["child"]]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn sentinel_flag_leaves_seat_fields_empty() {
        let mut synth = Synthesizer::from_master(&master(&[&["0"]]), &GenerationOptions::new(5))
            .unwrap();
        let mut rng = seeded_rng(11);
        for record in synth.synthesize(10, &mut rng) {
            assert_eq!(record.flag, "0");
            assert!(!record.has_seat());
            assert!(["S", "A"].contains(&record.grade.as_str()));
        }
        assert_eq!(synth.sampler().used_len(), 0);
    }

    #[test]
    fn seat_grade_overrides_assigned_grade_when_configured() {
        let options = GenerationOptions::new(5).with_seat_grade();
        let mut synth = Synthesizer::from_master(&master(&[&["1"]]), &options).unwrap();
        let mut rng = seeded_rng(5);
        for record in synth.synthesize(30, &mut rng) {
            let expected = if record.seat.floor.as_deref() == Some("2") { "A" } else { "S" };
            assert_eq!(record.grade, expected);
        }
    }

    #[test]
    fn synthesize_yields_exact_count() {
        let mut synth = Synthesizer::from_master(&master(&[&["1"]]), &GenerationOptions::new(1))
            .unwrap();
        let mut rng = seeded_rng(2);
        let records = synth.synthesize(17, &mut rng);
        assert_eq!(records.len(), 17);
        assert_eq!(records.count(), 17);
    }

    #[test]
    fn prices_use_first_declared_column() {
        let mut data = master(&[&["1"]]);
        data.insert(MasterTable::from_rows(
            "prices",
            &["kind", "amount"],
            &[&["vip", "100"]],
        ));
        let mut synth = Synthesizer::from_master(&data, &GenerationOptions::new(1)).unwrap();
        let mut rng = seeded_rng(4);
        assert_eq!(synth.next_record(&mut rng).price_type, "vip");
    }

    #[test]
    fn missing_customer_column_is_configuration_error() {
        let options = GenerationOptions::new(1).with_customer_column("customerId");
        let err = Synthesizer::from_master(&master(&[&["1"]]), &options).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingColumn { column, .. } if column == "customerId"));
    }

    #[test]
    fn empty_customers_or_prices_are_rejected() {
        let data = master(&[&["1"]]);
        let options = GenerationOptions::new(1);
        let parts = || {
            (
                CustomerAssigner::from_master(&data, &options).unwrap(),
                SeatSampler::from_master(&data, &options).unwrap(),
            )
        };

        let (assigner, sampler) = parts();
        let err = Synthesizer::new(Vec::new(), vec!["adult".to_string()], assigner, sampler, "0")
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyValueSet("customer"));

        let (assigner, sampler) = parts();
        let err = Synthesizer::new(vec!["7".to_string()], Vec::new(), assigner, sampler, "0")
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyValueSet("price type"));
    }
}
