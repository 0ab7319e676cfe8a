//! Generated output records and per-customer assignments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::seat::SeatCombination;

/// Columns of the combined output file, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutputColumn {
    #[serde(rename = "customerNo")]
    CustomerNo,
    #[serde(rename = "flag")]
    Flag,
    #[serde(rename = "price_type")]
    PriceType,
    #[serde(rename = "grade")]
    Grade,
    #[serde(rename = "floor")]
    Floor,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "row")]
    Row,
    #[serde(rename = "seat")]
    Seat,
}

impl OutputColumn {
    /// Every output column in the fixed output order.
    pub const ALL: [OutputColumn; 9] = [
        OutputColumn::CustomerNo,
        OutputColumn::Flag,
        OutputColumn::PriceType,
        OutputColumn::Grade,
        OutputColumn::Floor,
        OutputColumn::Area,
        OutputColumn::Block,
        OutputColumn::Row,
        OutputColumn::Seat,
    ];

    /// Columns populated from a seat combination.
    pub const SEAT: [OutputColumn; 5] = [
        OutputColumn::Floor,
        OutputColumn::Area,
        OutputColumn::Block,
        OutputColumn::Row,
        OutputColumn::Seat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputColumn::CustomerNo => "customerNo",
            OutputColumn::Flag => "flag",
            OutputColumn::PriceType => "price_type",
            OutputColumn::Grade => "grade",
            OutputColumn::Floor => "floor",
            OutputColumn::Area => "area",
            OutputColumn::Block => "block",
            OutputColumn::Row => "row",
            OutputColumn::Seat => "seat",
        }
    }

    /// Header row of the output file.
    pub fn header() -> [&'static str; 9] {
        Self::ALL.map(Self::as_str)
    }
}

impl fmt::Display for OutputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputColumn {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == name)
            .ok_or_else(|| ConfigurationError::UnknownColumn(name.to_string()))
    }
}

/// Flag and grade fixed for a customer on first encounter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerAssignment {
    pub flag: String,
    pub grade: String,
}

/// Seat fields of an output record. Missing for no-seat customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatFields {
    pub floor: Option<String>,
    pub area: Option<String>,
    pub block: Option<String>,
    pub row: Option<String>,
    pub seat: Option<String>,
}

impl SeatFields {
    /// Copies the seat columns present in `combination`.
    pub fn from_combination(combination: &SeatCombination) -> Self {
        let field = |column: OutputColumn| combination.get(column.as_str()).map(str::to_string);
        Self {
            floor: field(OutputColumn::Floor),
            area: field(OutputColumn::Area),
            block: field(OutputColumn::Block),
            row: field(OutputColumn::Row),
            seat: field(OutputColumn::Seat),
        }
    }

    pub fn is_empty(&self) -> bool {
        OutputColumn::SEAT
            .into_iter()
            .all(|column| self.get(column).is_none())
    }

    fn get(&self, column: OutputColumn) -> Option<&str> {
        let value = match column {
            OutputColumn::Floor => &self.floor,
            OutputColumn::Area => &self.area,
            OutputColumn::Block => &self.block,
            OutputColumn::Row => &self.row,
            OutputColumn::Seat => &self.seat,
            _ => return None,
        };
        value.as_deref()
    }
}

/// One generated row of the combined output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "customerNo")]
    pub customer_no: String,
    pub flag: String,
    pub price_type: String,
    pub grade: String,
    #[serde(flatten)]
    pub seat: SeatFields,
}

impl OutputRecord {
    /// Value of `column`, with missing seat fields rendered as `""`.
    pub fn value(&self, column: OutputColumn) -> &str {
        match column {
            OutputColumn::CustomerNo => &self.customer_no,
            OutputColumn::Flag => &self.flag,
            OutputColumn::PriceType => &self.price_type,
            OutputColumn::Grade => &self.grade,
            seat_column => self.seat.get(seat_column).unwrap_or(""),
        }
    }

    /// All fields in output column order.
    pub fn to_fields(&self) -> [&str; 9] {
        OutputColumn::ALL.map(|column| self.value(column))
    }

    pub fn has_seat(&self) -> bool {
        !self.seat.is_empty()
    }
}
