use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Errors {
    #[error("Malformed rebuy entry '{0}', expected 'name: count'")]
    MalformedRebuy(String),
    #[error("Buy-in '{0}' is not an integer")]
    InvalidBuyin(String),
    #[error("Negative buy-in {0}")]
    NegativeAmount(i64),
    #[error("Cash-out '{value}' of {person} on {date} is not a number")]
    InvalidCashOut {
        date: String,
        person: String,
        value: String,
    },
    #[error("{value} of {person} on {date} is out of range")]
    AmountOverflow {
        date: String,
        person: String,
        value: String,
    },
    #[error("Row {row} ({date}): {source}")]
    Row {
        row: usize,
        date: String,
        #[source]
        source: Box<Errors>,
    },
}

impl Errors {
    /// Wraps a row-level failure with its 1-based data row number.
    pub fn in_row(self, row: usize, date: &str) -> Self {
        Errors::Row {
            row,
            date: date.to_string(),
            source: Box::new(self),
        }
    }
}
