use crate::{
    amount::Amount,
    error::Errors,
    rebuys,
    record::RawRow,
    session::{self, Session},
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sessions in sheet order, which is taken as chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    sessions: Vec<Session>,
}

impl Ledger {
    /// Builds the ledger from sheet rows.
    ///
    /// No row is skipped: a row nobody played produces an empty session,
    /// whatever its `Buyin` cell holds.
    /// The first malformed row aborts the load, so a partial ledger is never
    /// returned.
    pub fn build(rows: &[RawRow]) -> Result<Self, Errors> {
        let mut sessions = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let session = parse_row(row).map_err(|e| e.in_row(index + 1, row.date()))?;
            sessions.push(session);
        }
        tracing::debug!(sessions = sessions.len(), "ledger built");
        Ok(Self { sessions })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The trailing `n` sessions, `n` clamped to the ledger length.
    pub fn last_n(&self, n: usize) -> &[Session] {
        let n = n.min(self.sessions.len());
        &self.sessions[self.sessions.len() - n..]
    }

    pub fn latest(&self) -> Option<&Session> {
        self.sessions.last()
    }
}

impl From<Vec<Session>> for Ledger {
    fn from(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }
}

fn parse_buyin(cell: &str) -> Result<Amount, Errors> {
    let buyin = cell
        .trim()
        .parse::<i64>()
        .map_err(|_| Errors::InvalidBuyin(cell.to_string()))?;
    if buyin < 0 {
        return Err(Errors::NegativeAmount(buyin));
    }
    Ok(Amount(Decimal::from(buyin)))
}

fn parse_row(row: &RawRow) -> Result<Session, Errors> {
    // the buy-in only matters once somebody played
    let buyin = if row.players().next().is_some() {
        parse_buyin(row.get_or_empty("Buyin"))?
    } else {
        Amount::ZERO
    };
    let rebuys = rebuys::decode(row.get_or_empty("Rebuys"))?;
    session::normalize(row, buyin, &rebuys)
}
