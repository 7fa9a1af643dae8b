use crate::{amount::Amount, error::Errors, rebuys::RebuyMap, record::RawRow};
use serde::Serialize;

/// One player's result in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonResult {
    pub name: String,
    #[serde(rename = "in")]
    pub spent: Amount,
    pub out: Amount,
    pub net: Amount,
}

/// A played session. Only players who attended are present in `people`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub date: String,
    pub people: Vec<PersonResult>,
}

impl Session {
    pub fn get(&self, name: &str) -> Option<&PersonResult> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn attended(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sum of every player's net result.
    pub fn total_net(&self) -> Amount {
        self.people.iter().map(|p| p.net).sum()
    }
}

/// Turns one sheet row into a session.
///
/// Every non-empty person column is a player who bought in once plus their
/// rebuys, and cashed out the amount written in their cell. Cash-outs and
/// total buy-ins beyond [`Amount::within_limit`] are rejected.
pub fn normalize(row: &RawRow, buyin: Amount, rebuys: &RebuyMap) -> Result<Session, Errors> {
    let date = row.date();
    let mut people = Vec::new();
    for (name, cell) in row.players() {
        let overflow = |value: String| Errors::AmountOverflow {
            date: date.to_string(),
            person: name.to_string(),
            value,
        };
        let buyins = rebuys.get(name).copied().unwrap_or(0).saturating_add(1);
        let spent = Amount::from(buyins)
            .checked_mul(buyin)
            .filter(Amount::within_limit)
            .ok_or_else(|| overflow(format!("buy-in {} x {}", buyins, buyin.0)))?;
        let out = Amount::parse(cell).ok_or_else(|| Errors::InvalidCashOut {
            date: date.to_string(),
            person: name.to_string(),
            value: cell.to_string(),
        })?;
        if !out.within_limit() {
            return Err(overflow(format!("cash-out {}", cell)));
        }
        let net = out
            .checked_sub(spent)
            .ok_or_else(|| overflow(format!("net {} - {}", out.0, spent.0)))?;
        people.push(PersonResult {
            name: name.to_string(),
            spent,
            out,
            net,
        });
    }

    for name in rebuys.keys() {
        if !people.iter().any(|p| &p.name == name) {
            tracing::debug!(date, person = %name, "rebuy listed for someone who did not play");
        }
    }

    Ok(Session {
        date: date.to_string(),
        people,
    })
}
