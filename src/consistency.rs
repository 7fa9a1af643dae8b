use crate::{amount::Amount, ledger::Ledger};
use serde::Serialize;

/// A session whose cash-outs do not match its buy-ins.
///
/// `off_by` is the rounded total net of the table: negative means the table
/// holds extra unaccounted money, positive means money is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub date: String,
    pub off_by: Amount,
}

/// Checks that every session conserves money, to the cent.
///
/// Purely diagnostic: each mismatch is logged and returned, nothing fails.
pub fn check_ledger(ledger: &Ledger) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();
    for session in ledger.sessions() {
        let total = session.total_net().round2();
        if !total.is_zero() {
            tracing::warn!(
                date = %session.date,
                off_by = %total,
                "session does not add up (negative means extra money, positive means missing)"
            );
            discrepancies.push(Discrepancy {
                date: session.date.clone(),
                off_by: total,
            });
        }
    }
    discrepancies
}
