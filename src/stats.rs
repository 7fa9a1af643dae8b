//! Read-only queries over a [`Ledger`]: attendance ranking, cumulative net
//! series and the leaderboard.

use crate::{amount::Amount, ledger::Ledger};
use rust_decimal::Decimal;
use serde::Serialize;

/// Players seen in the last `n` sessions, most frequent first.
///
/// Players with equal attendance stay in the order they were first
/// encountered in the window (`sort_by` keeps equal elements in place).
pub fn people_from_last_n_sessions(ledger: &Ledger, n: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for session in ledger.last_n(n) {
        for person in &session.people {
            match counts.iter_mut().find(|(name, _)| *name == person.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((person.name.as_str(), 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(name, _)| name.to_string()).collect()
}

/// Where the running sum of a [`Series`] starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    /// Sum from the first session of the ledger; the window shows the tail.
    #[default]
    Ledger,
    /// Sum from the first session of the window.
    WindowStart,
}

/// Cumulative net result of one player, one point per session of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<Amount>,
}

/// Running net result of each requested player over the last `n` sessions.
///
/// A session the player skipped still adds a point, with a zero increment.
pub fn cumulative_series(
    ledger: &Ledger,
    people: &[String],
    n: usize,
    baseline: Baseline,
) -> Vec<Series> {
    let n = n.min(ledger.len());
    let skip = ledger.len() - n;
    people
        .iter()
        .map(|person| {
            let nets = ledger
                .sessions()
                .iter()
                .map(|s| s.get(person).map(|p| p.net).unwrap_or(Amount::ZERO));
            let data: Vec<Amount> = match baseline {
                Baseline::Ledger => accumulate(nets).skip(skip).collect(),
                Baseline::WindowStart => accumulate(nets.skip(skip)).collect(),
            };
            Series {
                label: person.clone(),
                data,
            }
        })
        .collect()
}

fn accumulate(values: impl Iterator<Item = Amount>) -> impl Iterator<Item = Amount> {
    values.scan(Amount::ZERO, |sum, value| {
        *sum = *sum + value;
        Some(*sum)
    })
}

/// One row of the per-player stats table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonStats {
    pub name: String,
    pub profit: Amount,
    pub win_ratio: Amount,
    pub profit_per_session: Amount,
    pub sessions: usize,
}

/// A single leaderboard record, `person` is `None` while nobody holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStat {
    pub desc: &'static str,
    pub amount: Amount,
    pub person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl OverallStat {
    fn new(desc: &'static str) -> Self {
        Self {
            desc,
            amount: Amount::ZERO,
            person: None,
            date: None,
        }
    }

    fn take(&mut self, amount: Amount, person: &str, date: Option<&str>) {
        self.amount = amount;
        self.person = Some(person.to_string());
        self.date = date.map(str::to_string);
    }

    /// Losses are tracked as magnitudes and reported as negative amounts.
    fn into_loss(mut self) -> Self {
        if !self.amount.is_zero() {
            self.amount = -self.amount;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub per_person: Vec<PersonStats>,
    /// Chip leader, biggest single session win, biggest loser and biggest
    /// single session loss, in that order.
    pub overall: Vec<OverallStat>,
}

/// Results of every player in first-appearance order.
fn results_by_person(ledger: &Ledger) -> Vec<(&str, Vec<(Amount, &str)>)> {
    let mut by_person: Vec<(&str, Vec<(Amount, &str)>)> = Vec::new();
    for session in ledger.sessions() {
        for person in &session.people {
            let item = (person.net, session.date.as_str());
            match by_person.iter_mut().find(|(name, _)| *name == person.name) {
                Some((_, results)) => results.push(item),
                None => by_person.push((person.name.as_str(), vec![item])),
            }
        }
    }
    by_person
}

/// Leaderboard and per-player stats over the whole ledger.
///
/// A record changes hands only when strictly beaten, so ties stay with the
/// earlier player.
pub fn compute_stats(ledger: &Ledger) -> Stats {
    let mut chip_leader = OverallStat::new("Chip Leader");
    let mut biggest_loser = OverallStat::new("Biggest Loser");
    let mut biggest_win = OverallStat::new("Biggest single session win");
    let mut biggest_loss = OverallStat::new("Biggest single session loss");

    let mut per_person = Vec::new();
    for (person, results) in results_by_person(ledger) {
        let mut net = Amount::ZERO;
        let mut wins = 0u32;
        for &(result, date) in &results {
            if result.is_positive() {
                wins += 1;
            }
            net = net + result;
            if result.is_negative() && result.abs() > biggest_loss.amount {
                biggest_loss.take(result.abs(), person, Some(date));
            }
            if result.is_positive() && result > biggest_win.amount {
                biggest_win.take(result, person, Some(date));
            }
        }
        if net > chip_leader.amount {
            chip_leader.take(net, person, None);
        }
        if net.is_negative() && net.abs() > biggest_loser.amount {
            biggest_loser.take(net.abs(), person, None);
        }

        let sessions = Decimal::from(results.len());
        per_person.push(PersonStats {
            name: person.to_string(),
            profit: net.round2(),
            win_ratio: Amount(Decimal::from(wins) / sessions).round2(),
            profit_per_session: Amount(net.0 / sessions).round2(),
            sessions: results.len(),
        });
    }

    Stats {
        per_person,
        overall: vec![
            chip_leader,
            biggest_win,
            biggest_loser.into_loss(),
            biggest_loss.into_loss(),
        ],
    }
}
