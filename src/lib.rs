//! Running results of a recurring poker game, computed from the sheet the
//! game is tracked in.
//!
//! Rows are read into [`RawRow`]s, normalized into a [`Ledger`] of
//! [`Session`]s, and then queried for attendance, cumulative results and the
//! leaderboard. [`check_ledger`] flags sessions that do not add up.

pub mod amount;
pub mod consistency;
pub mod error;
pub mod ledger;
pub mod rebuys;
pub mod record;
pub mod session;
pub mod source;
pub mod stats;

pub use amount::Amount;
pub use consistency::{check_ledger, Discrepancy};
pub use error::Errors;
pub use ledger::Ledger;
pub use record::{read_rows, RawRow};
pub use session::{PersonResult, Session};
pub use source::{CsvFileSource, RowSource};
pub use stats::{
    compute_stats, cumulative_series, people_from_last_n_sessions, Baseline, OverallStat,
    PersonStats, Series, Stats,
};
