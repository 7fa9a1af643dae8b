use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

use std::ops::{Add, Deref, Neg, Sub};
use std::str::FromStr;

/// Largest magnitude accepted for a cash-out cell or a player's total buy-in.
const CELL_LIMIT: i64 = 1_000_000_000_000;

/// Money value of a ledger cell (buy-in, cash-out or net result).
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default)]
pub struct Amount(pub Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Parses a decimal cell such as `"220"`, `"87.5"` or `"-12.25"`.
    ///
    /// Returns `None` for empty or non numeric text; callers attach the
    /// row context to the error.
    pub fn parse(cell: &str) -> Option<Self> {
        Decimal::from_str(cell.trim()).ok().map(Amount)
    }

    /// Rounds to cents, midpoints away from zero.
    pub fn round2(self) -> Self {
        Amount(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Whether the amount fits the range accepted from a sheet cell.
    ///
    /// Keeping every cell in range leaves sums over any realistic ledger far
    /// from `Decimal::MAX`.
    pub fn within_limit(&self) -> bool {
        self.0.abs() <= Decimal::from(CELL_LIMIT)
    }

    pub fn checked_mul(self, rhs: Amount) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn abs(self) -> Self {
        Amount(self.0.abs())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount(d)
    }
}

impl From<u32> for Amount {
    fn from(n: u32) -> Self {
        Amount(Decimal::from(n))
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;
    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

/// Amounts are rendered the way the stat cards show them: two decimals.
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.02}", self.round2().0))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.02}", self.round2().0)
    }
}
