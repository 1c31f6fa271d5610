use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Classification of a balance, used only for presentation (e.g. colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSign {
    Negative,
    Positive,
    Zero,
}

impl BalanceSign {
    pub fn of(amount: i64) -> Self {
        match amount.signum() {
            -1 => BalanceSign::Negative,
            1 => BalanceSign::Positive,
            _ => BalanceSign::Zero,
        }
    }
}

/// Net balance: total income minus total expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: i64,
    pub sign: BalanceSign,
}

impl Balance {
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            sign: BalanceSign::of(amount),
        }
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}

/// Expenses of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// `YYYY-MM`
    pub month: String,

    pub total_expenses: i64,

    /// Matching expenses, in insertion order
    pub entries: Vec<Entry>,
}

impl MonthSummary {
    /// The total with two decimals, as displayed in the summary view (`"120.00"`).
    pub fn total_display(&self) -> String {
        format!("{}.00", self.total_expenses)
    }
}
