use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::ledger::LedgerState;

/// The whole-state record written to the blob store.
///
/// Field names follow the stored JSON layout:
/// ```text
/// { "timestamp": <epoch ms>, "expensesList": [...], "incomeList": [...] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp: i64,

    #[serde(rename = "expensesList", default)]
    pub expenses: Vec<Entry>,

    #[serde(rename = "incomeList", default)]
    pub income: Vec<Entry>,
}

impl PersistedSnapshot {
    /// Capture the full ledger state at `now`.
    pub fn capture(state: &LedgerState, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.timestamp_millis(),
            expenses: state.expenses.clone(),
            income: state.income.clone(),
        }
    }

    /// A snapshot is expired once it is strictly older than `retention`.
    /// A snapshot exactly `retention` old is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        now.timestamp_millis() - self.timestamp > retention.num_milliseconds()
    }

    pub fn into_state(self) -> LedgerState {
        LedgerState {
            expenses: self.expenses,
            income: self.income,
        }
    }
}
