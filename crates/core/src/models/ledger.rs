use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryKind};

/// The in-memory ledger: both entry lists in insertion order.
///
/// This is the single source of truth for a session. Storage only ever
/// holds whole-state snapshots of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub expenses: Vec<Entry>,
    pub income: Vec<Entry>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list targeted by `kind`.
    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Expense => &self.expenses,
            EntryKind::Income => &self.income,
        }
    }

    pub fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Expense => &mut self.expenses,
            EntryKind::Income => &mut self.income,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.income.is_empty()
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
        self.income.clear();
    }
}
