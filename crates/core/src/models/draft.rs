use serde::{Deserialize, Serialize};

/// Pending, not yet submitted text of one entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub amount: String,
    pub note: String,
}

impl EntryDraft {
    pub fn clear(&mut self) {
        self.amount.clear();
        self.note.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty() && self.note.is_empty()
    }
}
