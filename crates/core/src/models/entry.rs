use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which list of the ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money spent
    Expense,
    /// Money received
    Income,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Expense => write!(f, "expense"),
            EntryKind::Income => write!(f, "income"),
        }
    }
}

/// A single dated line item of the ledger.
///
/// Entries carry no identifier: their position inside the containing list
/// is what delete operations refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Date the entry is stamped with (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Whole-unit amount
    pub amount: i64,

    /// Optional free-text note. Blank notes are stored as absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_note"
    )]
    pub note: Option<String>,
}

impl Entry {
    pub fn new(date: NaiveDate, amount: i64) -> Self {
        Self {
            date,
            amount,
            note: None,
        }
    }

    /// Create an entry with a note attached. Blank notes are dropped.
    pub fn with_note(date: NaiveDate, amount: i64, note: impl Into<String>) -> Self {
        let note = note.into();
        Self {
            date,
            amount,
            note: non_blank(note),
        }
    }
}

fn non_blank(note: String) -> Option<String> {
    if note.trim().is_empty() {
        None
    } else {
        Some(note)
    }
}

/// Older blobs write `"note": ""` on every entry; read those as absent.
fn deserialize_note<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let note = Option::<String>::deserialize(deserializer)?;
    Ok(note.and_then(non_blank))
}
