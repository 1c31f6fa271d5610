// ═══════════════════════════════════════════════════════════════════
// Model Tests — Entry, LedgerState, Balance, Settings, drafts, errors
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use daily_expenses_core::errors::CoreError;
use daily_expenses_core::models::draft::EntryDraft;
use daily_expenses_core::models::entry::{Entry, EntryKind};
use daily_expenses_core::models::ledger::LedgerState;
use daily_expenses_core::models::settings::{Settings, DEFAULT_RETENTION_DAYS, DEFAULT_STORAGE_KEY};
use daily_expenses_core::models::summary::{Balance, BalanceSign, MonthSummary};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── Entry ───────────────────────────────────────────────────────────

mod entry {
    use super::*;

    #[test]
    fn with_note_drops_whitespace_only_notes() {
        assert_eq!(Entry::with_note(date("2024-01-01"), 1, "   ").note, None);
        assert_eq!(
            Entry::with_note(date("2024-01-01"), 1, "rent").note.as_deref(),
            Some("rent")
        );
    }

    #[test]
    fn absent_note_is_not_serialized() {
        let json = serde_json::to_string(&Entry::new(date("2024-01-01"), 9)).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-01","amount":9}"#);
    }

    #[test]
    fn kind_display() {
        assert_eq!(EntryKind::Expense.to_string(), "expense");
        assert_eq!(EntryKind::Income.to_string(), "income");
    }
}

// ── LedgerState ─────────────────────────────────────────────────────

mod ledger_state {
    use super::*;

    #[test]
    fn entries_by_kind() {
        let mut state = LedgerState::new();
        assert!(state.is_empty());
        state.entries_mut(EntryKind::Income).push(Entry::new(date("2024-01-01"), 5));
        assert_eq!(state.entries(EntryKind::Income).len(), 1);
        assert!(state.entries(EntryKind::Expense).is_empty());
        state.clear();
        assert!(state.is_empty());
    }
}

// ── Balance & MonthSummary ──────────────────────────────────────────

mod summary {
    use super::*;

    #[test]
    fn balance_sign() {
        assert_eq!(Balance::new(-1).sign, BalanceSign::Negative);
        assert_eq!(Balance::new(0).sign, BalanceSign::Zero);
        assert_eq!(Balance::new(12).sign, BalanceSign::Positive);
        assert_eq!(Balance::default(), Balance::new(0));
        assert_eq!(Balance::new(-7).to_string(), "-7");
    }

    #[test]
    fn total_display_has_two_decimals() {
        let summary = MonthSummary {
            month: "2024-03".into(),
            total_expenses: -15,
            entries: Vec::new(),
        };
        assert_eq!(summary.total_display(), "-15.00");
    }
}

// ── Settings ────────────────────────────────────────────────────────

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.retention_days, DEFAULT_RETENTION_DAYS);
        assert_eq!(s.retention().num_days(), 30);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s = Settings::from_json(r#"{"storage_key": "ledger"}"#).unwrap();
        assert_eq!(s.storage_key, "ledger");
        assert_eq!(s.retention_days, DEFAULT_RETENTION_DAYS);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(CoreError::Deserialization(_))
        ));
    }
}

// ── EntryDraft ──────────────────────────────────────────────────────

mod draft {
    use super::*;

    #[test]
    fn clear_empties_both_fields() {
        let mut d = EntryDraft {
            amount: "5".into(),
            note: "x".into(),
        };
        assert!(!d.is_empty());
        d.clear();
        assert!(d.is_empty());
    }
}

// ── CoreError ───────────────────────────────────────────────────────

mod errors {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            CoreError::EntryNotFound { kind: EntryKind::Expense, index: 4, len: 2 }.to_string(),
            "No expense entry at index 4 (list has 2 entries)"
        );
        assert_eq!(
            CoreError::InvalidMonth("2024".into()).to_string(),
            "Invalid month (expected YYYY-MM): 2024"
        );
        assert_eq!(CoreError::Storage("x".into()).to_string(), "Storage error: x");
    }

    #[test]
    fn validation_vs_storage() {
        assert!(CoreError::InvalidAmount(EntryKind::Income).is_validation());
        assert!(!CoreError::Storage("x".into()).is_validation());
        assert!(!CoreError::FileIO("x".into()).is_validation());
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(msg) if msg.contains("denied")));
    }
}
