use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::models::entry::{Entry, EntryKind};
use crate::models::ledger::LedgerState;
use crate::models::summary::{Balance, MonthSummary};

/// Validates input and applies add/delete operations to a ledger, and derives
/// the balance and monthly summaries from it.
///
/// Pure business logic — no I/O, no clock. Easy to test.
#[derive(Debug, Default)]
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Parse the text of an amount field.
    ///
    /// Accepts anything that reads as a finite number without a fractional
    /// part (`"42"`, `" 7 "`, `"1e3"`, `"-5"`). Fractions are rejected, not
    /// rounded. Plain integer text is parsed exactly; other numeric forms go
    /// through `f64`.
    pub fn parse_amount(&self, text: &str, kind: EntryKind) -> Result<i64, CoreError> {
        let text = text.trim();
        if let Ok(amount) = text.parse::<i64>() {
            return Ok(amount);
        }

        let value: f64 = text.parse().map_err(|_| CoreError::InvalidAmount(kind))?;

        if !value.is_finite() || value.fract() != 0.0 {
            return Err(CoreError::InvalidAmount(kind));
        }
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(CoreError::InvalidAmount(kind));
        }

        Ok(value as i64)
    }

    /// Validate `amount_text` and append a new entry stamped with `date`.
    /// Returns the appended entry. The ledger is untouched on error.
    pub fn add_entry(
        &self,
        ledger: &mut LedgerState,
        kind: EntryKind,
        amount_text: &str,
        note: Option<&str>,
        date: NaiveDate,
    ) -> Result<Entry, CoreError> {
        let amount = self.parse_amount(amount_text, kind)?;
        let entry = match note {
            Some(note) => Entry::with_note(date, amount, note),
            None => Entry::new(date, amount),
        };
        ledger.entries_mut(kind).push(entry.clone());
        Ok(entry)
    }

    /// Remove the entry at `index`, keeping the relative order of the rest.
    pub fn remove_entry(
        &self,
        ledger: &mut LedgerState,
        kind: EntryKind,
        index: usize,
    ) -> Result<Entry, CoreError> {
        let entries = ledger.entries_mut(kind);
        if index >= entries.len() {
            return Err(CoreError::EntryNotFound {
                kind,
                index,
                len: entries.len(),
            });
        }
        Ok(entries.remove(index))
    }

    /// Sum of the amounts in one list.
    pub fn total(&self, ledger: &LedgerState, kind: EntryKind) -> i64 {
        Self::sum(ledger.entries(kind))
    }

    /// Total income minus total expenses.
    pub fn balance(&self, ledger: &LedgerState) -> Balance {
        let income = self.total(ledger, EntryKind::Income);
        let expenses = self.total(ledger, EntryKind::Expense);
        Balance::new(income.saturating_sub(expenses))
    }

    /// Expenses falling in the month given as `YYYY-MM`.
    pub fn summarize_month(
        &self,
        ledger: &LedgerState,
        month: &str,
    ) -> Result<MonthSummary, CoreError> {
        let first_day = Self::parse_month(month)?;
        Ok(self.summarize_month_of(ledger, first_day))
    }

    /// Expenses falling in the same month as `date`.
    pub fn summarize_month_of(&self, ledger: &LedgerState, date: NaiveDate) -> MonthSummary {
        let entries: Vec<Entry> = ledger
            .expenses
            .iter()
            .filter(|e| e.date.year() == date.year() && e.date.month() == date.month())
            .cloned()
            .collect();

        MonthSummary {
            month: date.format("%Y-%m").to_string(),
            total_expenses: Self::sum(&entries),
            entries,
        }
    }

    /// Parse a `YYYY-MM` string into the first day of that month.
    fn parse_month(month: &str) -> Result<NaiveDate, CoreError> {
        let bytes = month.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(CoreError::InvalidMonth(month.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidMonth(month.to_string()))
    }

    fn sum(entries: &[Entry]) -> i64 {
        entries
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.amount))
    }
}
