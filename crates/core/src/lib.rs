pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{DateTime, NaiveDate, Utc};
use models::{
    draft::EntryDraft,
    entry::{Entry, EntryKind},
    ledger::LedgerState,
    settings::Settings,
    summary::{Balance, MonthSummary},
};
use services::ledger_service::LedgerService;
use std::sync::Arc;
use storage::{
    blob::BlobStore,
    manager::{LoadOutcome, StorageManager},
};

use errors::CoreError;

/// Main entry point for the Daily Expenses core library.
///
/// Owns the ledger and the state of the entry form. A UI reads the
/// projection accessors and dispatches intents through the mutating methods.
/// Every successful mutation schedules a snapshot write; storage failures are
/// logged and never reach the caller.
#[must_use]
pub struct DailyExpenses {
    ledger: LedgerState,
    ledger_service: LedgerService,
    storage: StorageManager,
    settings: Settings,
    /// Date newly added entries are stamped with.
    selected_date: NaiveDate,
    /// Balance captured when the date was last changed.
    previous_day_balance: Balance,
    expenses_summary: Option<MonthSummary>,
    expense_draft: EntryDraft,
    income_draft: EntryDraft,
}

impl std::fmt::Debug for DailyExpenses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyExpenses")
            .field("expenses", &self.ledger.expenses.len())
            .field("income", &self.ledger.income.len())
            .field("selected_date", &self.selected_date)
            .field("storage", &self.storage)
            .finish()
    }
}

impl DailyExpenses {
    /// Create an empty ledger backed by `store`, with default settings.
    /// Call [`restore`](Self::restore) to hydrate it from storage.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: Arc<dyn BlobStore>, settings: Settings) -> Self {
        let storage = StorageManager::new(store, &settings);
        Self {
            ledger: LedgerState::new(),
            ledger_service: LedgerService::new(),
            storage,
            settings,
            selected_date: Utc::now().date_naive(),
            previous_day_balance: Balance::default(),
            expenses_summary: None,
            expense_draft: EntryDraft::default(),
            income_draft: EntryDraft::default(),
        }
    }

    /// Create a ledger and hydrate it from storage in one step.
    pub async fn open(store: Arc<dyn BlobStore>, settings: Settings) -> Self {
        let mut tracker = Self::with_settings(store, settings);
        tracker.restore().await;
        tracker
    }

    // ── Entries ─────────────────────────────────────────────────────

    /// Add an expense stamped with the selected date.
    /// On success the expense form is cleared; on error nothing changes.
    pub fn add_expense(&mut self, amount_text: &str, note: Option<&str>) -> Result<(), CoreError> {
        self.add_entry(EntryKind::Expense, amount_text, note)
    }

    /// Add an income entry stamped with the selected date.
    /// On success the income form is cleared; on error nothing changes.
    pub fn add_income(&mut self, amount_text: &str, note: Option<&str>) -> Result<(), CoreError> {
        self.add_entry(EntryKind::Income, amount_text, note)
    }

    /// Remove the expense at `index`. Returns the removed entry.
    pub fn delete_expense(&mut self, index: usize) -> Result<Entry, CoreError> {
        self.delete_entry(EntryKind::Expense, index)
    }

    /// Remove the income entry at `index`. Returns the removed entry.
    pub fn delete_income(&mut self, index: usize) -> Result<Entry, CoreError> {
        self.delete_entry(EntryKind::Income, index)
    }

    // ── Entry form ──────────────────────────────────────────────────

    pub fn set_expense_input(&mut self, text: impl Into<String>) {
        self.expense_draft.amount = text.into();
    }

    pub fn set_expense_note(&mut self, text: impl Into<String>) {
        self.expense_draft.note = text.into();
    }

    pub fn set_income_input(&mut self, text: impl Into<String>) {
        self.income_draft.amount = text.into();
    }

    pub fn set_income_note(&mut self, text: impl Into<String>) {
        self.income_draft.note = text.into();
    }

    #[must_use]
    pub fn expense_draft(&self) -> &EntryDraft {
        &self.expense_draft
    }

    #[must_use]
    pub fn income_draft(&self) -> &EntryDraft {
        &self.income_draft
    }

    /// Add an expense from the current expense form.
    pub fn submit_expense(&mut self) -> Result<(), CoreError> {
        let draft = self.expense_draft.clone();
        self.add_expense(&draft.amount, Some(&draft.note))
    }

    /// Add an income entry from the current income form.
    pub fn submit_income(&mut self) -> Result<(), CoreError> {
        let draft = self.income_draft.clone();
        self.add_income(&draft.amount, Some(&draft.note))
    }

    // ── Date selection ──────────────────────────────────────────────

    /// Change the date new entries are stamped with.
    ///
    /// Records the balance at the moment of the change and refreshes the
    /// expense summary for the month of `date`.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.previous_day_balance = self.balance();
        self.selected_date = date;
        self.expenses_summary = Some(self.ledger_service.summarize_month_of(&self.ledger, date));
    }

    #[must_use]
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    #[must_use]
    pub fn previous_day_balance(&self) -> Balance {
        self.previous_day_balance
    }

    /// Summary of the month last picked with [`select_date`](Self::select_date).
    #[must_use]
    pub fn expenses_summary(&self) -> Option<&MonthSummary> {
        self.expenses_summary.as_ref()
    }

    // ── Derived values ──────────────────────────────────────────────

    #[must_use]
    pub fn balance(&self) -> Balance {
        self.ledger_service.balance(&self.ledger)
    }

    /// Expenses of the month given as `YYYY-MM`, with their total.
    pub fn summarize_month(&self, month: &str) -> Result<MonthSummary, CoreError> {
        self.ledger_service.summarize_month(&self.ledger, month)
    }

    #[must_use]
    pub fn total_expenses(&self) -> i64 {
        self.ledger_service.total(&self.ledger, EntryKind::Expense)
    }

    #[must_use]
    pub fn total_income(&self) -> i64 {
        self.ledger_service.total(&self.ledger, EntryKind::Income)
    }

    // ── Projection ──────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.ledger
    }

    #[must_use]
    pub fn expenses(&self) -> &[Entry] {
        &self.ledger.expenses
    }

    #[must_use]
    pub fn income(&self) -> &[Entry] {
        &self.ledger.income
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pretty JSON dump of the ledger (debugging / export).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write a snapshot of the current state in the background.
    ///
    /// Fire-and-forget: returns immediately, failures are only logged.
    /// Outside a tokio runtime the write is skipped (and logged).
    pub fn persist(&mut self) {
        self.persist_at(Utc::now());
    }

    /// Like [`persist`](Self::persist) with an explicit snapshot timestamp.
    pub fn persist_at(&mut self, now: DateTime<Utc>) {
        if let Err(e) = self.storage.schedule_save(&self.ledger, now) {
            tracing::error!(error = %e, "failed to schedule ledger snapshot");
        }
    }

    /// Hydrate the ledger from storage.
    ///
    /// A missing snapshot leaves the state as is. An expired one is removed
    /// from storage and the ledger is reset to empty. Read or decode failures
    /// are logged and leave the state untouched.
    pub async fn restore(&mut self) {
        self.restore_at(Utc::now()).await;
    }

    /// Like [`restore`](Self::restore), judging expiry against `now`.
    pub async fn restore_at(&mut self, now: DateTime<Utc>) {
        match self.storage.load(now).await {
            Ok(LoadOutcome::Missing) => {
                tracing::debug!(key = self.storage.key(), "no stored ledger snapshot");
            }
            Ok(LoadOutcome::Loaded(state)) => {
                tracing::debug!(
                    expenses = state.expenses.len(),
                    income = state.income.len(),
                    "restored ledger snapshot"
                );
                self.ledger = state;
            }
            Ok(LoadOutcome::Expired) => {
                tracing::info!(
                    retention_days = self.settings.retention_days,
                    "discarding expired ledger snapshot"
                );
                self.clear().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load ledger snapshot");
            }
        }
    }

    /// Remove the stored snapshot and empty both lists.
    pub async fn clear(&mut self) {
        if let Err(e) = self.storage.clear().await {
            tracing::error!(error = %e, "failed to remove ledger snapshot");
        }
        self.ledger.clear();
    }

    /// Wait for every scheduled snapshot write to finish.
    pub async fn flush(&mut self) {
        self.storage.flush().await;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn add_entry(
        &mut self,
        kind: EntryKind,
        amount_text: &str,
        note: Option<&str>,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .add_entry(&mut self.ledger, kind, amount_text, note, self.selected_date)?;
        self.draft_mut(kind).clear();
        self.persist();
        Ok(())
    }

    fn delete_entry(&mut self, kind: EntryKind, index: usize) -> Result<Entry, CoreError> {
        let removed = self
            .ledger_service
            .remove_entry(&mut self.ledger, kind, index)?;
        self.persist();
        Ok(removed)
    }

    fn draft_mut(&mut self, kind: EntryKind) -> &mut EntryDraft {
        match kind {
            EntryKind::Expense => &mut self.expense_draft,
            EntryKind::Income => &mut self.income_draft,
        }
    }
}
