pub mod errors;
pub mod logging;
pub mod models;
pub mod providers;
pub mod security;
pub mod services;
pub mod storage;

use chrono::{Datelike, NaiveDateTime, Utc};
use models::{
    backup::BackupSnapshot,
    budget::{Budget, BudgetStatus, NewBudget},
    category::{Category, NewCategory},
    filter::TransactionFilter,
    report::{BalancePoint, CategoryTotal, MonthlyTotals, Summary},
    settings::{Currency, Language, Settings, Theme},
    state::TrackerState,
    transaction::{NewTransaction, Transaction, TransactionType},
};
use providers::{registry::AdviceProviderRegistry, traits::AdviceProvider};
use security::pin::PinLock;
use services::{
    advice_service::AdviceService, aggregation_service::AggregationService,
    budget_service::BudgetService, category_service::CategoryService,
    format_service::FormatService, transaction_service::TransactionService,
};
use storage::{backup::BackupManager, manager::StorageManager, store::KeyValueStore};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the budget tracker core library.
/// Holds the tracker state, its storage and all services needed to operate on it.
///
/// Every mutation updates the in-memory collection first, then writes the
/// affected storage slot. Write failures are logged and never surfaced.
#[must_use]
pub struct BudgetTracker {
    state: TrackerState,
    storage: StorageManager,
    transaction_service: TransactionService,
    budget_service: BudgetService,
    category_service: CategoryService,
    aggregation_service: AggregationService,
    format_service: FormatService,
    advice_service: AdviceService,
    /// PIN accepted during this session
    unlocked: bool,
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("transactions", &self.state.transactions.len())
            .field("budgets", &self.state.budgets.len())
            .field("categories", &self.state.categories.len())
            .field("settings", &self.state.settings)
            .field("storage", &self.storage)
            .field("unlocked", &self.unlocked)
            .finish()
    }
}

impl BudgetTracker {
    /// Load all four slots from `store`. Absent or corrupt slots fall back to defaults.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_storage(StorageManager::new(store))
    }

    pub fn with_storage(storage: StorageManager) -> Self {
        let state = storage.load_state();
        tracing::info!(
            transactions = state.transactions.len(),
            budgets = state.budgets.len(),
            categories = state.categories.len(),
            "budget tracker loaded"
        );
        Self::build(state, storage)
    }

    /// A tracker backed by a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::with_storage(StorageManager::in_memory())
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Validate and record a transaction. Returns its new id.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Uuid, CoreError> {
        let id = self
            .transaction_service
            .add_transaction(&mut self.state.transactions, draft)?;
        self.persist_transactions();
        Ok(id)
    }

    /// Record several transactions at once. Nothing is added if any draft is invalid.
    pub fn add_transactions(&mut self, drafts: Vec<NewTransaction>) -> Result<Vec<Uuid>, CoreError> {
        let ids = self
            .transaction_service
            .add_transactions(&mut self.state.transactions, drafts)?;
        self.persist_transactions();
        Ok(ids)
    }

    pub fn remove_transaction(&mut self, transaction_id: Uuid) -> Result<Transaction, CoreError> {
        let removed = self
            .transaction_service
            .remove_transaction(&mut self.state.transactions, transaction_id)?;
        self.persist_transactions();
        Ok(removed)
    }

    /// All transactions in store order (newest-added first).
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    #[must_use]
    pub fn get_transaction(&self, transaction_id: Uuid) -> Option<&Transaction> {
        self.state
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
    }

    /// All transactions, newest date first.
    #[must_use]
    pub fn transactions_newest_first(&self) -> Vec<&Transaction> {
        self.transaction_service
            .sorted_newest_first(&self.state.transactions)
    }

    /// Transactions matching `filter`, newest first. Relative periods resolve against `now`.
    #[must_use]
    pub fn filter_transactions(
        &self,
        filter: &TransactionFilter,
        now: NaiveDateTime,
    ) -> Vec<&Transaction> {
        self.aggregation_service
            .filter(&self.state.transactions, filter, now)
    }

    #[must_use]
    pub fn summarize(&self, filter: &TransactionFilter, now: NaiveDateTime) -> Summary {
        self.aggregation_service
            .summarize(&self.state.transactions, filter, now)
    }

    #[must_use]
    pub fn category_breakdown(&self, transaction_type: TransactionType) -> Vec<CategoryTotal> {
        self.aggregation_service
            .bucket_by_category(&self.state.transactions, transaction_type)
    }

    #[must_use]
    pub fn monthly_totals(&self) -> Vec<MonthlyTotals> {
        self.aggregation_service
            .bucket_by_month(&self.state.transactions)
    }

    #[must_use]
    pub fn running_balance(&self) -> Vec<BalancePoint> {
        self.aggregation_service
            .running_balance(&self.state.transactions)
    }

    /// Export every transaction as CSV, newest date first.
    #[must_use]
    pub fn export_transactions_csv(&self) -> String {
        let ordered: Vec<Transaction> = self
            .transactions_newest_first()
            .into_iter()
            .cloned()
            .collect();
        self.transaction_service.to_csv(&ordered)
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Add a monthly spending limit. At most one budget per category name.
    pub fn add_budget(&mut self, draft: NewBudget) -> Result<Uuid, CoreError> {
        let id = self
            .budget_service
            .add_budget(&mut self.state.budgets, draft)?;
        self.persist_budgets();
        Ok(id)
    }

    pub fn remove_budget(&mut self, budget_id: Uuid) -> Result<Budget, CoreError> {
        let removed = self
            .budget_service
            .remove_budget(&mut self.state.budgets, budget_id)?;
        self.persist_budgets();
        Ok(removed)
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    /// Evaluate every budget against the expenses of the given month (1-based).
    #[must_use]
    pub fn budget_status_for(&self, month: u32, year: i32) -> Vec<BudgetStatus> {
        self.budget_service.evaluate_budgets(
            &self.state.budgets,
            &self.state.transactions,
            month,
            year,
        )
    }

    /// Evaluate every budget against the current calendar month (local clock).
    #[must_use]
    pub fn current_budget_status(&self) -> Vec<BudgetStatus> {
        let now = Self::now();
        self.budget_status_for(now.month(), now.year())
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_category(&mut self, draft: NewCategory) -> Result<Uuid, CoreError> {
        let id = self
            .category_service
            .add_category(&mut self.state.categories, draft)?;
        self.persist_categories();
        Ok(id)
    }

    /// Replace a category's fields. Transactions keep the name they were recorded with.
    pub fn update_category(&mut self, category_id: Uuid, draft: NewCategory) -> Result<(), CoreError> {
        self.category_service
            .update_category(&mut self.state.categories, category_id, draft)?;
        self.persist_categories();
        Ok(())
    }

    /// Remove a category. Transactions and budgets using its name are left as they are.
    pub fn remove_category(&mut self, category_id: Uuid) -> Result<Category, CoreError> {
        let removed = self
            .category_service
            .remove_category(&mut self.state.categories, category_id)?;
        self.persist_categories();
        Ok(removed)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    #[must_use]
    pub fn categories_for(&self, transaction_type: TransactionType) -> Vec<&Category> {
        self.category_service
            .categories_for(&self.state.categories, transaction_type)
    }

    /// Look up the category a stored name refers to, if it still exists.
    #[must_use]
    pub fn resolve_category(&self, name: &str) -> Option<&Category> {
        self.category_service.resolve(&self.state.categories, name)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.settings.language = language;
        self.persist_settings();
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.state.settings.currency = currency;
        self.persist_settings();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.settings.theme = theme;
        self.persist_settings();
    }

    pub fn set_pro(&mut self, is_pro: bool) {
        self.state.settings.is_pro = is_pro;
        self.persist_settings();
    }

    /// Set an API key for an advice provider (e.g., "gemini").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.state.settings.api_keys.insert(provider, key);
        self.rebuild_advice_service();
        self.persist_settings();
    }

    /// Remove an API key for a provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.state.settings.api_keys.remove(provider).is_some();
        if removed {
            self.rebuild_advice_service();
            self.persist_settings();
        }
        removed
    }

    // ── PIN Lock ────────────────────────────────────────────────────

    /// Protect the app with a four-digit PIN. The current session stays unlocked.
    pub fn set_pin(&mut self, pin: &str) -> Result<(), CoreError> {
        let lock = PinLock::new(pin)?;
        self.state.settings.pin = Some(lock);
        self.unlocked = true;
        self.persist_settings();
        Ok(())
    }

    /// Remove PIN protection. Requires the current PIN.
    pub fn disable_pin(&mut self, current_pin: &str) -> Result<(), CoreError> {
        if !self.verify_pin(current_pin) {
            return Err(CoreError::ValidationError("Incorrect PIN".into()));
        }
        self.state.settings.pin = None;
        self.persist_settings();
        Ok(())
    }

    /// Check a PIN and unlock the session on success.
    /// Always succeeds when no PIN is configured.
    pub fn verify_pin(&mut self, pin: &str) -> bool {
        let ok = match &self.state.settings.pin {
            Some(lock) => lock.verify(pin),
            None => true,
        };
        if ok {
            self.unlocked = true;
        } else {
            tracing::warn!("incorrect PIN entered");
        }
        ok
    }

    /// Lock the session again; no-op without a PIN.
    pub fn lock(&mut self) {
        self.unlocked = !self.state.settings.has_pin_protection();
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.settings.has_pin_protection() && !self.unlocked
    }

    // ── Backup & Restore ────────────────────────────────────────────

    /// Capture the whole state as a backup snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BackupSnapshot {
        BackupSnapshot::capture(&self.state, Utc::now())
    }

    /// Export the whole state as JSON and record the backup date.
    pub fn export_backup_json(&mut self) -> Result<String, CoreError> {
        let json = BackupManager::to_json(&self.snapshot())?;
        self.mark_backed_up();
        Ok(json)
    }

    /// Replace all state with a JSON backup. Nothing changes if the backup is invalid.
    pub fn restore_backup_json(&mut self, json: &str) -> Result<(), CoreError> {
        let snapshot = BackupManager::from_json(json)?;
        self.restore(snapshot);
        Ok(())
    }

    /// Export the whole state encrypted with `password` and record the backup date.
    pub fn export_encrypted_backup(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = BackupManager::encrypt(&self.snapshot(), password)?;
        self.mark_backed_up();
        Ok(bytes)
    }

    /// Replace all state with an encrypted backup.
    /// A wrong password fails with `CoreError::Decryption` and changes nothing.
    pub fn restore_encrypted_backup(&mut self, data: &[u8], password: &str) -> Result<(), CoreError> {
        let snapshot = BackupManager::decrypt(data, password)?;
        self.restore(snapshot);
        Ok(())
    }

    // ── Advice & Formatting ─────────────────────────────────────────

    /// Ask the configured providers for advice on the most recent transactions,
    /// written in the configured language.
    pub async fn generate_advice(&self) -> Result<String, CoreError> {
        let settings = &self.state.settings;
        self.advice_service
            .generate(&self.state.transactions, settings.currency, settings.language)
            .await
    }

    /// Add a provider after those configured from API keys.
    /// Dropped again the next time an API key changes.
    pub fn register_advice_provider(&mut self, provider: Box<dyn AdviceProvider>) {
        self.advice_service.register(provider);
    }

    #[must_use]
    pub fn is_advice_available(&self) -> bool {
        self.advice_service.has_provider()
    }

    #[must_use]
    pub fn advice_provider_names(&self) -> Vec<String> {
        self.advice_service.provider_names()
    }

    /// Format an amount in the configured currency and language, e.g. "R$ 1.234,56".
    #[must_use]
    pub fn format_money(&self, value: f64) -> String {
        self.format_service.format_money(value, &self.state.settings)
    }

    /// Format a transaction amount with its sign, e.g. "- R$ 40,00".
    #[must_use]
    pub fn format_transaction_amount(&self, transaction: &Transaction) -> String {
        self.format_service.format_signed(
            transaction.amount,
            transaction.transaction_type,
            &self.state.settings,
        )
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: TrackerState, storage: StorageManager) -> Self {
        let registry = AdviceProviderRegistry::new_with_defaults(&state.settings.api_keys);
        let unlocked = !state.settings.has_pin_protection();

        Self {
            state,
            storage,
            transaction_service: TransactionService::new(),
            budget_service: BudgetService::new(),
            category_service: CategoryService::new(),
            aggregation_service: AggregationService::new(),
            format_service: FormatService::new(),
            advice_service: AdviceService::new(registry),
            unlocked,
        }
    }

    fn now() -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn rebuild_advice_service(&mut self) {
        let registry = AdviceProviderRegistry::new_with_defaults(&self.state.settings.api_keys);
        self.advice_service = AdviceService::new(registry);
    }

    fn mark_backed_up(&mut self) {
        self.state.settings.last_backup_date = Some(Utc::now());
        self.persist_settings();
    }

    fn restore(&mut self, snapshot: BackupSnapshot) {
        tracing::info!(
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            categories = snapshot.categories.len(),
            taken_at = %snapshot.timestamp,
            "restoring backup"
        );
        self.state = snapshot.into_state();
        self.unlocked = !self.state.settings.has_pin_protection();
        self.rebuild_advice_service();
        self.storage.save_state(&self.state);
    }

    fn persist_transactions(&mut self) {
        self.storage.save_transactions(&self.state.transactions);
    }

    fn persist_budgets(&mut self) {
        self.storage.save_budgets(&self.state.budgets);
    }

    fn persist_categories(&mut self) {
        self.storage.save_categories(&self.state.categories);
    }

    fn persist_settings(&mut self) {
        self.storage.save_settings(&self.state.settings);
    }
}
