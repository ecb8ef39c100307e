//! Money tracker mutators
//!
//! Every mutator validates its raw input first, then changes the document
//! through [`Store::commit`], which persists the whole document. A rejected
//! input leaves both memory and storage untouched.

use crate::config::MoneyConfig;
use crate::error::{AppError, AppResult};
use crate::ids::{Id, IdGenerator};
use crate::interact::Interaction;
use crate::money::format::{parse_amount, plain_amount};
use crate::money::types::{
    Goal, ListItem, MoneyData, MoneySession, Profile, ShoppingList, Transaction, TransactionKind,
};
use crate::storage::{SlotStorage, StorageResult, Store, MONEY_SLOT};
use chrono::{DateTime, Local, NaiveDate};
use std::rc::Rc;

/// Format of the display timestamp stored on transactions
const TRANSACTION_DATE_FORMAT: &str = "%-d/%-m/%Y, %-I:%M:%S %P";

/// The money tracker app: its store plus the id source
pub struct MoneyTracker {
    store: Store<MoneyData>,
    ids: IdGenerator,
    pub(crate) config: MoneyConfig,
}

impl MoneyTracker {
    /// Load the tracker from its slot
    pub fn open(backend: Rc<dyn SlotStorage>, config: MoneyConfig) -> StorageResult<Self> {
        let store = Store::load(backend, MONEY_SLOT, MoneyData::default)?;
        let ids = IdGenerator::seeded(store.state().all_ids());

        tracing::debug!(
            "Loaded money tracker: {} transactions, {} goals, {} lists",
            store.state().transactions().len(),
            store.state().goals.len(),
            store.state().lists.len()
        );

        Ok(Self { store, ids, config })
    }

    pub fn data(&self) -> &MoneyData {
        self.store.state()
    }

    /// Signed in once a profile name has been saved
    pub fn is_signed_in(&self) -> bool {
        !self.data().profile.name.is_empty()
    }

    // ==================== Profile ====================

    /// Create the profile; uses the session's staged photo or the default avatar
    pub fn sign_in(&mut self, session: &mut MoneySession, name: &str, mobile: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter your name"));
        }

        let photo = session
            .pending_photo
            .take()
            .unwrap_or_else(|| self.config.default_photo.clone());

        self.store.commit(|data| {
            data.profile.name = name.to_string();
            data.profile.mobile = mobile.trim().to_string();
            data.profile.photo = photo;
            Ok::<_, AppError>(())
        })?;

        tracing::info!("Signed in as {}", name);
        Ok(())
    }

    /// Update the profile; blank fields keep their current value
    pub fn edit_profile(
        &mut self,
        session: &mut MoneySession,
        name: &str,
        mobile: &str,
    ) -> AppResult<()> {
        let (name, mobile) = (name.trim(), mobile.trim());
        let photo = session.pending_photo.take();

        self.store.commit(|data| {
            if !name.is_empty() {
                data.profile.name = name.to_string();
            }
            if !mobile.is_empty() {
                data.profile.mobile = mobile.to_string();
            }
            if let Some(photo) = photo {
                data.profile.photo = photo;
            }
            Ok::<_, AppError>(())
        })?;

        tracing::info!("Profile updated");
        Ok(())
    }

    /// Delete everything after confirmation
    pub fn sign_out(&mut self, ui: &mut dyn Interaction) -> AppResult<()> {
        if !ui.confirm("Are you sure? All data will be deleted.") {
            return Err(AppError::Declined);
        }
        self.store.reset(MoneyData::default())?;
        tracing::info!("Signed out, money tracker data erased");
        Ok(())
    }

    pub fn set_dark_mode(&mut self, on: bool) -> AppResult<()> {
        self.store.commit(|data| {
            data.profile.dark_mode = on;
            Ok(())
        })
    }

    /// Flip the theme, returning the new setting
    pub fn toggle_dark_mode(&mut self) -> AppResult<bool> {
        let on = !self.data().profile.dark_mode;
        self.set_dark_mode(on)?;
        Ok(on)
    }

    // ==================== Transactions ====================

    /// Record an income or expense entered by the user
    pub fn add_transaction(
        &mut self,
        now: DateTime<Local>,
        kind: TransactionKind,
        amount: &str,
        note: &str,
    ) -> AppResult<Transaction> {
        let amount = parse_amount(amount).ok_or_else(|| AppError::validation("Enter amount"))?;
        let note = match note.trim() {
            "" => kind.default_note().to_string(),
            n => n.to_string(),
        };

        let transaction = self.new_transaction(now, kind, amount, note);
        self.record(transaction)
    }

    /// Empty the log after confirmation; the balance stays
    pub fn clear_history(&mut self, ui: &mut dyn Interaction) -> AppResult<usize> {
        if !ui.confirm("Clear transaction history? Balance will remain same.") {
            return Err(AppError::Declined);
        }
        let cleared = self
            .store
            .commit(|data| Ok::<_, AppError>(data.clear_transactions()))?;
        tracing::info!("Cleared {} transactions", cleared);
        Ok(cleared)
    }

    fn new_transaction(
        &mut self,
        now: DateTime<Local>,
        kind: TransactionKind,
        amount: f64,
        note: String,
    ) -> Transaction {
        Transaction {
            id: self.ids.next(&now),
            date: now.format(TRANSACTION_DATE_FORMAT).to_string(),
            kind,
            amount,
            note,
        }
    }

    /// The one path by which transactions reach the document
    fn record(&mut self, transaction: Transaction) -> AppResult<Transaction> {
        let recorded = transaction.clone();
        self.store.commit(|data| {
            data.apply(transaction);
            Ok::<_, AppError>(())
        })?;
        tracing::info!(
            "Recorded {} {} ({})",
            recorded.kind,
            recorded.amount,
            recorded.id
        );
        Ok(recorded)
    }

    // ==================== Goals ====================

    pub fn add_goal(
        &mut self,
        now: DateTime<Local>,
        name: &str,
        target: &str,
        date: &str,
    ) -> AppResult<Id> {
        let name = name.trim();
        let target = parse_amount(target);
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();

        let (Some(target), Some(date)) = (target, date) else {
            return Err(AppError::validation("Fill all fields"));
        };
        if name.is_empty() {
            return Err(AppError::validation("Fill all fields"));
        }

        let id = self.ids.next(&now);
        self.store.commit(|data| {
            data.goals.push(Goal {
                id,
                name: name.to_string(),
                target,
                date,
            });
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Added goal {} ({})", name, id);
        Ok(id)
    }

    pub fn delete_goal(&mut self, id: Id) -> AppResult<()> {
        if !self.data().goals.iter().any(|g| g.id == id) {
            return Err(AppError::not_found("goal", id));
        }
        self.store.commit(|data| {
            data.goals.retain(|g| g.id != id);
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Deleted goal {}", id);
        Ok(())
    }

    // ==================== Lists ====================

    pub fn create_list(&mut self, now: DateTime<Local>, name: &str) -> AppResult<Id> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Enter List Name"));
        }

        let id = self.ids.next(&now);
        self.store.commit(|data| {
            data.lists.push(ShoppingList {
                id,
                name: name.to_string(),
                items: Vec::new(),
            });
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Created list {} ({})", name, id);
        Ok(id)
    }

    pub fn delete_list(&mut self, id: Id, ui: &mut dyn Interaction) -> AppResult<()> {
        self.list(id)?;
        if !ui.confirm("Delete this list?") {
            return Err(AppError::Declined);
        }
        self.store.commit(|data| {
            data.lists.retain(|l| l.id != id);
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Deleted list {}", id);
        Ok(())
    }

    pub fn add_item(
        &mut self,
        now: DateTime<Local>,
        list_id: Id,
        name: &str,
        qty: &str,
        unit: &str,
    ) -> AppResult<Id> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Enter Item Name"));
        }
        self.list(list_id)?;

        let item = ListItem {
            id: self.ids.next(&now),
            name: name.to_string(),
            qty: match qty.trim() {
                "" => "1".to_string(),
                q => q.to_string(),
            },
            unit: unit.trim().to_string(),
            checked: false,
        };
        let id = item.id;

        self.store.commit(|data| {
            let list = data
                .find_list_mut(list_id)
                .ok_or(AppError::not_found("list", list_id))?;
            list.items.push(item);
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Added item {} to list {}", id, list_id);
        Ok(id)
    }

    /// Flip one item's check mark, returning the new state
    pub fn toggle_item(&mut self, list_id: Id, item_id: Id) -> AppResult<bool> {
        self.item(list_id, item_id)?;
        self.store.commit(|data| {
            let item = data
                .find_list_mut(list_id)
                .and_then(|l| l.items.iter_mut().find(|i| i.id == item_id))
                .ok_or(AppError::not_found("item", item_id))?;
            item.checked = !item.checked;
            Ok(item.checked)
        })
    }

    pub fn delete_item(&mut self, list_id: Id, item_id: Id) -> AppResult<()> {
        self.item(list_id, item_id)?;
        self.store.commit(|data| {
            if let Some(list) = data.find_list_mut(list_id) {
                list.items.retain(|i| i.id != item_id);
            }
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Deleted item {} from list {}", item_id, list_id);
        Ok(())
    }

    /// Deduct one operator-entered total for the checked items
    ///
    /// The items stay as they are; only the balance and log change.
    pub fn direct_deduct(
        &mut self,
        now: DateTime<Local>,
        list_id: Id,
        ui: &mut dyn Interaction,
    ) -> AppResult<Transaction> {
        let list_name = self.checked_list(list_id)?.name.clone();

        let amount = ui
            .prompt("Enter Total Amount to Deduct:")
            .as_deref()
            .and_then(parse_amount)
            .ok_or(AppError::Declined)?;

        let transaction = self.new_transaction(
            now,
            TransactionKind::Expense,
            amount,
            format!("List: {}", list_name),
        );
        let recorded = self.record(transaction)?;
        ui.alert("Balance Deducted!");
        Ok(recorded)
    }

    /// Price each checked item, then deduct the confirmed total
    ///
    /// Blank, non-numeric and non-positive prices count as zero.
    pub fn calc_deduct(
        &mut self,
        now: DateTime<Local>,
        list_id: Id,
        ui: &mut dyn Interaction,
    ) -> AppResult<Transaction> {
        let list = self.checked_list(list_id)?.clone();
        let symbol = self.config.currency_symbol.clone();

        let total: f64 = list
            .checked_items()
            .map(|item| {
                let question = format!(
                    "Price for {} (Qty: {} {}):",
                    item.name, item.qty, item.unit
                );
                ui.prompt(question.trim_end())
                    .as_deref()
                    .and_then(parse_amount)
                    .unwrap_or(0.0)
            })
            .sum();

        if total <= 0.0 {
            return Err(AppError::validation("Total is 0. Please enter prices."));
        }

        let question = format!("Total is {}{}. Deduct from balance?", symbol, plain_amount(total));
        if !ui.confirm(&question) {
            return Err(AppError::Declined);
        }

        let transaction = self.new_transaction(
            now,
            TransactionKind::Expense,
            total,
            format!("List: {}", list.name),
        );
        self.record(transaction)
    }

    // ==================== Lookups ====================

    fn list(&self, id: Id) -> AppResult<&ShoppingList> {
        self.data()
            .find_list(id)
            .ok_or(AppError::not_found("list", id))
    }

    fn item(&self, list_id: Id, item_id: Id) -> AppResult<&ListItem> {
        self.list(list_id)?
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or(AppError::not_found("item", item_id))
    }

    /// A list with at least one checked item
    fn checked_list(&self, id: Id) -> AppResult<&ShoppingList> {
        let list = self.list(id)?;
        if list.checked_items().next().is_none() {
            return Err(AppError::validation("No items selected"));
        }
        Ok(list)
    }

    pub fn profile(&self) -> &Profile {
        &self.data().profile
    }
}
