//! Money tracker data model
//!
//! The persisted document is `{profile, balance, transactions, goals, lists}`.
//! `balance` is a cached scalar: it only moves through [`MoneyData::apply`],
//! the single path that records a transaction, so it stays equal to the
//! signed sum of the log until the history is explicitly cleared.

use crate::ids::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whole money tracker document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyData {
    pub profile: Profile,
    balance: f64,
    transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub lists: Vec<ShoppingList>,
}

impl MoneyData {
    /// Current balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Transaction log, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Record a transaction and move the balance by its signed amount
    pub fn apply(&mut self, transaction: Transaction) {
        self.balance += transaction.signed_amount();
        self.transactions.insert(0, transaction);
    }

    /// Empty the log; the balance is left as it is
    pub fn clear_transactions(&mut self) -> usize {
        let cleared = self.transactions.len();
        self.transactions.clear();
        cleared
    }

    /// Balance minus the signed sum of the log
    ///
    /// Zero for any history built through [`apply`](Self::apply); non-zero
    /// once the log has been cleared (or edited behind `apply`'s back).
    pub fn ledger_drift(&self) -> f64 {
        let logged: f64 = self.transactions.iter().map(Transaction::signed_amount).sum();
        self.balance - logged
    }

    /// Income and expense totals over the current log
    pub fn totals(&self) -> Totals {
        self.transactions
            .iter()
            .fold(Totals::default(), |mut totals, t| {
                match t.kind {
                    TransactionKind::Income => totals.income += t.amount,
                    TransactionKind::Expense => totals.expense += t.amount,
                }
                totals
            })
    }

    pub fn find_list(&self, id: Id) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub(crate) fn find_list_mut(&mut self, id: Id) -> Option<&mut ShoppingList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    /// Every id in the document, used to seed the id generator
    pub fn all_ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.transactions.iter().map(|t| t.id).collect();
        ids.extend(self.goals.iter().map(|g| g.id));
        for list in &self.lists {
            ids.push(list.id);
            ids.extend(list.items.iter().map(|i| i.id));
        }
        ids
    }

    #[cfg(test)]
    pub(crate) fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }
}

/// Owner details and preferences; overwritten, never deleted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    /// Image URL or `data:` URI
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub dark_mode: bool,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    /// Note used when the user leaves it blank
    pub fn default_note(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    pub fn sign(&self) -> &'static str {
        match self {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// One entry of the transaction log; immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    /// Local timestamp, display only
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub note: String,
}

impl Transaction {
    /// Amount with the sign it applies to the balance
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Sums over the transaction log
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Id,
    pub name: String,
    pub target: f64,
    pub date: NaiveDate,
}

/// A named checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl ShoppingList {
    pub fn checked_items(&self) -> impl Iterator<Item = &ListItem> {
        self.items.iter().filter(|i| i.checked)
    }
}

/// One checklist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Id,
    pub name: String,
    /// Free-form quantity, "1" when left blank
    pub qty: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub checked: bool,
}

/// Which tab of the money tracker is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Goals,
    Lists,
    Settings,
}

/// Per-session view state; never persisted
#[derive(Debug, Clone, Default)]
pub struct MoneySession {
    pub tab: Tab,
    /// Balance shown as dots
    pub balance_hidden: bool,
    /// Kind preselected for the next transaction
    pub kind: TransactionKind,
    /// Photo picked for the profile but not yet saved
    pub pending_photo: Option<String>,
}

impl MoneySession {
    /// Flip the balance between visible and masked
    pub fn toggle_balance(&mut self) {
        self.balance_hidden = !self.balance_hidden;
    }

    pub fn stage_photo(&mut self, uri: impl Into<String>) {
        self.pending_photo = Some(uri.into());
    }
}
