//! Money tracker view
//!
//! Signed out, the view is the sign-in prompt. Signed in, it is the header
//! (balance and totals) followed by the active tab.

use crate::money::format::{format_currency, plain_amount, HIDDEN_BALANCE};
use crate::money::goals::{daily_need, days_remaining};
use crate::money::tracker::MoneyTracker;
use crate::money::types::{Goal, MoneyData, MoneySession, ShoppingList, Tab, Transaction, TransactionKind};
use crate::shell::MiniApp;
use crate::view::{Element, Node};
use chrono::{DateTime, Local};

impl MiniApp for MoneyTracker {
    type Session = MoneySession;
    const NAME: &'static str = "money";

    fn render(&self, session: &MoneySession, now: DateTime<Local>) -> Node {
        let data = self.data();
        let root = Element::new("div")
            .class("money-app")
            .class_if("dark-mode", data.profile.dark_mode);

        if !self.is_signed_in() {
            return root.child(auth_view()).into();
        }

        let symbol = &self.config.currency_symbol;
        let content = match session.tab {
            Tab::Home => home_tab(data, session, symbol),
            Tab::Goals => goals_tab(&data.goals, symbol, &now),
            Tab::Lists => lists_tab(&data.lists),
            Tab::Settings => settings_tab(data),
        };

        root.child(header(data, session, symbol))
            .child(tabs(session.tab))
            .child(content)
            .into()
    }
}

fn auth_view() -> Element {
    Element::new("section")
        .class("auth-view")
        .child(Element::new("h2").text("Welcome"))
        .child(Element::new("p").text("Enter your name to get started"))
}

fn header(data: &MoneyData, session: &MoneySession, symbol: &str) -> Element {
    let name = match data.profile.name.as_str() {
        "" => "User",
        n => n,
    };
    let balance = if session.balance_hidden {
        HIDDEN_BALANCE.to_string()
    } else {
        format_currency(symbol, data.balance())
    };
    let totals = data.totals();

    Element::new("header")
        .class("app-header")
        .child(
            Element::new("div")
                .class("user")
                .child(
                    Element::new("img")
                        .class("avatar")
                        .attr("src", data.profile.photo.clone()),
                )
                .child(Element::new("span").class("home-username").text(name)),
        )
        .child(
            Element::new("div")
                .class("balance-card")
                .child(Element::new("span").text("Total Balance"))
                .child(Element::new("h1").class("balance-display").text(balance)),
        )
        .child(
            Element::new("div")
                .class("totals")
                .child(
                    Element::new("span")
                        .class("total-income")
                        .text(format!("Income {}", format_currency(symbol, totals.income))),
                )
                .child(
                    Element::new("span")
                        .class("total-expense")
                        .text(format!("Expense {}", format_currency(symbol, totals.expense))),
                ),
        )
}

fn tabs(active: Tab) -> Element {
    let entries = [
        (Tab::Home, "Home"),
        (Tab::Goals, "Goals"),
        (Tab::Lists, "Lists"),
        (Tab::Settings, "Settings"),
    ];
    Element::new("nav").class("tabs").children(entries.into_iter().map(|(tab, label)| {
        Element::new("span")
            .class("nav-item")
            .class_if("active", tab == active)
            .text(label)
    }))
}

fn home_tab(data: &MoneyData, session: &MoneySession, symbol: &str) -> Element {
    let toggle = Element::new("div")
        .class("type-toggle")
        .child(
            Element::new("span")
                .class("btn-inc")
                .class_if("active", session.kind == TransactionKind::Income)
                .text("Income"),
        )
        .child(
            Element::new("span")
                .class("btn-exp")
                .class_if("active", session.kind == TransactionKind::Expense)
                .text("Expense"),
        );

    let section = Element::new("section")
        .class("home-view")
        .child(Element::new("h3").text("Transactions"))
        .child(toggle);

    if data.transactions().is_empty() {
        return section.child(empty("No transactions yet"));
    }

    section.child(
        Element::new("ul")
            .class("transaction-list")
            .children(data.transactions().iter().map(|t| transaction_row(t, symbol))),
    )
}

fn transaction_row(t: &Transaction, symbol: &str) -> Element {
    let direction = match t.kind {
        TransactionKind::Income => "inc",
        TransactionKind::Expense => "exp",
    };
    Element::new("li")
        .class("trans-item")
        .attr("data-id", t.id.to_string())
        .child(Element::new("h4").text(t.note.clone()))
        .child(Element::new("span").class("trans-date").text(t.date.clone()))
        .child(
            Element::new("span")
                .class("trans-amount")
                .class(direction)
                .text(format!("{} {}{}", t.kind.sign(), symbol, plain_amount(t.amount))),
        )
}

fn goals_tab(goals: &[Goal], symbol: &str, now: &DateTime<Local>) -> Element {
    let section = Element::new("section")
        .class("goals-view")
        .child(Element::new("h3").text("Goals"));

    if goals.is_empty() {
        return section.child(empty("No goals added"));
    }

    section.children(goals.iter().map(|goal| goal_card(goal, symbol, now)))
}

fn goal_card(goal: &Goal, symbol: &str, now: &DateTime<Local>) -> Element {
    let days = days_remaining(goal, now);
    let need = if days > 0 {
        format!("{}", daily_need(goal.target, days).round())
    } else {
        plain_amount(goal.target)
    };
    let days_label = if days > 0 {
        format!("{} days left", days)
    } else {
        "Time Up!".to_string()
    };

    Element::new("article")
        .class("goal-card")
        .attr("data-id", goal.id.to_string())
        .child(Element::new("h3").text(goal.name.clone()))
        .child(
            Element::new("h2")
                .class("goal-target")
                .text(format!("{}{}", symbol, plain_amount(goal.target))),
        )
        .child(
            Element::new("span")
                .class("goal-calc")
                .text(format!("Save {}{} / day", symbol, need)),
        )
        .child(Element::new("span").class("goal-days").text(days_label))
}

fn lists_tab(lists: &[ShoppingList]) -> Element {
    let section = Element::new("section")
        .class("lists-view")
        .child(Element::new("h3").text("Smart Lists"));

    if lists.is_empty() {
        return section.child(empty("Create a list to start"));
    }

    section.children(lists.iter().map(list_card))
}

fn list_card(list: &ShoppingList) -> Element {
    let items = list.items.iter().map(|item| {
        let mut checkbox = Element::new("input").attr("type", "checkbox");
        if item.checked {
            checkbox = checkbox.attr("checked", "");
        }
        Element::new("li")
            .class("lc-item")
            .class_if("checked", item.checked)
            .attr("data-id", item.id.to_string())
            .child(checkbox)
            .child(Element::new("span").class("item-name").text(item.name.clone()))
            .child(
                Element::new("span")
                    .class("lc-qty")
                    .text(format!("{} {}", item.qty, item.unit)),
            )
    });

    Element::new("article")
        .class("list-card")
        .attr("data-id", list.id.to_string())
        .child(Element::new("h4").class("lc-header").text(list.name.clone()))
        .child(Element::new("ul").class("lc-body").children(items))
        .child(
            Element::new("div")
                .class("lc-actions")
                .child(Element::new("button").text("Direct Deduct"))
                .child(Element::new("button").text("Calc & Deduct")),
        )
}

fn settings_tab(data: &MoneyData) -> Element {
    let mut theme = Element::new("input").attr("type", "checkbox");
    if data.profile.dark_mode {
        theme = theme.attr("checked", "");
    }

    Element::new("section")
        .class("settings-view")
        .child(Element::new("h3").text("Settings"))
        .child(
            Element::new("div")
                .class("profile")
                .child(Element::new("p").class("profile-name").text(data.profile.name.clone()))
                .child(
                    Element::new("p")
                        .class("profile-mobile")
                        .text(data.profile.mobile.clone()),
                ),
        )
        .child(
            Element::new("div")
                .class("theme")
                .child(theme)
                .child(Element::new("span").text("Dark Mode")),
        )
}

fn empty(message: &str) -> Element {
    Element::new("p").class("empty").text(message)
}
