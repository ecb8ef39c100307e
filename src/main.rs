//! PocketKit CLI
//!
//! Runs one command against one of the apps:
//! - Load the app's store from the slot database
//! - Dispatch the command's mutator through the shell
//! - Print the re-rendered view (text, or HTML with `--html`)

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pocketkit::clock::{Clock, SystemClock};
use pocketkit::config::{generate_default_config, Config};
use pocketkit::hub::{Hub, HubSession, LaunchOutcome};
use pocketkit::ids::Id;
use pocketkit::interact::{ConsoleInteraction, Interaction};
use pocketkit::money::photo::encode_file;
use pocketkit::money::{MoneySession, MoneyTracker, Tab, TransactionKind};
use pocketkit::shell::{Shell, TerminalSurface};
use pocketkit::sim::SimTracker;
use pocketkit::storage::{SlotStorage, SqliteStorage};
use pocketkit::{logging, AppError};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "pocketkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Money tracker, app hub and SIM expiry tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Print the view as HTML instead of text
    #[arg(long, global = true)]
    pub html: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Personal money tracker
    Money {
        #[command(subcommand)]
        command: MoneyCommand,
    },

    /// App launcher
    Hub {
        #[command(subcommand)]
        command: HubCommand,
    },

    /// SIM expiry tracker
    Sim {
        #[command(subcommand)]
        command: SimCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TabArg {
    Home,
    Goals,
    Lists,
    Settings,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Home => Tab::Home,
            TabArg::Goals => Tab::Goals,
            TabArg::Lists => Tab::Lists,
            TabArg::Settings => Tab::Settings,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum MoneyCommand {
    /// Show the tracker
    Show {
        #[arg(long, value_enum, default_value = "home")]
        tab: TabArg,
        /// Mask the balance
        #[arg(long)]
        hide_balance: bool,
    },

    /// Create the profile
    SignIn {
        name: String,
        #[arg(long, default_value = "")]
        mobile: String,
        /// Profile photo (PNG, JPEG, GIF, WebP or SVG)
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Edit the profile
    Profile {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        mobile: String,
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Delete all money tracker data
    SignOut,

    /// Set or toggle dark mode
    Theme {
        #[arg(value_enum)]
        mode: Option<Switch>,
    },

    /// Record income
    Income {
        amount: String,
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Record an expense
    Expense {
        amount: String,
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Empty the transaction log (balance stays)
    ClearHistory,

    /// Savings goals
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Shopping lists
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
}

#[derive(Subcommand)]
pub enum GoalCommand {
    Add {
        name: String,
        target: String,
        /// Target date (YYYY-MM-DD)
        date: String,
    },
    Delete {
        id: Id,
    },
}

#[derive(Subcommand)]
pub enum ListCommand {
    Create {
        name: String,
    },
    Delete {
        id: Id,
    },
    AddItem {
        list: Id,
        name: String,
        #[arg(long, default_value = "")]
        qty: String,
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// Check or uncheck an item
    Toggle {
        list: Id,
        item: Id,
    },
    RemoveItem {
        list: Id,
        item: Id,
    },
    /// Deduct one total for the checked items
    Deduct {
        list: Id,
    },
    /// Price each checked item, then deduct the sum
    Calc {
        list: Id,
    },
}

#[derive(Subcommand)]
pub enum HubCommand {
    /// Show the app grid
    Show,
    Add {
        name: String,
        url: String,
        #[arg(long, default_value = "")]
        icon: String,
    },
    Edit {
        id: Id,
        name: String,
        url: String,
        #[arg(long, default_value = "")]
        icon: String,
    },
    Delete {
        id: Id,
    },
    /// Open an app, asking for the password when one is set
    Launch {
        id: Id,
    },
    /// Set or change the launch password
    Password,
}

#[derive(Subcommand)]
pub enum SimCommand {
    /// Show all SIMs with their status
    Show,
    Add {
        name: String,
        number: String,
        /// Expiry date (YYYY-MM-DD)
        expiry: String,
        #[arg(long, default_value = "Jio")]
        operator: String,
    },
    Edit {
        id: Id,
        name: String,
        number: String,
        expiry: String,
        #[arg(long, default_value = "Jio")]
        operator: String,
    },
    Delete {
        id: Id,
    },
    /// Recharge for N days from today
    Recharge {
        id: Id,
        days: String,
    },
    /// Mark the recharge as ended (expired yesterday)
    Ended {
        id: Id,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    logging::init(&config.logging)?;

    let surface = TerminalSurface { html: cli.html };
    let ui = ConsoleInteraction::new(cli.yes);

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
        Commands::Money { command } => {
            let backend = open_backend(&config)?;
            let tracker = MoneyTracker::open(backend, config.money.clone())?;
            run_money(Shell::new(tracker, MoneySession::default(), Box::new(SystemClock), ui, surface), command);
        }
        Commands::Hub { command } => {
            let backend = open_backend(&config)?;
            let hub = Hub::open(backend, config.hub.clone(), SystemClock.now())?;
            run_hub(Shell::new(hub, HubSession::default(), Box::new(SystemClock), ui, surface), command);
        }
        Commands::Sim { command } => {
            let backend = open_backend(&config)?;
            let sims = SimTracker::open(backend, config.sim.clone())?;
            run_sim(Shell::new(sims, (), Box::new(SystemClock), ui, surface), command);
        }
    }

    Ok(())
}

fn open_backend(config: &Config) -> anyhow::Result<Rc<dyn SlotStorage>> {
    let data_dir = config.data_dir();
    let storage = SqliteStorage::open(&data_dir, Some(config.storage.quota_bytes))
        .with_context(|| format!("Failed to open data directory {:?}", data_dir))?;
    tracing::debug!("Using {:?}", storage.path());
    Ok(Rc::new(storage))
}

type CliShell<A> = Shell<A, ConsoleInteraction, TerminalSurface>;

fn run_money(mut shell: CliShell<MoneyTracker>, command: MoneyCommand) {
    match command {
        MoneyCommand::Show { tab, hide_balance } => {
            shell.dispatch(|_, session, _| {
                session.tab = tab.into();
                session.balance_hidden = hide_balance;
                Ok(())
            });
        }
        MoneyCommand::SignIn {
            name,
            mobile,
            photo,
        } => {
            shell.dispatch(|app, session, _| {
                if let Some(path) = photo {
                    session.stage_photo(encode_file(&path)?);
                }
                app.sign_in(session, &name, &mobile)
            });
        }
        MoneyCommand::Profile {
            name,
            mobile,
            photo,
        } => {
            shell.dispatch(|app, session, _| {
                session.tab = Tab::Settings;
                if let Some(path) = photo {
                    session.stage_photo(encode_file(&path)?);
                }
                app.edit_profile(session, &name, &mobile)
            });
        }
        MoneyCommand::SignOut => {
            shell.dispatch(|app, _, ctx| app.sign_out(ctx.ui));
        }
        MoneyCommand::Theme { mode } => {
            shell.dispatch(|app, session, _| {
                session.tab = Tab::Settings;
                match mode {
                    Some(Switch::On) => app.set_dark_mode(true),
                    Some(Switch::Off) => app.set_dark_mode(false),
                    None => app.toggle_dark_mode().map(|_| ()),
                }
            });
        }
        MoneyCommand::Income { amount, note } => {
            shell.dispatch(|app, _, ctx| {
                app.add_transaction(ctx.now, TransactionKind::Income, &amount, &note)
            });
        }
        MoneyCommand::Expense { amount, note } => {
            shell.dispatch(|app, session, ctx| {
                session.kind = TransactionKind::Expense;
                app.add_transaction(ctx.now, TransactionKind::Expense, &amount, &note)
            });
        }
        MoneyCommand::ClearHistory => {
            shell.dispatch(|app, _, ctx| app.clear_history(ctx.ui));
        }
        MoneyCommand::Goal { command } => {
            shell.dispatch(|app, session, ctx| {
                session.tab = Tab::Goals;
                match command {
                    GoalCommand::Add { name, target, date } => {
                        app.add_goal(ctx.now, &name, &target, &date).map(|_| ())
                    }
                    GoalCommand::Delete { id } => app.delete_goal(id),
                }
            });
        }
        MoneyCommand::List { command } => {
            shell.dispatch(|app, session, ctx| {
                session.tab = Tab::Lists;
                match command {
                    ListCommand::Create { name } => app.create_list(ctx.now, &name).map(|_| ()),
                    ListCommand::Delete { id } => app.delete_list(id, ctx.ui),
                    ListCommand::AddItem {
                        list,
                        name,
                        qty,
                        unit,
                    } => app.add_item(ctx.now, list, &name, &qty, &unit).map(|_| ()),
                    ListCommand::Toggle { list, item } => app.toggle_item(list, item).map(|_| ()),
                    ListCommand::RemoveItem { list, item } => app.delete_item(list, item),
                    ListCommand::Deduct { list } => {
                        app.direct_deduct(ctx.now, list, ctx.ui).map(|_| ())
                    }
                    ListCommand::Calc { list } => app.calc_deduct(ctx.now, list, ctx.ui).map(|_| ()),
                }
            });
        }
    }
}

fn run_hub(mut shell: CliShell<Hub>, command: HubCommand) {
    match command {
        HubCommand::Show => shell.start(),
        HubCommand::Add { name, url, icon } => {
            shell.dispatch(|hub, _, ctx| hub.add_app(ctx.now, &name, &icon, &url));
        }
        HubCommand::Edit {
            id,
            name,
            url,
            icon,
        } => {
            shell.dispatch(|hub, _, _| hub.edit_app(id, &name, &icon, &url));
        }
        HubCommand::Delete { id } => {
            shell.dispatch(|hub, _, ctx| hub.delete_app(id, ctx.ui));
        }
        HubCommand::Launch { id } => {
            let outcome = shell.dispatch(|hub, session, _| hub.launch(session, id));
            if outcome == Some(LaunchOutcome::PasswordRequired) {
                unlock_loop(&mut shell);
            }
        }
        HubCommand::Password => {
            shell.dispatch(|hub, _, ctx| {
                let old = if hub.has_password()? {
                    ctx.ui.prompt("Current password:").ok_or(AppError::Declined)?
                } else {
                    String::new()
                };
                let new = ctx.ui.prompt("New password:").ok_or(AppError::Declined)?;
                let confirm = ctx
                    .ui
                    .prompt("Confirm new password:")
                    .ok_or(AppError::Declined)?;
                hub.update_password(&old, &new, &confirm, ctx.ui)
            });
        }
    }
}

/// Ask until the pending app opens or the prompt is cancelled
fn unlock_loop(shell: &mut CliShell<Hub>) {
    while shell.session().pending.is_some() {
        match shell.ui_mut().prompt("Enter Password:") {
            Some(input) => {
                shell.dispatch(|hub, session, _| hub.unlock(session, &input));
            }
            None => {
                shell.dispatch(|hub, session, _| {
                    hub.cancel_unlock(session);
                    Ok(())
                });
            }
        }
    }
}

fn run_sim(mut shell: CliShell<SimTracker>, command: SimCommand) {
    match command {
        SimCommand::Show => shell.start(),
        SimCommand::Add {
            name,
            number,
            expiry,
            operator,
        } => {
            shell.dispatch(|sims, _, ctx| sims.add_sim(ctx.now, &name, &number, &operator, &expiry));
        }
        SimCommand::Edit {
            id,
            name,
            number,
            expiry,
            operator,
        } => {
            shell.dispatch(|sims, _, _| sims.edit_sim(id, &name, &number, &operator, &expiry));
        }
        SimCommand::Delete { id } => {
            shell.dispatch(|sims, _, ctx| sims.delete_sim(id, ctx.ui));
        }
        SimCommand::Recharge { id, days } => {
            shell.dispatch(|sims, _, ctx| sims.recharge(ctx.now, id, &days));
        }
        SimCommand::Ended { id } => {
            shell.dispatch(|sims, _, ctx| sims.mark_recharge_ended(ctx.now, id));
        }
    }
}
