//! Render-on-write shell
//!
//! Drives one mini-app through the event loop every app shares:
//!
//! ```text
//! UI event → mutator validates & mutates store → persist → render → surface
//! ```
//!
//! The shell owns the app, its per-session view context, the dialogs and the
//! output surface. It renders once at startup and once after every
//! dispatched mutator, replacing the previous view wholesale.

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::interact::Interaction;
use crate::view::{html, text, Node};
use chrono::{DateTime, Local};

/// A mini-app whose view is a pure function of its state
pub trait MiniApp {
    /// View-layer state that is never persisted (current tab, pending launch…)
    type Session;

    /// Name used in logs
    const NAME: &'static str;

    /// Build the full view for the current state
    fn render(&self, session: &Self::Session, now: DateTime<Local>) -> Node;
}

/// Where rendered views end up
pub trait Surface {
    fn paint(&mut self, view: &Node);
}

/// Prints each frame to stdout as plain text or HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSurface {
    pub html: bool,
}

impl Surface for TerminalSurface {
    fn paint(&mut self, view: &Node) {
        if self.html {
            println!("{}", html::render(view));
        } else {
            println!("{}", text::paint(view));
        }
    }
}

/// Keeps every frame, for tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<Node>,
}

impl RecordingSurface {
    pub fn last(&self) -> Option<&Node> {
        self.frames.last()
    }
}

impl Surface for RecordingSurface {
    fn paint(&mut self, view: &Node) {
        self.frames.push(view.clone());
    }
}

/// Everything a mutator may use besides the app and its session
pub struct Ctx<'a> {
    /// Time of the event being handled
    pub now: DateTime<Local>,
    /// Dialogs for confirmations and prompts
    pub ui: &'a mut dyn Interaction,
}

/// Event loop for one mini-app
pub struct Shell<A: MiniApp, U, S> {
    app: A,
    session: A::Session,
    clock: Box<dyn Clock>,
    ui: U,
    surface: S,
}

impl<A, U, S> Shell<A, U, S>
where
    A: MiniApp,
    U: Interaction,
    S: Surface,
{
    pub fn new(app: A, session: A::Session, clock: Box<dyn Clock>, ui: U, surface: S) -> Self {
        Self {
            app,
            session,
            clock,
            ui,
            surface,
        }
    }

    /// Initial render
    pub fn start(&mut self) {
        tracing::debug!("Starting {}", A::NAME);
        self.render();
    }

    /// Run one mutator, report its failure, then re-render
    ///
    /// Returns the mutator's value on success. Failures never abort the
    /// session:
    /// - validation and auth errors are shown to the user;
    /// - a missing entity is logged and ignored;
    /// - a declined confirmation is a silent no-op;
    /// - a storage failure is shown as a non-fatal alert and the in-memory
    ///   state is kept.
    pub fn dispatch<T>(
        &mut self,
        mutator: impl FnOnce(&mut A, &mut A::Session, &mut Ctx<'_>) -> AppResult<T>,
    ) -> Option<T> {
        let now = self.clock.now();
        let result = {
            let mut ctx = Ctx {
                now,
                ui: &mut self.ui,
            };
            mutator(&mut self.app, &mut self.session, &mut ctx)
        };

        let value = match result {
            Ok(value) => Some(value),
            Err(AppError::Validation(msg)) | Err(AppError::Auth(msg)) => {
                self.ui.alert(&msg);
                None
            }
            Err(AppError::NotFound { kind, id }) => {
                tracing::warn!("{}: {} {} no longer exists, ignoring", A::NAME, kind, id);
                None
            }
            Err(AppError::Declined) => {
                tracing::debug!("{}: action cancelled by user", A::NAME);
                None
            }
            Err(err @ AppError::Photo(_)) => {
                self.ui.alert(&err.to_string());
                None
            }
            Err(AppError::Storage(err)) => {
                tracing::error!("{}: failed to save: {}", A::NAME, err);
                self.ui.alert(&format!(
                    "Could not save changes ({}). They are kept for this session.",
                    err
                ));
                None
            }
        };

        self.render();
        value
    }

    fn render(&mut self) {
        let view = self.app.render(&self.session, self.clock.now());
        self.surface.paint(&view);
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn session(&self) -> &A::Session {
        &self.session
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Dialogs outside a mutator, e.g. to ask before dispatching
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ids::Id;
    use crate::interact::ScriptedInteraction;
    use crate::storage::{MemoryStorage, Store};
    use crate::view::Element;
    use chrono::NaiveDate;
    use std::rc::Rc;

    /// A counter app: enough to exercise the dispatch policy
    struct Counter {
        store: Store<Vec<u32>>,
    }

    impl MiniApp for Counter {
        type Session = ();
        const NAME: &'static str = "counter";

        fn render(&self, _: &(), _: DateTime<Local>) -> Node {
            Element::new("p")
                .text(self.store.state().len().to_string())
                .into()
        }
    }

    fn shell(quota: Option<usize>) -> Shell<Counter, ScriptedInteraction, RecordingSurface> {
        let mem: Rc<MemoryStorage> = match quota {
            Some(q) => Rc::new(MemoryStorage::with_quota(q)),
            None => Rc::new(MemoryStorage::new()),
        };
        let store = Store::load(mem, "counter", Vec::new).unwrap();
        Shell::new(
            Counter { store },
            (),
            Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())),
            ScriptedInteraction::new(),
            RecordingSurface::default(),
        )
    }

    fn push(app: &mut Counter) -> AppResult<usize> {
        app.store.commit(|v| {
            v.push(1);
            Ok(v.len())
        })
    }

    #[test]
    fn test_render_on_start_and_every_dispatch() {
        let mut shell = shell(None);
        shell.start();
        assert_eq!(shell.dispatch(|app, _, _| push(app)), Some(1));
        assert_eq!(shell.dispatch(|app, _, _| push(app)), Some(2));

        let frames: Vec<String> = shell
            .surface()
            .frames
            .iter()
            .map(Node::text_content)
            .collect();
        assert_eq!(frames, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_validation_alerts() {
        let mut shell = shell(None);
        let out: Option<()> = shell.dispatch(|_, _, _| Err(AppError::validation("Enter amount")));
        assert!(out.is_none());
        assert_eq!(shell.ui().alerts, vec!["Enter amount"]);
        assert_eq!(shell.surface().frames.len(), 1);
    }

    #[test]
    fn test_not_found_and_declined_are_silent() {
        let mut shell = shell(None);
        let _: Option<()> = shell.dispatch(|_, _, _| Err(AppError::not_found("item", Id(1))));
        let _: Option<()> = shell.dispatch(|_, _, _| Err(AppError::Declined));
        assert!(shell.ui().alerts.is_empty());
        assert_eq!(shell.surface().frames.len(), 2);
    }

    #[test]
    fn test_storage_failure_is_non_fatal() {
        let mut shell = shell(Some(3));
        assert_eq!(shell.dispatch(|app, _, _| push(app)), Some(1));
        // "[1,1]" is five bytes, over quota
        assert_eq!(shell.dispatch(|app, _, _| push(app)), None);

        assert_eq!(shell.ui().alerts.len(), 1);
        assert!(shell.ui().alerts[0].starts_with("Could not save changes"));
        assert_eq!(shell.app().store.state().len(), 2);
        assert_eq!(
            shell.surface().last().map(Node::text_content).as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_mutator_sees_clock_and_dialogs() {
        let mut shell = shell(None);
        let date = shell.dispatch(|_, _, ctx| {
            ctx.ui.alert("hello");
            Ok::<_, AppError>(ctx.now.date_naive())
        });
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(shell.ui().alerts, vec!["hello"]);
    }
}
