//! Hub mutators: app management, password-gated launching, password changes
//!
//! ```text
//! launch(id) ── no password ──→ Opened(frame)
//!     │
//!     └─ password set → pending = id ── unlock(wrong) → Auth error, still pending
//!                                   ├─ unlock(right) → open pending app, pending = None
//!                                   └─ cancel_unlock → pending = None
//! ```

use crate::config::HubConfig;
use crate::error::{AppError, AppResult};
use crate::hub::password::{hash_password, verify_password, PasswordCheck};
use crate::hub::types::{default_apps, HubApp, HubSession, LaunchOutcome, OpenFrame};
use crate::ids::{Id, IdGenerator};
use crate::interact::Interaction;
use crate::storage::{SlotStorage, StorageResult, Store, HUB_APPS_SLOT, HUB_PASSWORD_SLOT};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::rc::Rc;

/// The launcher app
pub struct Hub {
    apps: Store<Vec<HubApp>>,
    backend: Rc<dyn SlotStorage>,
    ids: IdGenerator,
    config: HubConfig,
}

impl Hub {
    /// Load the app list, giving stable ids to entries stored without one
    pub fn open(
        backend: Rc<dyn SlotStorage>,
        config: HubConfig,
        now: DateTime<Local>,
    ) -> StorageResult<Self> {
        let mut apps = Store::load(backend.clone(), HUB_APPS_SLOT, default_apps)?;
        let mut ids = IdGenerator::seeded(apps.state().iter().map(|a| a.id));

        let needs_ids = {
            let mut seen = HashSet::new();
            apps.state()
                .iter()
                .any(|a| a.id == Id(0) || !seen.insert(a.id))
        };
        if needs_ids {
            let assigned = apps.commit(|list| {
                let mut seen = HashSet::new();
                let mut assigned = 0;
                for app in list.iter_mut() {
                    if app.id == Id(0) || !seen.insert(app.id) {
                        app.id = ids.next(&now);
                        seen.insert(app.id);
                        assigned += 1;
                    }
                }
                Ok::<_, crate::storage::StorageError>(assigned)
            })?;
            tracing::info!("Assigned ids to {} hub apps", assigned);
        }

        Ok(Self {
            apps,
            backend,
            ids,
            config,
        })
    }

    /// Apps in display order
    pub fn apps(&self) -> &[HubApp] {
        self.apps.state()
    }

    pub fn find(&self, id: Id) -> Option<&HubApp> {
        self.apps().iter().find(|a| a.id == id)
    }

    fn require(&self, id: Id) -> AppResult<&HubApp> {
        self.find(id).ok_or(AppError::not_found("app", id))
    }

    // ==================== App management ====================

    fn validated(&self, name: &str, icon: &str, url: &str) -> AppResult<(String, String, String)> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(AppError::validation("Fill Name and Path"));
        }
        let icon = match icon.trim() {
            "" => self.config.fallback_icon.clone(),
            i => i.to_string(),
        };
        Ok((name.to_string(), icon, url.to_string()))
    }

    pub fn add_app(&mut self, now: DateTime<Local>, name: &str, icon: &str, url: &str) -> AppResult<Id> {
        let (name, icon, url) = self.validated(name, icon, url)?;
        let id = self.ids.next(&now);

        self.apps.commit(|apps| {
            apps.push(HubApp {
                id,
                name,
                icon,
                url,
            });
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Added hub app {}", id);
        Ok(id)
    }

    pub fn edit_app(&mut self, id: Id, name: &str, icon: &str, url: &str) -> AppResult<()> {
        self.require(id)?;
        let (name, icon, url) = self.validated(name, icon, url)?;

        self.apps.commit(|apps| {
            let app = apps
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(AppError::not_found("app", id))?;
            app.name = name;
            app.icon = icon;
            app.url = url;
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Edited hub app {}", id);
        Ok(())
    }

    pub fn delete_app(&mut self, id: Id, ui: &mut dyn Interaction) -> AppResult<()> {
        self.require(id)?;
        if !ui.confirm("Are you sure you want to delete this app?") {
            return Err(AppError::Declined);
        }
        self.apps.commit(|apps| {
            apps.retain(|a| a.id != id);
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Deleted hub app {}", id);
        Ok(())
    }

    // ==================== Launching ====================

    fn stored_password(&self) -> StorageResult<Option<String>> {
        Ok(self
            .backend
            .get(HUB_PASSWORD_SLOT)?
            .filter(|p| !p.is_empty()))
    }

    /// Whether launches are gated by a password
    pub fn has_password(&self) -> StorageResult<bool> {
        Ok(self.stored_password()?.is_some())
    }

    fn frame_for(&self, id: Id) -> AppResult<OpenFrame> {
        let app = self.require(id)?;
        Ok(OpenFrame {
            app_id: app.id,
            name: app.name.clone(),
            url: app.url.clone(),
        })
    }

    /// Open an app, or park it until the password is entered
    pub fn launch(&self, session: &mut HubSession, id: Id) -> AppResult<LaunchOutcome> {
        let frame = self.frame_for(id)?;

        if self.has_password()? {
            session.pending = Some(id);
            tracing::debug!("App {} waiting for password", id);
            return Ok(LaunchOutcome::PasswordRequired);
        }

        tracing::info!("Opened app {}", id);
        session.open = Some(frame.clone());
        Ok(LaunchOutcome::Opened(frame))
    }

    /// Check the password and open the pending app
    ///
    /// A wrong password leaves the app pending so the user can retry.
    pub fn unlock(&mut self, session: &mut HubSession, input: &str) -> AppResult<OpenFrame> {
        let pending = session.pending.ok_or(AppError::Declined)?;

        if let Some(stored) = self.stored_password()? {
            match verify_password(input, &stored)? {
                PasswordCheck::Mismatch => {
                    tracing::debug!("Wrong password for app {}", pending);
                    return Err(AppError::Auth("Incorrect Password!".to_string()));
                }
                PasswordCheck::MatchLegacy => {
                    self.backend.set(HUB_PASSWORD_SLOT, &hash_password(input)?)?;
                    tracing::info!("Upgraded stored hub password to a hash");
                }
                PasswordCheck::Match => {}
            }
        }

        session.pending = None;
        let frame = self.frame_for(pending)?;
        session.open = Some(frame.clone());
        tracing::info!("Unlocked and opened app {}", pending);
        Ok(frame)
    }

    /// Dismiss the password prompt
    pub fn cancel_unlock(&self, session: &mut HubSession) {
        session.pending = None;
    }

    /// Close the frame and return to the grid
    pub fn close_app(&self, session: &mut HubSession) {
        session.open = None;
    }

    // ==================== Password ====================

    /// Set or change the launch password
    ///
    /// When one is already set, `old` must match it.
    pub fn update_password(
        &mut self,
        old: &str,
        new: &str,
        confirm: &str,
        ui: &mut dyn Interaction,
    ) -> AppResult<()> {
        if let Some(stored) = self.stored_password()? {
            if !verify_password(old, &stored)?.is_match() {
                return Err(AppError::Auth("Current password is incorrect!".to_string()));
            }
        }
        if new.is_empty() {
            return Err(AppError::validation("Please enter a new password."));
        }
        if new != confirm {
            return Err(AppError::validation("New passwords do not match!"));
        }

        self.backend.set(HUB_PASSWORD_SLOT, &hash_password(new)?)?;
        tracing::info!("Hub password updated");
        ui.alert("Password updated successfully!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::hub::password::is_hashed;
    use crate::interact::ScriptedInteraction;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn now() -> DateTime<Local> {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()).now()
    }

    fn hub() -> (Hub, Rc<MemoryStorage>) {
        let mem = Rc::new(MemoryStorage::new());
        let hub = Hub::open(mem.clone(), HubConfig::default(), now()).unwrap();
        (hub, mem)
    }

    fn with_password(hub: &mut Hub, password: &str) {
        let mut ui = ScriptedInteraction::new();
        hub.update_password("", password, password, &mut ui).unwrap();
    }

    #[test]
    fn test_seeded_default() {
        let (hub, mem) = hub();
        assert_eq!(hub.apps().len(), 1);
        assert_eq!(hub.apps()[0].name, "SIM Tracker");
        // Seed is not written until something changes
        assert!(mem.is_empty());
    }

    #[test]
    fn test_add_edit_delete_by_id() {
        let (mut hub, mem) = hub();
        let a = hub.add_app(now(), "Notes", "", "notes/index.html").unwrap();
        let b = hub.add_app(now(), "Money", "m.png", "money/index.html").unwrap();
        assert_ne!(a, b);
        assert_eq!(hub.find(a).unwrap().icon, HubConfig::default().fallback_icon);

        let mut yes = ScriptedInteraction::new().confirm_with(true);
        hub.delete_app(a, &mut yes).unwrap();

        // b keeps its identity after the entry before it is gone
        hub.edit_app(b, "Money Tracker", "", "money/").unwrap();
        let edited = hub.find(b).unwrap();
        assert_eq!(edited.name, "Money Tracker");
        assert_eq!(edited.url, "money/");

        let reloaded = Hub::open(mem, HubConfig::default(), now()).unwrap();
        assert_eq!(reloaded.apps(), hub.apps());
        assert_eq!(reloaded.apps().len(), 2);
    }

    #[test]
    fn test_validation() {
        let (mut hub, _) = hub();
        assert!(matches!(
            hub.add_app(now(), "", "", "x"),
            Err(AppError::Validation(ref m)) if m == "Fill Name and Path"
        ));
        assert!(matches!(
            hub.add_app(now(), "x", "", " "),
            Err(AppError::Validation(_))
        ));
        let id = hub.apps()[0].id;
        assert!(matches!(
            hub.edit_app(id, "", "", ""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            hub.edit_app(Id(999), "a", "", "b"),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_declined() {
        let (mut hub, _) = hub();
        let id = hub.apps()[0].id;
        let mut no = ScriptedInteraction::new().confirm_with(false);
        assert!(matches!(hub.delete_app(id, &mut no), Err(AppError::Declined)));
        assert_eq!(hub.apps().len(), 1);
    }

    #[test]
    fn test_legacy_entries_get_ids() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set(
            HUB_APPS_SLOT,
            r#"[{"name":"A","icon":"a","url":"a/"},{"name":"B","icon":"b","url":"b/"}]"#,
        )
        .unwrap();

        let hub = Hub::open(mem.clone(), HubConfig::default(), now()).unwrap();
        let ids: Vec<Id> = hub.apps().iter().map(|a| a.id).collect();
        assert!(ids.iter().all(|id| *id != Id(0)));
        assert_ne!(ids[0], ids[1]);

        // Persisted, so the next session sees the same ids
        let again = Hub::open(mem, HubConfig::default(), now()).unwrap();
        assert_eq!(again.apps().iter().map(|a| a.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_launch_without_password_opens_directly() {
        let (hub, _) = hub();
        let mut session = HubSession::default();
        let id = hub.apps()[0].id;

        match hub.launch(&mut session, id).unwrap() {
            LaunchOutcome::Opened(frame) => {
                assert_eq!(frame.url, "sim-tracker/index.html");
                assert_eq!(frame.name, "SIM Tracker");
            }
            other => panic!("expected Opened, got {:?}", other),
        }
        assert!(session.pending.is_none());
        assert!(session.open.is_some());

        hub.close_app(&mut session);
        assert!(session.open.is_none());
    }

    #[test]
    fn test_launch_with_password() {
        let (mut hub, _) = hub();
        with_password(&mut hub, "1234");
        let first = hub.apps()[0].id;
        let second = hub.add_app(now(), "Notes", "", "notes/").unwrap();
        let mut session = HubSession::default();

        assert_eq!(
            hub.launch(&mut session, second).unwrap(),
            LaunchOutcome::PasswordRequired
        );
        assert_eq!(session.pending, Some(second));
        assert!(session.open.is_none());

        // Wrong entry: nothing opens, still pending
        assert!(matches!(
            hub.unlock(&mut session, "0000"),
            Err(AppError::Auth(ref m)) if m == "Incorrect Password!"
        ));
        assert_eq!(session.pending, Some(second));
        assert!(session.open.is_none());

        // Right entry: exactly the pending app opens
        let frame = hub.unlock(&mut session, "1234").unwrap();
        assert_eq!(frame.app_id, second);
        assert_ne!(frame.app_id, first);
        assert_eq!(session.pending, None);
        assert_eq!(session.open.as_ref().map(|f| f.app_id), Some(second));
    }

    #[test]
    fn test_cancel_unlock() {
        let (mut hub, _) = hub();
        with_password(&mut hub, "pw");
        let mut session = HubSession::default();
        let id = hub.apps()[0].id;
        hub.launch(&mut session, id).unwrap();
        hub.cancel_unlock(&mut session);
        assert!(session.pending.is_none());
        assert!(matches!(
            hub.unlock(&mut session, "pw"),
            Err(AppError::Declined)
        ));
    }

    #[test]
    fn test_pending_app_deleted() {
        let (mut hub, _) = hub();
        with_password(&mut hub, "pw");
        let mut session = HubSession::default();
        let id = hub.apps()[0].id;
        hub.launch(&mut session, id).unwrap();

        let mut yes = ScriptedInteraction::new().confirm_with(true);
        hub.delete_app(id, &mut yes).unwrap();
        assert!(matches!(
            hub.unlock(&mut session, "pw"),
            Err(AppError::NotFound { .. })
        ));
        assert!(session.pending.is_none());
        assert!(session.open.is_none());
    }

    #[test]
    fn test_update_password() {
        let (mut hub, mem) = hub();
        let mut ui = ScriptedInteraction::new();

        assert!(matches!(
            hub.update_password("", "", "", &mut ui),
            Err(AppError::Validation(ref m)) if m == "Please enter a new password."
        ));
        assert!(matches!(
            hub.update_password("", "a", "b", &mut ui),
            Err(AppError::Validation(ref m)) if m == "New passwords do not match!"
        ));
        assert!(!hub.has_password().unwrap());

        hub.update_password("", "first", "first", &mut ui).unwrap();
        assert_eq!(ui.alerts, vec!["Password updated successfully!"]);
        let stored = mem.get(HUB_PASSWORD_SLOT).unwrap().unwrap();
        assert!(is_hashed(&stored));
        assert!(!stored.contains("first"));

        assert!(matches!(
            hub.update_password("nope", "second", "second", &mut ui),
            Err(AppError::Auth(ref m)) if m == "Current password is incorrect!"
        ));
        hub.update_password("first", "second", "second", &mut ui)
            .unwrap();

        let mut session = HubSession::default();
        hub.launch(&mut session, hub.apps()[0].id).unwrap();
        assert!(hub.unlock(&mut session, "first").is_err());
        assert!(hub.unlock(&mut session, "second").is_ok());
    }

    #[test]
    fn test_legacy_plaintext_password_upgraded() {
        let (mut hub, mem) = hub();
        mem.set(HUB_PASSWORD_SLOT, "1234").unwrap();

        let mut session = HubSession::default();
        let id = hub.apps()[0].id;
        assert_eq!(
            hub.launch(&mut session, id).unwrap(),
            LaunchOutcome::PasswordRequired
        );
        hub.unlock(&mut session, "1234").unwrap();

        let stored = mem.get(HUB_PASSWORD_SLOT).unwrap().unwrap();
        assert!(is_hashed(&stored));
    }

    #[test]
    fn test_damaged_password_hash_is_reported() {
        let (mut hub, mem) = hub();
        mem.set(HUB_PASSWORD_SLOT, "$argon2id$garbage").unwrap();

        let mut session = HubSession::default();
        let id = hub.apps()[0].id;
        assert_eq!(
            hub.launch(&mut session, id).unwrap(),
            LaunchOutcome::PasswordRequired
        );
        assert!(matches!(
            hub.unlock(&mut session, "anything"),
            Err(AppError::Auth(ref m)) if m.starts_with("Stored password is damaged")
        ));
        assert_eq!(session.pending, Some(id));
        assert!(session.open.is_none());

        let mut ui = ScriptedInteraction::new();
        assert!(matches!(
            hub.update_password("anything", "new", "new", &mut ui),
            Err(AppError::Auth(ref m)) if m.starts_with("Stored password is damaged")
        ));
        assert_eq!(
            mem.get(HUB_PASSWORD_SLOT).unwrap().as_deref(),
            Some("$argon2id$garbage")
        );
    }
}
