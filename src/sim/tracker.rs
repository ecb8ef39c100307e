//! SIM tracker mutators

use crate::config::SimConfig;
use crate::error::{AppError, AppResult};
use crate::ids::{Id, IdGenerator};
use crate::interact::Interaction;
use crate::sim::types::{Operator, SimRecord};
use crate::storage::{SlotStorage, StorageResult, Store, SIM_SLOT};
use chrono::{DateTime, Duration, Local, NaiveDate};
use std::rc::Rc;

pub struct SimTracker {
    store: Store<Vec<SimRecord>>,
    ids: IdGenerator,
    pub(crate) config: SimConfig,
}

/// Form fields shared by add and edit
struct SimFields {
    name: String,
    number: String,
    operator: Operator,
    expiry: NaiveDate,
}

impl SimFields {
    fn parse(name: &str, number: &str, operator: &str, expiry: &str) -> AppResult<Self> {
        let (name, number) = (name.trim(), number.trim());
        let expiry = NaiveDate::parse_from_str(expiry.trim(), "%Y-%m-%d").ok();

        match expiry {
            Some(expiry) if !name.is_empty() && !number.is_empty() => Ok(Self {
                name: name.to_string(),
                number: number.to_string(),
                operator: Operator::parse(operator),
                expiry,
            }),
            _ => Err(AppError::validation("Please fill all info")),
        }
    }
}

impl SimTracker {
    pub fn open(backend: Rc<dyn SlotStorage>, config: SimConfig) -> StorageResult<Self> {
        let store: Store<Vec<SimRecord>> = Store::load(backend, SIM_SLOT, Vec::new)?;
        let ids = IdGenerator::seeded(store.state().iter().map(|s| s.id));
        tracing::debug!("Loaded {} SIM records", store.state().len());
        Ok(Self { store, ids, config })
    }

    /// Records in stored order
    pub fn sims(&self) -> &[SimRecord] {
        self.store.state()
    }

    pub fn find(&self, id: Id) -> Option<&SimRecord> {
        self.sims().iter().find(|s| s.id == id)
    }

    fn require(&self, id: Id) -> AppResult<()> {
        match self.find(id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("SIM", id)),
        }
    }

    /// Apply `f` to one record and persist
    fn update(&mut self, id: Id, f: impl FnOnce(&mut SimRecord)) -> AppResult<()> {
        self.store.commit(|sims| {
            let sim = sims
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(AppError::not_found("SIM", id))?;
            f(sim);
            Ok(())
        })
    }

    pub fn add_sim(
        &mut self,
        now: DateTime<Local>,
        name: &str,
        number: &str,
        operator: &str,
        expiry: &str,
    ) -> AppResult<Id> {
        let fields = SimFields::parse(name, number, operator, expiry)?;
        let id = self.ids.next(&now);

        self.store.commit(|sims| {
            sims.push(SimRecord {
                id,
                name: fields.name,
                number: fields.number,
                operator: fields.operator,
                expiry: fields.expiry,
            });
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Added SIM {}", id);
        Ok(id)
    }

    pub fn edit_sim(
        &mut self,
        id: Id,
        name: &str,
        number: &str,
        operator: &str,
        expiry: &str,
    ) -> AppResult<()> {
        self.require(id)?;
        let fields = SimFields::parse(name, number, operator, expiry)?;

        self.update(id, |sim| {
            sim.name = fields.name;
            sim.number = fields.number;
            sim.operator = fields.operator;
            sim.expiry = fields.expiry;
        })?;
        tracing::info!("Edited SIM {}", id);
        Ok(())
    }

    pub fn delete_sim(&mut self, id: Id, ui: &mut dyn Interaction) -> AppResult<()> {
        self.require(id)?;
        if !ui.confirm("Delete this SIM?") {
            return Err(AppError::Declined);
        }
        self.store.commit(|sims| {
            sims.retain(|s| s.id != id);
            Ok::<_, AppError>(())
        })?;
        tracing::info!("Deleted SIM {}", id);
        Ok(())
    }

    /// Recharge for `days` days counted from today
    ///
    /// The old expiry is discarded, not extended.
    pub fn recharge(&mut self, now: DateTime<Local>, id: Id, days: &str) -> AppResult<NaiveDate> {
        self.require(id)?;
        let days = match days.trim().parse::<i64>() {
            Ok(d) if d > 0 => d,
            _ => return Err(AppError::validation("Please enter days")),
        };
        let expiry = Duration::try_days(days)
            .and_then(|span| now.date_naive().checked_add_signed(span))
            .ok_or_else(|| AppError::validation("Please enter days"))?;

        self.update(id, |sim| sim.expiry = expiry)?;
        tracing::info!("Recharged SIM {} until {}", id, expiry);
        Ok(expiry)
    }

    /// Recharge ended: expiry becomes yesterday, starting the countdown
    pub fn mark_recharge_ended(&mut self, now: DateTime<Local>, id: Id) -> AppResult<NaiveDate> {
        self.require(id)?;
        let yesterday = now.date_naive() - Duration::days(1);

        self.update(id, |sim| sim.expiry = yesterday)?;
        tracing::info!("Recharge ended for SIM {}", id);
        Ok(yesterday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::interact::ScriptedInteraction;
    use crate::sim::status::SimStatus;
    use crate::storage::MemoryStorage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()
    }

    fn now() -> DateTime<Local> {
        FixedClock::on(today()).now()
    }

    fn tracker() -> (SimTracker, Rc<MemoryStorage>) {
        let mem = Rc::new(MemoryStorage::new());
        let tracker = SimTracker::open(mem.clone(), SimConfig::default()).unwrap();
        (tracker, mem)
    }

    #[test]
    fn test_add_and_reload() {
        let (mut sims, mem) = tracker();
        let a = sims
            .add_sim(now(), "Dad", "98300 11111", "Airtel", "2026-08-01")
            .unwrap();
        let b = sims
            .add_sim(now(), "Mom", "98300 22222", "Jio", "2026-08-01")
            .unwrap();
        assert_ne!(a, b);

        let reloaded = SimTracker::open(mem, SimConfig::default()).unwrap();
        assert_eq!(reloaded.sims(), sims.sims());
        assert_eq!(reloaded.find(a).unwrap().operator, Operator::Airtel);
    }

    #[test]
    fn test_unknown_operator_survives_rewrite() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set(
            SIM_SLOT,
            r#"[{"id":1,"name":"Old","number":"1","operator":"Vodafone","expiry":"2026-04-01"}]"#,
        )
        .unwrap();

        let mut sims = SimTracker::open(mem.clone(), SimConfig::default()).unwrap();
        sims.add_sim(now(), "New", "2", "Jio", "2026-08-01").unwrap();

        let raw = mem.get(SIM_SLOT).unwrap().unwrap();
        assert!(raw.contains(r#""operator":"Vodafone""#));
        assert_eq!(sims.find(Id(1)).unwrap().operator.badge_color(), "#555");
    }

    #[test]
    fn test_required_fields() {
        let (mut sims, _) = tracker();
        for (name, number, expiry) in [("", "1", "2026-01-01"), ("a", " ", "2026-01-01"), ("a", "1", "")] {
            assert!(matches!(
                sims.add_sim(now(), name, number, "Jio", expiry),
                Err(AppError::Validation(ref m)) if m == "Please fill all info"
            ));
        }
        assert!(sims.sims().is_empty());
    }

    #[test]
    fn test_edit() {
        let (mut sims, _) = tracker();
        let id = sims.add_sim(now(), "Dad", "1", "Jio", "2026-08-01").unwrap();
        sims.edit_sim(id, "Father", "2", "BSNL", "2026-09-01").unwrap();

        let sim = sims.find(id).unwrap();
        assert_eq!(sim.name, "Father");
        assert_eq!(sim.operator, Operator::BSNL);
        assert_eq!(sim.expiry, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());

        assert!(matches!(
            sims.edit_sim(Id(5), "x", "y", "Jio", "2026-01-01"),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_confirmed_only() {
        let (mut sims, _) = tracker();
        let id = sims.add_sim(now(), "Dad", "1", "Jio", "2026-08-01").unwrap();

        let mut no = ScriptedInteraction::new().confirm_with(false);
        assert!(matches!(sims.delete_sim(id, &mut no), Err(AppError::Declined)));
        assert_eq!(no.asked, vec!["Delete this SIM?"]);
        assert_eq!(sims.sims().len(), 1);

        let mut yes = ScriptedInteraction::new().confirm_with(true);
        sims.delete_sim(id, &mut yes).unwrap();
        assert!(sims.sims().is_empty());
    }

    #[test]
    fn test_recharge_does_not_stack() {
        let (mut sims, _) = tracker();
        let id = sims.add_sim(now(), "Dad", "1", "Jio", "2027-01-01").unwrap();

        let expiry = sims.recharge(now(), id, "30").unwrap();
        assert_eq!(expiry, today() + Duration::days(30));
        assert_eq!(sims.find(id).unwrap().expiry, today() + Duration::days(30));
    }

    #[test]
    fn test_recharge_rejects_bad_days() {
        let (mut sims, _) = tracker();
        let id = sims.add_sim(now(), "Dad", "1", "Jio", "2026-08-01").unwrap();
        for days in ["", "0", "-5", "ten", "999999999999999", "2.5"] {
            assert!(matches!(
                sims.recharge(now(), id, days),
                Err(AppError::Validation(ref m)) if m == "Please enter days"
            ));
        }
        assert_eq!(
            sims.find(id).unwrap().expiry,
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
        );
    }

    #[test]
    fn test_recharge_ended_starts_countdown() {
        let (mut sims, _) = tracker();
        let id = sims.add_sim(now(), "Dad", "1", "Jio", "2026-12-01").unwrap();
        sims.mark_recharge_ended(now(), id).unwrap();

        let sim = sims.find(id).unwrap();
        assert_eq!(
            SimStatus::classify(today(), sim.expiry, 90),
            SimStatus::Warning {
                days_passed: 1,
                window: 90
            }
        );
        assert!(matches!(
            sims.mark_recharge_ended(now(), Id(1)),
            Err(AppError::NotFound { .. })
        ));
    }
}
