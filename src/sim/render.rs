//! SIM tracker view: one card per record, status derived from today

use crate::shell::MiniApp;
use crate::sim::status::SimStatus;
use crate::sim::tracker::SimTracker;
use crate::sim::types::SimRecord;
use crate::view::{Element, Node};
use chrono::{DateTime, Local, NaiveDate};

impl MiniApp for SimTracker {
    type Session = ();
    const NAME: &'static str = "sim";

    fn render(&self, _: &(), now: DateTime<Local>) -> Node {
        let root = Element::new("div")
            .class("sim-app")
            .child(Element::new("h1").text("SIM Tracker"));

        let list = Element::new("section").class("sim-list");
        if self.sims().is_empty() {
            return root
                .child(list.child(
                    Element::new("p")
                        .class("empty-state")
                        .text("No SIMs added yet"),
                ))
                .into();
        }

        let today = now.date_naive();
        let window = self.config.inactive_after_days;
        root.child(list.children(self.sims().iter().map(|sim| sim_card(sim, today, window))))
            .into()
    }
}

fn sim_card(sim: &SimRecord, today: NaiveDate, window: i64) -> Element {
    let status = SimStatus::classify(today, sim.expiry, window);

    Element::new("article")
        .class("sim-card")
        .class(status.css_class())
        .attr("data-id", sim.id.to_string())
        .child(
            Element::new("div").class("card-header").child(
                Element::new("span")
                    .class("operator-badge")
                    .attr("style", format!("background:{}", sim.operator.badge_color()))
                    .text(sim.operator.name()),
            ),
        )
        .child(
            Element::new("div")
                .class("sim-details")
                .child(Element::new("h3").text(sim.name.clone()))
                .child(Element::new("p").text(sim.number.clone()))
                .child(Element::new("div").class("status-text").text(status.label())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::config::SimConfig;
    use crate::storage::MemoryStorage;
    use crate::view::html;
    use std::rc::Rc;

    fn now() -> DateTime<Local> {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()).now()
    }

    fn tracker() -> SimTracker {
        SimTracker::open(Rc::new(MemoryStorage::new()), SimConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_state() {
        let view = tracker().render(&(), now());
        assert_eq!(view.count_class("empty-state"), 1);
        assert_eq!(view.count_class("sim-card"), 0);
    }

    #[test]
    fn test_cards_in_stored_order() {
        let mut sims = tracker();
        sims.add_sim(now(), "Dad", "1", "Jio", "2026-07-11").unwrap();
        sims.add_sim(now(), "Mom", "2", "Airtel", "2026-07-09").unwrap();
        sims.add_sim(now(), "Old", "3", "Vi", "2026-01-01").unwrap();

        let view = sims.render(&(), now());
        let cards = view.find_class("sim-card");
        assert_eq!(cards.len(), 3);
        assert!(cards[0].has_class("status-black"));
        assert!(cards[1].has_class("status-red"));
        assert!(cards[2].has_class("status-green"));

        let status = view.find_class("status-text");
        assert_eq!(status[0].text_content(), "Active (Expires in 1 days)");
        assert_eq!(status[1].text_content(), "Warning! (1/90 days passed)");

        let out = html::render(&view);
        assert!(out.contains(r#"style="background:#e40000""#));
    }
}
