//! Hub view: the app grid, plus the password prompt or the open frame

use crate::hub::launcher::Hub;
use crate::hub::types::{HubApp, HubSession, OpenFrame};
use crate::shell::MiniApp;
use crate::view::{Element, Node};
use chrono::{DateTime, Local};

impl MiniApp for Hub {
    type Session = HubSession;
    const NAME: &'static str = "hub";

    fn render(&self, session: &HubSession, _now: DateTime<Local>) -> Node {
        let grid = Element::new("section")
            .class("app-grid")
            .children(self.apps().iter().map(app_card));

        let mut root = Element::new("div")
            .class("hub-app")
            .child(Element::new("h1").class("hub-title").text("My Apps"))
            .child(grid);

        if let Some(id) = session.pending {
            let name = self.find(id).map(|a| a.name.as_str()).unwrap_or("");
            root = root.child(password_prompt(name));
        }
        if let Some(frame) = &session.open {
            root = root.child(frame_overlay(frame));
        }

        root.into()
    }
}

fn app_card(app: &HubApp) -> Element {
    Element::new("article")
        .class("app-card")
        .attr("data-id", app.id.to_string())
        .child(
            Element::new("img")
                .class("app-icon")
                .attr("src", app.icon.clone())
                .attr("alt", app.name.clone()),
        )
        .child(Element::new("span").class("app-name").text(app.name.clone()))
}

fn password_prompt(app_name: &str) -> Element {
    Element::new("section")
        .class("pass-modal")
        .child(Element::new("h3").text("Enter Password"))
        .child(Element::new("p").class("pass-app").text(app_name))
        .child(Element::new("input").attr("type", "password"))
        .child(Element::new("button").text("Unlock"))
}

fn frame_overlay(frame: &OpenFrame) -> Element {
    Element::new("section")
        .class("app-frame")
        .attr("data-id", frame.app_id.to_string())
        .child(
            Element::new("div")
                .class("frame-bar")
                .child(Element::new("span").class("frame-title").text(frame.name.clone()))
                .child(Element::new("button").text("Close")),
        )
        .child(
            Element::new("iframe")
                .attr("src", frame.url.clone())
                .attr("title", frame.name.clone()),
        )
}
