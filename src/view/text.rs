//! Plain-text painting of view trees for terminals
//!
//! Block elements start a new line, inline pieces on the same line are
//! joined with a space, and `section`/`article`/`ul` indent their content.

use crate::view::node::{Element, Node};

const BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "header", "footer", "main", "nav", "h1", "h2", "h3", "h4",
    "p", "ul", "li",
];

const INDENT_TAGS: &[&str] = &["section", "article", "ul"];

/// Paint a tree as plain text, one block per line
pub fn paint(node: &Node) -> String {
    let mut painter = Painter::default();
    painter.node(node);
    painter.flush();
    painter.lines.join("\n")
}

#[derive(Default)]
struct Painter {
    lines: Vec<String>,
    pieces: Vec<String>,
    depth: usize,
}

impl Painter {
    fn node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.piece(text),
            Node::Element(el) => self.element(el),
        }
    }

    fn element(&mut self, el: &Element) {
        match el.tag {
            "input" if el.get_attr("type") == Some("checkbox") => {
                let mark = if el.get_attr("checked").is_some() {
                    "[x]"
                } else {
                    "[ ]"
                };
                self.piece(mark);
                return;
            }
            "img" | "input" | "iframe" => {
                if let Some(alt) = el.get_attr("alt") {
                    self.piece(&format!("({})", alt));
                }
                return;
            }
            "button" => {
                let label = el.text_content();
                if !label.trim().is_empty() {
                    self.piece(&format!("[{}]", label.trim()));
                }
                return;
            }
            _ => {}
        }

        let block = BLOCK_TAGS.contains(&el.tag);
        let indent = INDENT_TAGS.contains(&el.tag);

        if block {
            self.flush();
        }
        if indent {
            self.depth += 1;
        }
        for child in &el.children {
            self.node(child);
        }
        if block {
            self.flush();
        }
        if indent {
            self.depth -= 1;
        }
    }

    fn piece(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            self.pieces.push(collapsed);
        }
    }

    fn flush(&mut self) {
        if self.pieces.is_empty() {
            return;
        }
        let indent = "  ".repeat(self.depth.saturating_sub(1));
        self.lines
            .push(format!("{}{}", indent, self.pieces.join(" ")));
        self.pieces.clear();
    }
}
