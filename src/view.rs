//! In-memory render target.
//!
//! Holds exactly what a page would show: which elements are visible, their
//! text, the cards in each container and which controls are disabled. The
//! terminal UI draws from it and tests assert against it.

use std::collections::{HashMap, HashSet};

use crate::surface::{Card, Element, RenderTarget};

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    visible: HashSet<Element>,
    text: HashMap<Element, String>,
    cards: HashMap<Element, Vec<Card>>,
    disabled: HashSet<Element>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, el: Element) -> bool {
        self.visible.contains(&el)
    }

    pub fn text(&self, el: Element) -> &str {
        self.text.get(&el).map(String::as_str).unwrap_or_default()
    }

    pub fn cards(&self, el: Element) -> &[Card] {
        self.cards.get(&el).map(Vec::as_slice).unwrap_or_default()
    }

    /// Error banner text, if the banner is up.
    pub fn banner(&self) -> Option<&str> {
        self.is_visible(Element::ErrorBanner)
            .then(|| self.text(Element::ErrorMessage))
    }
}

impl RenderTarget for ViewModel {
    fn set_visible(&mut self, el: Element, visible: bool) {
        if visible {
            self.visible.insert(el);
        } else {
            self.visible.remove(&el);
        }
    }

    fn set_text(&mut self, el: Element, text: &str) {
        self.text.insert(el, text.to_string());
    }

    fn set_cards(&mut self, el: Element, cards: Vec<Card>) {
        self.cards.insert(el, cards);
    }

    fn set_disabled(&mut self, el: Element, disabled: bool) {
        if disabled {
            self.disabled.insert(el);
        } else {
            self.disabled.remove(&el);
        }
    }

    fn is_disabled(&self, el: Element) -> bool {
        self.disabled.contains(&el)
    }
}
