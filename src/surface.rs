//! Rendering seam between the controllers and whatever draws them.
//!
//! Controllers never look up elements themselves; they talk to a
//! [`RenderTarget`] using the element names of the page contract. The DOM
//! front end maps these onto ids and classes, the terminal front end onto an
//! in-memory view model.

/// Named elements of the page contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// `#loading`
    Loading,
    /// `#error`
    ErrorBanner,
    /// `#error p`
    ErrorMessage,
    /// `#suggest`, the banner's call-to-action button
    SuggestButton,
    /// `.error-empty`, inline notice under the search input
    EmptyInputNotice,
    /// `error` class on `#searchInput`, drives the shake effect
    InputShake,
    /// `#results`
    SearchResults,
    /// `#all`
    Listing,
    /// `#listing`, the "listing N libraries" label
    ListingLabel,
    /// every `.prev`
    PrevButtons,
    /// every `.next`
    NextButtons,
    /// every `.page`
    PageFields,
}

/// One clickable library card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Card {
    pub href: String,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    /// Open in a new tab/context
    pub new_tab: bool,
}

/// Capability interface the controllers render through.
///
/// Group elements (`PrevButtons`, `NextButtons`, `PageFields`) address every
/// instance at once so top and bottom pagination bars stay in sync.
pub trait RenderTarget {
    /// Show or hide an element (or toggle a mark such as [`Element::InputShake`]).
    fn set_visible(&mut self, el: Element, visible: bool);

    /// Replace the text of an element.
    fn set_text(&mut self, el: Element, text: &str);

    /// Replace the children of a container with the given cards.
    fn set_cards(&mut self, el: Element, cards: Vec<Card>);

    /// Mark a control disabled or enabled.
    fn set_disabled(&mut self, el: Element, disabled: bool);

    /// Whether a control is currently marked disabled.
    fn is_disabled(&self, el: Element) -> bool;
}
