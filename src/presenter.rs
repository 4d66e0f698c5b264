//! Loading indicator and error banner.

use crate::constants::messages;
use crate::surface::{Element, RenderTarget};

/// Show or hide the shared error banner. Last caller wins.
///
/// Showing the banner always hides the loading indicator; hiding it leaves
/// the indicator alone. An empty message falls back to a generic one.
pub fn show_error(target: &mut dyn RenderTarget, show: bool, message: Option<&str>, show_action: bool) {
    if !show {
        target.set_visible(Element::ErrorBanner, false);
        return;
    }

    target.set_visible(Element::Loading, false);
    let text = match message {
        Some(m) if !m.is_empty() => m,
        _ => messages::FALLBACK_ERROR,
    };
    log::debug!("[presenter] error banner: {text} (action={show_action})");
    target.set_text(Element::ErrorMessage, text);
    target.set_visible(Element::SuggestButton, show_action);
    target.set_visible(Element::ErrorBanner, true);
}

pub fn hide_error(target: &mut dyn RenderTarget) {
    show_error(target, false, None, false);
}

pub fn show_loading(target: &mut dyn RenderTarget, show: bool) {
    target.set_visible(Element::Loading, show);
}
