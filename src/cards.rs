use crate::constants::cards::PLACEHOLDER_HREF;
use crate::surface::Card;
use crate::types::LibraryRecord;

/// Turn records into cards, keeping the server's order.
pub fn render_cards(records: &[LibraryRecord]) -> Vec<Card> {
    records.iter().map(render_card).collect()
}

pub fn render_card(record: &LibraryRecord) -> Card {
    let href = match record.link.as_deref() {
        Some(link) if !link.is_empty() => link.to_string(),
        _ => PLACEHOLDER_HREF.to_string(),
    };
    Card {
        href,
        title: record.name.clone(),
        body: record.description().to_string(),
        category: record.category.clone().filter(|c| !c.is_empty()),
        new_tab: true,
    }
}
