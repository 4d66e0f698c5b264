use ratatui::{
    Frame,
    layout::{Layout, Direction, Constraint, Rect},
    widgets::{Block, Borders, BorderType, List, ListItem, ListState, Paragraph, Wrap, Clear},
    style::{Style, Modifier},
    text::{Line, Span},
};
use crate::app::{App, Pane};
use crate::surface::{Card, Element, RenderTarget};

// ===============================
// Top-level draw
// ===============================
pub fn draw(f:&mut Frame, app:&App){
    let view = app.view();
    let show_banner = view.is_visible(Element::ErrorBanner);
    let show_notice = view.is_visible(Element::EmptyInputNotice);

    let mut constraints: Vec<Constraint> = Vec::with_capacity(6);
    constraints.push(Constraint::Length(1));                          // header
    constraints.push(Constraint::Length(3));                          // search input
    if show_notice { constraints.push(Constraint::Length(1)); }       // inline empty-input notice
    if show_banner { constraints.push(Constraint::Length(3)); }       // error banner
    constraints.push(Constraint::Min(0));                             // body (fills remainder)
    constraints.push(Constraint::Length(1));                          // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0usize;
    header(f, chunks[idx], app); idx += 1;
    search_bar(f, chunks[idx], app); idx += 1;
    if show_notice {
        let notice = Paragraph::new(view.text(Element::EmptyInputNotice))
            .style(Style::default().fg(app.theme().toast_error));
        f.render_widget(notice, chunks[idx]); idx += 1;
    }
    if show_banner {
        error_banner(f, chunks[idx], app); idx += 1;
    }
    body(f, chunks[idx], app); idx += 1;
    footer(f, chunks[idx], app);

    if app.toast_message().is_some() {
        draw_toast_modal(f, app);
    }
}

// ===============================
// Header / Search
// ===============================
fn header(f:&mut Frame, area:Rect, app:&App){
    let titles = [(Pane::Search, "Search"), (Pane::Listing, "All libraries")];

    let mut spans = Vec::new();
    for (i, (pane, title)) in titles.iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        if *pane == app.pane() {
            spans.push(Span::styled(
                *title,
                Style::default().fg(app.theme().focus_border).add_modifier(Modifier::BOLD)
            ));
        } else {
            spans.push(Span::raw(*title));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐  "));
    spans.push(Span::styled(app.api_url(), Style::default().fg(app.theme().text_dim)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn search_bar(f:&mut Frame, area:Rect, app:&App){
    let focused = app.pane() == Pane::Search;
    let shaking = app.view().is_visible(Element::InputShake);
    let input = app.input();

    let border_color = if shaking {
        app.theme().toast_error
    } else if focused {
        app.theme().focus_border
    } else {
        app.theme().unfocused_border
    };
    let hint = "(type a library, a task or a keyword and press Enter)";
    let text = if input.is_empty() && !focused { hint } else { input };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(if focused { app.theme().text } else { app.theme().text_dim }))
        .block(Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)));
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let x = area.x + 1 + (input.chars().count().min(area.width.saturating_sub(2) as usize) as u16);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn error_banner(f:&mut Frame, area:Rect, app:&App){
    let view = app.view();
    let mut spans = vec![Span::styled(
        view.text(Element::ErrorMessage).to_string(),
        Style::default().fg(app.theme().toast_error).add_modifier(Modifier::BOLD),
    )];
    // display-only: the terminal has nowhere to send a suggestion
    if view.is_visible(Element::SuggestButton) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[ suggest a library ]", Style::default().fg(app.theme().badge)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(app.theme().toast_error)));
    f.render_widget(paragraph, area);
}

// ===============================
// Body
// ===============================
fn body(f:&mut Frame, area:Rect, app:&App){
    // Stack vertically on narrow terminals
    const NARROW_THRESHOLD: u16 = 80;
    let direction = if area.width < NARROW_THRESHOLD { Direction::Vertical } else { Direction::Horizontal };

    let cols = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    results_pane(f, cols[0], app);
    listing_pane(f, cols[1], app);
}

fn results_pane(f:&mut Frame, area:Rect, app:&App){
    let loading = app.view().is_visible(Element::Loading);
    let count = app.cards(Pane::Search).len();
    let title = if loading {
        " Results · searching… ".to_string()
    } else {
        format!(" Results ({count}) ")
    };
    let title_style = if loading { Style::default().fg(app.theme().loading) } else { Style::default() };
    card_list(f, area, app, Pane::Search, Line::styled(title, title_style));
}

fn listing_pane(f:&mut Frame, area:Rect, app:&App){
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let label = app.view().text(Element::ListingLabel);
    let title = if label.is_empty() { " All libraries ".to_string() } else { format!(" {label} ") };
    card_list(f, rows[0], app, Pane::Listing, Line::raw(title));
    pagination_bar(f, rows[1], app);
}

fn pagination_bar(f:&mut Frame, area:Rect, app:&App){
    let view = app.view();
    let control = |label: &'static str, el: Element| {
        if view.is_disabled(el) {
            Span::styled(label, Style::default().fg(app.theme().text_dim).add_modifier(Modifier::DIM))
        } else {
            Span::styled(label, Style::default().fg(app.theme().focus_border))
        }
    };
    let page = view.text(Element::PageFields);
    let page = if page.is_empty() { "-" } else { page };
    let position = match app.page_state().total_pages {
        Some(total) => format!("  page {page} / {total}  "),
        None => format!("  page {page}  "),
    };
    let line = Line::from(vec![
        control("◀ prev", Element::PrevButtons),
        Span::raw(position),
        control("next ▶", Element::NextButtons),
    ]);
    f.render_widget(Paragraph::new(line).alignment(ratatui::layout::Alignment::Center), area);
}

fn card_list(f:&mut Frame, area:Rect, app:&App, pane:Pane, title:Line){
    let focused = app.pane() == pane;
    let cards = app.cards(pane);

    let items: Vec<ListItem> = cards.iter().map(|c| card_item(c, app)).collect();
    let border_color = if focused { app.theme().focus_border } else { app.theme().unfocused_border };

    let list = List::new(items)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)))
        .highlight_style(Style::default().bg(app.theme().selection_bg).fg(app.theme().selection_fg));

    let mut state = ListState::default();
    if focused && !cards.is_empty() {
        state.select(Some(app.selection(pane)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn card_item<'a>(card:&'a Card, app:&App) -> ListItem<'a> {
    let mut heading = vec![Span::styled(card.title.as_str(), Style::default().add_modifier(Modifier::BOLD))];
    if let Some(cat) = &card.category {
        heading.push(Span::raw(" "));
        heading.push(Span::styled(format!("[{cat}]"), Style::default().fg(app.theme().badge)));
    }
    ListItem::new(vec![
        Line::from(heading),
        Line::raw(format!("  {}", card.body)),
        Line::styled(format!("  {}", card.href), Style::default().fg(app.theme().text_dim)),
    ])
}

// ===============================
// Footer / overlays
// ===============================
fn footer(f:&mut Frame, area:Rect, app:&App){
    let key = Style::default().fg(app.theme().focus_border);
    let mut spans: Vec<Span> = Vec::with_capacity(16);

    spans.push(Span::styled("Tab", key));
    spans.push(Span::raw(" switch │ "));
    spans.push(Span::styled("Enter", key));
    spans.push(Span::raw(" search │ "));
    spans.push(Span::styled("↑/↓", key));
    spans.push(Span::raw(" select │ "));
    spans.push(Span::styled("←/→", key));
    spans.push(Span::raw(" page │ "));
    spans.push(Span::styled("r", key));
    spans.push(Span::raw(" reload │ "));
    spans.push(Span::styled("c", key));
    spans.push(Span::raw(" copy link │ "));
    spans.push(Span::styled("Esc", key));
    spans.push(Span::raw(" quit"));

    if let Some(toast) = app.toast_message() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(toast, Style::default().fg(app.theme().toast_success).add_modifier(Modifier::BOLD)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_toast_modal(f: &mut Frame, app: &App) {
    let message = app.toast_message().unwrap_or("");
    let (glyph, color) = if message == crate::constants::messages::COPY_FAILED {
        ("✗", app.theme().toast_error)
    } else {
        ("✓", app.theme().toast_success)
    };

    // Small centered box (40% width, 3 lines height)
    let area = f.area();
    let width = (area.width * 4) / 10;
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let text = Paragraph::new(format!("{glyph} {message}"))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(block);

    f.render_widget(text, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::driver::{AppEvent, Driver};
    use crate::listing::ListingController;
    use crate::types::ApiResponse;
    use serde_json::json;
    use crate::api::ApiClient;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app() -> App {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let fetcher = Arc::new(ApiClient::with_defaults().unwrap());
        App::new(&Config::default(), Driver::new(fetcher, Duration::from_millis(100), tx))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn draws_empty_app_without_panicking() {
        let text = render(&test_app());
        assert!(text.contains("All libraries"));
        assert!(text.contains("Search"));
        assert!(text.contains("page -"));
    }

    #[tokio::test]
    async fn no_match_banner_shows_suggest_label() {
        let mut app = test_app();
        app.set_input("xyzzy");
        app.submit_search();
        app.on_event(AppEvent::SearchDone {
            id: 1,
            response: ApiResponse::Body(json!({"response": "false", "results": []})),
        });

        let text = render(&app);
        assert!(text.contains("no library found"));
        assert!(text.contains("[ suggest a library ]"));
    }

    #[tokio::test]
    async fn pagination_shows_total_pages_when_known() {
        let mut app = test_app();
        app.start();
        let request = ListingController::new(None).init();
        app.on_event(AppEvent::ListingDone {
            request,
            response: ApiResponse::Body(json!({"results": [], "page": 2, "has_prev": true, "total_pages": 5})),
        });

        assert!(render(&app).contains("page 2 / 5"));
    }
}
