//! Top-level UI layout — active slide with status bar.

pub mod overlays;
pub mod status_bar;
pub mod widget_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_slide(f, main_area, app);
    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, main_area);
    }
}

/// Draw the active slide: one bordered frame, widgets side by side.
fn draw_slide(f: &mut Frame, area: Rect, app: &AppState) {
    let slide = match app.deck.active() {
        Ok(slide) => slide,
        Err(e) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(format!(" {} ", app.role));
            let text = Paragraph::new(Span::styled(format!("Nothing to show: {e}"), theme::muted()))
                .block(block);
            f.render_widget(text, area);
            return;
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(
            " {} [{}/{}] ",
            slide.title,
            app.deck.index() + 1,
            app.deck.len()
        ))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if slide.widgets.is_empty() {
        return;
    }

    let count = slide.widgets.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(slide.widgets.iter().map(|_| Constraint::Ratio(1, count)))
        .split(inner);

    for (i, (widget, column)) in slide.widgets.iter().zip(columns.iter()).enumerate() {
        let selection = app.selection(&widget.id);
        widget_panel::render(f, *column, widget, selection, i == app.focused);
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
