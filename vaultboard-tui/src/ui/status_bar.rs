//! Bottom status bar — role, slide position, key hints, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" {} ", app.role), theme::accent_bold()));
    if !app.deck.is_empty() {
        spans.push(Span::styled(
            format!("{}/{} ", app.deck.index() + 1, app.deck.len()),
            theme::neutral(),
        ));
    }

    spans.push(Span::styled(
        "←/→ slide  j/k focus  p period  r role  ? help  q quit",
        theme::muted(),
    ));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
