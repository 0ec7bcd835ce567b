//! Help overlay — keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Slides");
    key(&mut lines, "→ / l / Tab", "Next slide (wraps to first)");
    key(&mut lines, "← / h / Shift+Tab", "Previous slide (wraps to last)");
    key(&mut lines, "1-9", "Jump to slide by number");
    lines.push(Line::from(""));

    section(&mut lines, "Widgets");
    key(&mut lines, "j / k", "Focus next / previous widget");
    key(&mut lines, "p", "Cycle focused widget's period (7D → 30D → 90D → 1Y)");
    lines.push(Line::from(""));

    section(&mut lines, "Dashboard");
    key(&mut lines, "r", "Switch between Curator and Operator");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>18}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
