use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::store::Calendar;
use crate::theme;

/// Calendar list: a color dot and title per calendar, active one
/// highlighted. Pure display; switching and deleting are key-driven.
pub struct Sidebar;

impl Sidebar {
    pub fn render(frame: &mut Frame, area: Rect, calendars: &[Calendar], active_id: Option<&str>) {
        let block = Block::default()
            .title(" Calendars ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = calendars
            .iter()
            .map(|calendar| {
                let active = active_id == Some(calendar.id.as_str());
                let dot = Span::styled(
                    "\u{25cf} ",
                    ratatui::style::Style::default()
                        .fg(theme::current().tag_color(&calendar.color_tag)),
                );
                let title_style = if active {
                    theme::current().selected
                } else {
                    ratatui::style::Style::default()
                };
                let title = Span::styled(format!(" {} ", calendar.title), title_style);
                Line::from(vec![Span::raw(" "), dot, title])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
