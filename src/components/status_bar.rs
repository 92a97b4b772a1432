use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::store::ViewMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        mode: ViewMode,
        active_title: Option<&str>,
        message: Option<&str>,
    ) {
        let w = area.width as usize;

        let mode_str = match mode {
            ViewMode::MonthRows => "[rows]",
            ViewMode::MonthsGrid => "[grid]",
        };
        let left = match active_title {
            Some(title) => format!(" {} {} ", mode_str, title),
            None => format!(" {} ", mode_str),
        };

        // A transient message wins over the key hints.
        let right = if let Some(msg) = message {
            format!(" {} ", msg)
        } else if w >= 90 {
            " hjkl:Nav [/]:Month {/}:Year t:Today Sp:Mark Tab:Cal v:View n:New d:Del ?:Help q:Quit"
                .to_string()
        } else if w >= 50 {
            " hjkl:Nav Sp:Mark Tab:Cal n:New ?:Help q:Quit".to_string()
        } else {
            " ?:Help q:Quit".to_string()
        };

        let padding = " ".repeat(w.saturating_sub(left.len() + right.len()));
        let line = Line::from(vec![
            Span::styled(left, theme::current().status),
            Span::styled(padding, theme::current().status),
            Span::styled(right, theme::current().status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme::current().status), area);
    }
}
