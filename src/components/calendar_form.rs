use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::store::COLOR_TAGS;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Color,
            FormField::Color => FormField::Title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarFormState {
    pub title: String,
    pub color_index: usize,
    pub active_field: FormField,
}

impl Default for CalendarFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            color_index: 0,
            active_field: FormField::Title,
        }
    }
}

impl CalendarFormState {
    pub fn color_tag(&self) -> &'static str {
        COLOR_TAGS[self.color_index % COLOR_TAGS.len()]
    }

    pub fn input_char(&mut self, c: char) {
        if self.active_field == FormField::Title {
            self.title.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.active_field == FormField::Title {
            self.title.pop();
        }
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % COLOR_TAGS.len();
    }

    pub fn prev_color(&mut self) {
        self.color_index = (self.color_index + COLOR_TAGS.len() - 1) % COLOR_TAGS.len();
    }

    /// Create stays disabled until a title is typed.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

pub struct CalendarForm;

impl CalendarForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &CalendarFormState) {
        // Center the popup
        let form_w = area.width.min(46).max(30);
        let form_h = 8.min(area.height);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Calendar ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // color picker
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_title_field(
            frame,
            rows[0],
            &state.title,
            state.active_field == FormField::Title,
        );
        render_color_picker(
            frame,
            rows[1],
            state.color_index,
            state.active_field == FormField::Color,
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme::current().dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Color ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Create ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

fn render_title_field(frame: &mut Frame, area: Rect, title: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled("Title:  ", theme::current().dim),
        Span::styled(format!("{title}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_color_picker(frame: &mut Frame, area: Rect, selected: usize, active: bool) {
    let mut spans = vec![Span::styled("Color:  ", theme::current().dim)];
    for (i, tag) in COLOR_TAGS.iter().enumerate() {
        let color = theme::current().tag_color(tag);
        let dot = if i == selected {
            let mut style = Style::default().fg(color);
            if active {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled("(\u{25cf})", style)
        } else {
            Span::styled(" \u{25cf} ", Style::default().fg(color))
        };
        spans.push(dot);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
