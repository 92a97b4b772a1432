use std::collections::HashMap;

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{day_cell_style, days_in_month, month_name};
use crate::theme;

/// One month as a single row: a fixed-width label followed by up to 31 day
/// cells. Twelve of these stacked make the month-rows year view.
pub struct MonthRow;

impl MonthRow {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        month: u32,
        year: i32,
        today: NaiveDate,
        selected: NaiveDate,
        marked: &HashMap<NaiveDate, bool>,
        mark_color: Color,
    ) {
        let mut spans: Vec<Span> = vec![Span::styled(
            format!("{:<10}", month_name(month)),
            theme::current().header,
        )];

        for day in 1..=days_in_month(year, month) {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let is_marked = marked.get(&date).copied().unwrap_or(false);
            let style = day_cell_style(date, today, selected, is_marked, mark_color);
            spans.push(Span::styled(format!("{:>2} ", day), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
