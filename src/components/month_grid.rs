use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{day_cell_style, days_in_month, month_name};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One mini month: name, weekday header, and a week-per-line grid. The
/// months-grid year view lays out twelve of these in columns.
pub struct MonthGrid;

/// Width in columns one grid needs (7 day cells of 3).
pub const GRID_WIDTH: u16 = 21;
/// Height in rows: name + header + up to 6 weeks.
pub const GRID_HEIGHT: u16 = 8;

impl MonthGrid {
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
        let title = Line::from(Span::styled(
            format!("{:^width$}", month_name(month), width = GRID_WIDTH as usize),
            theme::current().header,
        ));

        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:>2} ", d), theme::current().dim))
            .collect();
        let header = Line::from(header_cells);

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let first_weekday = first_day.weekday().num_days_from_sunday() as i32;
        let last_day = days_in_month(year, month) as i32;

        let mut weeks: Vec<Line> = Vec::new();
        let mut current_day = 1 - first_weekday;
        while current_day <= last_day {
            let mut cells: Vec<Span> = Vec::new();
            for _ in 0..7 {
                if current_day < 1 || current_day > last_day {
                    cells.push(Span::raw("   "));
                } else {
                    let day = current_day as u32;
                    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                    let is_marked = marked.get(&date).copied().unwrap_or(false);
                    let style = day_cell_style(date, today, selected, is_marked, mark_color);
                    cells.push(Span::styled(format!("{:>2} ", day), style));
                }
                current_day += 1;
            }
            weeks.push(Line::from(cells));
        }

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(area);

        frame.render_widget(Paragraph::new(title), rows[0]);
        frame.render_widget(Paragraph::new(header), rows[1]);
        for (i, week) in weeks.iter().enumerate() {
            frame.render_widget(Paragraph::new(week.clone()), rows[i + 2]);
        }
    }
}
