pub mod calendar_form;
pub mod month_grid;
pub mod month_row;
pub mod sidebar;
pub mod status_bar;

pub use calendar_form::{CalendarForm, CalendarFormState, FormField};
pub use month_grid::MonthGrid;
pub use month_row::MonthRow;
pub use sidebar::Sidebar;
pub use status_bar::StatusBar;

use chrono::NaiveDate;
use ratatui::style::{Color, Modifier, Style};

use crate::theme;

pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    .num_days() as u32
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Style for one day cell. Selection wins over everything; a marked day
/// takes the active calendar's color as background; today keeps a visible
/// outline-analog (underline) in any combination.
pub fn day_cell_style(
    date: NaiveDate,
    today: NaiveDate,
    selected: NaiveDate,
    marked: bool,
    mark_color: Color,
) -> Style {
    let mut style = if date == selected {
        theme::current().selected
    } else if marked {
        Style::default().fg(Color::Black).bg(mark_color)
    } else {
        Style::default()
    };

    if date == today {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        if date != selected && !marked {
            style = style.patch(theme::current().today);
        }
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn selection_beats_marking() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        let selected = day_cell_style(d, other, d, true, Color::Blue);
        assert_eq!(selected.bg, theme::current().selected.bg);

        let marked = day_cell_style(d, other, other, true, Color::Blue);
        assert_eq!(marked.bg, Some(Color::Blue));
    }
}
