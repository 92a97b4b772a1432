use chrono::{Datelike, Local, NaiveDate};

use crate::components::{days_in_month, CalendarFormState};
use crate::store::{Calendar, Storage, Store};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub show_help: bool,
    pub form_state: Option<CalendarFormState>,
    pub status_message: Option<String>,
    pub store: Store,
}

impl App {
    pub fn new() -> Self {
        Self::with_store(Store::load(Storage::open_default()))
    }

    pub fn with_store(store: Store) -> Self {
        let today = Local::now().date_naive();
        Self {
            running: true,
            input_mode: InputMode::Normal,
            selected_date: today,
            today,
            show_help: false,
            form_state: None,
            status_message: None,
            store,
        }
    }

    /// The year the views render: always the selected date's.
    pub fn current_year(&self) -> i32 {
        self.selected_date.year()
    }

    // ── Navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
    }

    pub fn next_week(&mut self) {
        self.selected_date += chrono::Duration::weeks(1);
    }

    pub fn prev_week(&mut self) {
        self.selected_date -= chrono::Duration::weeks(1);
    }

    pub fn next_month(&mut self) {
        let (year, month) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        self.move_to(year, month);
    }

    pub fn prev_month(&mut self) {
        let (year, month) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        self.move_to(year, month);
    }

    pub fn next_year(&mut self) {
        self.move_to(self.selected_date.year() + 1, self.selected_date.month());
    }

    pub fn prev_year(&mut self) {
        self.move_to(self.selected_date.year() - 1, self.selected_date.month());
    }

    fn move_to(&mut self, year: i32, month: u32) {
        let day = self.selected_date.day().min(days_in_month(year, month));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.selected_date = date;
        }
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = self.today;
    }

    // ── Marking and calendars ──

    pub fn toggle_selected_day(&mut self) {
        self.store.toggle_day(self.selected_date);
    }

    pub fn toggle_view_mode(&mut self) {
        let mode = self.store.view_mode().toggled();
        self.store.set_view_mode(mode);
    }

    /// Cycle the active calendar to the next one in list order.
    pub fn next_calendar(&mut self) {
        let calendars = self.store.calendars();
        if calendars.len() < 2 {
            return;
        }
        let active = self.store.active_calendar().map(|c| c.id.clone());
        let index = active
            .and_then(|id| calendars.iter().position(|c| c.id == id))
            .unwrap_or(0);
        let next_id = calendars[(index + 1) % calendars.len()].id.clone();
        self.store.set_active_calendar(&next_id);
    }

    pub fn delete_active_calendar(&mut self) {
        let Some((id, title)) = self
            .store
            .active_calendar()
            .map(|c| (c.id.clone(), c.title.clone()))
        else {
            return;
        };
        self.store.delete_calendar(&id);
        self.status_message = Some(format!("Deleted '{}'", title));
    }

    // ── New-calendar form ──

    pub fn open_form(&mut self) {
        self.form_state = Some(CalendarFormState::default());
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self) {
        let Some(form) = &self.form_state else {
            return;
        };
        if !form.is_valid() {
            return;
        }

        let calendar = Calendar::new(form.title.trim(), form.color_tag());
        let id = calendar.id.clone();
        match self.store.add_calendar(calendar) {
            Ok(()) => {
                self.store.set_active_calendar(&id);
                self.close_form();
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
                self.close_form();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FormField;

    fn app() -> App {
        let mut app = App::with_store(Store::load(Storage::Memory));
        app.store.delete_calendar("default");
        app
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_navigation_clamps_the_day() {
        let mut app = app();
        app.selected_date = date(2025, 1, 31);
        app.next_month();
        assert_eq!(app.selected_date, date(2025, 2, 28));
        app.prev_month();
        assert_eq!(app.selected_date, date(2025, 1, 28));
    }

    #[test]
    fn month_navigation_crosses_year_boundaries() {
        let mut app = app();
        app.selected_date = date(2025, 12, 15);
        app.next_month();
        assert_eq!(app.selected_date, date(2026, 1, 15));
        assert_eq!(app.current_year(), 2026);

        app.selected_date = date(2025, 1, 15);
        app.prev_month();
        assert_eq!(app.selected_date, date(2024, 12, 15));
    }

    #[test]
    fn year_navigation_handles_leap_days() {
        let mut app = app();
        app.selected_date = date(2024, 2, 29);
        app.next_year();
        assert_eq!(app.selected_date, date(2025, 2, 28));
    }

    #[test]
    fn submitting_the_form_creates_and_activates() {
        let mut app = app();
        app.open_form();
        assert_eq!(app.input_mode, InputMode::Form);

        let form = app.form_state.as_mut().unwrap();
        for c in "Work Schedule".chars() {
            form.input_char(c);
        }
        form.active_field = FormField::Color;
        form.next_color();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.form_state.is_none());
        let active = app.store.active_calendar().unwrap();
        assert_eq!(active.id, "work-schedule");
        assert_eq!(active.color_tag, "blue");
    }

    #[test]
    fn invalid_form_stays_open() {
        let mut app = app();
        app.open_form();
        app.submit_form();
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.form_state.is_some());
    }

    #[test]
    fn duplicate_title_reports_a_status_message() {
        let mut app = app();
        app.store
            .add_calendar(Calendar::new("Work", "blue"))
            .unwrap();

        app.open_form();
        for c in "Work".chars() {
            app.form_state.as_mut().unwrap().input_char(c);
        }
        app.submit_form();

        assert!(app.status_message.is_some());
        assert_eq!(app.store.calendars().len(), 1);
    }

    #[test]
    fn tab_cycles_through_calendars() {
        let mut app = app();
        app.store.add_calendar(Calendar::new("A", "red")).unwrap();
        app.store.add_calendar(Calendar::new("B", "blue")).unwrap();
        app.store.add_calendar(Calendar::new("C", "green")).unwrap();
        assert_eq!(app.store.active_calendar_id(), Some("a"));

        app.next_calendar();
        assert_eq!(app.store.active_calendar_id(), Some("b"));
        app.next_calendar();
        app.next_calendar();
        assert_eq!(app.store.active_calendar_id(), Some("a"));
    }

    #[test]
    fn toggling_marks_the_cursor_day() {
        let mut app = app();
        app.store.add_calendar(Calendar::new("Work", "blue")).unwrap();
        app.selected_date = date(2025, 4, 8);

        app.toggle_selected_day();
        assert!(app.store.is_marked(date(2025, 4, 8)));
        app.toggle_selected_day();
        assert!(!app.store.is_marked(date(2025, 4, 8)));
    }
}
