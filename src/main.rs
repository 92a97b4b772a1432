mod app;
mod components;
mod event;
mod store;
mod theme;
mod tui;

use std::collections::HashMap;
use std::time::Duration;

use app::{App, InputMode};
use chrono::NaiveDate;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Color;

use components::{month_grid, CalendarForm, MonthGrid, MonthRow, Sidebar, StatusBar};
use store::ViewMode;

const SIDEBAR_WIDTH: u16 = 24;

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut app = App::new();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Clear a transient status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];

    // Sidebar on the left when there is room
    let (sidebar_area, year_area) = if content_area.width >= 70 {
        let cols = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(content_area);
        (Some(cols[0]), cols[1])
    } else {
        (None, content_area)
    };

    let active = app.store.active_calendar();
    if let Some(sidebar) = sidebar_area {
        Sidebar::render(
            frame,
            sidebar,
            app.store.calendars(),
            active.map(|c| c.id.as_str()),
        );
    }

    let marked = app.store.marked_days();
    let mark_color = active
        .map(|c| theme::current().tag_color(&c.color_tag))
        .unwrap_or(Color::Gray);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(year_area);
    render_year_header(frame, rows[0], app.current_year());

    match app.store.view_mode() {
        ViewMode::MonthRows => render_month_rows(frame, rows[1], app, &marked, mark_color),
        ViewMode::MonthsGrid => render_months_grid(frame, rows[1], app, &marked, mark_color),
    }

    if let Some(ref form) = app.form_state {
        CalendarForm::render(frame, area, form);
    }

    if app.show_help {
        render_help(frame, area);
    }

    StatusBar::render(
        frame,
        layout[1],
        app.store.view_mode(),
        active.map(|c| c.title.as_str()),
        app.status_message.as_deref(),
    );
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_week(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_week(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('{'), _) => app.prev_year(),
        (KeyCode::Char('}'), _) => app.next_year(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => app.toggle_selected_day(),
        (KeyCode::Char('v'), _) => app.toggle_view_mode(),
        (KeyCode::Tab, _) => app.next_calendar(),
        (KeyCode::Char('n'), _) => app.open_form(),
        (KeyCode::Char('d'), _) => app.delete_active_calendar(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    use components::FormField;

    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(ref mut form) = app.form_state {
                form.active_field = form.active_field.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.form_state {
                form.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(ref mut form) = app.form_state {
                if form.active_field == FormField::Color {
                    form.prev_color();
                }
            }
        }
        KeyCode::Right => {
            if let Some(ref mut form) = app.form_state {
                if form.active_field == FormField::Color {
                    form.next_color();
                }
            }
        }
        KeyCode::Char(' ') => {
            if let Some(ref mut form) = app.form_state {
                match form.active_field {
                    FormField::Color => form.next_color(),
                    FormField::Title => form.input_char(' '),
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.form_state {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

/// Year strip: neighbors dimmed around the bold current year.
fn render_year_header(frame: &mut ratatui::Frame, area: Rect, year: i32) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let mut spans = Vec::new();
    for y in (year - 2)..=(year + 2) {
        if y == year {
            spans.push(Span::styled(format!("  {y}  "), theme::current().header));
        } else {
            spans.push(Span::styled(format!("  {y}  "), theme::current().dim));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}

fn render_month_rows(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App,
    marked: &HashMap<NaiveDate, bool>,
    mark_color: Color,
) {
    let mut constraints = Vec::with_capacity(13);
    for _ in 0..12 {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(area);

    for month in 1..=12u32 {
        MonthRow::render(
            frame,
            rows[month as usize - 1],
            month,
            app.current_year(),
            app.today,
            app.selected_date,
            marked,
            mark_color,
        );
    }
}

fn render_months_grid(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App,
    marked: &HashMap<NaiveDate, bool>,
    mark_color: Color,
) {
    // As many grid columns as fit, at most 4 (3 rows of months)
    let per_row = (area.width / (month_grid::GRID_WIDTH + 2)).clamp(1, 4) as usize;
    let grid_rows = 12usize.div_ceil(per_row);

    let mut row_constraints = Vec::with_capacity(grid_rows + 1);
    for _ in 0..grid_rows {
        row_constraints.push(Constraint::Length(month_grid::GRID_HEIGHT + 1));
    }
    row_constraints.push(Constraint::Min(0));
    let row_areas = Layout::vertical(row_constraints).split(area);

    for (i, chunk) in (1..=12u32).collect::<Vec<_>>().chunks(per_row).enumerate() {
        let mut col_constraints: Vec<Constraint> = chunk
            .iter()
            .map(|_| Constraint::Length(month_grid::GRID_WIDTH + 2))
            .collect();
        col_constraints.push(Constraint::Min(0));
        let cols = Layout::horizontal(col_constraints).split(row_areas[i]);

        for (j, &month) in chunk.iter().enumerate() {
            MonthGrid::render(
                frame,
                cols[j],
                month,
                app.current_year(),
                app.today,
                app.selected_date,
                marked,
                mark_color,
            );
        }
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(50).max(30);
    let popup_h = area.height.min(20).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  h/l ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2190}/\u{2192}  ", key_style),
            Span::raw("Previous/next day"),
        ]),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::raw("Previous/next week"),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::raw("Previous/next month"),
        ]),
        Line::from(vec![
            Span::styled("  {/}       ", key_style),
            Span::raw("Previous/next year"),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::raw("Jump to today"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Calendars", section_style)),
        Line::from(vec![
            Span::styled("  Space     ", key_style),
            Span::raw("Mark/unmark selected day"),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", key_style),
            Span::raw("Switch active calendar"),
        ]),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::raw("New calendar"),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::raw("Delete active calendar"),
        ]),
        Line::from(""),
        Line::from(Span::styled("View", section_style)),
        Line::from(vec![
            Span::styled("  v         ", key_style),
            Span::raw("Toggle rows/grid layout"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
