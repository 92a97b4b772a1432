use std::collections::HashMap;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::calendar::Calendar;
use super::date_key;
use super::persist::{Prefs, Storage};

/// Year layout preference. The string forms are the persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    MonthRows,
    MonthsGrid,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::MonthRows => "month-rows",
            ViewMode::MonthsGrid => "months-grid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "month-rows" => Some(ViewMode::MonthRows),
            "months-grid" => Some(ViewMode::MonthsGrid),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::MonthRows => ViewMode::MonthsGrid,
            ViewMode::MonthsGrid => ViewMode::MonthRows,
        }
    }
}

/// Idle window for preference writes. Successive changes inside the window
/// coalesce into a single write of the last value.
const PREFS_DEBOUNCE: Duration = Duration::from_secs(1);

/// Owns the in-memory calendars, the active-calendar pointer, and the view
/// mode. All mutation goes through here: calendar records hit disk
/// immediately, preference changes are debounced onto a background writer.
pub struct Store {
    calendars: Vec<Calendar>,
    active_calendar_id: Option<String>,
    view_mode: ViewMode,
    storage: Storage,
    prefs_tx: Option<UnboundedSender<Prefs>>,
    prefs_worker: Option<JoinHandle<()>>,
}

impl Store {
    /// Load every persisted calendar plus preferences. If nothing was
    /// stored, a "Default" calendar is created, persisted, and made active;
    /// that bootstrap is the only write a load may perform.
    pub fn load(storage: Storage) -> Self {
        let mut calendars = Vec::new();
        for id in storage.list_calendar_ids() {
            if let Some(calendar) = storage.read_calendar(&id) {
                calendars.push(calendar);
            }
        }

        let prefs = storage.read_prefs();
        let view_mode = prefs
            .view_mode
            .as_deref()
            .and_then(ViewMode::parse)
            .unwrap_or_default();

        let (prefs_tx, prefs_worker) = spawn_prefs_writer(storage.clone());
        let mut store = Self {
            calendars,
            active_calendar_id: prefs.active_calendar,
            view_mode,
            storage,
            prefs_tx: Some(prefs_tx),
            prefs_worker: Some(prefs_worker),
        };

        if store.calendars.is_empty() {
            // First launch. Duplicate id is impossible in an empty store.
            let _ = store.add_calendar(Calendar::new("Default", "pink"));
        }

        store
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    /// Id as stored; may be absent or dangling, see [`Store::active_calendar`].
    pub fn active_calendar_id(&self) -> Option<&str> {
        self.active_calendar_id.as_deref()
    }

    /// The active calendar. When the stored id is unset or no longer
    /// matches, the first calendar stands in; the stored preference is only
    /// corrected by explicit mutation, never by reads.
    pub fn active_calendar(&self) -> Option<&Calendar> {
        self.active_calendar_id
            .as_deref()
            .and_then(|id| self.calendars.iter().find(|c| c.id == id))
            .or_else(|| self.calendars.first())
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.schedule_prefs_write();
    }

    /// Append a calendar and persist it. Errors if the id already exists.
    /// Becomes active when nothing else currently resolves as active.
    pub fn add_calendar(&mut self, calendar: Calendar) -> Result<()> {
        if self.calendars.iter().any(|c| c.id == calendar.id) {
            return Err(eyre!("a calendar named '{}' already exists", calendar.id));
        }

        let make_active = self.active_calendar().is_none();
        self.storage.write_calendar(&calendar);
        let id = calendar.id.clone();
        self.calendars.push(calendar);

        if make_active {
            self.active_calendar_id = Some(id);
            self.schedule_prefs_write();
        }
        Ok(())
    }

    /// Remove a calendar and its file. Unknown ids are a no-op. Deleting
    /// the active calendar hands the pointer to the new first calendar, or
    /// clears it when none remain.
    pub fn delete_calendar(&mut self, id: &str) {
        let before = self.calendars.len();
        self.calendars.retain(|c| c.id != id);
        if self.calendars.len() == before {
            return;
        }
        self.storage.delete_calendar(id);

        if self.active_calendar_id.as_deref() == Some(id) {
            self.active_calendar_id = self.calendars.first().map(|c| c.id.clone());
            self.schedule_prefs_write();
        }
    }

    /// Point at an existing calendar; ids not in the store are ignored.
    pub fn set_active_calendar(&mut self, id: &str) {
        if self.calendars.iter().any(|c| c.id == id) {
            self.active_calendar_id = Some(id.to_string());
            self.schedule_prefs_write();
        }
    }

    /// The active calendar's marked days, decoded. Keys that fail to parse
    /// are dropped. Empty when there is no active calendar.
    pub fn marked_days(&self) -> HashMap<NaiveDate, bool> {
        let Some(calendar) = self.active_calendar() else {
            return HashMap::new();
        };
        calendar
            .marked_days
            .iter()
            .filter_map(|(key, &marked)| date_key::from_key(key).map(|date| (date, marked)))
            .collect()
    }

    /// Replace the active calendar's entire map (not a merge: days absent
    /// from the new value are dropped) and persist the record. No-op
    /// without an active calendar.
    pub fn set_marked_days(&mut self, days: HashMap<NaiveDate, bool>) {
        let Some(index) = self.active_index() else {
            return;
        };
        self.calendars[index].marked_days = days
            .into_iter()
            .map(|(date, marked)| (date_key::to_key(date), marked))
            .collect();
        self.storage.write_calendar(&self.calendars[index]);
    }

    /// Flip one day on the active calendar (absent counts as unmarked) and
    /// persist the record. The rest of the map is untouched.
    pub fn toggle_day(&mut self, date: NaiveDate) {
        let Some(index) = self.active_index() else {
            return;
        };
        let key = date_key::to_key(date);
        let marked = self.calendars[index]
            .marked_days
            .get(&key)
            .copied()
            .unwrap_or(false);
        self.calendars[index].marked_days.insert(key, !marked);
        self.storage.write_calendar(&self.calendars[index]);
    }

    pub fn is_marked(&self, date: NaiveDate) -> bool {
        self.active_calendar()
            .and_then(|c| c.marked_days.get(&date_key::to_key(date)).copied())
            .unwrap_or(false)
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.active_calendar()?;
        self.calendars.iter().position(|c| c.id == active.id)
    }

    fn schedule_prefs_write(&self) {
        let prefs = Prefs {
            view_mode: Some(self.view_mode.as_str().to_string()),
            active_calendar: self.active_calendar_id.clone(),
        };
        if let Some(tx) = &self.prefs_tx {
            let _ = tx.send(prefs);
        }
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        // Closing the channel makes the writer flush any pending snapshot.
        self.prefs_tx.take();
        if let Some(worker) = self.prefs_worker.take() {
            let _ = worker.join();
        }
    }
}

/// Background preference writer. Runs a current-thread tokio runtime on its
/// own thread; each incoming snapshot restarts the idle window, so a burst
/// of changes ends in one write of the last value. A closed channel flushes
/// whatever is pending and exits.
fn spawn_prefs_writer(storage: Storage) -> (UnboundedSender<Prefs>, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let worker = std::thread::spawn(move || {
        let Ok(rt) = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        else {
            return;
        };
        rt.block_on(debounce_loop(rx, storage));
    });
    (tx, worker)
}

async fn debounce_loop(mut rx: UnboundedReceiver<Prefs>, storage: Storage) {
    while let Some(mut latest) = rx.recv().await {
        loop {
            match tokio::time::timeout(PREFS_DEBOUNCE, rx.recv()).await {
                // Newer value before the window elapsed: coalesce.
                Ok(Some(next)) => latest = next,
                // Sender dropped: final flush.
                Ok(None) => {
                    storage.write_prefs(&latest);
                    return;
                }
                // Idle window elapsed: commit.
                Err(_) => {
                    storage.write_prefs(&latest);
                    break;
                }
            }
        }
    }
}
