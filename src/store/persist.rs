use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::calendar::Calendar;

/// The two scalar preferences, stored together in one TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    pub view_mode: Option<String>,
    pub active_calendar: Option<String>,
}

/// Durable storage for calendars and preferences.
///
/// Every operation is fail-soft: a missing directory, an unreadable file, or
/// a corrupt serialization degrades to "nothing found" and a failed write is
/// dropped silently. The store above never sees an error from this layer.
#[derive(Debug, Clone)]
pub enum Storage {
    Disk { dir: PathBuf },
    /// Skips all reads and writes; calendars live purely in the store's
    /// memory for the process lifetime. Used for test isolation.
    Memory,
}

impl Storage {
    /// Storage rooted at the platform data directory, or memory-only when
    /// the platform has none.
    pub fn open_default() -> Self {
        match dirs::data_dir() {
            Some(base) => Self::at(base.join("kalends")),
            None => Storage::Memory,
        }
    }

    pub fn at(dir: PathBuf) -> Self {
        Storage::Disk { dir }
    }

    fn calendars_dir(&self) -> Option<PathBuf> {
        match self {
            Storage::Disk { dir } => Some(dir.join("calendars")),
            Storage::Memory => None,
        }
    }

    fn calendar_path(&self, id: &str) -> Option<PathBuf> {
        self.calendars_dir().map(|d| d.join(format!("{id}.json")))
    }

    fn prefs_path(&self) -> Option<PathBuf> {
        match self {
            Storage::Disk { dir } => Some(dir.join("prefs.toml")),
            Storage::Memory => None,
        }
    }

    /// Ids of every stored calendar, sorted for a stable load order.
    pub fn list_calendar_ids(&self) -> Vec<String> {
        let Some(dir) = self.calendars_dir() else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().map(|s| s.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        ids.sort();
        ids
    }

    pub fn read_calendar(&self, id: &str) -> Option<Calendar> {
        let path = self.calendar_path(id)?;
        let text = fs::read_to_string(path).ok()?;
        serde_json::from_str(&text).ok()
    }

    pub fn write_calendar(&self, calendar: &Calendar) {
        let Some(path) = self.calendar_path(&calendar.id) else {
            return;
        };
        if let Ok(text) = serde_json::to_string_pretty(calendar) {
            write_atomic(&path, &text);
        }
    }

    pub fn delete_calendar(&self, id: &str) {
        if let Some(path) = self.calendar_path(id) {
            let _ = fs::remove_file(path);
        }
    }

    pub fn read_prefs(&self) -> Prefs {
        let Some(path) = self.prefs_path() else {
            return Prefs::default();
        };
        fs::read_to_string(path)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn write_prefs(&self, prefs: &Prefs) {
        let Some(path) = self.prefs_path() else {
            return;
        };
        if let Ok(text) = toml::to_string(prefs) {
            write_atomic(&path, &text);
        }
    }
}

/// Write via a sibling temp file and rename, so a crash mid-write never
/// leaves a truncated file behind. Errors are swallowed.
fn write_atomic(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let tmp = path.with_extension("tmp");
    if fs::write(&tmp, text).is_ok() {
        let _ = fs::rename(&tmp, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::at(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn calendar_round_trip() {
        let (_dir, storage) = disk();
        let mut cal = Calendar::new("Work", "blue");
        cal.marked_days.insert("2025-04-08".to_string(), true);

        storage.write_calendar(&cal);
        let loaded = storage.read_calendar("work").unwrap();
        assert_eq!(loaded, cal);
        assert_eq!(loaded.title, "Work");
        assert_eq!(loaded.marked_days.get("2025-04-08"), Some(&true));

        assert_eq!(storage.list_calendar_ids(), vec!["work".to_string()]);
        storage.delete_calendar("work");
        assert!(storage.read_calendar("work").is_none());
        assert!(storage.list_calendar_ids().is_empty());
    }

    #[test]
    fn list_is_sorted_and_ignores_foreign_files() {
        let (dir, storage) = disk();
        storage.write_calendar(&Calendar::new("Zed", "red"));
        storage.write_calendar(&Calendar::new("Alpha", "blue"));
        fs::write(dir.path().join("calendars").join("notes.txt"), "x").unwrap();

        assert_eq!(storage.list_calendar_ids(), vec!["alpha", "zed"]);
    }

    #[test]
    fn corrupt_or_missing_degrades_to_absent() {
        let (dir, storage) = disk();
        // Nothing on disk yet.
        assert!(storage.read_calendar("work").is_none());
        assert_eq!(storage.read_prefs(), Prefs::default());

        let cal_dir = dir.path().join("calendars");
        fs::create_dir_all(&cal_dir).unwrap();
        fs::write(cal_dir.join("work.json"), "{not json").unwrap();
        assert!(storage.read_calendar("work").is_none());

        fs::write(dir.path().join("prefs.toml"), "view_mode = [").unwrap();
        assert_eq!(storage.read_prefs(), Prefs::default());
    }

    #[test]
    fn prefs_round_trip() {
        let (_dir, storage) = disk();
        let prefs = Prefs {
            view_mode: Some("months-grid".to_string()),
            active_calendar: Some("work".to_string()),
        };
        storage.write_prefs(&prefs);
        assert_eq!(storage.read_prefs(), prefs);
    }

    #[test]
    fn memory_mode_skips_everything() {
        let storage = Storage::Memory;
        storage.write_calendar(&Calendar::new("Work", "blue"));
        assert!(storage.list_calendar_ids().is_empty());
        assert!(storage.read_calendar("work").is_none());

        storage.write_prefs(&Prefs {
            view_mode: Some("month-rows".to_string()),
            active_calendar: None,
        });
        assert_eq!(storage.read_prefs(), Prefs::default());
    }
}
