use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The color tags a calendar can carry, in picker order.
pub const COLOR_TAGS: [&str; 10] = [
    "pink", "blue", "green", "orange", "purple", "red", "yellow", "indigo", "teal", "cyan",
];

/// A single user calendar: a title, a color tag, and the set of marked days
/// keyed by canonical date strings. One of these maps to one file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    pub title: String,
    pub color_tag: String,
    #[serde(default)]
    pub marked_days: BTreeMap<String, bool>,
}

impl Calendar {
    pub fn new(title: &str, color_tag: &str) -> Self {
        Self {
            id: derive_id(title),
            title: title.to_string(),
            color_tag: color_tag.to_string(),
            marked_days: BTreeMap::new(),
        }
    }
}

// Identity lives entirely in the id; title and color may diverge.
impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Calendar {}

/// Derive a calendar id from its title: lowercased, spaces become hyphens.
/// The id is fixed at creation time and never recomputed.
pub fn derive_id(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_derives_id_from_title() {
        let cal = Calendar::new("My Calendar", "blue");
        assert_eq!(cal.id, "my-calendar");
        assert_eq!(cal.title, "My Calendar");
        assert_eq!(cal.color_tag, "blue");
        assert!(cal.marked_days.is_empty());
    }

    #[test]
    fn id_derivation() {
        assert_eq!(derive_id("Work Schedule"), "work-schedule");
        assert_eq!(derive_id("IMPORTANT DATES"), "important-dates");
        // Non-space punctuation passes through untouched.
        assert_eq!(derive_id("Test & Special Ch@rs!"), "test-&-special-ch@rs!");
        // Deterministic and independent of color.
        assert_eq!(
            Calendar::new("Work Schedule", "red").id,
            Calendar::new("Work Schedule", "green").id
        );
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = Calendar::new("Test", "red");
        let mut b = Calendar::new("Other", "blue");
        b.id = a.id.clone();
        assert_eq!(a, b);

        let c = Calendar::new("Different", "red");
        assert_ne!(a, c);
    }

    #[test]
    fn serde_uses_camel_case_fields() {
        let mut cal = Calendar::new("Work", "blue");
        cal.marked_days.insert("2025-04-08".to_string(), true);

        let json = serde_json::to_string(&cal).unwrap();
        assert!(json.contains("\"colorTag\""));
        assert!(json.contains("\"markedDays\""));

        let back: Calendar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cal);
        assert_eq!(back.marked_days.get("2025-04-08"), Some(&true));
    }
}
