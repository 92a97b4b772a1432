use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BORDER_STYLE: Style = Style::new().fg(Color::Gray);
pub const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Unknown tags render as pink; stored data is never rewritten to fix them.
const FALLBACK_TAG_COLOR: Color = Color::Rgb(255, 45, 85);

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            tag_colors: default_tag_colors(),
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }

    /// Resolve a calendar color tag to a terminal color.
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors
            .get(tag)
            .copied()
            .unwrap_or(FALLBACK_TAG_COLOR)
    }
}

fn default_tag_colors() -> HashMap<String, Color> {
    [
        ("pink", Color::Rgb(255, 45, 85)),
        ("blue", Color::Rgb(0, 122, 255)),
        ("green", Color::Rgb(40, 205, 65)),
        ("orange", Color::Rgb(255, 149, 0)),
        ("purple", Color::Rgb(175, 82, 222)),
        ("red", Color::Rgb(255, 59, 48)),
        ("yellow", Color::Rgb(255, 204, 0)),
        ("indigo", Color::Rgb(88, 86, 214)),
        ("teal", Color::Rgb(48, 176, 199)),
        ("cyan", Color::Rgb(85, 190, 240)),
    ]
    .into_iter()
    .map(|(tag, color)| (tag.to_string(), color))
    .collect()
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kalends").join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    today_fg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    /// Remaps of the built-in color tags, e.g. `pink = "#ff79c6"`.
    #[serde(default)]
    colors: HashMap<String, String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = Theme::default();

        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }

        for (tag, value) in &self.colors {
            if let Some(c) = parse_color(value) {
                theme.tag_colors.insert(tag.clone(), c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_tag_has_a_color() {
        let theme = Theme::default();
        for tag in crate::store::COLOR_TAGS {
            assert!(theme.tag_colors.contains_key(tag), "{tag}");
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_pink() {
        let theme = Theme::default();
        assert_eq!(theme.tag_color("mauve"), FALLBACK_TAG_COLOR);
        assert_eq!(theme.tag_color(""), FALLBACK_TAG_COLOR);
    }

    #[test]
    fn config_overrides_tag_colors() {
        let config: ThemeConfig =
            toml::from_str("today_fg = \"yellow\"\n[colors]\npink = \"#ff79c6\"").unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.tag_color("pink"), Color::Rgb(0xff, 0x79, 0xc6));
        assert_eq!(theme.today.fg, Some(Color::Yellow));
    }

    #[test]
    fn parse_color_accepts_hex_and_names() {
        assert_eq!(parse_color("#000000"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parse_color(" cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }
}
