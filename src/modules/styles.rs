//! Process-wide per-module styles.
//!
//! The browser original attaches one `<link>` stylesheet per module id the
//! first time that module mounts; the terminal equivalent is an accent style
//! derived from the descriptor's color specification. Styles are keyed by
//! module id, created at most once, and never removed; a second mount of the
//! same id is a no-op.

use crate::ModuleDescriptor;
use ratatui::style::{Color, Style};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Visual treatment applied to a module's card chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleStyle {
    /// Accent color extracted from the descriptor's color spec.
    pub accent: Color,
}

impl ModuleStyle {
    /// Style for the card border and title.
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

fn registry() -> &'static Mutex<HashMap<String, ModuleStyle>> {
    static STYLES: OnceLock<Mutex<HashMap<String, ModuleStyle>>> = OnceLock::new();
    STYLES.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Ensures a style exists for the descriptor's module id.
///
/// Returns `true` if the style was created by this call, `false` if one was
/// already attached. Idempotent per id.
pub fn attach(descriptor: &ModuleDescriptor) -> bool {
    let mut styles = registry().lock().expect("style registry lock poisoned");
    if styles.contains_key(&descriptor.id) {
        return false;
    }
    let accent = accent_from_spec(&descriptor.color).unwrap_or(Color::Cyan);
    styles.insert(descriptor.id.clone(), ModuleStyle { accent });
    true
}

/// Looks up the style attached for a module id, if any.
pub fn lookup(id: &str) -> Option<ModuleStyle> {
    registry()
        .lock()
        .expect("style registry lock poisoned")
        .get(id)
        .copied()
}

/// Extracts the first `#rrggbb` color from a CSS-flavored color spec.
///
/// Specs like `linear-gradient(135deg, #667eea 0%, #764ba2 100%)` yield the
/// first stop; plain `#rrggbb` values yield themselves. Anything else yields
/// `None`.
pub fn accent_from_spec(spec: &str) -> Option<Color> {
    let start = spec.find('#')?;
    let hex: String = spec[start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModuleSize;

    fn descriptor(id: &str, color: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            id: id.to_string(),
            name: "Test".to_string(),
            icon: "t".to_string(),
            color: color.to_string(),
            endpoint: "/api/test".to_string(),
            description: "test".to_string(),
            size: ModuleSize::Medium,
            refresh_interval_ms: 0,
        }
    }

    #[test]
    fn accent_from_plain_hex() {
        assert_eq!(
            accent_from_spec("#667eea"),
            Some(Color::Rgb(0x66, 0x7e, 0xea))
        );
    }

    #[test]
    fn accent_from_gradient_takes_first_stop() {
        let spec = "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)";
        assert_eq!(accent_from_spec(spec), Some(Color::Rgb(0xff, 0x9a, 0x9e)));
    }

    #[test]
    fn accent_rejects_short_or_missing_hex() {
        assert_eq!(accent_from_spec("red"), None);
        assert_eq!(accent_from_spec("#fff"), None);
    }

    #[test]
    fn attach_is_idempotent_per_id() {
        let d = descriptor("styles-test-attach-once", "#112233");
        assert!(attach(&d), "first attach creates the style");
        assert!(!attach(&d), "second attach is a no-op");
        let style = lookup(&d.id).expect("style attached");
        assert_eq!(style.accent, Color::Rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn attach_falls_back_to_default_accent() {
        let d = descriptor("styles-test-fallback", "not-a-color");
        attach(&d);
        let style = lookup(&d.id).expect("style attached");
        assert_eq!(style.accent, Color::Cyan);
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        assert!(lookup("styles-test-never-attached").is_none());
    }
}
