//! Generic fallback renderer for unregistered module ids.
//!
//! When the server lists a module no typed implementation is registered
//! for, the dashboard still displays something: the endpoint's JSON body,
//! pretty-printed. This path is not a [`crate::modules::ModuleInstance`]:
//! it has no poll loop, no hooks, and draws exactly once per render pass.

use crate::client::DataSource;
use crate::modules::surface::{SharedSurface, SurfacePhase};
use crate::modules::{error_lines, json_lines};
use crate::ModuleDescriptor;
use ratatui::style::{Color, Style};
use ratatui::text::Line;

/// Fetches the descriptor's endpoint once and pretty-prints the payload
/// into `surface`.
///
/// A failed fetch renders the inline error state; nothing propagates.
pub async fn render(
    source: &dyn DataSource,
    descriptor: &ModuleDescriptor,
    surface: &SharedSurface,
) {
    let content = match source.fetch_json(&descriptor.endpoint).await {
        Ok(value) => {
            let mut lines = vec![Line::styled(
                format!(
                    "Generic view: no module registered for '{}'",
                    descriptor.id
                ),
                Style::default().fg(Color::DarkGray),
            )];
            lines.extend(json_lines(&value));
            (SurfacePhase::Ready, lines)
        }
        Err(error) => {
            tracing::warn!(module = %descriptor.id, "generic fetch failed: {}", error);
            (SurfacePhase::Error, error_lines(&error.to_string()))
        }
    };

    let (phase, lines) = content;
    surface
        .lock()
        .expect("surface lock poisoned")
        .set_content(phase, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubSource;
    use crate::modules::surface::Surface;
    use crate::{ModuleDescriptor, ModuleSize};
    use serde_json::json;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor {
            id: "undeclared".to_string(),
            name: "Undeclared".to_string(),
            icon: "u".to_string(),
            color: "#abcdef".to_string(),
            endpoint: "/api/undeclared".to_string(),
            description: "server-only module".to_string(),
            size: ModuleSize::Medium,
            refresh_interval_ms: 5000,
        }
    }

    #[tokio::test]
    async fn renders_pretty_printed_payload() {
        let source = StubSource::new().route("/api/undeclared", json!({"k": [1, 2]}));
        let surface = Surface::shared();

        render(&source, &descriptor(), &surface).await;

        let locked = surface.lock().expect("surface lock poisoned");
        assert_eq!(locked.phase(), SurfacePhase::Ready);
        let text = locked.text();
        assert!(text.contains("no module registered for 'undeclared'"));
        assert!(text.contains("\"k\""));
    }

    #[tokio::test]
    async fn renders_error_state_on_fetch_failure() {
        let source = StubSource::new().route_status("/api/undeclared", 503);
        let surface = Surface::shared();

        render(&source, &descriptor(), &surface).await;

        let locked = surface.lock().expect("surface lock poisoned");
        assert_eq!(locked.phase(), SurfacePhase::Error);
        assert!(locked.text().contains("503"));
    }
}
