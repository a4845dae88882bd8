//! Example module: metric boxes, a bar chart, and a status line.
//!
//! The demonstration consumer of the engine. It overrides every hook once:
//! `template` for the metric grid, `on_data_loaded` to cache the chart
//! series, `after_render` to draw the chart below the template output.

use crate::modules::format::format_number;
use crate::modules::{Module, Surface};
use crate::{ModuleDescriptor, ModuleSize, DEFAULT_REFRESH_INTERVAL_MS};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use serde_json::Value;

/// Width of the widest chart bar, in glyphs.
const BAR_WIDTH: usize = 24;

/// Chart series cached from the last payload.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChartSeries {
    labels: Vec<String>,
    values: Vec<u64>,
}

/// Demonstration module backed by `/api/example`.
#[derive(Default)]
pub struct ExampleModule {
    chart: Option<ChartSeries>,
}

impl ExampleModule {
    /// Creates the module with no cached chart.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Module for ExampleModule {
    fn descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor {
            id: "example".to_string(),
            name: "Example".to_string(),
            icon: "▣".to_string(),
            color: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
            endpoint: "/api/example".to_string(),
            description: "Demonstration metrics module".to_string(),
            size: ModuleSize::Medium,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }

    fn template(&self, data: &Value) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let title = data["title"].as_str().unwrap_or("Example");
        lines.push(Line::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(""));

        let metrics = &data["metrics"];
        lines.push(metric_line("Metric 1", &metrics["valor1"]));
        lines.push(metric_line("Metric 2", &metrics["valor2"]));
        lines.push(metric_line("Percentage", &metrics["valor3"]));
        lines.push(metric_line("Uptime", &metrics["valor4"]));

        if let Some(message) = data["status"]["message"].as_str() {
            let code = data["status"]["code"].as_str().unwrap_or("info");
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                message.to_string(),
                Style::default().fg(status_color(code)),
            ));
        }

        lines
    }

    fn on_data_loaded(&mut self, data: &Value) {
        self.chart = parse_chart(&data["chart_data"]);
    }

    fn after_render(&mut self, surface: &mut Surface) {
        let Some(chart) = &self.chart else {
            return;
        };
        let max = chart.values.iter().copied().max().unwrap_or(0);
        let mut lines = vec![Line::raw("")];
        for (label, value) in chart.labels.iter().zip(&chart.values) {
            lines.push(bar_line(label, *value, max));
        }
        surface.append(lines);
    }
}

/// One `label: value` metric row; numbers are grouped, strings pass through.
fn metric_line(label: &str, value: &Value) -> Line<'static> {
    let rendered = match value {
        Value::Number(n) => n
            .as_i64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    };
    Line::raw(format!("{label}: {rendered}"))
}

fn status_color(code: &str) -> Color {
    match code {
        "success" => Color::Green,
        "warning" => Color::Yellow,
        "error" => Color::Red,
        _ => Color::Gray,
    }
}

fn parse_chart(value: &Value) -> Option<ChartSeries> {
    let labels: Vec<String> = value["labels"]
        .as_array()?
        .iter()
        .filter_map(|l| l.as_str().map(str::to_string))
        .collect();
    let values: Vec<u64> = value["values"]
        .as_array()?
        .iter()
        .filter_map(|v| v.as_u64())
        .collect();
    if labels.is_empty() || labels.len() != values.len() {
        return None;
    }
    Some(ChartSeries { labels, values })
}

/// Renders one horizontal chart bar, scaled against the series maximum.
fn bar_line(label: &str, value: u64, max: u64) -> Line<'static> {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
    };
    let bar: String = "█".repeat(filled);
    Line::raw(format!("{label:<4} {bar} {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "title": "Example payload",
            "metrics": {
                "valor1": 1500,
                "valor2": 320,
                "valor3": "42.17%",
                "valor4": "3h 12m"
            },
            "chart_data": {
                "labels": ["Mon", "Tue", "Wed"],
                "values": [10, 40, 20]
            },
            "status": {"code": "success", "message": "All good"}
        })
    }

    fn text_of(lines: &[Line<'static>]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn template_renders_title_metrics_and_status() {
        let module = ExampleModule::new();
        let text = text_of(&module.template(&payload()));
        assert!(text.contains("Example payload"));
        assert!(text.contains("Metric 1: 1.500"));
        assert!(text.contains("Percentage: 42.17%"));
        assert!(text.contains("All good"));
    }

    #[test]
    fn template_tolerates_missing_fields() {
        let module = ExampleModule::new();
        let text = text_of(&module.template(&json!({})));
        assert!(text.contains("Example"));
        assert!(text.contains("Metric 1: -"));
    }

    #[test]
    fn on_data_loaded_caches_chart_series() {
        let mut module = ExampleModule::new();
        module.on_data_loaded(&payload());
        let chart = module.chart.as_ref().expect("chart cached");
        assert_eq!(chart.labels, vec!["Mon", "Tue", "Wed"]);
        assert_eq!(chart.values, vec![10, 40, 20]);
    }

    #[test]
    fn on_data_loaded_drops_mismatched_series() {
        let mut module = ExampleModule::new();
        module.on_data_loaded(&json!({
            "chart_data": {"labels": ["a", "b"], "values": [1]}
        }));
        assert!(module.chart.is_none());
    }

    #[test]
    fn after_render_appends_bars() {
        let mut module = ExampleModule::new();
        module.on_data_loaded(&payload());

        let mut surface = Surface::new();
        surface.set_content(
            crate::modules::SurfacePhase::Ready,
            module.template(&payload()),
        );
        module.after_render(&mut surface);

        let text = surface.text();
        assert!(text.contains("Mon"));
        assert!(text.contains('█'));
    }

    #[test]
    fn bar_line_scales_against_max() {
        let full = bar_line("a", 10, 10).to_string();
        let half = bar_line("b", 5, 10).to_string();
        let full_len = full.matches('█').count();
        let half_len = half.matches('█').count();
        assert_eq!(full_len, BAR_WIDTH);
        assert_eq!(half_len, BAR_WIDTH / 2);
    }

    #[test]
    fn bar_line_handles_zero_max() {
        let line = bar_line("a", 0, 0).to_string();
        assert!(!line.contains('█'));
    }
}
