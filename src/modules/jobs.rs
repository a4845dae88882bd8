//! Job scheduler module: read-only view over the scheduler endpoint.
//!
//! Shows the available jobs and, when the payload includes them, the
//! scheduled entries with their schedule description and run timestamps.
//! The full administration screen is a separate consumer of the engine and
//! out of scope here.

use crate::modules::format::format_date_time;
use crate::modules::Module;
use crate::{ModuleDescriptor, ModuleSize, DEFAULT_REFRESH_INTERVAL_MS};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use serde_json::Value;

/// Scheduler status module backed by `/api/job-scheduler`.
#[derive(Default)]
pub struct JobsModule;

impl JobsModule {
    /// Creates the module.
    pub fn new() -> Self {
        Self
    }
}

impl Module for JobsModule {
    fn descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor {
            id: "job-scheduler".to_string(),
            name: "Job Scheduler".to_string(),
            icon: "◷".to_string(),
            color: "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)".to_string(),
            endpoint: "/api/job-scheduler".to_string(),
            description: "Scheduled script status".to_string(),
            size: ModuleSize::Large,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }

    fn template(&self, data: &Value) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let total = data["total_jobs"].as_u64().unwrap_or(0);
        lines.push(Line::styled(
            format!("Available jobs ({total})"),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        match data["available_jobs"].as_array() {
            Some(jobs) if !jobs.is_empty() => {
                for job in jobs {
                    let name = job["name"].as_str().unwrap_or("(unnamed)");
                    let description = job["description"].as_str().unwrap_or("");
                    lines.push(Line::raw(format!("  {name}  {description}")));
                }
            }
            _ => lines.push(Line::styled(
                "  no jobs discovered",
                Style::default().fg(Color::DarkGray),
            )),
        }

        if let Some(scheduled) = data["scheduled_jobs"].as_array() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "Scheduled",
                Style::default().add_modifier(Modifier::BOLD),
            ));
            for job in scheduled {
                lines.extend(scheduled_lines(job));
            }
        }

        lines
    }
}

/// Lines for one scheduled entry: name, status, schedule, and run times.
fn scheduled_lines(job: &Value) -> Vec<Line<'static>> {
    let name = job["job_name"]
        .as_str()
        .or_else(|| job["name"].as_str())
        .unwrap_or("(unnamed)");
    let status = job["last_status"].as_str().unwrap_or("pending");
    let schedule = schedule_description(
        job["schedule_type"].as_str().unwrap_or(""),
        job["schedule_value"].as_str().unwrap_or(""),
    );

    let mut lines = vec![Line::from(vec![
        ratatui::text::Span::raw(format!("  {name}  ")),
        ratatui::text::Span::styled(status.to_string(), Style::default().fg(status_color(status))),
        ratatui::text::Span::raw(format!("  {schedule}")),
    ])];

    if let Some(last_run) = job["last_run"].as_str() {
        lines.push(Line::raw(format!(
            "    last run: {}",
            format_date_time(last_run)
        )));
    }
    if let Some(next_run) = job["next_run"].as_str() {
        if job["schedule_type"].as_str() != Some("manual") {
            lines.push(Line::raw(format!(
                "    next run: {}",
                format_date_time(next_run)
            )));
        }
    }
    lines
}

/// Human-readable description of a schedule kind and value.
fn schedule_description(kind: &str, value: &str) -> String {
    match kind {
        "manual" => "manual run".to_string(),
        "interval" => format!("every {value} minutes"),
        "cron" => format!("cron: {value}"),
        "daily" => "daily".to_string(),
        "weekly" => "weekly".to_string(),
        other => other.to_string(),
    }
}

fn status_color(status: &str) -> Color {
    match status {
        "success" => Color::Green,
        "running" => Color::Yellow,
        "error" | "failed" => Color::Red,
        _ => Color::Gray,
    }
}
