//! Rendering for the TUI dashboard.
//!
//! Composes the sidebar, the content pane (placeholder, initialization
//! error, or the mounted module's surface), a notice row, and the footer.

use crate::modules::styles;
use crate::notify::NoticeLevel;
use crate::orchestrator::{DashboardView, MountedCard};
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Module Dashboard";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str =
    "[j/k] Navigate  [Enter] Mount  [Esc] Clear  [r] Refresh  [R] Reload  [s] Sidebar  [q] Quit";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 26;

/// Renders the full dashboard layout.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let (sidebar_area, main_area) = if app.sidebar_collapsed {
        (None, area)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    };

    if let Some(sidebar) = sidebar_area {
        render_sidebar(frame, app, sidebar);
    }
    render_main(frame, app, main_area);
}

/// Renders the module list with the cursor and the mounted marker.
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let mounted = app.orchestrator.selected();
    let items: Vec<ListItem> = app
        .orchestrator
        .listing()
        .iter()
        .map(|descriptor| {
            let marker = if mounted.as_deref() == Some(descriptor.id.as_str()) {
                Span::styled("● ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::raw(descriptor.name.clone()),
                Span::styled(
                    format!("  {}", descriptor.size),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Modules"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(app.selected_index);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Renders header, content pane, notice row, and footer.
fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // content
            Constraint::Length(1), // notices
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_notices(frame, app, chunks[2]);

    let footer = Paragraph::new(Line::styled(
        FOOTER_TEXT,
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, chunks[3]);
}

/// Header with the title on the left and the version right-aligned.
fn render_header(frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let padding = width
        .saturating_sub(HEADER_TEXT.len())
        .saturating_sub(VERSION_TEXT.len());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(padding)),
        Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

/// Content pane for the current dashboard view.
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.orchestrator.view() {
        DashboardView::Unselected => {
            let block = Block::default().borders(Borders::ALL).title("Dashboard");
            let prompt = Paragraph::new(Line::styled(
                "Select a module from the sidebar and press Enter",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(prompt, area);
        }
        DashboardView::InitError { message } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Dashboard")
                .border_style(Style::default().fg(Color::Red));
            let error = Paragraph::new(Line::styled(message, Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(error, area);
        }
        DashboardView::Mounted(card) => render_card(frame, &card, area),
    }
}

/// A mounted module card: accent-colored border, description, and the
/// surface content.
fn render_card(frame: &mut Frame, card: &MountedCard, area: Rect) {
    let accent = styles::lookup(&card.descriptor.id)
        .map(|style| style.title_style())
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", card.descriptor.name),
            accent.add_modifier(Modifier::BOLD),
        ))
        .border_style(accent);

    let mut lines = vec![
        Line::styled(
            card.descriptor.description.clone(),
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
    ];
    lines.extend(
        card.surface
            .lock()
            .expect("surface lock poisoned")
            .lines()
            .to_vec(),
    );

    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(body, area);
}

/// One-line notice row showing the most recent active notice.
fn render_notices(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.notifier.active().into_iter().next_back() else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
        NoticeLevel::Info => Color::Gray,
    };
    let line = Paragraph::new(Line::styled(
        notice.message,
        Style::default().fg(color),
    ));
    frame.render_widget(line, area);
}
