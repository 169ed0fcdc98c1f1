//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use wordctl_core::DetailPanel;

use super::app::{App, Tab};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Error color for notices
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab header
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_list(frame, app, content[0]);
    render_detail(frame, app, content[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.notice.is_some() {
        render_notice(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = Tab::ALL.iter().map(Tab::title).collect();
    let title = match app.session.user_id() {
        Some(user) => format!(" wordctl :: {user} "),
        None => " wordctl ".to_string(),
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(title)
                .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// First visible row so that `selected` stays on screen
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = !app.panel_open();
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(SECONDARY)
    };

    let pane = app.active_pane();
    let rows = pane.map(|pane| pane.view.rows()).unwrap_or_default();
    let selected = pane.map_or(0, |pane| pane.selected);

    let title = match pane {
        Some(pane) => format!(" {} ({}) ", pane.view.source().label(), rows.len()),
        None => " Words ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible = block.inner(area).height as usize;
    let offset = scroll_offset(selected, visible);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, row)| {
            let style = if idx == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let star = if app.is_favorite(&row.word) { "★" } else { " " };
            ListItem::new(Line::from(Span::styled(
                format!("{star} {:>6}  {}", row.id, row.word),
                style,
            )))
        })
        .collect();

    let list = if items.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            format!("  {}", app.empty_message()),
            Style::default().fg(DIM),
        )));
        List::new(vec![placeholder]).block(block)
    } else {
        List::new(items).block(block)
    };

    frame.render_widget(list, area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let panel = app.active_pane().and_then(|pane| pane.view.panel());

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if panel.is_some() { ACCENT } else { SECONDARY }));

    let text = match panel {
        Some(panel) => detail_text(panel, app.is_favorite(panel.word())),
        None => Text::from(Span::styled(
            "Select a word and press Enter",
            Style::default().fg(DIM),
        )),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_text(panel: &DetailPanel, favorite: bool) -> Text<'static> {
    let mut lines = Vec::new();

    let mut heading = vec![Span::styled(
        panel.word().to_string(),
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
    )];
    if let Some(phonetic) = panel.phonetic() {
        heading.push(Span::raw(format!("  {phonetic}")));
    }
    if favorite {
        heading.push(Span::styled("  ★", Style::default().fg(HIGHLIGHT)));
    }
    lines.push(Line::from(heading));
    lines.push(Line::from(""));

    if panel.is_loading() && panel.meanings().is_empty() {
        lines.push(Line::from(Span::styled(
            "Loading details...",
            Style::default().fg(DIM),
        )));
    }
    if panel.lookup_failed() {
        lines.push(Line::from(Span::styled(
            "Details unavailable",
            Style::default().fg(ERROR),
        )));
    }

    if let Some(meaning) = panel.current_meaning() {
        let cursor = panel.cursor();
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}/{}] ", cursor.index() + 1, cursor.count()),
                Style::default().fg(DIM),
            ),
            Span::styled(
                meaning.part_of_speech.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::ITALIC),
            ),
        ]));
        for (n, definition) in meaning.definitions.iter().enumerate() {
            lines.push(Line::from(format!("  {}. {}", n + 1, definition.definition)));
        }
    }

    lines.push(Line::from(""));
    let mut hints = Vec::new();
    if panel.has_previous() {
        hints.push("p:prev");
    }
    if panel.has_next() {
        hints.push("n:next");
    }
    hints.push("f:favorite");
    if panel.audio_url().is_some() {
        hints.push("a:audio");
    }
    hints.push("Esc:close");
    lines.push(Line::from(Span::styled(
        hints.join("  "),
        Style::default().fg(DIM),
    )));

    Text::from(lines)
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.panel_open() {
        "n/p:meaning  f:favorite  a:audio  Esc:close  q:quit"
    } else {
        "j/k:nav  Enter:open  1-3:tabs  q:quit"
    };
    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        Span::styled(" wordctl ", Style::default().bg(ACCENT).fg(Color::Black)),
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Centered one-shot notice; any key dismisses it
fn render_notice(frame: &mut Frame, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let area = frame.area();
    let width = 50.min(area.width.saturating_sub(4));
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_style(Style::default().fg(ERROR).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR));

    let paragraph = Paragraph::new(notice.message.as_str())
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
