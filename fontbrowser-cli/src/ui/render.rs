//! Drawing the browser.
//!
//! ```text
//! ┌ Fonts ──────────┐┌ Font Information ─────────────┐
//! │ Search: fira    ││ Font Name:                    │
//! │ > Fira-Code     ││ Fira-Code                     │
//! │   fira          ││ ...                           │
//! └─────────────────┘└───────────────────────────────┘
//!  ⠙ Downloading 4 font file(s)...
//!  q Quit  i Install  / Search  r Reset  j/k Move
//! ```

use std::path::PathBuf;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::state::{BrowserState, InputMode, Status};

/// Static facts shown in the information panel.
#[derive(Debug, Clone)]
pub struct InfoContext {
    /// `owner/name` of the package repository.
    pub repository: String,
    /// Resolved font directory, or why it could not be resolved.
    pub font_dir: Result<PathBuf, String>,
}

pub fn draw(frame: &mut Frame, state: &BrowserState, info: &InfoContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    draw_font_panel(frame, columns[0], state);
    draw_info_panel(frame, columns[1], state, info);
    frame.render_widget(status_line(state), rows[1]);
    frame.render_widget(help_line(state.mode()), rows[2]);
}

fn draw_font_panel(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Fonts ({}/{}) ",
        state.filtered().len(),
        state.catalog().len()
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let searching = state.mode() == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let query = if state.query().is_empty() && !searching {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.query().to_string())
    };
    let mut search = vec![query];
    if searching {
        search.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    let search_box = Paragraph::new(Line::from(search)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search_box, parts[0]);

    if state.filtered().is_empty() {
        let empty = Paragraph::new("No fonts match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, parts[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .filtered()
        .iter()
        .map(|name| ListItem::new(*name))
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(state.selected_index());
    frame.render_stateful_widget(list, parts[1], &mut list_state);
}

fn draw_info_panel(frame: &mut Frame, area: Rect, state: &BrowserState, info: &InfoContext) {
    let paragraph = Paragraph::new(info_lines(state.selected_name(), info))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Font Information "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Lines of the information panel for `selected`.
pub fn info_lines(selected: Option<&str>, info: &InfoContext) -> Vec<Line<'static>> {
    let Some(name) = selected else {
        return vec![Line::styled(
            "Select a font to see details.",
            Style::default().fg(Color::DarkGray),
        )];
    };

    let heading = |text: &'static str, color: Color| {
        Line::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    let (location, package_dir) = match &info.font_dir {
        Ok(dir) => (
            dir.display().to_string(),
            dir.join(name).display().to_string(),
        ),
        Err(e) => (e.clone(), e.clone()),
    };

    vec![
        heading("Font Name:", Color::Cyan),
        Line::raw(name.to_string()),
        Line::raw(""),
        heading("Repository:", Color::Cyan),
        Line::raw(info.repository.clone()),
        Line::raw(""),
        heading("Installation Location:", Color::Cyan),
        Line::raw(location),
        Line::raw(""),
        heading("Font Directory:", Color::Cyan),
        Line::raw(package_dir),
        Line::raw(""),
        heading("Instructions:", Color::Yellow),
        Line::raw("1. Press 'i' or Enter to install"),
        Line::raw("2. Wait for the download to complete"),
        Line::raw("3. Restart applications to use the font"),
        Line::raw("4. On Linux the font cache is refreshed automatically"),
        Line::raw(""),
        heading("Note:", Color::Green),
        Line::raw("Fonts are installed for the current user only."),
    ]
}

fn status_line(state: &BrowserState) -> Paragraph<'static> {
    let line = match state.status() {
        Status::Ready => Line::styled(" Ready", Style::default().fg(Color::DarkGray)),
        Status::Info(msg) => Line::styled(format!(" {}", msg), Style::default().fg(Color::Yellow)),
        Status::Installing { stage, .. } => {
            let mut spans = vec![
                Span::styled(
                    format!(" {} ", state.spinner_frame()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(stage.clone()),
            ];
            if state.quit_pending() {
                spans.push(Span::styled(
                    " (quitting when finished)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        Status::Succeeded(msg) => {
            Line::styled(format!(" ✓ {}", msg), Style::default().fg(Color::Green))
        }
        Status::Failed(msg) => {
            Line::styled(format!(" ✗ {}", msg), Style::default().fg(Color::Red))
        }
    };
    Paragraph::new(line)
}

fn help_line(mode: InputMode) -> Paragraph<'static> {
    let keys: &[(&str, &str)] = match mode {
        InputMode::Normal => &[
            ("q", "Quit"),
            ("i", "Install"),
            ("/", "Search"),
            ("r", "Reset"),
            ("j/k", "Move"),
            ("g/G", "Top/Bottom"),
        ],
        InputMode::Search => &[("Enter/Esc", "Done"), ("Backspace", "Delete")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", label)));
    }
    Paragraph::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontbrowser::catalog::Catalog;
    use ratatui::{backend::TestBackend, Terminal};

    fn info() -> InfoContext {
        InfoContext {
            repository: "ProgrammingFonts/ProgrammingFonts".to_string(),
            font_dir: Ok(PathBuf::from("/home/ada/.local/share/fonts")),
        }
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_info_lines_for_selection() {
        let lines = text(&info_lines(Some("Hack"), &info()));
        assert_eq!(lines[0], "Font Name:");
        assert_eq!(lines[1], "Hack");
        assert!(lines.contains(&"ProgrammingFonts/ProgrammingFonts".to_string()));
        assert!(lines.contains(&"/home/ada/.local/share/fonts".to_string()));
        assert!(lines.contains(&"/home/ada/.local/share/fonts/Hack".to_string()));
    }

    #[test]
    fn test_info_lines_without_selection() {
        let lines = text(&info_lines(None, &info()));
        assert_eq!(lines, vec!["Select a font to see details.".to_string()]);
    }

    #[test]
    fn test_info_lines_unresolved_directory() {
        let ctx = InfoContext {
            font_dir: Err("unsupported operating system: plan9".to_string()),
            ..info()
        };
        let lines = text(&info_lines(Some("Hack"), &ctx));
        assert!(lines.contains(&"unsupported operating system: plan9".to_string()));
    }

    #[test]
    fn test_draw_renders_without_panicking() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = BrowserState::new(Catalog::builtin());
        terminal.draw(|f| draw(f, &state, &info())).unwrap();

        state.enter_search();
        state.push_query_char('z');
        state.push_query_char('z');
        state.push_query_char('z');
        terminal.draw(|f| draw(f, &state, &info())).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("No fonts match"));
    }

    #[test]
    fn test_status_shows_pending_quit() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = BrowserState::new(Catalog::builtin());
        state.begin_install();
        state.quit();
        terminal.draw(|f| draw(f, &state, &info())).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("(quitting when finished)"));
    }
}
