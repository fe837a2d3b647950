//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI from
//! the App (state plus composer) but never modifies either.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use crate::composer::Composer;
use crate::prompt::{EXPERT_ROLES, Field, TEMPLATES, TIPS};

use super::app::App;
use super::state::{AppState, InteractionMode, View};

/// Preview text shown while the prompt is blank
pub const PREVIEW_PLACEHOLDER: &str = "Your prompt will appear here...";

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const COMPLETE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const FOCUS: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    let state = app.state();
    let composer = app.composer();
    trace!(view = ?state.current_view, "render: called");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, composer, frame, chunks[0]);

    match state.current_view {
        View::Compose => render_compose_view(state, composer, frame, chunks[1]),
        View::Templates => render_templates_view(state, frame, chunks[1]),
        View::Saved => render_saved_view(state, composer, frame, chunks[1]),
        View::Tips => render_tips_view(frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    // Overlays
    if state.role_selector.is_open() {
        render_role_list(state, frame, chunks[1]);
    }
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, chunks[1]),
        InteractionMode::Notice(message) => render_notice(message, frame, chunks[1]),
        _ => {}
    }
}

fn render_header(state: &AppState, composer: &Composer, frame: &mut Frame, area: Rect) {
    let (status, status_color) = if composer.is_complete() {
        ("✓ Complete", colors::COMPLETE)
    } else {
        ("○ In progress", colors::PENDING)
    };

    let mut spans = vec![
        Span::styled(
            " PromptForge ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];
    for view in View::ALL {
        let style = if view == state.current_view {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::DIM)
        };
        let label = match view {
            View::Saved => format!("Saved ({})", composer.saved().len()),
            _ => view.display_name().to_string(),
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        format!("{} words", composer.word_count()),
        Style::default().fg(colors::HEADER),
    ));
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(status, Style::default().fg(status_color)));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Form sections on the left, live preview on the right
fn render_compose_view(state: &AppState, composer: &Composer, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(columns[0]);

    for (field, row) in Field::ALL.into_iter().zip(rows.iter()) {
        render_field(state, composer, field, frame, *row);
    }

    render_preview(composer, frame, columns[1]);
}

fn render_field(state: &AppState, composer: &Composer, field: Field, frame: &mut Frame, area: Rect) {
    let value = composer.form().get(field);
    let editing = state.interaction_mode == InteractionMode::Editing(field);
    let focused = state.focused_field == field;

    // Any typed character marks the section, whitespace included
    let filled = if value.is_empty() {
        Span::raw("  ")
    } else {
        Span::styled("✓ ", Style::default().fg(colors::COMPLETE))
    };
    let title = Line::from(vec![
        Span::raw(" "),
        filled,
        Span::styled(field.label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" - {} ", field.description()), Style::default().fg(colors::DIM)),
    ]);
    let count = Line::from(Span::styled(
        format!(" {} chars ", value.chars().count()),
        Style::default().fg(colors::DIM),
    ))
    .right_aligned();

    let border = if editing {
        Style::default().fg(colors::PENDING)
    } else if focused {
        Style::default().fg(colors::FOCUS)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
        .title_bottom(count);

    let body = if value.is_empty() && !editing {
        Text::from(Span::styled(field.placeholder(), Style::default().fg(colors::DIM)))
    } else if editing {
        let mut text = Text::from(value.to_string());
        text.push_span(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        text
    } else {
        Text::from(value.to_string())
    };

    let paragraph = Paragraph::new(body).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_preview(composer: &Composer, frame: &mut Frame, area: Rect) {
    let title = if composer.copied() {
        Line::from(Span::styled(
            " ✓ Copied to Clipboard ",
            Style::default().fg(colors::COMPLETE).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(" Preview ")
    };

    let body = if composer.has_content() {
        Text::from(composer.preview())
    } else {
        Text::from(Span::styled(PREVIEW_PLACEHOLDER, Style::default().fg(colors::DIM)))
    };

    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, area);
}

fn render_templates_view(state: &AppState, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let selected = state.templates_selection.selected_index;
    let lines: Vec<Line> = TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| {
            list_row(
                i == selected,
                vec![
                    Span::styled(format!("{:<18}", template.name), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(template.role, Style::default().fg(colors::DIM)),
                ],
            )
        })
        .collect();

    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Templates "));
    frame.render_widget(list, columns[0]);

    let body = TEMPLATES
        .get(selected)
        .map(|template| template.form().render())
        .unwrap_or_default();
    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(" Template Preview "))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, columns[1]);
}

fn render_saved_view(state: &AppState, composer: &Composer, frame: &mut Frame, area: Rect) {
    let saved = composer.saved();
    let title = format!(" Saved ({}) ", saved.len());
    if saved.is_empty() {
        render_empty_message(frame, area, &title, "No saved prompts yet. Press [s] in the composer to save one.");
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let selected = state.saved_selection.selected_index;
    let lines: Vec<Line> = saved
        .iter()
        .enumerate()
        .map(|(i, prompt)| {
            list_row(
                i == selected,
                vec![
                    Span::styled(
                        format!("{:<24}", truncate_str(&prompt.name, 24)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        prompt.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        Style::default().fg(colors::DIM),
                    ),
                ],
            )
        })
        .collect();

    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, columns[0]);

    let body = saved.get(selected).map(|p| p.form.render()).unwrap_or_default();
    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(" Saved Preview "))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, columns[1]);
}

fn render_tips_view(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Pro Tips",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(TIPS.iter().map(|tip| {
        Line::from(vec![
            Span::styled("  • ", Style::default().fg(colors::KEYBIND)),
            Span::raw(*tip),
        ])
    }));

    let tips = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tips "))
        .wrap(Wrap { trim: true });
    frame.render_widget(tips, area);
}

fn render_role_list(state: &AppState, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(40, 80, area);
    frame.render_widget(Clear, popup_area);

    let highlighted = state.role_selector.highlighted();
    let lines: Vec<Line> = EXPERT_ROLES
        .iter()
        .enumerate()
        .map(|(i, role)| list_row(i == highlighted, vec![Span::raw(*role)]))
        .collect();

    // Keep the highlight visible in short terminals
    let visible = popup_area.height.saturating_sub(2) as usize;
    let scroll = (highlighted + 1).saturating_sub(visible) as u16;

    let list = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Expert Roles (Enter to pick, Esc to close) ")
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(list, popup_area);
}

fn render_notice(message: &str, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(colors::COMPLETE))),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", Style::default().fg(colors::DIM))),
    ];
    let notice = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice ")
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(notice, popup_area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let content = match &state.interaction_mode {
        InteractionMode::Command(text) => Line::from(vec![
            Span::styled(":", Style::default().fg(colors::KEYBIND)),
            Span::raw(text),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        InteractionMode::NameInput(text) => Line::from(vec![
            Span::styled(
                "Name for this prompt: ",
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            ),
            Span::raw(text),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled("  (Enter to save, Esc to cancel)", Style::default().fg(colors::DIM)),
        ]),
        InteractionMode::Editing(field) => Line::from(vec![
            Span::styled(
                format!(" Editing {} ", field.label()),
                Style::default().fg(colors::PENDING).add_modifier(Modifier::BOLD),
            ),
            Span::styled("[Esc]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
            Span::raw(" Done"),
        ]),
        _ => {
            if let Some(ref error) = state.error_message {
                Line::from(Span::styled(
                    format!(" Error: {}", error),
                    Style::default().fg(colors::FAILED),
                ))
            } else if let Some(ref status) = state.status_message {
                Line::from(Span::styled(format!(" {}", status), Style::default().fg(colors::COMPLETE)))
            } else {
                let keybinds = match state.current_view {
                    View::Compose => vec![
                        ("[Enter]", "Edit"),
                        ("[r]", "Roles"),
                        ("[c]", "Copy"),
                        ("[s]", "Save"),
                        ("[e]", "Export"),
                        ("[d]", "Defaults"),
                    ],
                    View::Templates => vec![("[Enter]", "Use"), ("[Esc]", "Back")],
                    View::Saved => vec![("[Enter]", "Load"), ("[D]", "Delete"), ("[Esc]", "Back")],
                    View::Tips => vec![("[Esc]", "Back")],
                };

                let mut spans = vec![Span::raw(" ")];
                for (key, action) in keybinds.into_iter().chain([("[Tab]", "Views"), ("[?]", "Help"), ("[q]", "Quit")]) {
                    spans.push(Span::styled(
                        key,
                        Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(format!(" {} ", action)));
                }
                Line::from(spans)
            }
        }
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )),
        Line::from(""),
        section("Global"),
        key_line("Tab", "Cycle views (Compose → Templates → Saved → Tips)"),
        key_line("t / S / T", "Toggle Templates / Saved / Tips"),
        key_line(":", "Command mode (:copy, :save <name>, :export, :defaults)"),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
        Line::from(""),
        section("Compose"),
        key_line("j/k", "Move between sections"),
        key_line("Enter / i", "Edit section (Esc when done)"),
        key_line("r", "Pick an expert role"),
        key_line("c", "Copy prompt to clipboard"),
        key_line("s", "Save prompt"),
        key_line("e", "Export prompt to a text file"),
        key_line("d", "Save role and format as defaults"),
        Line::from(""),
        section("Lists"),
        key_line("j/↓ k/↑", "Move"),
        key_line("g / G", "Top / bottom"),
        key_line("Enter", "Use template / load saved prompt"),
        key_line("D", "Delete saved prompt"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

fn list_row(selected: bool, mut spans: Vec<Span<'_>>) -> Line<'_> {
    let marker = if selected { "▶ " } else { "  " };
    spans.insert(0, Span::styled(marker, Style::default().fg(colors::KEYBIND)));
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(colors::SELECTED_BG))
    } else {
        line
    }
}

fn render_empty_message(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(colors::DIM)))
        .centered()
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
