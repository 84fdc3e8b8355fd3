use crate::wizard::{HeaderType, SecondaryRole, ViewBlock, WizardView};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;

pub const KEY_HINT: &str =
    "Enter: primary  Esc: back  Tab/Up/Down: focus  Left/Right: choose  Space: toggle  Ctrl-C: quit";

/// Header, scrolling body and the fixed action-bar footer.
pub fn draw_wizard(frame: &mut Frame<'_>, view: &WizardView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_lines(view))
        .block(Block::default().borders(Borders::ALL).style(header_style(view)));
    frame.render_widget(header, chunks[0]);

    let body = Paragraph::new(body_lines(view))
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0))
        .block(main_panel_block());
    frame.render_widget(body, chunks[1]);

    let footer = Paragraph::new(footer_lines(view))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn header_style(view: &WizardView) -> Style {
    match view.header.header_type {
        HeaderType::Primary => Style::default().fg(Color::Cyan),
        HeaderType::Secondary => Style::default().fg(Color::Blue),
        HeaderType::Tertiary => Style::default().fg(Color::Green),
        HeaderType::Null => Style::default(),
    }
}

pub fn header_lines(view: &WizardView) -> Vec<Line<'static>> {
    let title = if view.header.title.is_empty() {
        "Virufy".to_string()
    } else {
        view.header.title.clone()
    };
    let mut first = Vec::new();
    if view.header.back_visible() {
        first.push(Span::styled(
            "< Back  ",
            Style::default().fg(Color::Yellow),
        ));
    }
    first.push(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    first.push(Span::raw(format!("  [{}]", view.language)));

    let mut second = view.header.subtitle.clone();
    if let Some(location) = &view.location {
        if !second.is_empty() {
            second.push_str("  ");
        }
        second.push_str(location.path.as_str());
    }
    vec![Line::from(first), Line::from(second)]
}

pub fn body_lines(view: &WizardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &view.body.blocks {
        match block {
            ViewBlock::Heading(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            ViewBlock::Paragraph(text) => lines.push(Line::from(text.clone())),
            ViewBlock::Bullets(items) => {
                for item in items {
                    lines.push(Line::from(format!("  - {item}")));
                }
            }
            ViewBlock::Link { label, url } => {
                lines.push(Line::from(vec![
                    Span::raw(format!("{label}: ")),
                    Span::styled(
                        url.clone(),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            ViewBlock::Control(control) => {
                let marker = if control.focused { "> " } else { "  " };
                let mut value_style = Style::default();
                if control.placeholder || control.disabled {
                    value_style = value_style.fg(Color::DarkGray);
                }
                if control.focused {
                    value_style = value_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                lines.push(Line::from(vec![
                    Span::raw(format!("{marker}{}: ", control.label)),
                    Span::styled(control.value.clone(), value_style),
                ]));
                if let Some(error) = &control.error {
                    lines.push(Line::from(Span::styled(
                        format!("    {error}"),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
            ViewBlock::Notice(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(Color::Magenta),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn footer_lines(view: &WizardView) -> Vec<Line<'static>> {
    let mut buttons = Vec::new();
    if let Some(bar) = &view.action_bar {
        let primary = &bar.buttons.primary;
        let primary_style = if primary.disabled {
            Style::default().fg(Color::DarkGray)
        } else if bar.buttons.invert {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        buttons.push(Span::styled(format!("[ {} ]", primary.label), primary_style));
        if let Some((secondary, role)) = &bar.buttons.secondary {
            let hint = match role {
                SecondaryRole::Back => "Ctrl-S: back",
                SecondaryRole::Skip => "Ctrl-S: skip",
            };
            buttons.push(Span::raw(format!("  [ {} ] ({hint})", secondary.label)));
        }
    }
    vec![
        Line::from(buttons),
        Line::from(KEY_HINT),
        Line::from(format!(
            "Status: {}",
            view.status.as_deref().unwrap_or_default()
        )),
    ]
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1))
}
