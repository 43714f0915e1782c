use crate::{
    app::{App, Focus, Mode},
    catalog::{Course, Section},
    state::ResourceField,
};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub const HUB_TITLE: &str = "Data Science Learning Accelerator Hub";
const SIDEBAR_WIDTH: u16 = 36;
const EDITOR_HEIGHT: u16 = 8;
const FEEDBACK_INTRO: &str = "We value your feedback! Please use the form below to submit your thoughts, suggestions, or concerns about the course.";

pub fn draw_ui(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let narrow = size.width < app.narrow_width;
    app.narrow = narrow;

    let (sidebar_area, right_area) = if narrow {
        (None, size)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(size);
        (Some(chunks[0]), chunks[1])
    };

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(right_area);

    draw_header(f, app, right_chunks[0], narrow);
    match app.state.active() {
        Some(course) => draw_course(f, app, course, right_chunks[1]),
        None => draw_welcome(f, right_chunks[1]),
    }
    draw_help(f, app, right_chunks[2]);

    // on narrow terminals the sidebar slides over the content while the menu is open
    match sidebar_area {
        Some(area) => draw_sidebar(f, app, area),
        None if app.menu_open => {
            let area = Rect {
                width: SIDEBAR_WIDTH.min(size.width),
                ..size
            };
            f.render_widget(Clear, area);
            draw_sidebar(f, app, area);
        }
        None => {}
    }

    if let Some(notice) = &app.notice {
        let area = centered_rect(60, 20, size);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title("Notice (any key to close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));
        let text = Paragraph::new(notice.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        f.render_widget(text, area);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let home = std::iter::once(Span::styled(
        "DS Topics",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let courses = Course::ALL.iter().map(|c| Span::raw(c.name()));
    let items: Vec<ListItem> = home
        .chain(courses)
        .enumerate()
        .map(|(i, span)| {
            let mut item = ListItem::new(Line::from(span));
            if i == app.sidebar_selected {
                item = item.style(Style::default().fg(Color::Yellow));
            }
            item
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Courses (↑/↓, Enter)")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Sidebar)),
    );
    f.render_widget(list, area);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect, narrow: bool) {
    let title = app.state.active().map(Course::name).unwrap_or(HUB_TITLE);
    let mut block = Block::default().borders(Borders::BOTTOM);
    if narrow {
        let toggle = if app.menu_open { "[m] ✕" } else { "[m] ☰" };
        block = block.title_top(Line::from(toggle).right_aligned());
    }
    let header = Paragraph::new(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(block);
    f.render_widget(header, area);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome to the {HUB_TITLE}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Choose a course from the menu to get started on your data science journey.",
        ),
    ]);
    let welcome = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(welcome, area);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        Mode::Browsing => "q quit · Tab focus · m menu · Enter/e edit · D deploy",
        Mode::EditingText => "Esc/Ctrl+S save",
        Mode::EditingResources { .. } => {
            "↑/↓ row · Tab field · Ctrl+N add · Ctrl+D remove · Esc/Ctrl+S save"
        }
        Mode::WritingFeedback => "Ctrl+S submit · Esc close",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_course(f: &mut Frame, app: &mut App, course: Course, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    // no card is taller than the panel, so the selected one always fits
    let heights: Vec<u16> = Section::ALL
        .iter()
        .map(|&section| card_height(app, course, section, inner_width).min(area.height))
        .collect();

    // keep the selected card on screen
    let selected = app.section_selected;
    if selected < app.section_offset {
        app.section_offset = selected;
    }
    while app.section_offset < selected
        && heights[app.section_offset..=selected]
            .iter()
            .fold(0u16, |acc, h| acc.saturating_add(*h))
            > area.height
    {
        app.section_offset += 1;
    }

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, &section) in Section::ALL.iter().enumerate().skip(app.section_offset) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        let card = Rect::new(area.x, y, area.width, height);
        draw_card(f, app, course, section, index == selected, card);
        y += height;
    }

    if y < bottom {
        let deploy = Paragraph::new("[ Deploy Course (D) ]")
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Right);
        f.render_widget(deploy, Rect::new(area.x, y, area.width, 1));
    }
}

fn card_height(app: &App, course: Course, section: Section, width: u16) -> u16 {
    let editing = app.state.edit_mode().is_editing(course, section);
    let body = match section {
        Section::Resources => {
            let len = app.state.resources().list(course).len();
            let rows = u16::try_from(len).unwrap_or(u16::MAX);
            if editing {
                rows.saturating_add(2)
            } else {
                rows.saturating_mul(2).max(1)
            }
        }
        Section::FeedbackMechanism => {
            let form = if app.mode == Mode::WritingFeedback && app.current_section() == section {
                EDITOR_HEIGHT
            } else {
                1
            };
            wrapped_height(FEEDBACK_INTRO, width)
                .saturating_add(2)
                .saturating_add(form)
        }
        _ if editing => EDITOR_HEIGHT,
        _ => {
            let text = app.state.content().get(course, section).unwrap_or_default();
            wrapped_height(&plain_text(text), width).clamp(1, 12)
        }
    };
    body.saturating_add(2)
}

fn draw_card(f: &mut Frame, app: &mut App, course: Course, section: Section, selected: bool, area: Rect) {
    let editing = app.state.edit_mode().is_editing(course, section);
    let mut block = Block::default()
        .title(section.name())
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            focus_style(selected && app.focus == Focus::Main)
        });
    if section.is_editable() {
        let control = if editing { "[Save]" } else { "[Edit]" };
        block = block.title_top(Line::from(control).right_aligned());
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    match section {
        Section::Resources if editing => draw_resource_rows(f, app, course, selected, inner),
        Section::Resources => draw_resource_links(f, app, course, inner),
        Section::FeedbackMechanism => draw_feedback(f, app, selected, inner),
        _ if editing => f.render_widget(&app.editor, inner),
        _ => {
            let text = app.state.content().get(course, section).unwrap_or_default();
            let body = if text.is_empty() {
                Paragraph::new(format!("Add {section} content here..."))
                    .style(Style::default().fg(Color::DarkGray))
            } else {
                Paragraph::new(plain_text(text))
            };
            f.render_widget(body.wrap(Wrap { trim: false }), inner);
        }
    }
}

fn draw_resource_links(f: &mut Frame, app: &App, course: Course, area: Rect) {
    let resources = app.state.resources().list(course);
    let lines: Vec<Line> = if resources.is_empty() {
        vec![Line::from(Span::styled(
            "No resources yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        resources
            .iter()
            .flat_map(|r| {
                [
                    Line::from(format!("• {}", plain_text(&r.title))),
                    Line::from(Span::styled(
                        format!("  {}", plain_text(&r.url)),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    )),
                ]
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_resource_rows(f: &mut Frame, app: &mut App, course: Course, selected: bool, area: Rect) {
    let cursor = match app.mode {
        Mode::EditingResources { row, field } if selected => Some((row, field)),
        _ => None,
    };

    // two lines stay reserved for the add control
    let visible_rows = usize::from(area.height.saturating_sub(2)).max(1);
    if let Some((row, _)) = cursor {
        if row < app.resource_offset {
            app.resource_offset = row;
        }
        if row >= app.resource_offset + visible_rows {
            app.resource_offset = row + 1 - visible_rows;
        }
    }
    let offset = app
        .resource_offset
        .min(app.state.resources().list(course).len().saturating_sub(visible_rows));

    let input = |value: &str, placeholder: &'static str, active: bool| {
        let mut style = if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        if active {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let shown = if value.is_empty() {
            placeholder.to_string()
        } else {
            plain_text(value)
        };
        Span::styled(format!("[{shown}]"), style)
    };

    let mut lines: Vec<Line> = app
        .state
        .resources()
        .list(course)
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, r)| {
            let on_row = cursor.filter(|(row, _)| *row == i).map(|(_, field)| field);
            Line::from(vec![
                input(&r.title, "Resource Title", on_row == Some(ResourceField::Title)),
                Span::raw(" "),
                input(&r.url, "Resource URL", on_row == Some(ResourceField::Url)),
                Span::styled(" [x Ctrl+D]", Style::default().fg(Color::Red)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[+ Add Resource (Ctrl+N)]",
        Style::default().fg(Color::Green),
    )));
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_feedback(f: &mut Frame, app: &App, selected: bool, area: Rect) {
    let writing = selected && app.mode == Mode::WritingFeedback;
    let form_height = if writing { EDITOR_HEIGHT } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(FEEDBACK_INTRO).wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new("Your Feedback").style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[1],
    );
    if writing {
        f.render_widget(&app.feedback, chunks[2]);
    } else {
        f.render_widget(
            Paragraph::new("(press Enter to write feedback)")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
    f.render_widget(
        Paragraph::new("[Submit Feedback (Ctrl+S)]").style(Style::default().fg(Color::Green)),
        chunks[3],
    );
}

/// Stored text is shown verbatim as plain text: nothing interprets markup,
/// and control characters that could drive the terminal are dropped.
pub fn plain_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
