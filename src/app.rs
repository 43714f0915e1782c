use std::{io, time::Duration};

use anyhow::Result;
use ratatui::{
    Terminal,
    backend::Backend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing::{info, warn};
use tui_textarea::{Input, Key, TextArea};

use crate::{
    catalog::{Course, Section},
    error::HubError,
    state::{HubState, ResourceField},
    ui::draw_ui,
};

/// Sidebar entries: the home link followed by every course.
pub const SIDEBAR_LEN: usize = Course::ALL.len() + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    EditingText,
    EditingResources { row: usize, field: ResourceField },
    WritingFeedback,
}

pub struct App {
    pub state: HubState,
    pub mode: Mode,
    pub focus: Focus,
    pub sidebar_selected: usize, // 0 is the home link
    pub section_selected: usize,
    pub section_offset: usize,
    pub resource_offset: usize,
    pub menu_open: bool,
    pub narrow_width: u16,
    /// Set by the last draw; the sidebar is only shown here while the menu is open.
    pub narrow: bool,
    pub editor: TextArea<'static>,
    pub feedback: TextArea<'static>,
    pub notice: Option<String>,
}

impl App {
    pub fn new(state: HubState, narrow_width: u16) -> Self {
        Self {
            state,
            mode: Mode::Browsing,
            focus: Focus::Sidebar,
            sidebar_selected: 0,
            section_selected: 0,
            section_offset: 0,
            resource_offset: 0,
            menu_open: false,
            narrow_width,
            narrow: false,
            editor: TextArea::default(),
            feedback: TextArea::default(),
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn current_section(&self) -> Section {
        Section::ALL[self.section_selected]
    }

    pub fn sidebar_hidden(&self) -> bool {
        self.narrow && !self.menu_open
    }

    fn focus_sidebar(&mut self) {
        self.focus = Focus::Sidebar;
        if self.narrow {
            self.menu_open = true;
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| draw_ui(f, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if self.notice.take().is_some() {
            return false;
        }
        match self.mode {
            Mode::Browsing => return self.browse_key(key),
            Mode::EditingText => self.edit_text_key(key),
            Mode::EditingResources { row, field } => self.edit_resources_key(key, row, field),
            Mode::WritingFeedback => self.feedback_key(key),
        }
        false
    }

    fn browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('m') => {
                self.menu_open = !self.menu_open;
                if self.menu_open {
                    self.focus = Focus::Sidebar;
                } else if self.narrow && self.state.active().is_some() {
                    self.focus = Focus::Main;
                }
            }
            KeyCode::Char('D') => {
                if let Some(course) = self.state.active() {
                    self.notice = Some(self.state.deploy(course));
                }
            }
            KeyCode::Tab => match self.focus {
                Focus::Sidebar if self.state.active().is_some() => {
                    self.focus = Focus::Main;
                    if self.narrow {
                        self.menu_open = false;
                    }
                }
                _ => self.focus_sidebar(),
            },
            _ => match self.focus {
                // nothing to move through while the sidebar is off screen
                Focus::Sidebar if self.sidebar_hidden() => {}
                Focus::Sidebar => self.sidebar_key(key.code),
                Focus::Main => self.main_key(key.code),
            },
        }
        false
    }

    fn sidebar_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.sidebar_selected = (self.sidebar_selected + 1) % SIDEBAR_LEN;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_selected = (self.sidebar_selected + SIDEBAR_LEN - 1) % SIDEBAR_LEN;
            }
            KeyCode::Enter => self.activate_sidebar(),
            _ => {}
        }
    }

    fn activate_sidebar(&mut self) {
        self.menu_open = false;
        let Some(course) = self
            .sidebar_selected
            .checked_sub(1)
            .map(|i| Course::ALL[i])
        else {
            self.state.go_home();
            self.focus = Focus::Sidebar;
            return;
        };

        if let Err(e) = self.state.select_course(course) {
            self.report(e);
        }
        self.section_selected = 0;
        self.section_offset = 0;
        self.focus = Focus::Main;
    }

    fn main_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.section_selected + 1 < Section::ALL.len() {
                    self.section_selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.section_selected = self.section_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('e') => self.open_section(),
            KeyCode::Esc => self.focus_sidebar(),
            _ => {}
        }
    }

    fn open_section(&mut self) {
        let Some(course) = self.state.active() else {
            return;
        };
        let section = self.current_section();
        if !section.is_editable() {
            self.mode = Mode::WritingFeedback;
            return;
        }
        if !self.state.toggle_edit(course, section) {
            return;
        }
        if section == Section::Resources {
            self.resource_offset = 0;
            self.mode = Mode::EditingResources {
                row: 0,
                field: ResourceField::Title,
            };
        } else {
            let text = self
                .state
                .content()
                .get(course, section)
                .unwrap_or_default();
            self.editor = TextArea::from(text.split('\n').map(str::to_string));
            self.mode = Mode::EditingText;
        }
    }

    fn save_current(&mut self) {
        if let Some(course) = self.state.active() {
            self.state.save_section(course, self.current_section());
        }
        self.mode = Mode::Browsing;
    }

    fn edit_text_key(&mut self, key: KeyEvent) {
        if is_save(&key) {
            self.save_current();
            return;
        }
        let Some(course) = self.state.active() else {
            return;
        };
        if self.editor.input(to_input(key)) {
            let text = self.editor.lines().join("\n");
            if let Err(e) = self.state.edit_section(course, self.current_section(), text) {
                self.report(e);
            }
        }
    }

    fn edit_resources_key(&mut self, key: KeyEvent, row: usize, field: ResourceField) {
        if is_save(&key) {
            self.save_current();
            return;
        }
        let Some(course) = self.state.active() else {
            return;
        };
        let len = self.state.resources().list(course).len();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let (row, field) = match key.code {
            KeyCode::Char('n') if ctrl => match self.state.add_resource(course) {
                Ok(index) => (index, ResourceField::Title),
                Err(e) => {
                    self.report(e);
                    (row, field)
                }
            },
            KeyCode::Char('d') if ctrl && len > 0 => {
                if let Err(e) = self.state.remove_resource(course, row) {
                    self.report(e);
                }
                (row.min(len.saturating_sub(2)), field)
            }
            KeyCode::Up => (row.saturating_sub(1), field),
            KeyCode::Down => ((row + 1).min(len.saturating_sub(1)), field),
            KeyCode::Tab | KeyCode::BackTab => (row, field.other()),
            KeyCode::Char(c) if !ctrl => {
                self.edit_resource_field(course, row, field, |value| value.push(c));
                (row, field)
            }
            KeyCode::Backspace => {
                self.edit_resource_field(course, row, field, |value| {
                    value.pop();
                });
                (row, field)
            }
            _ => (row, field),
        };
        self.mode = Mode::EditingResources { row, field };
    }

    fn edit_resource_field(
        &mut self,
        course: Course,
        row: usize,
        field: ResourceField,
        change: impl FnOnce(&mut String),
    ) {
        let Some(resource) = self.state.resources().list(course).get(row) else {
            return;
        };
        let mut value = resource.field(field).to_string();
        change(&mut value);
        if let Err(e) = self.state.edit_resource(course, row, field, value) {
            self.report(e);
        }
    }

    fn feedback_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_feedback();
            }
            _ => {
                self.feedback.input(to_input(key));
            }
        }
    }

    /// The form has no endpoint; submitting only acknowledges locally.
    fn submit_feedback(&mut self) {
        let draft = self.feedback.lines().join("\n");
        if draft.trim().is_empty() {
            self.notice = Some("Your Feedback is required.".to_string());
            return;
        }
        if let Some(course) = self.state.active() {
            info!(%course, chars = draft.chars().count(), "feedback submitted");
        }
        self.feedback = TextArea::default();
        self.mode = Mode::Browsing;
        self.notice = Some("Feedback submitted successfully!".to_string());
    }

    fn report(&mut self, err: HubError) {
        warn!(error = %err, "state update failed");
        self.notice = Some(err.to_string());
    }
}

fn is_save(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn to_input(key: KeyEvent) -> Input {
    let code = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };
    Input {
        key: code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}
