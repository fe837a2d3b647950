//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and the Composer and handles all keyboard
//! events. It does not do any rendering - that's delegated to the views module.
//! Anything that needs the async runtime (the copied-indicator timer) is
//! queued as a `PendingAction` for the runner.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::composer::Composer;
use crate::dialogs::given_name;
use crate::prompt::{Field, TEMPLATES};

use super::state::{AppState, InteractionMode, PendingAction, View};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
    /// The prompt being edited plus saved prompts and preferences
    composer: Composer,
    /// Where `e` writes exported prompts
    export_dir: PathBuf,
}

impl App {
    /// Create a new application instance around a hydrated composer
    pub fn new(composer: Composer) -> Self {
        Self {
            state: AppState::new(),
            composer,
            export_dir: PathBuf::from("."),
        }
    }

    /// Set the export directory
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        self.state.clear_error();

        if self.state.role_selector.is_open() {
            return self.handle_role_list_key(key);
        }

        match &self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Editing(field) => {
                let field = *field;
                self.handle_editing_key(field, key)
            }
            InteractionMode::NameInput(_) => self.handle_name_input_key(key),
            InteractionMode::Command(_) => self.handle_command_key(key),
            InteractionMode::Notice(_) => {
                self.state.interaction_mode = InteractionMode::Normal;
                false
            }
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            // === Quit ===
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }

            // === Help / command ===
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Char(':') => {
                self.state.interaction_mode = InteractionMode::Command(String::new());
            }

            // === Views ===
            KeyCode::Tab => {
                let next = self.state.current_view.next();
                self.state.navigate_to(next);
            }
            KeyCode::BackTab => {
                let prev = self.state.current_view.prev();
                self.state.navigate_to(prev);
            }
            KeyCode::Char('t') => self.state.toggle_view(View::Templates),
            KeyCode::Char('S') => self.state.toggle_view(View::Saved),
            KeyCode::Char('T') => self.state.toggle_view(View::Tips),
            KeyCode::Esc => self.state.navigate_to(View::Compose),

            // === Navigation ===
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char('g') => {
                if let Some(sel) = self.state.current_selection_mut() {
                    sel.select_first();
                }
            }
            KeyCode::Char('G') => {
                let max = self.current_item_count();
                if let Some(sel) = self.state.current_selection_mut() {
                    sel.select_last(max);
                }
            }
            KeyCode::Enter => self.handle_enter(),

            // === Compose view ===
            KeyCode::Char('i') if self.state.current_view == View::Compose => {
                self.state.interaction_mode = InteractionMode::Editing(self.state.focused_field);
            }
            KeyCode::Char('r') => {
                self.state.navigate_to(View::Compose);
                self.state.focused_field = Field::Role;
                self.state.role_selector.toggle();
            }

            // === Saved view ===
            KeyCode::Char('D') if self.state.current_view == View::Saved => self.delete_selected(),

            // === Actions ===
            KeyCode::Char('c') => self.copy(),
            KeyCode::Char('s') => self.begin_save(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('d') => self.save_defaults(),

            _ => {}
        }

        false
    }

    fn move_up(&mut self) {
        if self.state.current_view == View::Compose {
            self.state.focused_field = self.state.focused_field.prev();
        } else if let Some(sel) = self.state.current_selection_mut() {
            sel.select_prev();
        }
    }

    fn move_down(&mut self) {
        if self.state.current_view == View::Compose {
            self.state.focused_field = self.state.focused_field.next();
        } else {
            let max = self.current_item_count();
            if let Some(sel) = self.state.current_selection_mut() {
                sel.select_next(max);
            }
        }
    }

    /// Number of rows in the current list view
    fn current_item_count(&self) -> usize {
        match self.state.current_view {
            View::Templates => TEMPLATES.len(),
            View::Saved => self.composer.saved().len(),
            _ => 0,
        }
    }

    /// Enter: edit the focused section, or load the selected list entry
    fn handle_enter(&mut self) {
        match self.state.current_view {
            View::Compose => {
                self.state.interaction_mode = InteractionMode::Editing(self.state.focused_field);
            }
            View::Templates => {
                let index = self.state.templates_selection.selected_index;
                if let Some(template) = TEMPLATES.get(index) {
                    self.composer.load_template(template);
                    self.state.set_status(format!("Loaded template: {}", template.name));
                    self.state.navigate_to(View::Compose);
                }
            }
            View::Saved => {
                let index = self.state.saved_selection.selected_index;
                if let Some(prompt) = self.composer.saved().get(index) {
                    let (id, name) = (prompt.id, prompt.name.clone());
                    if self.composer.load_saved(id) {
                        self.state.set_status(format!("Loaded: {}", name));
                        self.state.navigate_to(View::Compose);
                    }
                }
            }
            View::Tips => {}
        }
    }

    fn delete_selected(&mut self) {
        let index = self.state.saved_selection.selected_index;
        let Some(id) = self.composer.saved().get(index).map(|p| p.id) else {
            return;
        };
        if self.composer.delete_saved(id) {
            self.state.set_status("Deleted saved prompt");
        }
        let len = self.composer.saved().len();
        self.state.saved_selection.clamp(len);
    }

    fn copy(&mut self) {
        if !self.composer.has_content() {
            self.state.set_error("Nothing to copy yet");
            return;
        }
        // A failed write is logged by the composer and otherwise ignored
        if self.composer.copy_to_clipboard() {
            self.state.pending_action = Some(PendingAction::ScheduleCopiedReset);
        }
    }

    fn begin_save(&mut self) {
        if !self.composer.has_content() {
            self.state.set_error("Nothing to save yet");
            return;
        }
        self.state.interaction_mode = InteractionMode::NameInput(String::new());
    }

    fn export(&mut self) {
        if !self.composer.has_content() {
            self.state.set_error("Nothing to export yet");
            return;
        }
        match self.composer.export_to(&self.export_dir) {
            Ok(path) => self.state.set_status(format!("Exported to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.state.set_error(format!("Export failed: {}", e));
            }
        }
    }

    fn save_defaults(&mut self) {
        self.composer.save_preferences(&mut self.state);
    }

    /// Handle key while typing into a section
    fn handle_editing_key(&mut self, field: Field, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            // Role is a one-line input; the other sections take newlines
            KeyCode::Enter if field == Field::Role => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => self.edit_field(field, |value| value.push('\n')),
            KeyCode::Backspace => self.edit_field(field, |value| {
                value.pop();
            }),
            KeyCode::Char(c) => self.edit_field(field, |value| value.push(c)),
            _ => {}
        }

        false
    }

    fn edit_field(&mut self, field: Field, edit: impl FnOnce(&mut String)) {
        let mut value = self.composer.form().get(field).to_string();
        edit(&mut value);
        self.composer.set_field(field, value);
    }

    /// Handle key while the expert role list is open
    fn handle_role_list_key(&mut self, key: KeyEvent) -> bool {
        let selector = &mut self.state.role_selector;
        match key.code {
            KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('q') => selector.close(),
            KeyCode::Up | KeyCode::Char('k') => selector.prev(),
            KeyCode::Down | KeyCode::Char('j') => selector.next(),
            KeyCode::Enter => {
                let role = selector.select(&mut self.composer);
                debug!(%role, "App::handle_role_list_key: role picked");
            }
            _ => {}
        }

        false
    }

    /// Handle key while asking for a saved prompt name
    fn handle_name_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                if let InteractionMode::NameInput(name) = std::mem::take(&mut self.state.interaction_mode) {
                    self.finish_save(name);
                }
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        }

        false
    }

    fn finish_save(&mut self, name: String) {
        match self.composer.save_prompt(&mut given_name(Some(name.clone()))) {
            Some(_) => self.state.set_status(format!("Saved: {}", name.trim())),
            None if name.trim().is_empty() => self.state.set_error("Name is required"),
            None => self.state.set_error("Nothing to save yet"),
        }
    }

    /// Handle key in command mode
    fn handle_command_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                if let InteractionMode::Command(cmd) = std::mem::take(&mut self.state.interaction_mode) {
                    self.execute_command(&cmd);
                }
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        }

        false
    }

    /// Execute a `:` command
    fn execute_command(&mut self, cmd: &str) {
        debug!(%cmd, "App::execute_command: called");
        let cmd = cmd.trim();
        let (command, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
        if command.is_empty() {
            return;
        }

        if let Some(view) = View::from_command(command) {
            self.state.navigate_to(view);
            return;
        }

        match command {
            "copy" => self.copy(),
            "save" if rest.trim().is_empty() => self.begin_save(),
            "save" => self.finish_save(rest.to_string()),
            "export" => self.export(),
            "defaults" => self.save_defaults(),
            "help" => self.state.interaction_mode = InteractionMode::Help,
            "quit" | "q" => self.state.should_quit = true,
            _ => self.state.set_error(format!("Unknown command: {}", command)),
        }
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter) {
            self.state.interaction_mode = InteractionMode::Normal;
        }
        false
    }
}
