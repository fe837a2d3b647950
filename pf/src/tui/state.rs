//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The prompt
//! itself lives in the `Composer`; this is only the UI around it.

use tracing::debug;

use crate::dialogs::Notifier;
use crate::prompt::Field;
use crate::role_selector::RoleSelector;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Form sections plus live preview (default view)
    #[default]
    Compose,
    /// Built-in templates (`:templates`)
    Templates,
    /// Saved prompts (`:saved`)
    Saved,
    /// Prompt-writing tips (`:tips`)
    Tips,
}

impl View {
    /// Views in Tab order
    pub const ALL: [View; 4] = [View::Compose, View::Templates, View::Saved, View::Tips];

    /// Get the display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Compose => "Compose",
            Self::Templates => "Templates",
            Self::Saved => "Saved",
            Self::Tips => "Tips",
        }
    }

    /// Parse a command name to a View
    pub fn from_command(cmd: &str) -> Option<Self> {
        debug!(%cmd, "View::from_command: called");
        match cmd {
            "compose" | "form" => Some(Self::Compose),
            "templates" | "t" => Some(Self::Templates),
            "saved" => Some(Self::Saved),
            "tips" => Some(Self::Tips),
            _ => None,
        }
    }

    /// Get the next view in the Tab cycle
    pub fn next(self) -> Self {
        match self {
            Self::Compose => Self::Templates,
            Self::Templates => Self::Saved,
            Self::Saved => Self::Tips,
            Self::Tips => Self::Compose,
        }
    }

    /// Get the previous view in the Tab cycle
    pub fn prev(self) -> Self {
        match self {
            Self::Compose => Self::Tips,
            Self::Templates => Self::Compose,
            Self::Saved => Self::Templates,
            Self::Tips => Self::Saved,
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into a form section
    Editing(Field),
    /// Asking for a saved prompt name (s key)
    NameInput(String),
    /// Command mode (: key)
    Command(String),
    /// One-way notice; any key dismisses
    Notice(String),
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Get the input buffer if in a single-line input mode
    pub fn input_buffer(&self) -> Option<&str> {
        match self {
            Self::NameInput(s) | Self::Command(s) => Some(s),
            _ => None,
        }
    }

    /// Get mutable input buffer
    pub fn input_buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::NameInput(s) | Self::Command(s) => Some(s),
            _ => None,
        }
    }
}

/// Action pending execution by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// A copy succeeded; clear the copied indicator after the configured delay
    ScheduleCopiedReset,
}

/// Selection state for list views
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    pub selected_index: usize,
}

impl SelectionState {
    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = max_items - 1;
        }
    }

    /// Ensure selection is within bounds
    pub fn clamp(&mut self, max_items: usize) {
        if max_items == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= max_items {
            self.selected_index = max_items - 1;
        }
    }
}

/// Main TUI application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view
    pub current_view: View,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Form section with focus in the Compose view
    pub focused_field: Field,
    /// Expert role picker
    pub role_selector: RoleSelector,
    /// Should the app quit
    pub should_quit: bool,
    /// Last error message
    pub error_message: Option<String>,
    /// Last informational message (e.g. "Exported to ...")
    pub status_message: Option<String>,

    // === Selection state per view ===
    pub templates_selection: SelectionState,
    pub saved_selection: SelectionState,

    // === Pending actions ===
    pub pending_action: Option<PendingAction>,
}

impl AppState {
    /// Create new AppState
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self::default()
    }

    /// Switch to a view
    pub fn navigate_to(&mut self, view: View) {
        debug!(?view, "AppState::navigate_to: called");
        self.current_view = view;
        self.role_selector.close();
    }

    /// Toggle a panel view: open it, or return to Compose if already open
    pub fn toggle_view(&mut self, view: View) {
        debug!(?view, current = ?self.current_view, "AppState::toggle_view: called");
        if self.current_view == view {
            self.navigate_to(View::Compose);
        } else {
            self.navigate_to(view);
        }
    }

    /// Get mutable selection state for current view
    pub fn current_selection_mut(&mut self) -> Option<&mut SelectionState> {
        match self.current_view {
            View::Templates => Some(&mut self.templates_selection),
            View::Saved => Some(&mut self.saved_selection),
            _ => None,
        }
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.error_message = Some(msg);
    }

    /// Clear error and status messages
    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }

    /// Set an informational message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_status: called");
        self.status_message = Some(msg);
    }
}

/// Notices open a modal that the next key press dismisses
impl Notifier for AppState {
    fn notify(&mut self, message: &str) {
        debug!(%message, "AppState::notify: called");
        self.interaction_mode = InteractionMode::Notice(message.to_string());
    }
}
