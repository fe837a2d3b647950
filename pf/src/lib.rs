//! PromptForge - structured prompt composer
//!
//! Builds prompts from five labeled sections (Role, Task, Context, Reasoning,
//! Output Format), previews the rendered result live, and keeps a library of
//! saved prompts plus default preferences in a [`keystore`] store.
//!
//! # Modules
//!
//! - [`prompt`] - Form state, rendering, word count and built-in catalogs
//! - [`composer`] - The single owner of the form, saved prompts and preferences
//! - [`library`] - Persisted record shapes and their store keys
//! - [`role_selector`] - Expert role picker
//! - [`clipboard`] / [`dialogs`] - Collaborators the composer talks through
//! - [`export`] - Plain-text export
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Terminal user interface

pub mod cli;
pub mod clipboard;
pub mod composer;
pub mod config;
pub mod dialogs;
pub mod export;
pub mod library;
pub mod prompt;
pub mod role_selector;
pub mod tui;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use composer::Composer;
pub use config::Config;
pub use dialogs::{ConsoleNotifier, NamePrompt, Notifier, given_name};
pub use library::{Preferences, PromptId, SavedPrompt};
pub use prompt::{EXPERT_ROLES, Field, FormState, TEMPLATES, TIPS, Template, count_words, find_template};
pub use role_selector::RoleSelector;
