//! User-facing dialog collaborators
//!
//! The composer never talks to a UI toolkit directly. Naming a saved prompt
//! needs "something that returns an optional string"; confirming saved
//! preferences needs "something that shows a one-way notice".

use colored::*;

/// Asks the user for a saved prompt name; `None` means cancelled
pub trait NamePrompt {
    fn ask_name(&mut self) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn ask_name(&mut self) -> Option<String> {
        self()
    }
}

/// A name known up front (e.g. from a CLI flag or a finished input box)
pub fn given_name(name: Option<String>) -> impl NamePrompt {
    let mut name = name;
    move || name.take()
}

/// Shows a one-way notice to the user
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints notices to stdout
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }
}

/// Collects notices in memory
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
