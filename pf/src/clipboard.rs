//! Clipboard access
//!
//! The composer only ever writes text; it never reads the clipboard.

use std::sync::{Arc, Mutex};

use eyre::{Result, eyre};
use tracing::debug;

/// Write-only clipboard
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard
///
/// The platform handle is opened on first use so that headless sessions
/// without a clipboard can still run everything else.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        debug!(len = text.len(), "SystemClipboard::write_text: called");
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => {
                clipboard.set_text(text.to_string())?;
                Ok(())
            }
            None => Err(eyre!("Clipboard unavailable")),
        }
    }
}

/// In-memory clipboard that records every write
///
/// Clones share the same history. Set `failing` to simulate a clipboard that
/// rejects writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Every text written so far, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Most recent text written
    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        debug!(len = text.len(), failing = self.failing, "MemoryClipboard::write_text: called");
        if self.failing {
            return Err(eyre!("Clipboard write rejected"));
        }
        self.writes
            .lock()
            .map_err(|_| eyre!("Clipboard history poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_writes() {
        let mut clipboard = MemoryClipboard::new();
        let observer = clipboard.clone();

        clipboard.write_text("one").unwrap();
        clipboard.write_text("two").unwrap();
        assert_eq!(observer.writes(), vec!["one", "two"]);
        assert_eq!(observer.last().as_deref(), Some("two"));
    }

    #[test]
    fn test_failing_clipboard() {
        let mut clipboard = MemoryClipboard::failing();
        assert!(clipboard.write_text("x").is_err());
        assert!(clipboard.writes().is_empty());
    }
}
