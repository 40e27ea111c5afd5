use crate::error::{QuickLinksError, Result};

use base64::Engine;
use std::io::Write;
use tracing::debug;

pub trait ClipboardService {
    fn set_text(&mut self, text: &str) -> Result<()>;
    fn get_text(&mut self) -> Result<String>;
}

pub trait Launcher {
    /// Open `url` in a new browser tab. The string is passed through as-is.
    fn open(&self, url: &str) -> Result<()>;
}

/// System clipboard through `arboard`. When no clipboard is reachable (SSH
/// sessions, bare consoles) copies fall back to an OSC 52 escape sequence and
/// reads fail.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                debug!("system clipboard unavailable, using OSC 52: {e}");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardService for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        match self.inner.as_mut() {
            Some(clipboard) => Ok(clipboard.set_text(text.to_string())?),
            None => osc52_copy(text),
        }
    }

    fn get_text(&mut self) -> Result<String> {
        match self.inner.as_mut() {
            Some(clipboard) => Ok(clipboard.get_text()?),
            None => Err(QuickLinksError::clipboard("no system clipboard")),
        }
    }
}

pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

/// Write directly to stdout, bypassing the terminal backend buffer.
fn osc52_copy(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(osc52_sequence(text).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[derive(Default)]
pub struct BrowserLauncher;

impl Launcher for BrowserLauncher {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).map_err(|e| QuickLinksError::launch(url, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_wraps_base64_payload() {
        assert_eq!(osc52_sequence("a.com"), "\x1b]52;c;YS5jb20=\x07");
    }
}
