//! Terminal display surface
//!
//! Bubbles are printed as `[HH:MM] You: text` lines; the terminal's own
//! scrollback keeps the newest bubble in view. The loading indicator is a
//! transient `Thinking...` line erased when the reply arrives.

use super::{Bubble, BubbleKind, DisplaySurface};
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

const LOADING_TEXT: &str = "Thinking...";

/// Display surface that writes to stdout
#[derive(Debug)]
pub struct TerminalDisplay {
    show_timestamps: bool,
    interactive: bool,
    loading: AtomicBool,
}

impl TerminalDisplay {
    /// Creates a terminal display
    ///
    /// # Arguments
    ///
    /// * `show_timestamps` - Prefix each bubble with its timestamp label
    pub fn new(show_timestamps: bool) -> Self {
        Self {
            show_timestamps,
            interactive: std::io::stdout().is_terminal(),
            loading: AtomicBool::new(false),
        }
    }

    /// Formats a bubble as a single terminal line
    pub fn render(&self, bubble: &Bubble) -> String {
        let (label, text) = match bubble.kind {
            BubbleKind::User => ("You:".bold().cyan(), bubble.text.normal()),
            BubbleKind::Assistant => ("Assistant:".bold().green(), bubble.text.normal()),
            BubbleKind::Error => ("Assistant:".bold().red(), bubble.text.red()),
        };

        if self.show_timestamps {
            format!("{} {} {}", format!("[{}]", bubble.timestamp).dimmed(), label, text)
        } else {
            format!("{} {}", label, text)
        }
    }

    fn erase_line(&self) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\r\x1b[2K");
        let _ = stdout.flush();
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DisplaySurface for TerminalDisplay {
    fn append(&self, bubble: Bubble) {
        if self.interactive && self.loading.load(Ordering::SeqCst) {
            self.erase_line();
        }
        println!("{}", self.render(&bubble));
    }

    fn set_loading(&self, visible: bool) {
        let was_visible = self.loading.swap(visible, Ordering::SeqCst);
        if !self.interactive || was_visible == visible {
            return;
        }

        if visible {
            let mut stdout = std::io::stdout();
            let _ = write!(stdout, "{}", LOADING_TEXT.dimmed());
            let _ = stdout.flush();
        } else {
            self.erase_line();
        }
    }
}
