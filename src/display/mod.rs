//! Display surfaces for chat bubbles
//!
//! A display surface is an append-only list of bubbles plus a loading
//! indicator. The session only ever appends and toggles; it never reads
//! back from the surface.

pub mod memory;
pub mod terminal;

pub use memory::MemoryDisplay;
pub use terminal::TerminalDisplay;

use crate::session::Role;

/// Visual category of a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    /// Message typed by the user
    User,
    /// Reply from the chat service
    Assistant,
    /// Fallback shown in place of a reply after a failed call
    Error,
}

impl From<Role> for BubbleKind {
    fn from(role: Role) -> Self {
        match role {
            Role::User => BubbleKind::User,
            Role::Assistant => BubbleKind::Assistant,
        }
    }
}

/// One rendered entry: a timestamp label and a text label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    /// Category used for styling
    pub kind: BubbleKind,
    /// Wall-clock label, already formatted
    pub timestamp: String,
    /// Body text
    pub text: String,
}

impl Bubble {
    /// Creates a bubble
    pub fn new(kind: BubbleKind, timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }
}

/// Where the session renders bubbles and the loading indicator
///
/// Implementations use interior mutability so a surface can be shared
/// between the session and the loading guard.
pub trait DisplaySurface: Send + Sync {
    /// Appends a bubble and keeps the view on the newest entry
    fn append(&self, bubble: Bubble);

    /// Shows or hides the loading indicator
    fn set_loading(&self, visible: bool);
}
