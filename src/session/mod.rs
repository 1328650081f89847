//! Session module for bubblechat
//!
//! This module contains the transcript data model and the conversation
//! session that drives each send/receive turn.

pub mod core;
pub mod transcript;

pub use core::{Clock, InputSurface, Session, SessionState, TurnOutcome};
pub use transcript::{Message, Role, Transcript};
