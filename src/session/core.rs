//! Conversation session
//!
//! The session owns the transcript and runs one turn per submission:
//! record and render the user message, show the loading indicator, send
//! the whole transcript to the chat service, then render either the reply
//! or the fallback bubble.

use crate::config::ChatConfig;
use crate::display::{Bubble, BubbleKind, DisplaySurface};
use crate::error::BubbleChatError;
use crate::providers::ChatProvider;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::transcript::{Message, Transcript};

/// Source of the wall-clock time stamped on bubbles
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M";

/// Whether a request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No request in flight
    Idle,
    /// Waiting on the chat service
    AwaitingReply,
}

/// Result of a single submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was blank; nothing happened
    Ignored,
    /// The service replied with this text
    Replied(String),
    /// The service call failed and the fallback bubble was shown
    Failed,
}

/// Editable input the session reads from and clears
pub trait InputSurface: Send {
    /// Current text
    fn value(&self) -> String;

    /// Empties the editable content
    fn clear(&mut self);
}

impl InputSurface for String {
    fn value(&self) -> String {
        self.clone()
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

/// Shows the loading indicator for as long as it lives
///
/// Dropping the guard hides the indicator and returns the session to idle,
/// including when the owning future is cancelled mid-request.
struct LoadingGuard<'a> {
    display: &'a dyn DisplaySurface,
    state: &'a mut SessionState,
}

impl<'a> LoadingGuard<'a> {
    fn show(display: &'a dyn DisplaySurface, state: &'a mut SessionState) -> Self {
        *state = SessionState::AwaitingReply;
        display.set_loading(true);
        Self { display, state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.display.set_loading(false);
        *self.state = SessionState::Idle;
    }
}

/// A single conversation with a chat service
///
/// `submit` takes `&mut self`, so a session never has more than one
/// request in flight.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use bubblechat::config::{ChatConfig, OllamaConfig};
/// use bubblechat::display::MemoryDisplay;
/// use bubblechat::providers::OllamaProvider;
/// use bubblechat::session::{Session, TurnOutcome};
///
/// # async fn example() -> bubblechat::error::Result<()> {
/// let provider = OllamaProvider::new(OllamaConfig::default(), 120)?;
/// let display = Arc::new(MemoryDisplay::new());
/// let mut session = Session::new(provider, display.clone(), &ChatConfig::default());
///
/// if let TurnOutcome::Replied(reply) = session.submit("Hello").await {
///     println!("{}", reply);
/// }
/// assert_eq!(display.bubbles().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Session {
    provider: Arc<dyn ChatProvider>,
    display: Arc<dyn DisplaySurface>,
    transcript: Transcript,
    state: SessionState,
    turns: usize,
    fallback_message: String,
    timestamp_format: String,
    clock: Clock,
}

impl Session {
    /// Creates a session with an empty transcript
    ///
    /// # Arguments
    ///
    /// * `provider` - Chat service to relay the transcript to
    /// * `display` - Surface that receives bubbles and the loading indicator
    /// * `config` - Fallback text and timestamp format
    pub fn new(
        provider: impl ChatProvider + 'static,
        display: Arc<dyn DisplaySurface>,
        config: &ChatConfig,
    ) -> Self {
        Self::with_provider(Arc::new(provider), display, config)
    }

    /// Creates a session from a boxed provider
    ///
    /// Useful with [`crate::providers::create_provider`], whose provider
    /// type is only known at runtime.
    pub fn new_boxed(
        provider: Box<dyn ChatProvider>,
        display: Arc<dyn DisplaySurface>,
        config: &ChatConfig,
    ) -> Self {
        Self::with_provider(Arc::from(provider), display, config)
    }

    fn with_provider(
        provider: Arc<dyn ChatProvider>,
        display: Arc<dyn DisplaySurface>,
        config: &ChatConfig,
    ) -> Self {
        info!(
            provider = provider.name(),
            model = %provider.model(),
            "Starting chat session"
        );

        Self {
            provider,
            display,
            transcript: Transcript::new(),
            state: SessionState::Idle,
            turns: 0,
            fallback_message: config.fallback_message.clone(),
            timestamp_format: config.timestamp_format.clone(),
            clock: Box::new(Local::now),
        }
    }

    /// Replaces the wall clock used for bubble timestamps
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Runs one turn for `raw_input`
    ///
    /// Blank input is ignored without touching the transcript, the display,
    /// or the chat service. Otherwise the user message is recorded and
    /// rendered, the full transcript is sent, and the reply (or the fallback
    /// bubble) is rendered. Only a successful reply is added to the
    /// transcript.
    pub async fn submit(&mut self, raw_input: &str) -> TurnOutcome {
        self.run_turn(raw_input, None).await
    }

    /// Runs one turn with the text of `input`, clearing it once recorded
    ///
    /// Blank input is left in place, like every other part of the UI.
    pub async fn submit_from(&mut self, input: &mut dyn InputSurface) -> TurnOutcome {
        let raw_input = input.value();
        self.run_turn(&raw_input, Some(input)).await
    }

    async fn run_turn(
        &mut self,
        raw_input: &str,
        input: Option<&mut dyn InputSurface>,
    ) -> TurnOutcome {
        let user_message = match Message::user(raw_input.trim()) {
            Ok(message) => message,
            Err(_) => {
                debug!("Ignoring blank input");
                return TurnOutcome::Ignored;
            }
        };

        let text = user_message.content().to_string();
        let kind = BubbleKind::from(user_message.role());
        self.transcript.push(user_message);
        self.render(kind, &text);

        if let Some(input) = input {
            input.clear();
        }

        let result = {
            let _loading = LoadingGuard::show(self.display.as_ref(), &mut self.state);
            debug!(
                provider = self.provider.name(),
                messages = self.transcript.len(),
                "Sending transcript to chat service"
            );
            self.provider.chat(self.transcript.messages()).await
        };

        match result.and_then(|reply| Message::assistant(reply.message)) {
            Ok(reply) => {
                let text = reply.content().to_string();
                self.render(BubbleKind::from(reply.role()), &text);
                self.transcript.push(reply);
                self.turns += 1;
                debug!(turns = self.turns, "Received reply");
                TurnOutcome::Replied(text)
            }
            Err(e) => {
                let failure = BubbleChatError::ServiceCallFailed(e.to_string());
                error!("AI response error: {}", failure);
                self.render(BubbleKind::Error, &self.fallback_message);
                TurnOutcome::Failed
            }
        }
    }

    fn render(&self, kind: BubbleKind, text: &str) {
        self.display
            .append(Bubble::new(kind, self.timestamp(), text));
    }

    fn timestamp(&self) -> String {
        let now = (self.clock)();
        let mut label = String::new();
        if write!(label, "{}", now.format(&self.timestamp_format)).is_err() {
            return now.format(FALLBACK_TIMESTAMP_FORMAT).to_string();
        }
        label
    }

    /// Conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether a request is outstanding
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of successful assistant replies
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Name of the chat service in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model requested from the chat service
    pub fn model(&self) -> String {
        self.provider.model()
    }
}
