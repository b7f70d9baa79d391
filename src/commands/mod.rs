//! Bot command vocabulary and the transport-facing dispatcher.
//!
//! Submodules:
//! - `advisor`: `GiftAdvisor`, routes transport events to the step machine
//!   and runs the recommendation pipeline on completion
//! - `texts`: Fixed reply texts

pub mod advisor;
pub mod texts;

pub use advisor::{Event, GiftAdvisor, Reply, StepPrompt};

/// A slash command recognised by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start`: welcome text.
    Start,
    /// `/help`: usage text.
    Help,
    /// `/reco`: begin (or restart) parameter collection.
    Reco,
    /// `/shop`: placeholder shop text.
    Shop,
    /// `/note <text>`: attach free text to the current collection.
    Note(String),
}

impl BotCommand {
    /// Parse a message as a command.
    ///
    /// Accepts an optional `@botname` suffix and any letter case. Returns
    /// `None` for plain text and unknown commands.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

        match name.as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "reco" => Some(Self::Reco),
            "shop" => Some(Self::Shop),
            "note" => Some(Self::Note(args.to_string())),
            _ => None,
        }
    }
}
