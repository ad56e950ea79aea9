//! Inbound ballot ingestion.
//!
//! Players vote by replying to a prompt; an external receiver hands those
//! replies to the engine as raw `(sender, body)` pairs via a
//! [`VoteSource`]. Ingestion is an explicit operation on
//! [`Game`](crate::engine::Game); reads never trigger I/O behind the
//! caller's back.
//!
//! ## Parsing rules
//!
//! - The sender may be a bare address (`a@b.com`) or a display-name form
//!   (`Alice <a@b.com>`); the address must match a registered player.
//! - The target is the first integer token on the first non-empty line of
//!   the body ("3", "I vote for 3", "player 3 please").
//!
//! Entries that fail to parse, resolve, or validate are dropped with a
//! diagnostic; a bad ballot never aborts the batch.

use crate::core::PlayerId;
use crate::error::GameError;

/// One raw inbound message from a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender identity as reported by the transport. Either a bare email
    /// address or `Display Name <address>`.
    pub sender: String,

    /// Full message body.
    pub body: String,
}

impl InboundMessage {
    /// Convenience constructor.
    #[must_use]
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

/// Source of externally submitted ballots.
///
/// Each `poll` yields the finite batch of messages received since the
/// previous poll. The transport behind it (IMAP, a queue, a test vector)
/// is the implementor's business.
pub trait VoteSource {
    /// Fetch pending messages. May be empty.
    fn poll(&mut self) -> Vec<InboundMessage>;
}

/// In-memory vote source for drivers and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticVoteSource {
    pending: Vec<InboundMessage>,
}

impl StaticVoteSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the next poll.
    pub fn push(&mut self, sender: impl Into<String>, body: impl Into<String>) {
        self.pending.push(InboundMessage::new(sender, body));
    }
}

impl VoteSource for StaticVoteSource {
    fn poll(&mut self) -> Vec<InboundMessage> {
        std::mem::take(&mut self.pending)
    }
}

/// Outcome of one ingestion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Ballots recorded in the ledger.
    pub accepted: usize,

    /// Ballots dropped (unparsable, unknown sender, or ineligible).
    pub rejected: usize,
}

/// Extract the bare address from a sender identity.
///
/// Handles `Name <addr>`, `"Name" <addr>`, and bare `addr` forms.
#[must_use]
pub(crate) fn sender_address(raw: &str) -> &str {
    if let (Some(open), Some(close)) = (raw.find('<'), raw.rfind('>')) {
        if open < close {
            return raw[open + 1..close].trim();
        }
    }
    raw.trim()
}

/// Extract the target player reference from a ballot body.
///
/// The first maximal digit run on the first non-empty line.
pub(crate) fn parse_target(body: &str) -> Result<PlayerId, GameError> {
    let line = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| GameError::ParseFailure("empty ballot body".to_string()))?;

    let digits: String = line
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return Err(GameError::ParseFailure(format!(
            "no player number in {line:?}"
        )));
    }

    digits
        .parse::<u32>()
        .map(PlayerId::new)
        .map_err(|_| GameError::ParseFailure(format!("unusable player number in {line:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_address_forms() {
        assert_eq!(sender_address("a@x.com"), "a@x.com");
        assert_eq!(sender_address(" a@x.com "), "a@x.com");
        assert_eq!(sender_address("Alice <a@x.com>"), "a@x.com");
        assert_eq!(sender_address("\"Alice A.\" <a@x.com>"), "a@x.com");
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_target("3"), Ok(PlayerId::new(3)));
        assert_eq!(parse_target("  4  "), Ok(PlayerId::new(4)));
    }

    #[test]
    fn test_parse_number_embedded_in_text() {
        assert_eq!(parse_target("I vote for 3"), Ok(PlayerId::new(3)));
        assert_eq!(parse_target("player 12 please"), Ok(PlayerId::new(12)));
    }

    #[test]
    fn test_parse_uses_first_non_empty_line() {
        assert_eq!(parse_target("\n\n5\nsome signature 99"), Ok(PlayerId::new(5)));
    }

    #[test]
    fn test_parse_first_digit_run_only() {
        // "3" wins over the later "7"
        assert_eq!(parse_target("3 or maybe 7"), Ok(PlayerId::new(3)));
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(parse_target(""), Err(GameError::ParseFailure(_))));
        assert!(matches!(
            parse_target("no number here"),
            Err(GameError::ParseFailure(_))
        ));
    }

    #[test]
    fn test_static_source_drains_on_poll() {
        let mut source = StaticVoteSource::new();
        source.push("a@x.com", "3");

        assert_eq!(source.poll().len(), 1);
        assert!(source.poll().is_empty());
    }
}
