//! Outbound notifications.
//!
//! The engine talks to players through the [`Notifier`] trait and nothing
//! else. Delivery is fire-and-forget: implementations swallow transport
//! failures (logging them if they care), and the engine never lets a
//! failed notification stall a phase transition.

pub mod messages;

/// Outbound message channel to players.
///
/// `send` must not panic and must not block game progression on delivery
/// problems; a lost message is the driver's operational concern, not a
/// game-state concern.
pub trait Notifier {
    /// Deliver `text` to the player reachable at `email`. Best effort.
    fn send(&mut self, email: &str, text: &str);
}

/// Notifier that discards everything. Useful for drivers that handle
/// messaging elsewhere and for tests that don't inspect traffic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&mut self, _email: &str, _text: &str) {}
}

/// A sent message captured by [`Outbox`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient address.
    pub email: String,
    /// Message body.
    pub text: String,
}

/// Recording notifier: keeps every message in memory.
///
/// The test double for asserting who was told what.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    /// Every message sent, in order.
    pub sent: Vec<OutboundMessage>,
}

impl Outbox {
    /// Create an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All message bodies delivered to one address, in order.
    #[must_use]
    pub fn messages_to(&self, email: &str) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|m| m.email == email)
            .map(|m| m.text.as_str())
            .collect()
    }

    /// Number of messages sent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    /// Check if nothing was sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// Forget all recorded messages.
    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Notifier for Outbox {
    fn send(&mut self, email: &str, text: &str) {
        self.sent.push(OutboundMessage {
            email: email.to_string(),
            text: text.to_string(),
        });
    }
}
