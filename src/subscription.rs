//! Subscription tokens returned by registration.
//!
//! A [`Subscription`] identifies exactly one registration and is only good
//! for asking the emitter to remove it later. It confers no ownership: the
//! registry owns the handler, and dropping the token changes nothing.

use std::sync::Arc;

/// Token identifying one registration of one handler under one event name.
///
/// Returned by [`Emitter::on`](crate::Emitter::on) and
/// [`Emitter::once`](crate::Emitter::once); pass it to
/// [`Emitter::off`](crate::Emitter::off) to remove that specific
/// registration, even when the same handler was registered several times.
///
/// Cloning a token clones the identity, not the subscription: both clones
/// refer to the same registration.
#[derive(Clone, Debug)]
pub struct Subscription {
    event: Arc<str>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(event: Arc<str>, id: u64) -> Self {
        Self { event, id }
    }

    /// Event name this subscription was registered under.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}
