//! Error types used by the emitter.
//!
//! This module defines:
//!
//! - [`RegisterError`] — invalid input to a registration call.
//! - [`HandlerFault`] — one handler failing (or panicking) during a pass.
//! - [`EmitError`] — the aggregate returned by `emit` when at least one
//!   handler faulted.
//!
//! Types provide `as_label` (short stable snake_case identifier for
//! logs/metrics) and, where the message needs assembly, `as_message`.
//!
//! Faults are isolated: a faulting handler never prevents the remaining
//! handlers of the same pass from running, and never corrupts the
//! subscription registry. The caller of `emit` receives every fault of the
//! pass at once instead of only the first.

use thiserror::Error;

/// # Errors produced by registration calls.
///
/// Surfaced immediately by [`Emitter::on`](crate::Emitter::on) and
/// [`Emitter::once`](crate::Emitter::once). Removal of a non-existent
/// subscription and emission of an event with no listeners are deliberate
/// no-ops, not errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegisterError {
    /// The event name was empty. Names are otherwise opaque: any non-empty
    /// string is accepted.
    #[error("event name must be a non-empty string")]
    EmptyEventName,
}

impl RegisterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::RegisterError;
    ///
    /// let err = RegisterError::EmptyEventName;
    /// assert_eq!(err.as_label(), "register_empty_event_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegisterError::EmptyEventName => "register_empty_event_name",
        }
    }
}

/// # One handler's failure during an emission pass.
///
/// Produced when a handler returns an error or panics. The panic payload is
/// caught, so a panicking handler is observed the same way as one that
/// returns `Err`: as a fault inside the pass, not as an unwind through
/// `emit`.
#[derive(Error, Debug, Clone)]
#[error("handler #{index} for \"{event}\" failed: {reason}")]
pub struct HandlerFault {
    /// Event name being emitted when the fault occurred.
    pub event: String,
    /// Position of the handler in the snapshot of this pass (0-based,
    /// registration order).
    pub index: usize,
    /// Error message, or the stringified panic payload.
    pub reason: String,
    /// True when the handler panicked rather than returning an error.
    pub panicked: bool,
}

impl HandlerFault {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::HandlerFault;
    ///
    /// let fault = HandlerFault {
    ///     event: "greet".into(),
    ///     index: 0,
    ///     reason: "boom".into(),
    ///     panicked: false,
    /// };
    /// assert_eq!(fault.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        if self.panicked {
            "handler_panicked"
        } else {
            "handler_failed"
        }
    }
}

/// # Aggregate of every handler fault in one emission pass.
///
/// Returned by [`Emitter::emit`](crate::Emitter::emit) once the pass has run
/// to completion. Faults appear in invocation order, so `faults[0]` is the
/// earliest handler that misbehaved.
#[derive(Error, Debug)]
#[error("{} handler(s) failed while emitting \"{event}\"", .faults.len())]
pub struct EmitError {
    /// Event name of the pass.
    pub event: String,
    /// Every fault of the pass, in invocation order. Never empty.
    pub faults: Vec<HandlerFault>,
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "emit_handler_faults"
    }

    /// Returns a human-readable message listing every fault of the pass.
    ///
    /// # Example
    /// ```
    /// use eventry::{EmitError, HandlerFault};
    ///
    /// let err = EmitError {
    ///     event: "greet".into(),
    ///     faults: vec![HandlerFault {
    ///         event: "greet".into(),
    ///         index: 1,
    ///         reason: "boom".into(),
    ///         panicked: false,
    ///     }],
    /// };
    /// assert!(err.as_message().contains("boom"));
    /// ```
    pub fn as_message(&self) -> String {
        let details: Vec<String> = self
            .faults
            .iter()
            .map(|f| format!("#{} {}: {}", f.index, f.as_label(), f.reason))
            .collect();
        format!(
            "emitting \"{}\": {} fault(s): [{}]",
            self.event,
            self.faults.len(),
            details.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_fault_display_and_label() {
        let fault = HandlerFault {
            event: "greet".into(),
            index: 2,
            reason: "boom".into(),
            panicked: true,
        };
        assert_eq!(fault.as_label(), "handler_panicked");
        let msg = fault.to_string();
        assert!(msg.contains("greet"));
        assert!(msg.contains("#2"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_emit_error_message_lists_every_fault() {
        let err = EmitError {
            event: "e".into(),
            faults: vec![
                HandlerFault {
                    event: "e".into(),
                    index: 0,
                    reason: "first".into(),
                    panicked: false,
                },
                HandlerFault {
                    event: "e".into(),
                    index: 3,
                    reason: "second".into(),
                    panicked: true,
                },
            ],
        };
        assert_eq!(err.as_label(), "emit_handler_faults");
        let msg = err.as_message();
        assert!(msg.contains("first"));
        assert!(msg.contains("second"));
        assert!(msg.contains("2 fault(s)"));
        assert!(err.to_string().contains("2 handler(s)"));
    }
}
