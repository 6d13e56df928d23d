//! # The Emitter: a synchronous publish/subscribe registry.
//!
//! [`Emitter`] owns a map from event name to the ordered list of handlers
//! registered under that name. Registration (`on`/`once`), removal
//! (`off`/`off_handler`/`remove_all_listeners`) and emission (`emit`) all
//! act on this single structure.
//!
//! ## Emission flow
//! ```text
//!   emit("greet", args)
//!        │
//!        ├─ lock ──► snapshot ordered handler list for "greet" ──► unlock
//!        │
//!        └─ for each snapshot entry, in registration order:
//!             ├─ once entry? remove it from the live registry first
//!             ├─ invoke handler(args)   (no lock held)
//!             └─ Err / panic ──► collect HandlerFault, keep going
//!
//!   all entries ran ──► Ok(()) or Err(EmitError { faults })
//! ```
//!
//! ## Snapshot semantics
//! The pass iterates a copy of the list taken when `emit` was called:
//! - a handler removed during the pass still runs in that pass,
//! - a handler added during the pass first runs in the next pass.
//!
//! The registry lock is never held while a handler runs, so handlers may
//! call back into `on`/`off`/`emit` (including re-emitting the same event)
//! without deadlock.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{EmitError, HandlerFault, RegisterError};
use crate::handler::{Args, Handler, HandlerRef};
use crate::subscription::Subscription;

/// One registration in the ordered list of an event name.
struct Entry {
    id: u64,
    handler: HandlerRef,
    once: bool,
}

/// Synchronous in-process event broker.
///
/// Handlers registered under an event name run back-to-back on the emitting
/// thread, in registration order. `Emitter` is `Send + Sync`: share it by
/// reference or behind an `Arc` (dependency injection, not an ambient
/// singleton) and call every method through `&self`.
///
/// ## Example
/// ```
/// use eventry::{Args, Emitter, HandlerResult};
/// use serde_json::json;
///
/// let bus = Emitter::new();
/// bus.on("greet", |args: &Args| -> HandlerResult {
///     println!("hello, {}", args[0]);
///     Ok(())
/// })?;
///
/// bus.emit("greet", &[json!("world")])?;
/// assert_eq!(bus.listener_count("greet"), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct Emitter {
    registry: Mutex<HashMap<String, Vec<Entry>>>,
    next_id: AtomicU64,
}

impl Emitter {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` to run on every emission of `event`.
    ///
    /// Appends to the ordered list for `event`, creating it if absent.
    /// Returns a [`Subscription`] token that identifies exactly this
    /// registration for later removal via [`off`](Self::off).
    ///
    /// # Errors
    /// [`RegisterError::EmptyEventName`] when `event` is empty. Names are
    /// otherwise opaque strings. (The "non-invocable handler" failure of
    /// dynamic emitters cannot occur here: `handler` is statically a
    /// [`Handler`].)
    pub fn on<H: Handler>(&self, event: &str, handler: H) -> Result<Subscription, RegisterError> {
        self.register(event, Arc::new(handler), false)
    }

    /// Like [`on`](Self::on), but the handler is removed automatically
    /// before its first invocation completes: it fires exactly once no
    /// matter how many times `event` is emitted afterwards, and a handler
    /// that synchronously re-emits `event` does not re-trigger itself.
    ///
    /// # Errors
    /// Same contract as [`on`](Self::on).
    pub fn once<H: Handler>(&self, event: &str, handler: H) -> Result<Subscription, RegisterError> {
        self.register(event, Arc::new(handler), true)
    }

    /// Registers an already-shared handler to run on every emission of
    /// `event`.
    ///
    /// The registry keeps the given [`HandlerRef`] rather than re-wrapping
    /// it, so the caller's clone of the `Arc` identifies the registration
    /// for [`off_handler`](Self::off_handler).
    ///
    /// # Errors
    /// Same contract as [`on`](Self::on).
    pub fn on_shared(&self, event: &str, handler: HandlerRef) -> Result<Subscription, RegisterError> {
        self.register(event, handler, false)
    }

    /// Once-only variant of [`on_shared`](Self::on_shared).
    ///
    /// # Errors
    /// Same contract as [`on`](Self::on).
    pub fn once_shared(
        &self,
        event: &str,
        handler: HandlerRef,
    ) -> Result<Subscription, RegisterError> {
        self.register(event, handler, true)
    }

    /// Removes the registration identified by `sub`.
    ///
    /// Returns `true` when something was removed. Removing a subscription
    /// that no longer exists (already removed, already fired as `once`, or
    /// cleared) is a no-op returning `false`, never an error.
    pub fn off(&self, sub: &Subscription) -> bool {
        self.remove(sub.event(), |entry| entry.id == sub.id())
    }

    /// Removes the first registration (in registration order) of `handler`
    /// under `event`, matched by allocation identity (`Arc::ptr_eq`).
    ///
    /// This is the disambiguation rule when one handler was registered
    /// several times under the same name: a bare handler reference removes
    /// the earliest match. Callers needing to remove a specific registration
    /// keep its [`Subscription`] token and use [`off`](Self::off) instead.
    ///
    /// Returns `true` when something was removed; `false` is a silent no-op.
    pub fn off_handler(&self, event: &str, handler: &HandlerRef) -> bool {
        self.remove(event, |entry| Arc::ptr_eq(&entry.handler, handler))
    }

    /// Emits `event`, invoking every currently subscribed handler with
    /// `args`, synchronously and in registration order.
    ///
    /// The pass iterates a snapshot of the subscription list taken at call
    /// time, so handlers that register or remove subscriptions during the
    /// pass do not change which handlers run in it. A `once` entry is
    /// removed from the live registry immediately before its handler runs.
    ///
    /// Emitting an event with no subscriptions returns `Ok(())`.
    ///
    /// # Errors
    /// Handler faults are isolated and aggregated: a handler that returns
    /// `Err` or panics does not stop the pass, and once every snapshot
    /// entry has run the collected faults come back as one [`EmitError`]
    /// (in invocation order). The registry itself is never corrupted by a
    /// faulting handler.
    pub fn emit(&self, event: &str, args: &Args) -> Result<(), EmitError> {
        let snapshot: Vec<(u64, HandlerRef, bool)> = {
            let registry = self.registry.lock();
            match registry.get(event) {
                Some(entries) => entries
                    .iter()
                    .map(|e| (e.id, Arc::clone(&e.handler), e.once))
                    .collect(),
                None => {
                    debug!(event, "no handlers registered, nothing to emit");
                    return Ok(());
                }
            }
        };

        let mut faults = Vec::new();
        for (index, (id, handler, once)) in snapshot.into_iter().enumerate() {
            if once {
                // Gone from the live registry before its handler observes
                // anything; a no-op if a sibling handler already took it out.
                self.remove(event, |entry| entry.id == id);
            }
            match panic::catch_unwind(AssertUnwindSafe(|| handler.call(args))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(event, index, error = %err, "handler failed");
                    faults.push(HandlerFault {
                        event: event.to_string(),
                        index,
                        reason: err.to_string(),
                        panicked: false,
                    });
                }
                Err(payload) => {
                    let reason = panic_reason(payload.as_ref());
                    warn!(event, index, reason = %reason, "handler panicked");
                    faults.push(HandlerFault {
                        event: event.to_string(),
                        index,
                        reason,
                        panicked: true,
                    });
                }
            }
        }

        if faults.is_empty() {
            Ok(())
        } else {
            Err(EmitError {
                event: event.to_string(),
                faults,
            })
        }
    }

    /// Number of live subscriptions for `event` (0 if none).
    ///
    /// A fired `once` subscription no longer counts; neither does anything
    /// removed by `off`. Pure query.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.lock().get(event).map_or(0, Vec::len)
    }

    /// Removes every subscription for `event`, or for all events when
    /// `None`. Silent no-op when nothing is registered.
    pub fn remove_all_listeners(&self, event: Option<&str>) {
        let mut registry = self.registry.lock();
        match event {
            Some(name) => {
                if registry.remove(name).is_some() {
                    debug!(event = name, "all handlers removed");
                }
            }
            None => {
                registry.clear();
                debug!("registry cleared");
            }
        }
    }

    /// Event names that currently have at least one live subscription,
    /// in no particular order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.registry.lock().keys().cloned().collect()
    }

    fn register(
        &self,
        event: &str,
        handler: HandlerRef,
        once: bool,
    ) -> Result<Subscription, RegisterError> {
        if event.is_empty() {
            return Err(RegisterError::EmptyEventName);
        }
        let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        {
            let mut registry = self.registry.lock();
            registry
                .entry(event.to_string())
                .or_default()
                .push(Entry { id, handler, once });
        }
        debug!(event, id, once, "handler registered");
        Ok(Subscription::new(Arc::from(event), id))
    }

    /// Removes the first entry under `event` matching the predicate.
    /// Drops the event key when the list empties.
    fn remove(&self, event: &str, matches: impl Fn(&Entry) -> bool) -> bool {
        let mut registry = self.registry.lock();
        let Some(entries) = registry.get_mut(event) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|entry| matches(entry)) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            registry.remove(event);
        }
        debug!(event, "handler removed");
        true
    }
}

/// Renders a caught panic payload for fault reporting.
fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
