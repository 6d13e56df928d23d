//! # Handler types: the callable side of a subscription.
//!
//! A handler is anything that can be invoked with the argument list supplied
//! at emit time. The emitter stores handlers as [`HandlerRef`]
//! (`Arc<dyn Handler>`) so that taking a snapshot of a subscription list is a
//! set of cheap ref-count bumps.
//!
//! ## Arguments
//! Emit-time arguments are a slice of [`serde_json::Value`] ([`Args`]). The
//! emitter treats them as opaque: the fixed argument shape for a given event
//! name is a contract between the emitting and the listening side of the
//! embedding application, not something the emitter enforces.
//!
//! ## Fallibility
//! Handlers return [`HandlerResult`]. A returned error does not stop the
//! emission pass; it is collected and reported back to the `emit` caller as
//! part of an [`EmitError`](crate::EmitError). Panics inside a handler are
//! caught and reported the same way.
//!
//! ## Example
//! ```
//! use eventry::{Args, HandlerResult};
//!
//! fn log_greeting(args: &Args) -> HandlerResult {
//!     println!("greeting: {:?}", args);
//!     Ok(())
//! }
//!
//! let bus = eventry::Emitter::new();
//! bus.on("greet", log_greeting).unwrap();
//! ```

use std::sync::Arc;

use serde_json::Value;

/// Argument list passed to every handler during an emission pass.
///
/// The Rust rendering of a variadic argument list: callers build a
/// `&[Value]` (empty slices are fine) and every handler in the pass
/// receives the same slice.
pub type Args = [Value];

/// Outcome of a single handler invocation.
///
/// `Err` marks the invocation as faulted; the emitter isolates the fault and
/// keeps running the remaining handlers of the pass.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A registered callable.
///
/// Implemented for free by any `Fn(&Args) -> HandlerResult + Send + Sync`
/// closure or function, so most callers never implement this trait directly.
/// Implement it by hand when the handler needs a named type (for example to
/// share one allocation across several registrations and remove them later
/// via [`Emitter::off_handler`](crate::Emitter::off_handler)).
pub trait Handler: Send + Sync + 'static {
    /// Invokes the handler with the arguments supplied to `emit`.
    fn call(&self, args: &Args) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Args) -> HandlerResult + Send + Sync + 'static,
{
    fn call(&self, args: &Args) -> HandlerResult {
        (self)(args)
    }
}

/// Shared handle to a handler.
///
/// Registering through [`Emitter::on_shared`](crate::Emitter::on_shared)
/// keeps the caller and the registry pointing at the same allocation, which
/// is what makes removal by handler reference
/// ([`Emitter::off_handler`](crate::Emitter::off_handler)) possible.
pub type HandlerRef = Arc<dyn Handler>;
