//! # eventry
//!
//! **Eventry** is a synchronous in-process publish/subscribe registry.
//!
//! Callers register interest in named events; other callers emit those
//! events with an argument list, and every handler registered under that
//! name runs synchronously on the emitting thread, in registration order.
//! The crate is a building block for decoupling components inside one
//! process, not a delivery system: there is no networking, no persistence,
//! and no queueing.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  on("greet") │   │ once("greet")│   │  on("tick")  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Emitter (registry)                                       │
//! │  "greet" ──► [ handler, once-handler ]   (insertion order)│
//! │  "tick"  ──► [ handler ]                                  │
//! └──────────────────────────┬────────────────────────────────┘
//!                            │ emit("greet", args)
//!                            ▼
//!            snapshot ──► invoke each, in order, no lock held
//!                            │
//!                            ▼
//!            Ok(())  or  EmitError { faults: [HandlerFault] }
//! ```
//!
//! ### Semantics
//! - **Ordering**: per event name, handlers run in registration order.
//! - **Snapshot emission**: each `emit` iterates a copy of the list taken
//!   when it started; `on`/`off` calls made by handlers affect later passes
//!   only.
//! - **Once**: a `once` registration is removed from the live registry
//!   immediately before its first invocation, so it cannot re-trigger
//!   itself by re-emitting and is gone for every later pass.
//! - **Fault isolation**: a handler that returns an error or panics does
//!   not stop the pass; every fault of the pass comes back to the `emit`
//!   caller in one [`EmitError`].
//! - **No-ops by contract**: emitting with no listeners and removing a
//!   subscription that is already gone are silent no-ops, never errors.
//!
//! ## Quick start
//! ```
//! use eventry::{Args, Emitter, HandlerResult};
//! use serde_json::json;
//!
//! let bus = Emitter::new();
//!
//! bus.on("greet", |args: &Args| -> HandlerResult {
//!     println!("hello, {}", args[0]);
//!     Ok(())
//! })?;
//!
//! let sub = bus.once("greet", |args: &Args| -> HandlerResult {
//!     println!("first greeting only: {}", args[0]);
//!     Ok(())
//! })?;
//! assert_eq!(sub.event(), "greet");
//! assert_eq!(bus.listener_count("greet"), 2);
//!
//! bus.emit("greet", &[json!("world")])?;
//! bus.emit("greet", &[json!("again")])?;
//! assert_eq!(bus.listener_count("greet"), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Sharing
//! [`Emitter`] is `Send + Sync` and every method takes `&self`: share one
//! instance by reference or behind an `Arc` and pass it to collaborators
//! explicitly. Registry mutation is serialized internally; the lock is
//! never held while a handler runs, so handlers may call back into the
//! emitter freely.

mod emitter;
mod error;
mod handler;
mod subscription;

// ---- Public re-exports ----

pub use emitter::Emitter;
pub use error::{EmitError, HandlerFault, RegisterError};
pub use handler::{Args, Handler, HandlerRef, HandlerResult};
pub use subscription::Subscription;
