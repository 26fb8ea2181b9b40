//! fleetview TUI - Library modules
//!
//! This library provides the dashboard context ([`app::App`]), its
//! dispatcher state machine, the async event loop, the synthetic producers
//! and the render engine. The `fleetview` binary wires these together.
//!
//! # Architecture
//!
//! 1. **Producer Tasks**: keyboard reader, machine event generator and
//!    derived provisioning tasks send [`Event`]s into a single inbox
//! 2. **Log Generator**: writes into a shared log ring polled by the loop
//! 3. **Main Event Loop**: dispatches each message in arrival order,
//!    mutates the [`App`] and re-renders
//!
//! All tasks respect a shared `CancellationToken` for graceful shutdown.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod app;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod producer;
pub mod provision;
pub mod ui;

// Re-exports for convenience
pub use app::{App, Dispatch, RunState};
pub use config::{DashConfig, GlyphMode};
pub use error::{Result, TuiError};
pub use event_loop::run_event_loop;
pub use input::{handle_key_event, Action, Event};
