//! fleetview core - shared domain types for the deployment dashboard
//!
//! This crate owns the state that the dashboard reconciles: the ordered
//! table of machine records, the field-level merge rules applied to
//! incoming status updates, and the bounded ring of recent log lines.
//!
//! Every operation here is total. Malformed input degrades to a no-op
//! instead of an error.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod log_ring;
pub mod machine;
pub mod resource;
pub mod service;
pub mod table;
pub mod update;

// Re-exports for convenience
pub use log_ring::{LogRingBuffer, SharedLogRing, LOG_CAPACITY};
pub use machine::{
    normalize_status_message, MachineName, MachineRecord, ELLIPSIS, STATUS_WIDTH, TOTAL_STEPS,
};
pub use resource::ResourceType;
pub use service::ServiceState;
pub use table::{ApplyOutcome, DeploymentTable};
pub use update::StatusUpdate;
