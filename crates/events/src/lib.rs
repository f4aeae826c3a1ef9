//! Waymark session event bus.
//!
//! Workflow outcomes and non-blocking error notifications are published
//! as [`SessionEvent`]s on the in-process [`EventBus`]; the view layer
//! subscribes to surface them (toasts), tests subscribe to count them.

pub mod bus;

pub use bus::{EventBus, SessionEvent};
