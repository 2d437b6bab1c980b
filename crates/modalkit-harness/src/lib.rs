#![forbid(unsafe_code)]

//! Test support for modalkit.
//!
//! - [`MemoryDom`]: an in-memory document implementing every host
//!   capability and recording what the manager did to it.
//! - [`Session`]: delivers key and pointer input the way a document event
//!   loop would, including default Tab traversal.
//! - [`LogCapture`]: a `tracing` layer for asserting on emitted events.
//! - [`Fixture`]: scripted op sequences with invariant checks.

pub mod capture;
pub mod dom;
pub mod fixture;
pub mod session;

pub use capture::{CapturedEvent, LogCapture, capture};
pub use dom::{MemoryDom, NodeId, OverlayId, OverlayRecord};
pub use fixture::{Fixture, Op};
pub use session::Session;
