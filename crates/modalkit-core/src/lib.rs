#![forbid(unsafe_code)]

//! Core input model and host capabilities for modalkit.
//!
//! This crate carries no policy. It defines the events a host delivers to a
//! modal manager and the traits a UI toolkit implements so the manager can
//! move focus, stack elements and dim the page without knowing anything
//! about the toolkit itself.

pub mod event;
pub mod host;

pub use event::{Event, EventKind, KeyCode, KeyEvent, Modifiers, PointerEvent, Propagation};
pub use host::{ElementTree, Host, HookId, InputChannel, OverlayHost, OverlayStyle};
