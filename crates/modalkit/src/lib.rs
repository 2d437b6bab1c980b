#![forbid(unsafe_code)]

//! Modal stack management: z-ordering, a shared overlay, and focus trapping.
//!
//! [`ModalManager`] tracks which modal elements are open, assigns each a
//! stacking value above the one beneath it, dims the page with a single
//! overlay while any modal is open, and keeps keyboard and pointer focus
//! inside the topmost modal.
//!
//! The manager talks to the UI toolkit only through the capability traits
//! in [`modalkit_core`]. It holds element handles but never owns or mutates
//! the elements' lifecycles.
//!
//! # Example
//!
//! ```ignore
//! use modalkit::{ModalConfig, ModalManager};
//! use modalkit_core::{Event, KeyCode};
//!
//! let mut modals = ModalManager::new(document);
//! let settings = modals.register(settings_el, ModalConfig::default());
//! let confirm = modals.register(confirm_el, ModalConfig::new().overlay_opacity(70));
//!
//! modals.show(settings)?;
//! modals.show(confirm)?; // stacks 100 above `settings`
//!
//! // Host forwards bound input channels:
//! let outcome = modals.dispatch(&Event::key(KeyCode::Escape, focused));
//! assert_eq!(modals.top(), Some(settings));
//! ```
//!
//! # Hide policy
//!
//! By default `hide(id)` removes `id` wherever it sits in the stack. The
//! legacy [`HidePolicy::PopTopmost`] always pops the topmost entry instead.

pub mod active;
pub mod config;
pub mod dialog;
pub mod error;
pub mod focus_trap;
pub mod hooks;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod manager;
pub mod overlay;
pub mod registry;

pub use config::{
    DEFAULT_OVERLAY_OPACITY, DEFAULT_Z_INDEX_BASE, HidePolicy, ManagerOptions, ModalConfig, Z_STEP,
};
pub use dialog::{
    CONFIRM_DIALOG, ConfirmButton, Dimension, DialogBook, DialogHost, DialogSize, DialogSpec,
    PendingConfirm,
};
pub use error::{ModalError, Result};
pub use manager::ModalManager;
pub use registry::{ModalId, ModalRecord};
