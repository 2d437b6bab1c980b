#![forbid(unsafe_code)]

//! Global key/pointer listener binding.
//!
//! The manager listens on the host's input channel only while a modal is
//! open. `bind` and `unbind` are idempotent so a host never sees a second
//! `on` for a kind it is already forwarding.

use std::sync::atomic::{AtomicU64, Ordering};

use modalkit_core::{EventKind, HookId, InputChannel};

/// Source of listener identities, unique across managers in a process.
static HOOK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Tracks whether this manager's listeners are installed.
#[derive(Debug)]
pub struct EventHooks {
    id: HookId,
    bound: bool,
}

impl Default for EventHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHooks {
    pub fn new() -> Self {
        Self {
            id: HookId::new(HOOK_ID_COUNTER.fetch_add(1, Ordering::Relaxed)),
            bound: false,
        }
    }

    /// Install key-down and pointer-down listeners.
    pub fn bind<H: InputChannel + ?Sized>(&mut self, host: &mut H) {
        if self.bound {
            return;
        }
        for kind in EventKind::ALL {
            host.on(kind, self.id);
        }
        self.bound = true;
        tracing::debug!(hook = %self.id, "input hooks bound");
    }

    /// Remove the listeners installed by [`EventHooks::bind`].
    pub fn unbind<H: InputChannel + ?Sized>(&mut self, host: &mut H) {
        if !self.bound {
            return;
        }
        for kind in EventKind::ALL {
            host.off(kind, self.id);
        }
        self.bound = false;
        tracing::debug!(hook = %self.id, "input hooks unbound");
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn id(&self) -> HookId {
        self.id
    }
}
