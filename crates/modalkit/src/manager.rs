#![forbid(unsafe_code)]

//! Modal stack manager: the composition root.
//!
//! `ModalManager` owns the registry, the active stack, the overlay
//! controller and the input hooks, and drives the host through them.
//!
//! # Invariants
//!
//! Under [`HidePolicy::RemoveById`]:
//!
//! - No id appears twice in the active stack.
//! - Every stacked id is active, and every active id is stacked.
//! - The topmost id has the highest stacking value.
//! - The overlay is live and the hooks are bound iff the stack is
//!   non-empty.
//!
//! # Failure Modes
//!
//! - `show` / `hide` on an unregistered id return
//!   [`ModalError::NotFound`](crate::ModalError::NotFound)
//!   and change nothing.
//! - `show` on an active id and `hide` on an inactive id are silent no-ops.
//! - `dispatch` with an empty stack returns [`Propagation::Continue`].

use modalkit_core::{Event, Host, KeyCode, Propagation};

use crate::active::ActiveStack;
use crate::config::{HidePolicy, ManagerOptions, ModalConfig, Z_STEP};
use crate::error::Result;
use crate::focus_trap;
use crate::hooks::EventHooks;
use crate::overlay::OverlayController;
use crate::registry::{ModalId, ModalRecord, Registry};

/// Stack of modals over one host.
pub struct ModalManager<H: Host> {
    host: H,
    options: ManagerOptions,
    registry: Registry<H::Element>,
    stack: ActiveStack,
    overlay: OverlayController<H::Overlay>,
    hooks: EventHooks,
}

impl<H: Host> ModalManager<H> {
    /// Create a manager with default options.
    pub fn new(host: H) -> Self {
        Self::with_options(host, ManagerOptions::default())
    }

    pub fn with_options(host: H, options: ManagerOptions) -> Self {
        Self {
            host,
            options,
            registry: Registry::new(),
            stack: ActiveStack::new(),
            overlay: OverlayController::new(),
            hooks: EventHooks::new(),
        }
    }

    // --- Registration ---

    /// Register an element as a modal.
    ///
    /// Registering the same element again returns its existing id and
    /// ignores `config`.
    pub fn register(&mut self, element: H::Element, config: ModalConfig) -> ModalId {
        let known = self.registry.id_of(&element);
        let id = self.registry.register(element, config);
        if known.is_none() {
            tracing::debug!(
                modal_id = id.get(),
                z_index_base = config.z_index_base,
                "modal registered"
            );
        }
        id
    }

    // --- Show / Hide ---

    /// Open a modal on top of the stack.
    pub fn show(&mut self, id: ModalId) -> Result<()> {
        let record = self.registry.lookup(id)?;
        if record.active {
            tracing::trace!(modal_id = id.get(), "show ignored; already active");
            return Ok(());
        }

        let z = match self.stack.top() {
            None => record.config.z_index_base,
            Some(top) => {
                let below = self.registry.lookup(top)?;
                below
                    .current_z
                    .unwrap_or(below.config.z_index_base)
                    .saturating_add(Z_STEP)
            }
        };

        let record = self.registry.lookup_mut(id)?;
        record.current_z = Some(z);
        record.config.bump_z_index_base();
        record.active = true;
        let element = record.element().clone();
        let opacity = record.config.overlay_opacity;

        self.stack.push(id);
        self.host.set_z_index(&element, z.saturating_add(1));

        if self.stack.len() == 1 {
            self.overlay.create(&mut self.host, id, z, opacity);
            self.hooks.bind(&mut self.host);
        }

        self.host.set_visible(&element, true);
        focus_trap::focus_on_open(&mut self.host, &element);

        tracing::debug!(
            modal_id = id.get(),
            z_index = z,
            depth = self.stack.len(),
            "modal shown"
        );
        Ok(())
    }

    /// Close a modal.
    pub fn hide(&mut self, id: ModalId) -> Result<()> {
        let record = self.registry.lookup_mut(id)?;
        if !record.active {
            tracing::trace!(modal_id = id.get(), "hide ignored; not active");
            return Ok(());
        }
        record.active = false;
        let element = record.element().clone();

        match self.options.hide_policy {
            HidePolicy::RemoveById => {
                self.stack.remove(id);
            }
            HidePolicy::PopTopmost => {
                let popped = self.stack.pop();
                if popped != Some(id) {
                    tracing::warn!(
                        requested = id.get(),
                        popped = ?popped,
                        "hide popped a different modal than requested"
                    );
                }
            }
        }

        if self.stack.is_empty() {
            self.hooks.unbind(&mut self.host);
            self.overlay.destroy(&mut self.host);
        }

        self.host.set_visible(&element, false);

        tracing::debug!(modal_id = id.get(), depth = self.stack.len(), "modal hidden");
        Ok(())
    }

    /// Hide every active modal, in registration order.
    pub fn hide_all(&mut self) {
        let active: Vec<ModalId> = self
            .registry
            .iter()
            .filter(|record| record.active)
            .map(ModalRecord::id)
            .collect();
        for id in active {
            let hidden = self.hide(id);
            debug_assert!(hidden.is_ok(), "registered modal {id} failed to hide");
        }
    }

    // --- Event Handling ---

    /// Route an event from a bound input channel to the topmost modal.
    pub fn dispatch(&mut self, event: &Event<H::Element>) -> Propagation {
        let Some(top) = self.stack.top() else {
            return Propagation::Continue;
        };
        let Ok(record) = self.registry.lookup(top) else {
            return Propagation::Continue;
        };
        let root = record.element().clone();
        let close_on_escape = record.config.close_on_escape;

        tracing::trace!(modal_id = top.get(), kind = ?event.kind(), "dispatch");

        match event {
            Event::Key(key) => match key.code {
                KeyCode::Escape => {
                    if close_on_escape {
                        let hidden = self.hide(top);
                        debug_assert!(hidden.is_ok(), "topmost modal {top} failed to hide");
                    }
                    Propagation::Continue
                }
                KeyCode::Tab => focus_trap::on_tab(&mut self.host, &root, key),
                _ => Propagation::Continue,
            },
            Event::Pointer(pointer) => {
                focus_trap::on_pointer_down(&mut self.host, &root, pointer.target.as_ref())
            }
        }
    }

    // --- State Queries ---

    /// Whether the modal is open. `false` for unregistered ids.
    pub fn is_active(&self, id: ModalId) -> bool {
        self.registry.lookup(id).is_ok_and(ModalRecord::is_active)
    }

    pub fn lookup(&self, id: ModalId) -> Result<&ModalRecord<H::Element>> {
        self.registry.lookup(id)
    }

    /// Id registered for `element`, if any.
    pub fn id_of(&self, element: &H::Element) -> Option<ModalId> {
        self.registry.id_of(element)
    }

    /// Stacking value computed at the modal's last `show`.
    pub fn current_z(&self, id: ModalId) -> Result<Option<i32>> {
        Ok(self.registry.lookup(id)?.current_z)
    }

    /// Topmost open modal.
    pub fn top(&self) -> Option<ModalId> {
        self.stack.top()
    }

    /// Open modals, bottom to top.
    pub fn active_ids(&self) -> &[ModalId] {
        self.stack.as_slice()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_live()
    }

    /// Modal whose opening created the live overlay.
    pub fn overlay_owner(&self) -> Option<ModalId> {
        self.overlay.owner()
    }

    pub fn hooks_bound(&self) -> bool {
        self.hooks.is_bound()
    }

    pub fn options(&self) -> ManagerOptions {
        self.options
    }

    pub fn registered(&self) -> impl Iterator<Item = &ModalRecord<H::Element>> {
        self.registry.iter()
    }

    // --- Host Access ---

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
