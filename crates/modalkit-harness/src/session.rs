#![forbid(unsafe_code)]

//! Event loop stand-in: delivers input to the manager the way a document
//! would.
//!
//! An event reaches [`ModalManager::dispatch`] only while the manager has
//! listeners bound on the [`MemoryDom`]. Afterwards the session applies the
//! document's default action unless the outcome prevented it; for Tab that
//! means moving focus in document order.

use modalkit::{HidePolicy, ManagerOptions, ModalManager};
use modalkit_core::{Event, EventKind, KeyCode, KeyEvent, Modifiers, Propagation};

use crate::dom::{MemoryDom, NodeId};

pub struct Session {
    modals: ModalManager<MemoryDom>,
}

impl Session {
    pub fn new(dom: MemoryDom) -> Self {
        Self {
            modals: ModalManager::new(dom),
        }
    }

    pub fn with_policy(dom: MemoryDom, policy: HidePolicy) -> Self {
        Self {
            modals: ModalManager::with_options(dom, ManagerOptions::new().hide_policy(policy)),
        }
    }

    pub fn modals(&self) -> &ModalManager<MemoryDom> {
        &self.modals
    }

    pub fn modals_mut(&mut self) -> &mut ModalManager<MemoryDom> {
        &mut self.modals
    }

    pub fn dom(&self) -> &MemoryDom {
        self.modals.host()
    }

    pub fn dom_mut(&mut self) -> &mut MemoryDom {
        self.modals.host_mut()
    }

    pub fn into_dom(self) -> MemoryDom {
        self.modals.into_host()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.dom().focused()
    }

    fn deliver(&mut self, event: &Event<NodeId>) -> Propagation {
        if self.dom().is_listening(event.kind()) {
            self.modals.dispatch(event)
        } else {
            Propagation::Continue
        }
    }

    /// Key press on the focused node.
    pub fn press(&mut self, code: KeyCode, modifiers: Modifiers) -> Propagation {
        let target = self.focused();
        let event = Event::Key(KeyEvent::new(code, target).with_modifiers(modifiers));
        let outcome = self.deliver(&event);
        if code == KeyCode::Tab && !outcome.is_prevented() {
            self.dom_mut().default_tab(modifiers.contains(Modifiers::SHIFT));
        }
        outcome
    }

    pub fn tab(&mut self) -> Propagation {
        self.press(KeyCode::Tab, Modifiers::empty())
    }

    pub fn shift_tab(&mut self) -> Propagation {
        self.press(KeyCode::Tab, Modifiers::SHIFT)
    }

    pub fn escape(&mut self) -> Propagation {
        self.press(KeyCode::Escape, Modifiers::empty())
    }

    /// Pointer press on `target`. Click-to-focus is not simulated.
    pub fn pointer_down(&mut self, target: NodeId) -> Propagation {
        self.deliver(&Event::pointer_down(Some(target)))
    }

    /// Whether the document currently routes `kind` to the manager.
    pub fn routes(&self, kind: EventKind) -> bool {
        self.dom().is_listening(kind)
    }
}
