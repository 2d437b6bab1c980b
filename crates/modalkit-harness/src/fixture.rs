#![forbid(unsafe_code)]

//! Scripted operation sequences over a small document, with invariant
//! checks after every step. Shared by the property tests and the fuzzer.

use modalkit::{HidePolicy, ModalConfig, ModalError, ModalId};
use modalkit_core::{ElementTree, EventKind};

use crate::dom::{MemoryDom, NodeId};
use crate::session::Session;

/// One step of a scripted run. Slots index the fixture's dialogs modulo
/// their count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Register(u8),
    Show(u8),
    Hide(u8),
    HideAll,
    Escape,
    Tab,
    ShiftTab,
    PointerInside(u8),
    PointerOutside,
}

/// A document with `n` dialogs and a focusable element outside all of them.
///
/// Dialog `i` holds `i % 3` inputs, so runs mix modals with zero, one and
/// several focus targets.
pub struct Fixture {
    session: Session,
    dialogs: Vec<NodeId>,
    outside: NodeId,
    ids: Vec<Option<ModalId>>,
}

impl Fixture {
    pub fn new(n: usize, policy: HidePolicy) -> Self {
        let mut dom = MemoryDom::new();
        let outside = dom.input(dom.body(), "page-button");
        let dialogs: Vec<NodeId> = (0..n.max(1))
            .map(|i| {
                let dialog = dom.dialog("dialog");
                for _ in 0..i % 3 {
                    dom.input(dialog, "input");
                }
                dialog
            })
            .collect();
        let ids = vec![None; dialogs.len()];
        Self {
            session: Session::with_policy(dom, policy),
            dialogs,
            outside,
            ids,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dialogs(&self) -> &[NodeId] {
        &self.dialogs
    }

    fn slot(&self, raw: u8) -> usize {
        usize::from(raw) % self.dialogs.len()
    }

    /// Apply one op and check its immediate postconditions.
    pub fn apply(&mut self, op: Op) -> Result<(), String> {
        match op {
            Op::Register(raw) => {
                let slot = self.slot(raw);
                let id = self
                    .session
                    .modals_mut()
                    .register(self.dialogs[slot], ModalConfig::default());
                if let Some(known) = self.ids[slot]
                    && known != id
                {
                    return Err(format!("re-register of slot {slot} gave {id}, had {known}"));
                }
                self.ids[slot] = Some(id);
            }
            Op::Show(raw) => self.show_or_hide(raw, true)?,
            Op::Hide(raw) => self.show_or_hide(raw, false)?,
            Op::HideAll => {
                self.session.modals_mut().hide_all();
                if !self.session.modals().is_empty() {
                    return Err("hide_all left modals open".into());
                }
            }
            Op::Escape => {
                let before = self.session.modals().top();
                let depth = self.session.modals().depth();
                let _ = self.session.escape();
                if let Some(top) = before {
                    if self.session.modals().is_active(top) {
                        return Err(format!("escape left topmost {top} open"));
                    }
                    if self.session.modals().depth() + 1 != depth {
                        return Err("escape closed more than one modal".into());
                    }
                }
            }
            Op::Tab | Op::ShiftTab => {
                let _ = if op == Op::Tab {
                    self.session.tab()
                } else {
                    self.session.shift_tab()
                };
                self.check_focus_trapped("tab")?;
            }
            Op::PointerInside(raw) => {
                let slot = self.slot(raw);
                let _ = self.session.pointer_down(self.dialogs[slot]);
            }
            Op::PointerOutside => {
                let _ = self.session.pointer_down(self.outside);
                self.check_focus_trapped("pointer")?;
            }
        }
        Ok(())
    }

    fn show_or_hide(&mut self, raw: u8, show: bool) -> Result<(), String> {
        let slot = self.slot(raw);
        let Some(id) = self.ids[slot] else {
            // Ids are handed out from 1 in registration order; pick one past
            // every known id so it can never be registered.
            let bogus = ModalId::new(u64::MAX);
            let modals = self.session.modals_mut();
            let result = if show { modals.show(bogus) } else { modals.hide(bogus) };
            return match result {
                Err(ModalError::NotFound(missing)) if missing == bogus => Ok(()),
                other => Err(format!("unregistered id gave {other:?}")),
            };
        };
        let was_active = self.session.modals().is_active(id);
        let modals = self.session.modals_mut();
        let result = if show { modals.show(id) } else { modals.hide(id) };
        result.map_err(|err| format!("{err}"))?;

        let modals = self.session.modals();
        if show {
            if !modals.is_active(id) {
                return Err(format!("{id} not active after show"));
            }
            if !was_active && modals.top() != Some(id) {
                return Err(format!("{id} not topmost after show"));
            }
            if !self.session.dom().is_visible(self.dialogs[slot]) {
                return Err(format!("{id} not visible after show"));
            }
        } else if was_active {
            if modals.is_active(id) {
                return Err(format!("{id} still active after hide"));
            }
            if self.session.dom().is_visible(self.dialogs[slot]) {
                return Err(format!("{id} still visible after hide"));
            }
        }
        Ok(())
    }

    fn check_focus_trapped(&self, what: &str) -> Result<(), String> {
        let Some(top) = self.session.modals().top() else {
            return Ok(());
        };
        let root = *self
            .session
            .modals()
            .lookup(top)
            .map_err(|err| format!("{err}"))?
            .element();
        let focused = self.session.focused();
        if !focused.is_some_and(|node| self.session.dom().contains(&root, &node)) {
            return Err(format!("{what} left focus at {focused:?}, outside {top}"));
        }
        Ok(())
    }

    /// Check the stack invariants that hold under [`HidePolicy::RemoveById`].
    pub fn check(&self) -> Result<(), String> {
        let modals = self.session.modals();
        let dom = self.session.dom();
        let stack = modals.active_ids();

        for (i, id) in stack.iter().enumerate() {
            if stack[..i].contains(id) {
                return Err(format!("{id} stacked twice: {stack:?}"));
            }
            if !modals.is_active(*id) {
                return Err(format!("{id} stacked but inactive"));
            }
        }
        for record in modals.registered() {
            if record.is_active() && !stack.contains(&record.id()) {
                return Err(format!("{} active but not stacked", record.id()));
            }
            if dom.is_visible(*record.element()) != record.is_active() {
                return Err(format!("{} visibility out of sync", record.id()));
            }
        }

        let z: Vec<i32> = stack
            .iter()
            .map(|id| modals.current_z(*id).ok().flatten().unwrap_or(i32::MIN))
            .collect();
        if z.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!("stack z not increasing: {z:?}"));
        }

        let open = !stack.is_empty();
        if modals.has_overlay() != open || dom.overlays().len() != usize::from(open) {
            return Err(format!(
                "overlay live={} count={} with depth {}",
                modals.has_overlay(),
                dom.overlays().len(),
                stack.len()
            ));
        }
        if dom.max_live_overlays() > 1 {
            return Err("two overlays were live at once".into());
        }
        let listening =
            dom.is_listening(EventKind::KeyDown) && dom.is_listening(EventKind::PointerDown);
        if modals.hooks_bound() != open || listening != open {
            return Err(format!(
                "hooks bound={} listening={listening} with depth {}",
                modals.hooks_bound(),
                stack.len()
            ));
        }
        if !open && dom.listener_count() != 0 {
            return Err("listeners left after stack emptied".into());
        }
        Ok(())
    }

    /// Apply every op, checking invariants after each.
    pub fn run(&mut self, ops: &[Op]) -> Result<(), String> {
        for (step, op) in ops.iter().enumerate() {
            self.apply(*op).map_err(|err| format!("step {step} {op:?}: {err}"))?;
            self.check().map_err(|err| format!("after step {step} {op:?}: {err}"))?;
        }
        Ok(())
    }
}
