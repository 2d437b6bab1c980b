#![forbid(unsafe_code)]

//! Ordered list of open modals.
//!
//! Append order is show order; the last entry is topmost and the only one
//! that receives input.

use crate::registry::ModalId;

/// Open modal ids, bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveStack {
    ids: Vec<ModalId>,
}

impl ActiveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the top.
    ///
    /// Uniqueness is the caller's job; the manager only pushes inactive ids.
    pub fn push(&mut self, id: ModalId) {
        self.ids.push(id);
    }

    /// Pop the topmost id.
    pub fn pop(&mut self) -> Option<ModalId> {
        self.ids.pop()
    }

    /// Remove `id` wherever it sits. Returns whether it was present.
    pub fn remove(&mut self, id: ModalId) -> bool {
        match self.ids.iter().rposition(|&m| m == id) {
            Some(idx) => {
                self.ids.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Topmost id, if any.
    #[inline]
    pub fn top(&self) -> Option<ModalId> {
        self.ids.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[ModalId] {
        &self.ids
    }
}
