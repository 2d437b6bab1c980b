#![forbid(unsafe_code)]

//! Registry of modal records keyed by id and by element.
//!
//! # Invariants
//!
//! - Ids are assigned sequentially from 1 and never reused.
//! - Each element handle maps to exactly one id, and back.
//! - Records are never removed; only their `active` flag and stacking
//!   value change over time.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

use crate::config::ModalConfig;
use crate::error::{ModalError, Result};

/// Identifier of a registered modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl ModalId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()?.checked_sub(1)
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered modal.
#[derive(Debug, Clone)]
pub struct ModalRecord<E> {
    id: ModalId,
    pub(crate) config: ModalConfig,
    pub(crate) active: bool,
    element: E,
    pub(crate) current_z: Option<i32>,
}

impl<E> ModalRecord<E> {
    pub fn id(&self) -> ModalId {
        self.id
    }

    /// Current configuration, including the accumulated `z_index_base`.
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Stacking value computed at the most recent `show`, if any.
    pub fn current_z(&self) -> Option<i32> {
        self.current_z
    }
}

/// Modal records with a bidirectional `element <-> id` map.
#[derive(Debug, Clone)]
pub struct Registry<E> {
    records: Vec<ModalRecord<E>>,
    by_element: AHashMap<E, ModalId>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            by_element: AHashMap::new(),
        }
    }
}

impl<E: Clone + Eq + Hash> Registry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element, returning its id.
    ///
    /// Registering an element a second time returns the id from the first
    /// call and discards `config`.
    pub fn register(&mut self, element: E, config: ModalConfig) -> ModalId {
        if let Some(&id) = self.by_element.get(&element) {
            return id;
        }
        let id = ModalId(self.records.len() as u64 + 1);
        self.by_element.insert(element.clone(), id);
        self.records.push(ModalRecord {
            id,
            config,
            active: false,
            element,
            current_z: None,
        });
        id
    }

    /// Look up a record.
    pub fn lookup(&self, id: ModalId) -> Result<&ModalRecord<E>> {
        id.index()
            .and_then(|idx| self.records.get(idx))
            .ok_or(ModalError::NotFound(id))
    }

    /// Look up a record mutably.
    pub fn lookup_mut(&mut self, id: ModalId) -> Result<&mut ModalRecord<E>> {
        id.index()
            .and_then(|idx| self.records.get_mut(idx))
            .ok_or(ModalError::NotFound(id))
    }

    /// Id previously assigned to `element`.
    pub fn id_of(&self, element: &E) -> Option<ModalId> {
        self.by_element.get(element).copied()
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModalRecord<E>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
