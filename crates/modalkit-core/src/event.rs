#![forbid(unsafe_code)]

//! Input events routed to the topmost modal.
//!
//! Events are generic over the host's element handle so the focus target
//! travels with the event. A target of `None` means focus sits on the
//! document itself (nothing focused), which always counts as "outside" any
//! modal.

use bitflags::bitflags;

/// The event channels a modal manager subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Global key-down channel.
    KeyDown,
    /// Global pointer-down channel.
    PointerDown,
}

impl EventKind {
    /// Every kind a manager binds while a modal is open.
    pub const ALL: [EventKind; 2] = [EventKind::KeyDown, EventKind::PointerDown];
}

bitflags! {
    /// Keyboard modifier state at the time of the event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Key identity. Only the keys the focus trap cares about get a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    Escape,
    Tab,
    Enter,
    Char(char),
    /// Any other key, identified by the host's raw key code.
    Other(u32),
}

/// A key-down event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent<E> {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// Element holding focus when the key went down.
    pub target: Option<E>,
}

impl<E> KeyEvent<E> {
    /// Create a key event with no modifiers.
    pub fn new(code: KeyCode, target: Option<E>) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            target,
        }
    }

    /// Set modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether shift was held.
    #[inline]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// A pointer-down event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent<E> {
    /// Element under the pointer.
    pub target: Option<E>,
}

impl<E> PointerEvent<E> {
    pub fn new(target: Option<E>) -> Self {
        Self { target }
    }
}

/// An input event delivered from one of the bound channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<E> {
    Key(KeyEvent<E>),
    Pointer(PointerEvent<E>),
}

impl<E> Event<E> {
    /// Shorthand for a plain key-down event.
    pub fn key(code: KeyCode, target: Option<E>) -> Self {
        Self::Key(KeyEvent::new(code, target))
    }

    /// Shorthand for Tab, or Shift+Tab when `backward` is set.
    pub fn tab(target: Option<E>, backward: bool) -> Self {
        let modifiers = if backward {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        Self::Key(KeyEvent::new(KeyCode::Tab, target).with_modifiers(modifiers))
    }

    /// Shorthand for a pointer-down event.
    pub fn pointer_down(target: Option<E>) -> Self {
        Self::Pointer(PointerEvent::new(target))
    }

    /// The channel this event arrives on.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Key(_) => EventKind::KeyDown,
            Self::Pointer(_) => EventKind::PointerDown,
        }
    }

    /// The event's target element, if any.
    pub fn target(&self) -> Option<&E> {
        match self {
            Self::Key(key) => key.target.as_ref(),
            Self::Pointer(pointer) => pointer.target.as_ref(),
        }
    }
}

/// What the host should do with an event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub enum Propagation {
    /// Run the host's default handling (e.g. normal tab traversal).
    #[default]
    Continue,
    /// Suppress the host's default handling.
    PreventDefault,
}

impl Propagation {
    #[inline]
    pub fn is_prevented(self) -> bool {
        self == Self::PreventDefault
    }
}
