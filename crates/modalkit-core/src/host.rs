#![forbid(unsafe_code)]

//! Capabilities a UI toolkit provides to the modal manager.
//!
//! The manager never owns element lifecycles. It only holds handles the
//! caller gave it and asks the host to act on them through these traits.
//!
//! # Contract
//!
//! - Every operation is infallible on an attached element.
//! - [`ElementTree::contains`] is inclusive: a root contains itself.
//! - [`ElementTree::tabbables`] returns focus-capable *descendants* of the
//!   root (never the root itself) in tab order.
//! - [`InputChannel::on`] / [`InputChannel::off`] are called in matched
//!   pairs per `(kind, hook)`; the host forwards events of a bound kind to
//!   the manager's `dispatch`.

use std::fmt;
use std::hash::Hash;

use crate::event::EventKind;

/// Element tree operations: stacking, visibility, focus and subtree queries.
pub trait ElementTree {
    /// Opaque handle to a caller-owned element.
    type Element: Clone + Eq + Hash + fmt::Debug;

    /// Apply a stacking value (z-index) to an element.
    fn set_z_index(&mut self, element: &Self::Element, z_index: i32);

    /// Show or hide an element.
    fn set_visible(&mut self, element: &Self::Element, visible: bool);

    /// Move keyboard focus to an element.
    fn focus(&mut self, element: &Self::Element);

    /// Whether `node` is `root` or lies inside its subtree.
    fn contains(&self, root: &Self::Element, node: &Self::Element) -> bool;

    /// Focus-capable descendants of `root`, in tab order.
    fn tabbables(&self, root: &Self::Element) -> Vec<Self::Element>;

    /// First focus-capable descendant of `root` marked for auto-focus.
    fn autofocus_target(&self, root: &Self::Element) -> Option<Self::Element>;

    /// First focus-capable descendant of `root`.
    fn first_tabbable(&self, root: &Self::Element) -> Option<Self::Element> {
        self.tabbables(root).into_iter().next()
    }

    /// First and last focus-capable descendants of `root`.
    ///
    /// Both are the same element when the subtree holds exactly one.
    fn tab_bounds(&self, root: &Self::Element) -> Option<(Self::Element, Self::Element)> {
        let tabbables = self.tabbables(root);
        let first = tabbables.first()?.clone();
        let last = tabbables.last()?.clone();
        Some((first, last))
    }
}

/// Rendering parameters for the dimming layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Stacking value of the overlay itself.
    pub z_index: i32,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl OverlayStyle {
    /// Build a style from an integer opacity percentage in `[0, 100]`.
    ///
    /// Percentages above 100 clamp to fully opaque.
    pub fn from_percent(z_index: i32, opacity_percent: u8) -> Self {
        Self {
            z_index,
            opacity: f32::from(opacity_percent.min(100)) / 100.0,
        }
    }
}

/// Creates and removes the full-viewport dimming layer.
pub trait OverlayHost {
    /// Handle to a live overlay.
    type Overlay;

    /// Insert a full-viewport, fixed-position element as the first child of
    /// the document root.
    fn create_overlay(&mut self, style: OverlayStyle) -> Self::Overlay;

    /// Remove an overlay created by [`OverlayHost::create_overlay`].
    fn destroy_overlay(&mut self, overlay: Self::Overlay);
}

/// Identity of one manager's listener on the global input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

impl HookId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook#{}", self.0)
    }
}

/// Global input channel subscription.
pub trait InputChannel {
    /// Start forwarding events of `kind` for `hook`.
    fn on(&mut self, kind: EventKind, hook: HookId);

    /// Stop forwarding events of `kind` for `hook`.
    fn off(&mut self, kind: EventKind, hook: HookId);
}

/// Everything a modal manager needs from its host.
pub trait Host: ElementTree + OverlayHost + InputChannel {}

impl<T: ElementTree + OverlayHost + InputChannel> Host for T {}
