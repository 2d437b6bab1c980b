#![forbid(unsafe_code)]

//! Per-modal configuration and manager options.

/// Default stacking value of the first modal shown in a session.
pub const DEFAULT_Z_INDEX_BASE: i32 = 3000;

/// Default overlay opacity, in percent.
pub const DEFAULT_OVERLAY_OPACITY: u8 = 50;

/// Stacking distance between a modal and the one beneath it.
///
/// Also the amount `z_index_base` grows by on every `show`.
pub const Z_STEP: i32 = 100;

/// Configuration stored with a modal at registration.
///
/// # Mutation
///
/// `z_index_base` is not constant. Every successful `show` of the modal adds
/// [`Z_STEP`] to it, whether or not the value was used for that show, and
/// nothing ever resets it. It saturates at `i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    /// Stacking value used when this modal opens onto an empty stack.
    pub z_index_base: i32,
    /// Overlay opacity in `[0, 100]`.
    pub overlay_opacity: u8,
    /// Whether Escape hides this modal while it is topmost.
    pub close_on_escape: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            z_index_base: DEFAULT_Z_INDEX_BASE,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            close_on_escape: true,
        }
    }
}

impl ModalConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base stacking value.
    #[must_use]
    pub fn z_index_base(mut self, z: i32) -> Self {
        self.z_index_base = z;
        self
    }

    /// Set overlay opacity in percent. Values above 100 clamp to 100.
    #[must_use]
    pub fn overlay_opacity(mut self, percent: u8) -> Self {
        self.overlay_opacity = percent.min(100);
        self
    }

    /// Set whether Escape closes the modal.
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub(crate) fn bump_z_index_base(&mut self) {
        self.z_index_base = self.z_index_base.saturating_add(Z_STEP);
    }
}

/// Which stack entry `hide` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HidePolicy {
    /// Remove the requested id from wherever it sits in the stack.
    #[default]
    RemoveById,
    /// Always pop the topmost entry, whatever id was requested.
    ///
    /// Hiding a modal that is not topmost leaves the popped modal marked
    /// active but off the stack, and the requested modal inactive but still
    /// stacked. Kept for hosts that depend on the legacy behavior.
    PopTopmost,
}

/// Options for a [`ModalManager`](crate::ModalManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerOptions {
    pub hide_policy: HidePolicy,
}

impl ManagerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hide policy.
    #[must_use]
    pub fn hide_policy(mut self, policy: HidePolicy) -> Self {
        self.hide_policy = policy;
        self
    }
}
