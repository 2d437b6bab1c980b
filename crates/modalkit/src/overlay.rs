#![forbid(unsafe_code)]

//! The shared dimming layer.
//!
//! One overlay exists per open session: it is created when the first modal
//! opens onto an empty stack and removed when the last one closes. Modals
//! stacked on top reuse it; they get no dimming of their own.

use modalkit_core::{OverlayHost, OverlayStyle};

use crate::registry::ModalId;

struct LiveOverlay<O> {
    handle: O,
    owner: ModalId,
    style: OverlayStyle,
}

/// Owns the handle of the live overlay, if any.
pub struct OverlayController<O> {
    live: Option<LiveOverlay<O>>,
}

impl<O> Default for OverlayController<O> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<O> OverlayController<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the overlay for `owner` at stacking value `z`.
    ///
    /// Ignored when an overlay is already live.
    pub fn create<H>(&mut self, host: &mut H, owner: ModalId, z: i32, opacity_percent: u8)
    where
        H: OverlayHost<Overlay = O>,
    {
        if let Some(live) = &self.live {
            tracing::warn!(
                owner = live.owner.get(),
                requested_by = owner.get(),
                "overlay already live; not creating another"
            );
            return;
        }
        let style = OverlayStyle::from_percent(z, opacity_percent);
        let handle = host.create_overlay(style);
        tracing::debug!(
            modal_id = owner.get(),
            z_index = z,
            opacity = style.opacity,
            "overlay created"
        );
        self.live = Some(LiveOverlay {
            handle,
            owner,
            style,
        });
    }

    /// Remove the live overlay. No-op when none is live.
    pub fn destroy<H>(&mut self, host: &mut H)
    where
        H: OverlayHost<Overlay = O>,
    {
        if let Some(live) = self.live.take() {
            host.destroy_overlay(live.handle);
            tracing::debug!(modal_id = live.owner.get(), "overlay destroyed");
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Modal whose opening created the live overlay.
    pub fn owner(&self) -> Option<ModalId> {
        self.live.as_ref().map(|live| live.owner)
    }

    pub fn style(&self) -> Option<OverlayStyle> {
        self.live.as_ref().map(|live| live.style)
    }
}
