#![forbid(unsafe_code)]

//! Named dialogs opened through a [`ModalManager`].
//!
//! A [`DialogBook`] maps names to caller-owned dialog elements plus a
//! [`DialogSpec`] (title, container size, backdrop behavior, modal config).
//! Opening a dialog registers its element on first use, applies title and
//! size through [`DialogHost`], shows it, and resets its scroll position.
//!
//! Specs are usually read from markup attributes:
//!
//! ```ignore
//! let spec = DialogSpec::from_attributes([
//!     ("dialog-title", "Rename profile"),
//!     ("dialog-min-width", "320px"),
//!     ("dialog-max-height", "80%"),
//! ])?;
//! book.define("rename", element, spec);
//! book.open(&mut manager, "rename")?;
//! ```
//!
//! The `confirm` dialog is special: [`DialogBook::confirm`] fills it with a
//! message and buttons, and [`DialogBook::press`] closes it and reports
//! which button was chosen.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use modalkit_core::{ElementTree, Host};

use crate::config::ModalConfig;
use crate::error::{ModalError, Result};
use crate::manager::ModalManager;
use crate::registry::ModalId;

/// Name under which the shared confirm dialog must be defined.
pub const CONFIRM_DIALOG: &str = "confirm";

pub const ATTR_TITLE: &str = "dialog-title";
pub const ATTR_WIDTH: &str = "dialog-width";
pub const ATTR_HEIGHT: &str = "dialog-height";
pub const ATTR_MIN_WIDTH: &str = "dialog-min-width";
pub const ATTR_MAX_WIDTH: &str = "dialog-max-width";
pub const ATTR_MIN_HEIGHT: &str = "dialog-min-height";
pub const ATTR_MAX_HEIGHT: &str = "dialog-max-height";
pub const ATTR_CLOSE_ON_BACKDROP: &str = "dialog-close-on-backdrop";
pub const ATTR_Z_INDEX: &str = "dialog-z-index";
pub const ATTR_OVERLAY: &str = "dialog-overlay";

/// A container dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Absolute length in pixels.
    Px(u32),
    /// Percentage of the viewport.
    Percent(u16),
}

impl Dimension {
    /// Parse `"400px"`, `"400"` or `"80%"`. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(percent) = value.strip_suffix('%') {
            return percent.trim_end().parse().ok().map(Self::Percent);
        }
        let px = value.strip_suffix("px").unwrap_or(value).trim_end();
        px.parse().ok().map(Self::Px)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Size constraints for a dialog's main container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogSize {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_height: Option<Dimension>,
}

impl DialogSize {
    /// Create an unconstrained size spec.
    pub const fn new() -> Self {
        Self {
            width: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
        }
    }

    pub fn width(mut self, value: Dimension) -> Self {
        self.width = Some(value);
        self
    }

    pub fn height(mut self, value: Dimension) -> Self {
        self.height = Some(value);
        self
    }

    pub fn min_width(mut self, value: Dimension) -> Self {
        self.min_width = Some(value);
        self
    }

    pub fn max_width(mut self, value: Dimension) -> Self {
        self.max_width = Some(value);
        self
    }

    pub fn min_height(mut self, value: Dimension) -> Self {
        self.min_height = Some(value);
        self
    }

    pub fn max_height(mut self, value: Dimension) -> Self {
        self.max_height = Some(value);
        self
    }

    /// Whether no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::new()
    }
}

/// Everything needed to present a named dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogSpec {
    pub title: Option<String>,
    pub size: DialogSize,
    /// Whether a click on the dialog's backdrop area closes it.
    pub close_on_backdrop: bool,
    pub config: ModalConfig,
}

impl Default for DialogSpec {
    fn default() -> Self {
        Self {
            title: None,
            size: DialogSize::new(),
            close_on_backdrop: true,
            config: ModalConfig::default(),
        }
    }
}

impl DialogSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    pub fn config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a spec from `(name, value)` markup attributes.
    ///
    /// Unknown attribute names are ignored. An empty title counts as no
    /// title.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut spec = Self::default();
        for (name, value) in attributes {
            match name {
                ATTR_TITLE => {
                    spec.title = (!value.is_empty()).then(|| value.to_owned());
                }
                ATTR_WIDTH => spec.size.width = Some(dimension(name, value)?),
                ATTR_HEIGHT => spec.size.height = Some(dimension(name, value)?),
                ATTR_MIN_WIDTH => spec.size.min_width = Some(dimension(name, value)?),
                ATTR_MAX_WIDTH => spec.size.max_width = Some(dimension(name, value)?),
                ATTR_MIN_HEIGHT => spec.size.min_height = Some(dimension(name, value)?),
                ATTR_MAX_HEIGHT => spec.size.max_height = Some(dimension(name, value)?),
                ATTR_CLOSE_ON_BACKDROP => {
                    spec.close_on_backdrop = match value.trim() {
                        "" | "true" => true,
                        "false" => false,
                        _ => return Err(ModalError::invalid_attribute(name, value)),
                    };
                }
                ATTR_Z_INDEX => {
                    let z = value
                        .trim()
                        .parse()
                        .map_err(|_| ModalError::invalid_attribute(name, value))?;
                    spec.config = spec.config.z_index_base(z);
                }
                ATTR_OVERLAY => {
                    let percent = value
                        .trim()
                        .parse::<u8>()
                        .ok()
                        .filter(|p| *p <= 100)
                        .ok_or_else(|| ModalError::invalid_attribute(name, value))?;
                    spec.config = spec.config.overlay_opacity(percent);
                }
                _ => {}
            }
        }
        Ok(spec)
    }
}

fn dimension(name: &str, value: &str) -> Result<Dimension> {
    Dimension::parse(value).ok_or_else(|| ModalError::invalid_attribute(name, value))
}

/// Dialog presentation capabilities on top of [`ElementTree`].
pub trait DialogHost: ElementTree {
    /// Show `title` in the dialog's title bar, or a bar without title.
    fn set_title(&mut self, element: &Self::Element, title: Option<&str>);

    /// Apply size constraints to the dialog's main container.
    fn set_size(&mut self, element: &Self::Element, size: &DialogSize);

    /// Scroll the dialog body back to the top.
    fn reset_scroll(&mut self, element: &Self::Element);
}

/// A button in the confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmButton {
    /// Display label.
    pub label: String,
    /// Action identifier reported by [`DialogBook::press`].
    pub id: String,
}

impl ConfirmButton {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
        }
    }
}

/// Content of the confirm dialog while it waits for a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub title: String,
    pub text: String,
    pub buttons: Vec<ConfirmButton>,
}

#[derive(Debug, Clone)]
struct DialogEntry<E> {
    element: E,
    spec: DialogSpec,
}

/// Named dialog definitions.
#[derive(Debug, Clone)]
pub struct DialogBook<E> {
    dialogs: AHashMap<String, DialogEntry<E>>,
    pending: Option<PendingConfirm>,
}

impl<E> Default for DialogBook<E> {
    fn default() -> Self {
        Self {
            dialogs: AHashMap::new(),
            pending: None,
        }
    }
}

impl<E: Clone + Eq + Hash + fmt::Debug> DialogBook<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a named dialog.
    ///
    /// Redefining a dialog whose element is already registered keeps the
    /// registered modal config; title and size apply from the next `open`.
    pub fn define(&mut self, name: impl Into<String>, element: E, spec: DialogSpec) {
        self.dialogs.insert(name.into(), DialogEntry { element, spec });
    }

    pub fn spec(&self, name: &str) -> Option<&DialogSpec> {
        self.dialogs.get(name).map(|entry| &entry.spec)
    }

    pub fn element(&self, name: &str) -> Option<&E> {
        self.dialogs.get(name).map(|entry| &entry.element)
    }

    fn entry(&self, name: &str) -> Result<&DialogEntry<E>> {
        self.dialogs
            .get(name)
            .ok_or_else(|| ModalError::UnknownDialog(name.to_owned()))
    }

    /// Register (if needed), decorate and show a named dialog.
    pub fn open<H>(&mut self, manager: &mut ModalManager<H>, name: &str) -> Result<ModalId>
    where
        H: Host<Element = E> + DialogHost,
    {
        let entry = self.entry(name)?;
        let id = manager.register(entry.element.clone(), entry.spec.config);

        let host = manager.host_mut();
        host.set_title(&entry.element, entry.spec.title.as_deref());
        host.set_size(&entry.element, &entry.spec.size);

        manager.show(id)?;
        manager.host_mut().reset_scroll(&entry.element);
        tracing::debug!(dialog = name, modal_id = id.get(), "dialog opened");
        Ok(id)
    }

    /// Hide a named dialog. A dialog that was never opened is left alone.
    pub fn close<H>(&mut self, manager: &mut ModalManager<H>, name: &str) -> Result<()>
    where
        H: Host<Element = E>,
    {
        let entry = self.entry(name)?;
        if let Some(id) = manager.id_of(&entry.element) {
            manager.hide(id)?;
        }
        if name == CONFIRM_DIALOG {
            self.pending = None;
        }
        Ok(())
    }

    /// Whether a named dialog is currently shown.
    pub fn is_open<H>(&self, manager: &ModalManager<H>, name: &str) -> bool
    where
        H: Host<Element = E>,
    {
        self.dialogs
            .get(name)
            .and_then(|entry| manager.id_of(&entry.element))
            .is_some_and(|id| manager.is_active(id))
    }

    /// Handle a click on a dialog.
    ///
    /// A click whose target is the dialog element itself (its backdrop area,
    /// outside the main container) closes the dialog when the spec allows
    /// it. Returns whether the dialog was closed.
    pub fn handle_click<H>(
        &mut self,
        manager: &mut ModalManager<H>,
        name: &str,
        target: &E,
    ) -> Result<bool>
    where
        H: Host<Element = E>,
    {
        let entry = self.entry(name)?;
        if !entry.spec.close_on_backdrop || *target != entry.element {
            return Ok(false);
        }
        let Some(id) = manager.id_of(&entry.element) else {
            return Ok(false);
        };
        if !manager.is_active(id) {
            return Ok(false);
        }
        self.close(manager, name)?;
        Ok(true)
    }

    /// Open the confirm dialog with a message and buttons.
    pub fn confirm<H>(
        &mut self,
        manager: &mut ModalManager<H>,
        title: impl Into<String>,
        text: impl Into<String>,
        buttons: Vec<ConfirmButton>,
    ) -> Result<ModalId>
    where
        H: Host<Element = E> + DialogHost,
    {
        let title = title.into();
        let entry = self
            .dialogs
            .get_mut(CONFIRM_DIALOG)
            .ok_or_else(|| ModalError::UnknownDialog(CONFIRM_DIALOG.to_owned()))?;
        entry.spec.title = Some(title.clone());
        self.pending = Some(PendingConfirm {
            title,
            text: text.into(),
            buttons,
        });
        self.open(manager, CONFIRM_DIALOG)
    }

    /// Message and buttons of the confirm dialog while it is shown.
    pub fn pending_confirm<H>(&self, manager: &ModalManager<H>) -> Option<&PendingConfirm>
    where
        H: Host<Element = E>,
    {
        self.pending
            .as_ref()
            .filter(|_| self.is_open(manager, CONFIRM_DIALOG))
    }

    /// Choose a confirm button: closes the confirm dialog and returns the
    /// button's action id.
    ///
    /// Fails with [`ModalError::ConfirmNotOpen`] once the confirm dialog has
    /// been dismissed by other means, such as Escape.
    pub fn press<H>(&mut self, manager: &mut ModalManager<H>, button_id: &str) -> Result<String>
    where
        H: Host<Element = E>,
    {
        if !self.is_open(manager, CONFIRM_DIALOG) {
            self.pending = None;
            return Err(ModalError::ConfirmNotOpen);
        }
        let chosen = self
            .pending
            .as_ref()
            .and_then(|pending| pending.buttons.iter().find(|b| b.id == button_id))
            .map(|button| button.id.clone())
            .ok_or_else(|| ModalError::UnknownButton(button_id.to_owned()))?;
        self.close(manager, CONFIRM_DIALOG)?;
        Ok(chosen)
    }
}
