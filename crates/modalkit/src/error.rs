#![forbid(unsafe_code)]

//! Errors raised by the modal manager and dialog helper.

use thiserror::Error;

use crate::registry::ModalId;

/// Errors from modal operations.
///
/// Every variant is a caller mistake; none is retried internally and an
/// operation that fails applies no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    /// The id was never returned by `register`.
    #[error("modal {0} is not registered")]
    NotFound(ModalId),
    /// A markup attribute could not be parsed.
    #[error("invalid value {value:?} for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },
    /// No dialog was defined under this name.
    #[error("no dialog named `{0}`")]
    UnknownDialog(String),
    /// The pending confirm dialog has no button with this id.
    #[error("confirm dialog has no button `{0}`")]
    UnknownButton(String),
    /// A confirm button was pressed while the confirm dialog is not shown.
    #[error("confirm dialog is not open")]
    ConfirmNotOpen,
}

impl ModalError {
    pub(crate) fn invalid_attribute(name: &str, value: &str) -> Self {
        Self::InvalidAttribute {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Result alias for modal operations.
pub type Result<T> = std::result::Result<T, ModalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ModalError::NotFound(ModalId::new(4)).to_string(),
            "modal #4 is not registered"
        );
        assert_eq!(
            ModalError::invalid_attribute("dialog-width", "wide").to_string(),
            "invalid value \"wide\" for attribute `dialog-width`"
        );
        assert_eq!(
            ModalError::UnknownDialog("confirm".into()).to_string(),
            "no dialog named `confirm`"
        );
    }
}
