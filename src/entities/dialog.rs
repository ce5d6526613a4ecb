use serde::{Deserialize, Serialize};

use crate::error::{invalid_state_error, Error};

/// The creation dialog. `Open` is left only by a cancel or a successful submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Dialog {
    #[default]
    Closed,
    Open,
}

impl Dialog {
    pub fn name(&self) -> String {
        match self {
            Self::Closed => "closed".into(),
            Self::Open => "open".into(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    #[tracing::instrument]
    pub fn open(&mut self) {
        *self = Self::Open;
    }

    #[tracing::instrument]
    pub fn cancel(&mut self) -> Result<(), Error> {
        match self {
            Self::Open => {
                *self = Self::Closed;
                Ok(())
            }
            Self::Closed => Err(invalid_state_error()),
        }
    }

    /// Guard for a submission; the dialog must be open.
    pub fn ensure_open(&self) -> Result<(), Error> {
        match self {
            Self::Open => Ok(()),
            Self::Closed => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument]
    pub fn complete(&mut self) -> Result<(), Error> {
        self.ensure_open()?;
        *self = Self::Closed;

        Ok(())
    }
}

#[test]
fn open_is_reentrant() {
    let mut dialog = Dialog::default();

    dialog.open();
    dialog.open();

    assert!(dialog.is_open());
}

#[test]
fn cancel_closes_an_open_dialog() {
    let mut dialog = Dialog::Open;

    dialog.cancel().unwrap();

    assert_eq!(dialog, Dialog::Closed);
}

#[test]
fn closed_dialog_rejects_cancel_and_complete() {
    let mut dialog = Dialog::Closed;

    assert!(dialog.cancel().unwrap_err().is_invalid_state_error());
    assert!(dialog.complete().unwrap_err().is_invalid_state_error());
    assert_eq!(dialog, Dialog::Closed);
}

#[test]
fn dialog_serializes_as_tagged_name() {
    let value = serde_json::to_value(Dialog::Open).unwrap();

    assert_eq!(value, serde_json::json!({ "name": "open" }));
    assert_eq!(Dialog::Open.name(), "open");
}
