//! View states of the calculator shell.

use serde::{Deserialize, Serialize};

use vacpoints_core::quote::UserMode;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    #[default]
    RenterCalculator,
    OwnerCalculator,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "mode")]
pub enum NavAction {
    SwitchMode(UserMode),
    OpenEditor,
    BackToCalculator,
}

impl View {
    pub fn mode(self) -> Option<UserMode> {
        match self {
            Self::RenterCalculator => Some(UserMode::Renter),
            Self::OwnerCalculator => Some(UserMode::Owner),
            Self::Editor => None,
        }
    }

    /// Editor is reachable only from the owner calculator and returns there.
    fn transition(self, action: NavAction) -> Result<View, AppError> {
        match (self, action) {
            (Self::RenterCalculator | Self::OwnerCalculator, NavAction::SwitchMode(mode)) => {
                Ok(match mode {
                    UserMode::Renter => Self::RenterCalculator,
                    UserMode::Owner => Self::OwnerCalculator,
                })
            }
            (Self::OwnerCalculator, NavAction::OpenEditor) => Ok(Self::Editor),
            (Self::Editor, NavAction::BackToCalculator) => Ok(Self::OwnerCalculator),
            (view, action) => Err(AppError::Navigation(format!(
                "{action:?} is not available from {view:?}"
            ))),
        }
    }
}

/// Current view of one user session.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    current: View,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a session the client has been driving.
    pub fn resume(view: View) -> Self {
        Self { current: view }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn dispatch(&mut self, action: NavAction) -> Result<View, AppError> {
        self.current = self.current.transition(action)?;
        Ok(self.current)
    }
}
